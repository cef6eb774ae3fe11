//! Owning table of every window, keyed by hashed name.
//!
//! Windows are created on first `begin` and live until [`Windows::sweep`]
//! reclaims them after a long stretch without visits. Creation order is kept
//! separately from the slot map so root traversal is stable; focusing a
//! window moves it to the back (on top).

use std::ops::{Index, IndexMut};

use ahash::AHashMap;
use slotmap::SlotMap;

use crate::id::{Id, hash_str};
use crate::window::{Window, WindowKey};
use crate::Vec2;

#[derive(Debug, Default)]
pub struct Windows {
    slots: SlotMap<WindowKey, Window>,
    by_id: AHashMap<Id, WindowKey>,
    /// Back-to-front order of all windows.
    order: Vec<WindowKey>,
}

impl Windows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, key: WindowKey) -> Option<&Window> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: WindowKey) -> Option<&mut Window> {
        self.slots.get_mut(key)
    }

    pub fn find_by_id(&self, id: Id) -> Option<WindowKey> {
        self.by_id.get(&id).copied()
    }

    pub fn find_by_name(&self, name: &str) -> Option<WindowKey> {
        self.find_by_id(hash_str(name, None, 0))
    }

    /// Takes ownership of `window` and returns its key. The window becomes
    /// its own root until a parent says otherwise.
    pub fn insert(&mut self, window: Window) -> WindowKey {
        assert!(
            !self.by_id.contains_key(&window.id),
            "Windows::insert: a window named {:?} already exists",
            window.name
        );
        let key = self.slots.insert_with_key(|key| {
            let mut window = window;
            window.key = key;
            window.root_window = key;
            window.root_non_popup_window = key;
            window
        });
        let id = self.slots[key].id;
        self.by_id.insert(id, key);
        self.order.push(key);
        log::debug!("window {:?} created ({} total)", self.slots[key].name, self.slots.len());
        key
    }

    /// Keys back to front.
    pub fn order(&self) -> &[WindowKey] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.order.iter().filter_map(|&k| self.slots.get(k))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.slots.values_mut()
    }

    /// Moves `key` to the front (end of the back-to-front order).
    pub fn bring_to_front(&mut self, key: WindowKey) {
        if let Some(i) = self.order.iter().position(|&k| k == key) {
            let k = self.order.remove(i);
            self.order.push(k);
        }
    }

    /// Removes every window not visited in the last `max_inactive_frames`
    /// frames. Returns the removed windows, oldest first.
    pub fn sweep(&mut self, current_frame: i64, max_inactive_frames: u32) -> Vec<Window> {
        let threshold = current_frame - i64::from(max_inactive_frames);
        let stale: Vec<WindowKey> = self
            .order
            .iter()
            .copied()
            .filter(|&k| self.slots[k].last_frame_active < threshold)
            .collect();
        if stale.is_empty() {
            return Vec::new();
        }
        self.order.retain(|k| !stale.contains(k));
        let removed: Vec<Window> = stale
            .into_iter()
            .filter_map(|k| self.slots.remove(k))
            .inspect(|w| {
                self.by_id.remove(&w.id);
            })
            .collect();
        log::debug!(
            "swept {} inactive window(s): {:?}",
            removed.len(),
            removed.iter().map(|w| w.name.as_str()).collect::<Vec<_>>()
        );
        removed
    }

    /// Root windows in paint order: regular windows, then popups, then
    /// tooltips, each with its visible children.
    pub fn render_list(&self) -> Vec<Id> {
        let mut out = Vec::with_capacity(self.len());
        let layers: [fn(&Window) -> bool; 3] = [
            |w: &Window| !w.is_popup() && !w.is_tooltip(),
            |w: &Window| w.is_popup(),
            |w: &Window| w.is_tooltip(),
        ];
        for in_layer in layers {
            for w in self.iter() {
                if w.active && w.hidden_frames == 0 && !w.is_child() && in_layer(w) {
                    w.add_to(self, &mut out);
                }
            }
        }
        out
    }

    /// Every window in back-to-front hit-test order, children right after
    /// their parent.
    pub fn sorted(&self) -> Vec<WindowKey> {
        let mut out = Vec::with_capacity(self.len());
        for w in self.iter() {
            if w.is_child() {
                continue;
            }
            w.add_to_sorted(self, &mut out);
        }
        out
    }

    /// Front-most visible window under `pos`.
    pub fn find_hovered(&self, pos: Vec2) -> Option<WindowKey> {
        self.sorted().into_iter().rev().find(|&k| {
            let w = &self.slots[k];
            w.active && w.hidden_frames == 0 && w.window_rect_clipped.contains(pos)
        })
    }
}

impl Index<WindowKey> for Windows {
    type Output = Window;

    fn index(&self, key: WindowKey) -> &Window {
        &self.slots[key]
    }
}

impl IndexMut<WindowKey> for Windows {
    fn index_mut(&mut self, key: WindowKey) -> &mut Window {
        &mut self.slots[key]
    }
}
