use imframe_core::{PopupRef, SettingsStore, WindowFlags};

use crate::Context;
use crate::context::NextWindowData;

const POPUP_FLAGS: WindowFlags = WindowFlags::POPUP
    .union(WindowFlags::NO_TITLE_BAR)
    .union(WindowFlags::NO_MOVE)
    .union(WindowFlags::NO_RESIZE)
    .union(WindowFlags::NO_SAVED_SETTINGS)
    .union(WindowFlags::ALWAYS_AUTO_RESIZE);

impl<S: SettingsStore> Context<S> {
    /// Marks the popup `str_id` (in the current window's scope) open at the
    /// current popup depth. Popups opened deeper than that are closed.
    pub fn open_popup(&mut self, str_id: &str) {
        let key = self.current_key("open_popup");
        let mouse = self.mouse_pos;
        let w = &mut self.windows[key];
        let id = w.get_id(str_id, None);
        let menu_set = w.get_id("##menus", None);
        let popup = PopupRef::new(id, key, menu_set, mouse);

        let depth = self.current_popup_stack.len();
        match self.open_popup_stack.get(depth) {
            None => self.open_popup_stack.push(popup),
            Some(open) if open.popup_id != id => {
                self.open_popup_stack.truncate(depth);
                self.open_popup_stack.push(popup);
            }
            Some(_) => return,
        }
        log::debug!("popup {str_id:?} ({id:#x}) opened at depth {depth}");
    }

    pub fn is_popup_open(&self, str_id: &str) -> bool {
        let Some(w) = self.current_window() else {
            return false;
        };
        let id = w.get_id_no_keep_alive(str_id, None);
        self.open_popup_stack
            .get(self.current_popup_stack.len())
            .is_some_and(|p| p.popup_id == id)
    }

    /// Begins the popup window for `str_id` if it is open. Call
    /// [`end_popup`](Self::end_popup) only when this returns true.
    pub fn begin_popup(&mut self, str_id: &str) -> bool {
        if !self.is_popup_open(str_id) {
            self.next_window = NextWindowData::default();
            return false;
        }
        let id = self.get_id(str_id);
        let name = format!("##popup_{id:08x}");
        let opened = self.begin(&name, POPUP_FLAGS);
        if !opened {
            self.end_popup();
        }
        opened
    }

    pub fn end_popup(&mut self) {
        let key = self.current_key("end_popup");
        assert!(
            self.windows[key].is_popup(),
            "end_popup: current window {:?} is not a popup",
            self.windows[key].name
        );
        assert!(
            !self.current_popup_stack.is_empty(),
            "end_popup: no popup being visited"
        );
        self.end();
    }

    /// Closes the popup being visited and everything opened from it.
    pub fn close_current_popup(&mut self) {
        let Some(mut level) = self.current_popup_stack.len().checked_sub(1) else {
            log::warn!("close_current_popup: no popup being visited");
            return;
        };
        // a child menu closes along with the menu that opened it
        while level > 0
            && self
                .open_popup_stack
                .get(level)
                .and_then(|p| p.resolve(&self.windows))
                .is_some_and(|w| w.flags.contains(WindowFlags::CHILD_MENU))
        {
            level -= 1;
        }
        self.close_popup_to_level(level);
    }

    fn close_popup_to_level(&mut self, level: usize) {
        if level >= self.open_popup_stack.len() {
            log::warn!("popup at depth {level} is already closed");
            return;
        }
        let refocus = if level > 0 {
            self.open_popup_stack[level - 1].window
        } else {
            Some(self.open_popup_stack[level].parent_window)
        };
        log::debug!(
            "closing {} popup(s) from depth {level}",
            self.open_popup_stack.len() - level
        );
        self.open_popup_stack.truncate(level);
        self.focus_window(refocus);
    }

    pub fn open_popup_count(&self) -> usize {
        self.open_popup_stack.len()
    }
}
