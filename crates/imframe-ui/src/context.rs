//! # Frame driver
//!
//! [`Context`] owns everything that outlives a single call: the window
//! registry, the focused and hovered windows, the active id, the open popups,
//! the colour/style-var stacks and the one [`TextEditState`].
//!
//! A frame is `new_frame`, any number of strictly nested `begin`/`end`
//! pairs with widget calls in between, then `end_frame`:
//!
//! ```rust
//! use imframe_core::{Vec2, WindowFlags};
//! use imframe_ui::Context;
//!
//! let mut ctx: Context = Context::default();
//! for _ in 0..3 {
//!     ctx.new_frame();
//!     if ctx.begin("Stats", WindowFlags::empty()) {
//!         ctx.item_size(Vec2::new(120.0, 16.0));
//!     }
//!     ctx.end();
//!     ctx.end_frame();
//! }
//! let ids = ctx.render_list();
//! assert_eq!(ids.len(), 1);
//! ```
//!
//! `begin` returns false when the window is collapsed; `end` must be called
//! either way.

use imframe_core::{
    ColMod, Config, Id, MemorySettings, PopupRef, Rect, SetCond, SettingsStore, StyleMod, Vec2,
    Window, WindowFlags, WindowKey, Windows,
};
use imframe_text::TextEditState;

/// Stack names for `stack_sizes_backup` slots, used in balance failures.
const STACK_NAMES: [&str; 6] = [
    "id",
    "group",
    "popup",
    "style color",
    "style var",
    "item width",
];

/// Requests made with `set_next_window_*`, consumed by the next `begin`.
#[derive(Clone, Debug, Default)]
pub(crate) struct NextWindowData {
    pub pos: Option<(Vec2, SetCond)>,
    pub size: Option<(Vec2, SetCond)>,
    pub collapsed: Option<(bool, SetCond)>,
    pub content_size: Option<Vec2>,
    pub size_constraint: Option<Rect>,
}

pub struct Context<S: SettingsStore = MemorySettings> {
    pub config: Config,
    pub windows: Windows,
    settings: S,
    frame_count: i64,
    frame_open: bool,
    pub mouse_pos: Vec2,

    pub(crate) current_window_stack: Vec<WindowKey>,
    pub(crate) current_window: Option<WindowKey>,
    focused_window: Option<WindowKey>,
    hovered_window: Option<WindowKey>,

    active_id: Id,
    /// `set_active_id` was called this frame.
    active_id_set_this_frame: bool,
    active_id_previous_frame: Id,

    pub(crate) color_modifiers: Vec<ColMod>,
    pub(crate) style_modifiers: Vec<StyleMod>,
    pub(crate) open_popup_stack: Vec<PopupRef>,
    pub(crate) current_popup_stack: Vec<PopupRef>,
    pub(crate) next_window: NextWindowData,

    text_edit: Option<TextEditState>,
}

impl Default for Context<MemorySettings> {
    fn default() -> Self {
        Self::new(Config::default(), MemorySettings::new())
    }
}

impl<S: SettingsStore> Context<S> {
    pub fn new(config: Config, settings: S) -> Self {
        Self {
            config,
            windows: Windows::new(),
            settings,
            frame_count: 0,
            frame_open: false,
            mouse_pos: Vec2::new(-1.0, -1.0),
            current_window_stack: Vec::new(),
            current_window: None,
            focused_window: None,
            hovered_window: None,
            active_id: 0,
            active_id_set_this_frame: false,
            active_id_previous_frame: 0,
            color_modifiers: Vec::new(),
            style_modifiers: Vec::new(),
            open_popup_stack: Vec::new(),
            current_popup_stack: Vec::new(),
            next_window: NextWindowData::default(),
            text_edit: None,
        }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    // Frame

    pub fn new_frame(&mut self) {
        assert!(!self.frame_open, "new_frame: previous frame was not ended");
        self.frame_count += 1;
        self.frame_open = true;
        self.active_id_set_this_frame = false;
        self.active_id_previous_frame = self.active_id;

        for w in self.windows.iter_mut() {
            w.was_active = w.active;
            w.active = false;
            w.accessed = false;
        }
        self.hovered_window = self.windows.find_hovered(self.mouse_pos);
        log::trace!(
            "frame {} begins ({} windows)",
            self.frame_count,
            self.windows.len()
        );
    }

    pub fn end_frame(&mut self) {
        assert!(self.frame_open, "end_frame: no frame in progress");
        if !self.current_window_stack.is_empty() {
            let open: Vec<&str> = self
                .current_window_stack
                .iter()
                .map(|&k| self.windows[k].name.as_str())
                .collect();
            panic!("end_frame: windows still open, missing end() for {open:?}");
        }
        assert!(
            self.next_window.size_constraint.is_none(),
            "end_frame: set_next_window_size_constraint was not consumed by a begin"
        );

        if self.active_id != 0 && !self.is_active_id_alive() {
            log::trace!("active id {:#x} was not kept alive; clearing", self.active_id);
            self.active_id = 0;
        }
        self.next_window = NextWindowData::default();
        self.frame_open = false;
    }

    fn is_active_id_alive(&self) -> bool {
        self.active_id_set_this_frame
            || self
                .windows
                .iter()
                .any(|w| w.active && w.dc.is_alive(self.active_id))
    }

    // Windows

    fn create_window(&mut self, name: &str, flags: WindowFlags) -> WindowKey {
        let mut w = Window::new(name);
        w.flags = flags;
        w.pos_f = self.config.default_window_pos;
        w.pos = w.pos_f.trunc();
        if !flags.contains(WindowFlags::NO_SAVED_SETTINGS)
            && let Some(saved) = self.settings.load(w.id)
        {
            log::debug!("window {name:?} restored from settings");
            w.apply_settings(&saved);
        }
        if w.size_full.x <= 0.0 || w.size_full.y <= 0.0 {
            w.auto_fit_frames = [imframe_core::window::AUTO_FIT_FRAMES; 2];
            w.auto_fit_only_grows = false;
        }
        w.size = w.size_full;
        self.windows.insert(w)
    }

    /// Starts a visit of the window called `name`, creating it on first use.
    /// Returns false when its contents need not be submitted.
    pub fn begin(&mut self, name: &str, flags: WindowFlags) -> bool {
        assert!(
            self.frame_open,
            "begin({name:?}): call new_frame before beginning windows"
        );
        let style = self.config.style.clone();
        let next = std::mem::take(&mut self.next_window);
        let parent = self.current_window;
        let key = match self.windows.find_by_name(name) {
            Some(k) => k,
            None => self.create_window(name, flags),
        };
        let frame = self.frame_count;
        let first_begin = self.windows[key].last_frame_active != frame;
        let mut appearing = self.windows[key].mark_visited(frame);

        let mut popup_ref = None;
        if flags.contains(WindowFlags::POPUP) {
            let depth = self.current_popup_stack.len();
            let slot = self.open_popup_stack.get_mut(depth).unwrap_or_else(|| {
                panic!("begin({name:?}): popup window begun with no popup open at depth {depth}")
            });
            slot.window = Some(key);
            let r = slot.clone();
            let w = &mut self.windows[key];
            if w.popup_id != r.popup_id {
                appearing = true;
                w.popup_id = r.popup_id;
            }
            self.current_popup_stack.push(r.clone());
            popup_ref = Some(r);
        }

        self.current_window_stack.push(key);
        self.current_window = Some(key);

        if first_begin {
            let is_child = flags.contains(WindowFlags::CHILD_WINDOW);
            let is_popup = flags.contains(WindowFlags::POPUP);
            let parent_info = parent.map(|p| {
                let pw = &self.windows[p];
                (pw.root_window, pw.root_non_popup_window, pw.dc.cursor_pos, pw.clip_rect)
            });
            if is_child && let Some(p) = parent {
                let siblings = &mut self.windows[p].dc.child_windows;
                let idx = siblings.len();
                siblings.push(key);
                self.windows[key].index_within_parent = idx;
            }
            let w = &mut self.windows[key];
            w.flags = flags;
            w.parent_window = parent;
            w.root_window = key;
            w.root_non_popup_window = key;
            if let Some((root, root_non_popup, _, _)) = parent_info {
                if is_child {
                    w.root_window = root;
                }
                if is_child || is_popup {
                    w.root_non_popup_window = root_non_popup;
                }
            }
            if w.hidden_frames > 0 {
                w.hidden_frames -= 1;
            }
            if appearing && is_popup {
                w.hidden_frames = 1;
            }

            w.size_contents_explicit = next.content_size.unwrap_or(Vec2::ZERO);
            w.measure_contents();
            w.window_padding = if is_child
                && !flags.intersects(WindowFlags::POPUP | WindowFlags::COMBO_BOX)
            {
                Vec2::ZERO
            } else {
                style.window_padding
            };

            if let Some((pos, cond)) = next.pos {
                w.set_pos(pos, cond);
            } else if is_child && !is_popup && let Some((_, _, cursor, _)) = parent_info {
                w.pos_f = cursor;
                w.pos = cursor.trunc();
            } else if appearing && let Some(r) = &popup_ref {
                w.pos_f = r.mouse_pos_on_open;
                w.pos = r.mouse_pos_on_open.trunc();
            } else if flags.contains(WindowFlags::TOOLTIP) {
                w.pos_f = self.mouse_pos + Vec2::new(16.0, 8.0);
                w.pos = w.pos_f.trunc();
            }
            if let Some((size, cond)) = next.size {
                w.set_size(size, cond);
            }
            if let Some((collapsed, cond)) = next.collapsed {
                w.set_collapsed(collapsed, cond);
            }

            w.apply_auto_fit(&style);
            let requested = w.size_full;
            w.apply_size_full_with_constraint(requested, next.size_constraint.as_ref(), &style);
            let title_h = w.title_bar_height(&style);
            w.size = if w.collapsed && !flags.contains(WindowFlags::NO_TITLE_BAR) {
                Vec2::new(w.size_full.x, title_h)
            } else {
                w.size_full
            };

            let bars_h = title_h + w.menu_bar_height(&style);
            w.scrollbar = [
                false,
                !flags.contains(WindowFlags::NO_SCROLLBAR)
                    && !w.collapsed
                    && w.size_contents.y > w.size_full.y - bars_h,
            ];
            w.scrollbar_sizes = Vec2::new(
                if w.scrollbar[1] { style.scrollbar_size } else { 0.0 },
                0.0,
            );
            w.apply_scroll_target(bars_h);

            w.item_width_default = if w.size.x > 0.0
                && !flags.intersects(WindowFlags::TOOLTIP | WindowFlags::ALWAYS_AUTO_RESIZE)
            {
                (w.size.x * 0.65).trunc()
            } else {
                (style.font_size * 16.0).trunc()
            };
            w.id_stack.truncate_to_root();
            w.reset_draw_context(&style);

            let mut clipped = w.rect();
            if is_child && let Some((_, _, _, parent_clip)) = parent_info {
                clipped.clip(&parent_clip);
            }
            w.window_rect_clipped = clipped;
            w.clip_rect = clipped;
            w.skip_items = w.collapsed && w.auto_fit_frames.iter().all(|&f| f <= 0);
            w.dc.stack_sizes_backup = [
                w.id_stack.depth(),
                w.dc.group_depth(),
                self.current_popup_stack.len(),
                self.color_modifiers.len(),
                self.style_modifiers.len(),
                w.dc.item_width_depth(),
            ];

            if appearing {
                log::trace!("window {name:?} appearing at frame {frame}");
                if is_popup {
                    self.focus_window(Some(key));
                }
            }
        } else {
            // appending to a window already begun this frame
            let w = &mut self.windows[key];
            if let Some((pos, cond)) = next.pos {
                w.set_pos(pos, cond);
            }
            if let Some((size, cond)) = next.size {
                w.set_size(size, cond);
            }
            if let Some((collapsed, cond)) = next.collapsed {
                w.set_collapsed(collapsed, cond);
            }
            if let Some(size) = next.content_size {
                w.size_contents_explicit = size;
            }
            if next.size.is_some() || next.size_constraint.is_some() {
                let requested = w.size_full;
                w.apply_size_full_with_constraint(requested, next.size_constraint.as_ref(), &style);
                if !w.collapsed {
                    w.size = w.size_full;
                }
            }
        }

        !self.windows[key].skip_items
    }

    /// Closes the innermost `begin`.
    pub fn end(&mut self) {
        let key = self.current_key("end");
        let w = &self.windows[key];
        w.dc.assert_columns_closed();
        let now = [
            w.id_stack.depth(),
            w.dc.group_depth(),
            self.current_popup_stack.len(),
            self.color_modifiers.len(),
            self.style_modifiers.len(),
            w.dc.item_width_depth(),
        ];
        for (slot, (&saved, &current)) in w.dc.stack_sizes_backup.iter().zip(&now).enumerate() {
            assert!(
                saved == current,
                "end({:?}): {} stack has {current} entries, {saved} at begin",
                w.name,
                STACK_NAMES[slot]
            );
        }

        if w.is_popup() {
            self.current_popup_stack.pop();
        }
        self.current_window_stack.pop();
        self.current_window = self.current_window_stack.last().copied();
    }

    /// Begins a child window laid out as one item of the current window.
    /// A non-positive `size` axis fills the remaining space minus its
    /// magnitude.
    pub fn begin_child(&mut self, str_id: &str, size: Vec2, flags: WindowFlags) -> bool {
        let key = self.current_key("begin_child");
        let parent = &self.windows[key];
        let avail = Vec2::new(
            parent.pos.x + parent.content_region_max_x() - parent.dc.cursor_pos.x,
            parent.pos.y + parent.size.y - parent.window_padding.y - parent.dc.cursor_pos.y,
        );
        let fill = |req: f32, avail: f32| if req <= 0.0 { avail.max(4.0) + req } else { req };
        let size = Vec2::new(fill(size.x, avail.x), fill(size.y, avail.y));
        let name = format!("{}.{}", parent.name, str_id);

        self.set_next_window_size(size, SetCond::ALWAYS);
        self.begin(&name, flags | WindowFlags::CHILD_WINDOW)
    }

    pub fn end_child(&mut self) {
        let key = self.current_key("end_child");
        let w = &self.windows[key];
        assert!(
            w.is_child() && !w.is_popup(),
            "end_child: {:?} is not a child window",
            w.name
        );
        let size = w.size.max(Vec2::splat(4.0));
        self.end();
        let spacing = self.config.style.item_spacing;
        let parent = self.current_window_mut("end_child");
        let bb = Rect::from_min_size(parent.dc.cursor_pos, size);
        parent.dc.item_size(size, 0.0, spacing);
        parent.dc.item_add(bb, 0);
    }

    /// A tooltip window placed next to the mouse on every frame it is shown.
    pub fn begin_tooltip(&mut self) -> bool {
        self.begin(
            "##Tooltip",
            WindowFlags::TOOLTIP
                | WindowFlags::NO_TITLE_BAR
                | WindowFlags::NO_MOVE
                | WindowFlags::NO_RESIZE
                | WindowFlags::NO_SAVED_SETTINGS
                | WindowFlags::ALWAYS_AUTO_RESIZE,
        )
    }

    pub fn end_tooltip(&mut self) {
        let key = self.current_key("end_tooltip");
        assert!(
            self.windows[key].is_tooltip(),
            "end_tooltip: current window is not a tooltip"
        );
        self.end();
    }

    pub(crate) fn current_key(&self, caller: &str) -> WindowKey {
        match self.current_window {
            Some(k) => k,
            None => panic!("{caller}: no window is being visited; call begin first"),
        }
    }

    pub fn current_window(&self) -> Option<&Window> {
        self.current_window.map(|k| &self.windows[k])
    }

    pub(crate) fn current_window_mut(&mut self, caller: &str) -> &mut Window {
        let key = self.current_key(caller);
        &mut self.windows[key]
    }

    // Next-window requests

    pub fn set_next_window_pos(&mut self, pos: Vec2, cond: SetCond) {
        self.next_window.pos = Some((pos, cond));
    }

    pub fn set_next_window_size(&mut self, size: Vec2, cond: SetCond) {
        self.next_window.size = Some((size, cond));
    }

    pub fn set_next_window_collapsed(&mut self, collapsed: bool, cond: SetCond) {
        self.next_window.collapsed = Some((collapsed, cond));
    }

    pub fn set_next_window_content_size(&mut self, size: Vec2) {
        self.next_window.content_size = Some(size);
    }

    /// Bounds the next window's size. A negative bound on an axis leaves that
    /// axis alone. Must be followed by a `begin` in the same frame.
    pub fn set_next_window_size_constraint(&mut self, min: Vec2, max: Vec2) {
        self.next_window.size_constraint = Some(Rect::new(min, max));
    }

    // Focus and hover

    pub fn focused_window(&self) -> Option<WindowKey> {
        self.focused_window
    }

    pub fn hovered_window(&self) -> Option<WindowKey> {
        self.hovered_window
    }

    /// Focuses `key` (or nothing) and brings its root window to the front.
    pub fn focus_window(&mut self, key: Option<WindowKey>) {
        self.focused_window = key;
        if let Some(root) = key.and_then(|k| self.windows.get(k)).map(|w| w.root_window) {
            self.windows.bring_to_front(root);
        }
    }

    /// Whether widgets in `key` may react to the mouse, given the focused
    /// window's popup state.
    pub fn is_window_content_hoverable(&self, key: WindowKey) -> bool {
        let focused_root = self
            .focused_window
            .and_then(|k| self.windows.get(k))
            .and_then(|w| self.windows.get(w.root_window));
        self.windows
            .get(key)
            .is_some_and(|w| w.is_content_hoverable(focused_root))
    }

    // Active id

    pub fn active_id(&self) -> Id {
        self.active_id
    }

    pub fn active_id_previous_frame(&self) -> Id {
        self.active_id_previous_frame
    }

    pub fn set_active_id(&mut self, id: Id) {
        self.active_id = id;
        self.active_id_set_this_frame = true;
    }

    pub fn clear_active_id(&mut self) {
        self.set_active_id(0);
    }

    // Text edit

    /// Hands the text edit state to widget `id`. A different id than the
    /// current owner gets a fresh state seeded from `initial`.
    pub fn focus_text_edit(&mut self, id: Id, initial: &str, capacity: usize) -> &mut TextEditState {
        if self.text_edit.as_ref().is_none_or(|st| st.id != id) {
            log::debug!("text edit focus moves to {id:#x}");
            self.text_edit = None;
        }
        self.text_edit
            .get_or_insert_with(|| TextEditState::new(id, initial, capacity))
    }

    pub fn text_edit(&self) -> Option<&TextEditState> {
        self.text_edit.as_ref()
    }

    pub fn text_edit_mut(&mut self) -> Option<&mut TextEditState> {
        self.text_edit.as_mut()
    }

    pub fn release_text_edit(&mut self) {
        self.text_edit = None;
    }

    // Traversal and registry upkeep

    /// Window ids in paint order.
    pub fn render_list(&self) -> Vec<Id> {
        self.windows.render_list()
    }

    /// Windows in back-to-front hit-test order.
    pub fn sorted_windows(&self) -> Vec<WindowKey> {
        self.windows.sorted()
    }

    /// Removes windows left unvisited for `config.gc_inactive_frames`
    /// frames, saving their settings first. Returns their names.
    pub fn sweep_inactive_windows(&mut self) -> Vec<String> {
        assert!(
            !self.frame_open,
            "sweep_inactive_windows: call between end_frame and new_frame"
        );
        let removed = self
            .windows
            .sweep(self.frame_count, self.config.gc_inactive_frames);
        let mut names = Vec::with_capacity(removed.len());
        for w in removed {
            if !w.flags.contains(WindowFlags::NO_SAVED_SETTINGS) {
                self.settings.save(w.settings());
            }
            names.push(w.name);
        }
        if self.focused_window.is_some_and(|k| self.windows.get(k).is_none()) {
            self.focused_window = None;
        }
        if self.hovered_window.is_some_and(|k| self.windows.get(k).is_none()) {
            self.hovered_window = None;
        }
        names
    }

    /// Writes the layout of every persistent root window to the store.
    pub fn save_settings(&mut self) {
        for w in self.windows.iter() {
            if !w.flags.intersects(WindowFlags::NO_SAVED_SETTINGS | WindowFlags::CHILD_WINDOW) {
                self.settings.save(w.settings());
            }
        }
    }
}
