//! # Windows
//!
//! A `Window` is the only thing that persists between frames. Its identity is
//! the hash of its name, so the same `begin("Inspector")` call reaches the
//! same record every frame and finds its position, scroll offset, collapse
//! state and auto-fit progress where it left them.
//!
//! Everything the widgets inside a window touch during a visit lives in the
//! window's [`DrawContext`], which is rebuilt on each visit.
//!
//! Children are not owned by their parent; the parent only lists the
//! [`WindowKey`]s of the children that began inside it this frame. Both
//! traversals ([`Window::add_to`] for painting, [`Window::add_to_sorted`] for
//! hit-testing) resolve those keys through the [`Windows`] registry.

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::draw_context::DrawContext;
use crate::flags::{SetCond, WindowFlags};
use crate::id::{Id, IdStack, hash_int, hash_str};
use crate::registry::Windows;
use crate::settings::WindowSettings;
use crate::stacks::SimpleColumns;
use crate::style::Style;
use crate::{Rect, Vec2};

slotmap::new_key_type! {
    /// Handle to a window in the [`Windows`] registry.
    pub struct WindowKey;
}

/// Frames an axis keeps auto-fitting after `set_size` asked for it.
pub const AUTO_FIT_FRAMES: i32 = 2;

/// Marks "no pending scroll target" on an axis.
pub const NO_SCROLL_TARGET: f32 = f32::MAX;

#[derive(Debug)]
pub struct Window {
    pub name: String,
    /// Hash of `name`.
    pub id: Id,
    /// Own handle in the registry; the null key until inserted.
    pub key: WindowKey,
    pub flags: WindowFlags,
    /// Order within the parent's child list this frame. 0 for root windows.
    pub index_within_parent: usize,
    pub pos_f: Vec2,
    /// `pos_f` truncated to whole pixels.
    pub pos: Vec2,
    /// Current size: `size_full`, or just the title bar when collapsed.
    pub size: Vec2,
    /// Size when not collapsed.
    pub size_full: Vec2,
    /// Size of the contents measured during the previous visit.
    pub size_contents: Vec2,
    /// Content size forced by the caller; zero on an axis means "measure".
    pub size_contents_explicit: Vec2,
    pub contents_region_rect: Rect,
    /// Padding captured at `begin`, used for the whole visit.
    pub window_padding: Vec2,
    pub move_id: Id,
    pub scroll: Vec2,
    /// Scroll target in scroll-independent coordinates, `NO_SCROLL_TARGET`
    /// on an axis with no request.
    pub scroll_target: Vec2,
    /// 0.0 puts the target at the top of the view, 0.5 centers it.
    pub scroll_target_center_ratio: Vec2,
    pub scrollbar: [bool; 2],
    pub scrollbar_sizes: Vec2,
    pub border_size: f32,
    /// Visited this frame.
    pub active: bool,
    /// Visited last frame.
    pub was_active: bool,
    /// Touched by a widget this frame.
    pub accessed: bool,
    /// Only the title bar is shown.
    pub collapsed: bool,
    /// Widgets should skip submitting anything (collapsed or hidden).
    pub skip_items: bool,
    /// `begin` calls this frame (more than one when appending).
    pub begin_count: u32,
    /// Popup id when this window serves a popup.
    pub popup_id: Id,
    /// Remaining auto-fit frames per axis, -1 when idle.
    pub auto_fit_frames: [i32; 2],
    pub auto_fit_only_grows: bool,
    /// Frames left before a freshly opened popup/tooltip is shown.
    pub hidden_frames: u32,
    pub set_window_pos_allow_flags: SetCond,
    pub set_window_size_allow_flags: SetCond,
    pub set_window_collapsed_allow_flags: SetCond,
    pub set_window_pos_center_wanted: bool,

    pub dc: DrawContext,
    /// Seeds for ids submitted inside this window; bottom is `id`.
    pub id_stack: IdStack,
    pub clip_rect: Rect,
    pub window_rect_clipped: Rect,
    /// Frame number of the last visit, -1 before the first.
    pub last_frame_active: i64,
    pub item_width_default: f32,
    /// Column measurement for menu items.
    pub menu_columns: SimpleColumns,
    /// Small per-window values keyed by id (column offsets, tree open state).
    pub state_storage: AHashMap<Id, f32>,
    /// Per-window font scale.
    pub font_window_scale: f32,
    /// First ancestor that is not a child window, or self.
    pub root_window: WindowKey,
    /// First ancestor that is neither a child window nor a popup, or self.
    pub root_non_popup_window: WindowKey,
    pub parent_window: Option<WindowKey>,
}

impl Window {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = hash_str(&name, None, 0);
        let id_stack = IdStack::new(id);
        let move_id = hash_str("#MOVE", None, id);
        Self {
            name,
            id,
            key: WindowKey::default(),
            flags: WindowFlags::empty(),
            index_within_parent: 0,
            pos_f: Vec2::ZERO,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            size_full: Vec2::ZERO,
            size_contents: Vec2::ZERO,
            size_contents_explicit: Vec2::ZERO,
            contents_region_rect: Rect::default(),
            window_padding: Vec2::ZERO,
            move_id,
            scroll: Vec2::ZERO,
            scroll_target: Vec2::splat(NO_SCROLL_TARGET),
            scroll_target_center_ratio: Vec2::splat(0.5),
            scrollbar: [false; 2],
            scrollbar_sizes: Vec2::ZERO,
            border_size: 0.0,
            active: false,
            was_active: false,
            accessed: false,
            collapsed: false,
            skip_items: false,
            begin_count: 0,
            popup_id: 0,
            auto_fit_frames: [-1; 2],
            auto_fit_only_grows: false,
            hidden_frames: 0,
            set_window_pos_allow_flags: SetCond::ALLOW_ALL,
            set_window_size_allow_flags: SetCond::ALLOW_ALL,
            set_window_collapsed_allow_flags: SetCond::ALLOW_ALL,
            set_window_pos_center_wanted: false,
            dc: DrawContext::new(Vec2::ZERO, Vec2::ZERO, 0.0),
            id_stack,
            clip_rect: Rect::default(),
            window_rect_clipped: Rect::default(),
            last_frame_active: -1,
            item_width_default: 0.0,
            menu_columns: SimpleColumns::default(),
            state_storage: AHashMap::new(),
            font_window_scale: 1.0,
            root_window: WindowKey::default(),
            root_non_popup_window: WindowKey::default(),
            parent_window: None,
        }
    }

    pub fn is_child(&self) -> bool {
        self.flags.contains(WindowFlags::CHILD_WINDOW)
    }
    pub fn is_popup(&self) -> bool {
        self.flags.contains(WindowFlags::POPUP)
    }
    pub fn is_tooltip(&self) -> bool {
        self.flags.contains(WindowFlags::TOOLTIP)
    }
    pub fn is_combo_box(&self) -> bool {
        self.flags.contains(WindowFlags::COMBO_BOX)
    }

    // Ids

    /// Id of `label[..end]` in the current scope, kept alive for this frame.
    pub fn get_id(&mut self, label: &str, end: Option<usize>) -> Id {
        let id = self.get_id_no_keep_alive(label, end);
        self.dc.keep_alive(id);
        id
    }

    /// Same hash as [`get_id`](Self::get_id) without marking it alive.
    pub fn get_id_no_keep_alive(&self, label: &str, end: Option<usize>) -> Id {
        hash_str(label, end, self.id_stack.top())
    }

    pub fn get_id_int(&mut self, v: i64) -> Id {
        let id = hash_int(v, self.id_stack.top());
        self.dc.keep_alive(id);
        id
    }

    pub fn push_id(&mut self, label: &str) -> Id {
        self.id_stack.push_str(label)
    }

    pub fn push_id_int(&mut self, v: i64) -> Id {
        self.id_stack.push_int(v)
    }

    pub fn pop_id(&mut self) {
        self.id_stack.pop();
    }

    // Geometry

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn calc_font_size(&self, style: &Style) -> f32 {
        style.font_size * self.font_window_scale
    }

    pub fn title_bar_height(&self, style: &Style) -> f32 {
        if self.flags.contains(WindowFlags::NO_TITLE_BAR) {
            0.0
        } else {
            self.calc_font_size(style) + style.frame_padding.y * 2.0
        }
    }

    pub fn title_bar_rect(&self, style: &Style) -> Rect {
        Rect::new(
            self.pos,
            Vec2::new(
                self.pos.x + self.size_full.x,
                self.pos.y + self.title_bar_height(style),
            ),
        )
    }

    pub fn menu_bar_height(&self, style: &Style) -> f32 {
        if self.flags.contains(WindowFlags::MENU_BAR) {
            self.calc_font_size(style) + style.frame_padding.y * 2.0
        } else {
            0.0
        }
    }

    pub fn menu_bar_rect(&self, style: &Style) -> Rect {
        let y1 = self.pos.y + self.title_bar_height(style);
        Rect::from_coords(
            self.pos.x,
            y1,
            self.pos.x + self.size_full.x,
            y1 + self.menu_bar_height(style),
        )
    }

    // Scrolling

    /// Sets the vertical scroll, keeping the content-size measurement in
    /// scroll-independent space.
    pub fn set_scroll_y(&mut self, new_scroll_y: f32) {
        self.dc.cursor_max_pos.y += self.scroll.y;
        self.scroll.y = new_scroll_y;
        self.dc.cursor_max_pos.y -= self.scroll.y;
    }

    /// Requests a scroll so that `local_y` (relative to the window's top,
    /// current scroll included) ends up at `center_ratio` of the view.
    pub fn set_scroll_target_y(&mut self, local_y: f32, center_ratio: f32) {
        assert!(
            (0.0..=1.0).contains(&center_ratio),
            "set_scroll_target_y: center_ratio {center_ratio} out of 0..=1"
        );
        self.scroll_target.y = (local_y + self.scroll.y).trunc();
        self.scroll_target_center_ratio.y = center_ratio;
    }

    /// Consumes a pending scroll target, if any, then clamps the scroll to
    /// the measured contents. `bars_height` is title bar plus menu bar.
    pub fn apply_scroll_target(&mut self, bars_height: f32) {
        if self.scroll_target.x < NO_SCROLL_TARGET {
            self.scroll.x = self.scroll_target.x;
            self.scroll_target.x = NO_SCROLL_TARGET;
        }
        if self.scroll_target.y < NO_SCROLL_TARGET {
            let ratio = self.scroll_target_center_ratio.y;
            self.scroll.y =
                self.scroll_target.y - (1.0 - ratio) * bars_height - ratio * self.size_full.y;
            self.scroll_target.y = NO_SCROLL_TARGET;
        }
        self.scroll = self.scroll.max(Vec2::ZERO);
        if !self.collapsed && !self.skip_items {
            let max_scroll =
                (self.size_contents - self.size_full + self.scrollbar_sizes).max(Vec2::ZERO);
            self.scroll = self.scroll.min(max_scroll);
        }
    }

    // Conditional setters

    fn gate(allow: &mut SetCond, cond: SetCond) -> bool {
        let pass = cond.passes(*allow);
        // Stripped whether or not the call goes through; ALWAYS stays.
        allow.remove(SetCond::ONE_SHOT);
        pass
    }

    /// Moves the window when `cond` is allowed. Widgets already placed this
    /// frame move along.
    pub fn set_pos(&mut self, pos: Vec2, cond: SetCond) -> bool {
        if !Self::gate(&mut self.set_window_pos_allow_flags, cond) {
            return false;
        }
        self.set_window_pos_center_wanted = false;

        let old_pos = self.pos;
        self.pos_f = pos;
        self.pos = pos.trunc();
        self.dc.shift(self.pos - old_pos);
        true
    }

    /// Resizes the window when `cond` is allowed. A non-positive axis starts
    /// auto-fitting that axis instead.
    pub fn set_size(&mut self, size: Vec2, cond: SetCond) -> bool {
        if !Self::gate(&mut self.set_window_size_allow_flags, cond) {
            return false;
        }
        if size.x > 0.0 {
            self.auto_fit_frames[0] = 0;
            self.size_full.x = size.x;
        } else {
            self.auto_fit_frames[0] = AUTO_FIT_FRAMES;
            self.auto_fit_only_grows = false;
        }
        if size.y > 0.0 {
            self.auto_fit_frames[1] = 0;
            self.size_full.y = size.y;
        } else {
            self.auto_fit_frames[1] = AUTO_FIT_FRAMES;
            self.auto_fit_only_grows = false;
        }
        true
    }

    pub fn set_collapsed(&mut self, collapsed: bool, cond: SetCond) -> bool {
        if !Self::gate(&mut self.set_window_collapsed_allow_flags, cond) {
            return false;
        }
        self.collapsed = collapsed;
        true
    }

    /// Commits `new_size` as the full size, after applying the pending size
    /// constraint and the minimum window size.
    ///
    /// An axis of `constraint` with a negative bound keeps the current size.
    pub fn apply_size_full_with_constraint(
        &mut self,
        mut new_size: Vec2,
        constraint: Option<&Rect>,
        style: &Style,
    ) {
        if let Some(cr) = constraint {
            new_size.x = if cr.min.x >= 0.0 && cr.max.x >= 0.0 {
                new_size.x.clamp(cr.min.x, cr.max.x.max(cr.min.x))
            } else {
                self.size_full.x
            };
            new_size.y = if cr.min.y >= 0.0 && cr.max.y >= 0.0 {
                new_size.y.clamp(cr.min.y, cr.max.y.max(cr.min.y))
            } else {
                self.size_full.y
            };
        }
        if !self
            .flags
            .intersects(WindowFlags::CHILD_WINDOW | WindowFlags::ALWAYS_AUTO_RESIZE)
        {
            new_size = new_size.max(style.window_min_size);
        }
        self.size_full = new_size;
    }

    /// Size that would fit the contents measured during the last visit.
    pub fn calc_size_auto_fit(&self, style: &Style) -> Vec2 {
        if self
            .flags
            .intersects(WindowFlags::TOOLTIP | WindowFlags::CHILD_WINDOW)
        {
            self.size_contents
        } else {
            self.size_contents.max(style.window_min_size)
        }
    }

    /// Runs one frame of auto-fit on the axes that asked for it.
    pub fn apply_auto_fit(&mut self, style: &Style) {
        let fit = self.calc_size_auto_fit(style);
        if self.flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) && !self.collapsed {
            self.size_full = fit;
            return;
        }
        let grows = self.auto_fit_only_grows;
        let axis = |frames: &mut i32, full: &mut f32, fit: f32| {
            if *frames > 0 {
                *full = if grows { full.max(fit) } else { fit };
                *frames -= 1;
            }
        };
        axis(&mut self.auto_fit_frames[0], &mut self.size_full.x, fit.x);
        axis(&mut self.auto_fit_frames[1], &mut self.size_full.y, fit.y);
    }

    // Visits

    /// Opens this frame's visit. Returns true when the window was not visited
    /// last frame (it is appearing).
    pub fn mark_visited(&mut self, frame: i64) -> bool {
        let first_begin_this_frame = self.last_frame_active != frame;
        let appearing = self.last_frame_active < frame - 1;
        if first_begin_this_frame {
            self.begin_count = 0;
            self.last_frame_active = frame;
            self.active = true;
            self.accessed = false;
            if appearing {
                self.set_window_pos_allow_flags |= SetCond::APPEARING;
                self.set_window_size_allow_flags |= SetCond::APPEARING;
                self.set_window_collapsed_allow_flags |= SetCond::APPEARING;
            }
        }
        self.begin_count += 1;
        appearing && first_begin_this_frame
    }

    /// Folds last visit's measurement into `size_contents`. Must run before
    /// the draw context is replaced.
    pub fn measure_contents(&mut self) {
        let measured = (self.dc.cursor_max_pos - self.pos + self.scroll).max(Vec2::ZERO);
        let pick = |explicit: f32, measured: f32| {
            if explicit != 0.0 { explicit } else { measured }
        };
        self.size_contents = Vec2::new(
            pick(self.size_contents_explicit.x, measured.x).trunc(),
            pick(self.size_contents_explicit.y, measured.y).trunc(),
        ) + self.window_padding;
    }

    /// Replaces the draw context with a fresh one positioned under the title
    /// and menu bars.
    pub fn reset_draw_context(&mut self, style: &Style) {
        let start = self.pos
            + Vec2::new(
                self.window_padding.x,
                self.title_bar_height(style) + self.menu_bar_height(style) + self.window_padding.y,
            )
            - self.scroll;
        self.dc = DrawContext::new(self.pos, start, self.item_width_default);
        self.contents_region_rect = Rect::from_coords(
            self.window_padding.x - self.scroll.x,
            self.title_bar_height(style) + self.menu_bar_height(style) + self.window_padding.y
                - self.scroll.y,
            self.size.x - self.scrollbar_sizes.x - self.window_padding.x - self.scroll.x,
            self.size.y - self.scrollbar_sizes.y - self.window_padding.y - self.scroll.y,
        );
    }

    /// Right edge of the content region, relative to the window.
    pub fn content_region_max_x(&self) -> f32 {
        if self.size_contents_explicit.x != 0.0 {
            self.size_contents_explicit.x - self.scroll.x
        } else {
            self.size.x - self.scrollbar_sizes.x - self.window_padding.x
        }
    }

    /// `false` when the focused root window is a shown popup this window does
    /// not descend from.
    pub fn is_content_hoverable(&self, focused_root: Option<&Window>) -> bool {
        match focused_root {
            None => true,
            Some(root) => !(root.is_popup() && root.was_active && root.key != self.root_window),
        }
    }

    // Traversal

    /// Appends this window's paint contribution, then its active children.
    /// A popup child contributes only once it has been shown.
    pub fn add_to(&self, windows: &Windows, render_list: &mut Vec<Id>) {
        render_list.push(self.id);
        for child in self.dc.child_windows.iter().filter_map(|&k| windows.get(k)) {
            if child.active && (!child.is_popup() || child.hidden_frames == 0) {
                child.add_to(windows, render_list);
            }
        }
    }

    /// Appends this window, then its active children ordered popup, tooltip,
    /// combo box, then creation order.
    pub fn add_to_sorted(&self, windows: &Windows, sorted: &mut Vec<WindowKey>) {
        sorted.push(self.key);
        if !self.active {
            return;
        }
        let mut children: SmallVec<[&Window; 8]> = self
            .dc
            .child_windows
            .iter()
            .filter_map(|&k| windows.get(k))
            .filter(|c| c.active)
            .collect();
        children.sort_by_key(|c| c.child_sort_key());
        for child in children {
            child.add_to_sorted(windows, sorted);
        }
    }

    fn child_sort_key(&self) -> (bool, bool, bool, usize) {
        (
            !self.is_popup(),
            !self.is_tooltip(),
            !self.is_combo_box(),
            self.index_within_parent,
        )
    }

    // Settings

    pub fn settings(&self) -> WindowSettings {
        WindowSettings {
            name: self.name.clone(),
            id: self.id,
            pos: self.pos,
            size: self.size_full,
            collapsed: self.collapsed,
        }
    }

    /// Restores persisted geometry. First-use-ever conditions no longer
    /// apply afterwards.
    pub fn apply_settings(&mut self, s: &WindowSettings) {
        self.set_window_pos_allow_flags.remove(SetCond::FIRST_USE_EVER);
        self.set_window_size_allow_flags.remove(SetCond::FIRST_USE_EVER);
        self.set_window_collapsed_allow_flags.remove(SetCond::FIRST_USE_EVER);
        self.pos_f = s.pos;
        self.pos = s.pos.trunc();
        if s.size.length_sqr() > 0.00001 {
            self.size_full = s.size;
        }
        self.collapsed = s.collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_name_hash_and_stable() {
        let a = Window::new("Debug");
        let b = Window::new("Debug");
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, hash_str("Debug", None, 0));
        assert_eq!(a.id_stack.top(), a.id);
    }

    #[test]
    fn test_get_id_keeps_alive_only_when_asked() {
        let mut w = Window::new("W");
        let quiet = w.get_id_no_keep_alive("OK", None);
        assert!(!w.dc.is_alive(quiet));
        let id = w.get_id("OK", None);
        assert_eq!(id, quiet);
        assert!(w.dc.is_alive(id));
    }

    #[test]
    fn test_get_id_depends_on_scope() {
        let mut w = Window::new("W");
        let outer = w.get_id("item", None);
        w.push_id("list");
        let inner = w.get_id("item", None);
        w.pop_id();
        assert_ne!(outer, inner);
        assert_eq!(outer, w.get_id("item", None));
        assert_eq!(w.get_id("item##2", Some(4)), outer);
    }

    #[test]
    fn test_bars_geometry() {
        let style = Style::default();
        let mut w = Window::new("W");
        w.pos = Vec2::new(10.0, 20.0);
        w.size_full = Vec2::new(200.0, 100.0);
        w.flags = WindowFlags::MENU_BAR;
        let bar = style.font_size + style.frame_padding.y * 2.0;
        assert_eq!(w.title_bar_rect(&style), Rect::from_coords(10.0, 20.0, 210.0, 20.0 + bar));
        assert_eq!(
            w.menu_bar_rect(&style),
            Rect::from_coords(10.0, 20.0 + bar, 210.0, 20.0 + 2.0 * bar)
        );

        w.flags = WindowFlags::NO_TITLE_BAR;
        assert_eq!(w.title_bar_height(&style), 0.0);
        assert_eq!(w.menu_bar_rect(&style).height(), 0.0);
        assert_eq!(w.menu_bar_rect(&style).min.y, 20.0);
    }

    #[test]
    fn test_set_pos_once_applies_a_single_time() {
        let mut w = Window::new("W");
        assert!(w.set_pos(Vec2::new(10.0, 10.0), SetCond::ONCE));
        assert!(!w.set_window_pos_allow_flags.contains(SetCond::ONCE));
        assert!(!w.set_pos(Vec2::new(99.0, 99.0), SetCond::ONCE));
        assert_eq!(w.pos, Vec2::new(10.0, 10.0));
        assert!(!w.set_window_pos_allow_flags.contains(SetCond::ONCE));
        assert!(w.set_window_pos_allow_flags.contains(SetCond::ALWAYS));
    }

    #[test]
    fn test_failed_call_still_strips_one_shot_bits() {
        let mut w = Window::new("W");
        w.set_window_size_allow_flags = SetCond::ALWAYS | SetCond::APPEARING;
        assert!(!w.set_size(Vec2::new(5.0, 5.0), SetCond::ONCE));
        assert_eq!(w.set_window_size_allow_flags, SetCond::ALWAYS);
        assert!(w.set_size(Vec2::new(50.0, 60.0), SetCond::empty()));
        assert!(w.set_size(Vec2::new(70.0, 60.0), SetCond::ALWAYS));
        assert_eq!(w.size_full, Vec2::new(70.0, 60.0));
    }

    #[test]
    fn test_set_pos_rounds_and_shifts_layout() {
        let mut w = Window::new("W");
        w.pos = Vec2::new(10.0, 10.0);
        w.dc = DrawContext::new(w.pos, Vec2::new(18.0, 18.0), 0.0);
        w.dc.item_size(Vec2::new(20.0, 10.0), 0.0, Vec2::new(8.0, 4.0));
        let (cursor, max) = (w.dc.cursor_pos, w.dc.cursor_max_pos);

        assert!(w.set_pos(Vec2::new(30.7, 5.2), SetCond::ALWAYS));
        assert_eq!(w.pos_f, Vec2::new(30.7, 5.2));
        assert_eq!(w.pos, Vec2::new(30.0, 5.0));
        let d = Vec2::new(20.0, -5.0);
        assert_eq!(w.dc.cursor_pos, cursor + d);
        assert_eq!(w.dc.cursor_max_pos, max + d);
    }

    #[test]
    fn test_set_size_auto_fit_axes() {
        let mut w = Window::new("W");
        w.auto_fit_only_grows = true;
        w.set_size(Vec2::new(0.0, 120.0), SetCond::ALWAYS);
        assert_eq!(w.auto_fit_frames, [AUTO_FIT_FRAMES, 0]);
        assert!(!w.auto_fit_only_grows);
        assert_eq!(w.size_full.y, 120.0);

        w.set_size(Vec2::new(80.0, -1.0), SetCond::ALWAYS);
        assert_eq!(w.auto_fit_frames, [0, AUTO_FIT_FRAMES]);
        assert_eq!(w.size_full, Vec2::new(80.0, 120.0));
    }

    #[test]
    fn test_auto_fit_runs_for_two_frames() {
        let style = Style::default();
        let mut w = Window::new("W");
        w.size_full = Vec2::new(300.0, 300.0);
        w.set_size(Vec2::ZERO, SetCond::ALWAYS);
        w.size_contents = Vec2::new(100.0, 50.0);
        w.apply_auto_fit(&style);
        assert_eq!(w.size_full, Vec2::new(100.0, 50.0));
        w.size_contents = Vec2::new(120.0, 60.0);
        w.apply_auto_fit(&style);
        assert_eq!(w.size_full, Vec2::new(120.0, 60.0));
        w.size_contents = Vec2::new(500.0, 500.0);
        w.apply_auto_fit(&style);
        assert_eq!(w.size_full, Vec2::new(120.0, 60.0));
    }

    #[test]
    fn test_set_collapsed_first_use_ever_after_settings() {
        let mut w = Window::new("W");
        w.apply_settings(&WindowSettings {
            name: "W".into(),
            id: w.id,
            pos: Vec2::new(5.0, 6.0),
            size: Vec2::new(100.0, 100.0),
            collapsed: false,
        });
        assert!(!w.set_collapsed(true, SetCond::FIRST_USE_EVER));
        assert!(!w.collapsed);
        assert!(w.set_collapsed(true, SetCond::ALWAYS));
        assert!(w.collapsed);
    }

    #[test]
    fn test_min_size_raises_both_axes() {
        let style = Style::default();
        let mut w = Window::new("W");
        w.apply_size_full_with_constraint(Vec2::new(1.0, 2.0), None, &style);
        assert_eq!(w.size_full, style.window_min_size);
    }

    #[test]
    fn test_child_and_auto_resize_skip_min_size() {
        let style = Style::default();
        for flags in [WindowFlags::CHILD_WINDOW, WindowFlags::ALWAYS_AUTO_RESIZE] {
            let mut w = Window::new("W");
            w.flags = flags;
            w.apply_size_full_with_constraint(Vec2::new(1.0, 2.0), None, &style);
            assert_eq!(w.size_full, Vec2::new(1.0, 2.0));
        }
    }

    #[test]
    fn test_constraint_clamps_only_fully_specified_axes() {
        let style = Style::default();
        let mut w = Window::new("W");
        w.size_full = Vec2::new(300.0, 300.0);
        let cr = Rect::from_coords(100.0, -1.0, 200.0, -1.0);
        w.apply_size_full_with_constraint(Vec2::new(500.0, 40.0), Some(&cr), &style);
        assert_eq!(w.size_full, Vec2::new(200.0, 300.0));

        let cr = Rect::from_coords(0.0, 50.0, 1000.0, 80.0);
        w.apply_size_full_with_constraint(Vec2::new(500.0, 10.0), Some(&cr), &style);
        assert_eq!(w.size_full, Vec2::new(500.0, 50.0));
    }

    #[test]
    fn test_scroll_y_keeps_content_measurement() {
        let mut w = Window::new("W");
        w.dc.cursor_max_pos = Vec2::new(0.0, 400.0);
        w.set_scroll_y(100.0);
        assert_eq!(w.dc.cursor_max_pos.y, 300.0);
        w.set_scroll_y(0.0);
        assert_eq!(w.dc.cursor_max_pos.y, 400.0);
    }

    #[test]
    fn test_mark_visited_rearms_appearing() {
        // frame numbers start at 1
        let mut w = Window::new("W");
        w.set_window_pos_allow_flags = SetCond::ALWAYS;
        assert!(w.mark_visited(1));
        assert!(w.set_window_pos_allow_flags.contains(SetCond::APPEARING));
        w.set_window_pos_allow_flags = SetCond::ALWAYS;
        assert!(!w.mark_visited(2));
        assert!(!w.set_window_pos_allow_flags.contains(SetCond::APPEARING));
        // second begin in the same frame
        assert!(!w.mark_visited(2));
        assert_eq!(w.begin_count, 2);
        // skipped frame 3
        assert!(w.mark_visited(4));
    }

    #[test]
    fn test_content_hoverable() {
        let mut keys = slotmap::SlotMap::<WindowKey, ()>::with_key();
        let mut popup = Window::new("popup");
        popup.key = keys.insert(());
        popup.root_window = popup.key;
        popup.flags = WindowFlags::POPUP;
        popup.was_active = true;

        let mut other = Window::new("other");
        other.key = keys.insert(());
        other.root_window = other.key;
        assert!(other.is_content_hoverable(None));
        assert!(!other.is_content_hoverable(Some(&popup)));

        // descendants of the popup share its root
        other.root_window = popup.key;
        assert!(other.is_content_hoverable(Some(&popup)));

        // not shown yet: nothing is blocked
        popup.was_active = false;
        other.root_window = other.key;
        assert!(other.is_content_hoverable(Some(&popup)));
    }

    #[test]
    fn test_scroll_target_is_applied_once() {
        let mut w = Window::new("W");
        w.size_full = Vec2::new(100.0, 100.0);
        w.size_contents = Vec2::new(100.0, 1000.0);
        w.set_scroll_target_y(400.0, 0.0);
        w.apply_scroll_target(0.0);
        assert_eq!(w.scroll.y, 400.0);
        assert_eq!(w.scroll_target.y, NO_SCROLL_TARGET);
        // clamped to the contents
        w.set_scroll_target_y(5000.0, 0.0);
        w.apply_scroll_target(0.0);
        assert_eq!(w.scroll.y, 900.0);
    }

    #[test]
    fn test_measure_contents() {
        let mut w = Window::new("W");
        w.pos = Vec2::new(10.0, 10.0);
        w.window_padding = Vec2::new(8.0, 8.0);
        w.dc.cursor_max_pos = Vec2::new(110.5, 60.0);
        w.measure_contents();
        assert_eq!(w.size_contents, Vec2::new(108.0, 58.0));
        w.size_contents_explicit = Vec2::new(0.0, 300.0);
        w.measure_contents();
        assert_eq!(w.size_contents, Vec2::new(108.0, 308.0));
    }
}
