//! # Draw context
//!
//! Transient per-window layout state. A window builds a fresh `DrawContext`
//! every time it is visited; nothing in here survives to the next frame
//! except `cursor_max_pos`, which the window reads (as its content size)
//! just before replacing the context.
//!
//! The small stacks (item width, text wrap position, keyboard focus,
//! button repeat) each mirror their top in a plain field so widgets read
//! the current value without touching the stack. Every pop re-syncs that
//! field.

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::id::Id;
use crate::stacks::{ColumnData, GroupData};
use crate::window::WindowKey;
use crate::{Rect, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutType {
    #[default]
    Vertical,
    Horizontal,
}

/// Slots of [`DrawContext::stack_sizes_backup`].
pub mod stack_slot {
    pub const ID: usize = 0;
    pub const GROUP: usize = 1;
    pub const POPUP: usize = 2;
    pub const COLOR_MOD: usize = 3;
    pub const STYLE_MOD: usize = 4;
    pub const ITEM_WIDTH: usize = 5;
}

#[derive(Debug)]
pub struct DrawContext {
    pub cursor_pos: Vec2,
    pub cursor_pos_prev_line: Vec2,
    pub cursor_start_pos: Vec2,
    /// Furthest point reached by the cursor; becomes the window's content
    /// size on the next visit.
    pub cursor_max_pos: Vec2,
    pub current_line_height: f32,
    pub current_line_text_base_offset: f32,
    pub prev_line_height: f32,
    pub prev_line_text_base_offset: f32,
    pub log_line_pos_y: f32,
    pub tree_depth: i32,
    pub last_item_id: Id,
    pub last_item_rect: Rect,
    /// Hovered and the window is interactable (not blocked by a popup).
    pub last_item_hovered_and_usable: bool,
    /// Hovered, whether or not the window is interactable.
    pub last_item_hovered_rect: bool,
    pub menu_bar_appending: bool,
    pub menu_bar_offset_x: f32,
    /// Children that began inside this window this frame, in begin order.
    pub child_windows: Vec<WindowKey>,
    pub layout_type: LayoutType,

    /// Top of the item width stack. 0.0: default, >0.0: width in pixels,
    /// <0.0: align that many pixels to the right of the window.
    pub item_width: f32,
    /// Top of the text wrap stack, -1.0 when empty.
    pub text_wrap_pos: f32,
    /// Top of the keyboard focus stack, true when empty.
    pub allow_keyboard_focus: bool,
    /// Top of the button repeat stack, false when empty.
    pub button_repeat: bool,
    item_width_default: f32,
    item_width_stack: SmallVec<[f32; 4]>,
    text_wrap_pos_stack: SmallVec<[f32; 4]>,
    allow_keyboard_focus_stack: SmallVec<[bool; 4]>,
    button_repeat_stack: SmallVec<[bool; 4]>,
    group_stack: Vec<GroupData>,

    /// Stack depths recorded at `begin`, compared at `end`.
    pub stack_sizes_backup: [usize; 6],

    /// Offset of the line start from the window's left edge (grows with
    /// indentation).
    pub indent_x: f32,
    pub group_offset_x: f32,
    /// Offset to the current column while columns are open.
    pub columns_offset_x: f32,
    pub columns_current: usize,
    pub columns_count: usize,
    pub columns_min_x: f32,
    pub columns_max_x: f32,
    pub columns_start_pos_y: f32,
    pub columns_cell_min_y: f32,
    pub columns_cell_max_y: f32,
    pub columns_show_borders: bool,
    pub columns_set_id: Id,
    pub columns_data: Vec<ColumnData>,

    window_pos: Vec2,
    alive_ids: AHashSet<Id>,
}

impl DrawContext {
    /// Fresh context for a window at `window_pos` whose first line starts at
    /// `cursor_start`.
    pub fn new(window_pos: Vec2, cursor_start: Vec2, item_width_default: f32) -> Self {
        Self {
            cursor_pos: cursor_start,
            cursor_pos_prev_line: cursor_start,
            cursor_start_pos: cursor_start,
            cursor_max_pos: cursor_start,
            current_line_height: 0.0,
            current_line_text_base_offset: 0.0,
            prev_line_height: 0.0,
            prev_line_text_base_offset: 0.0,
            log_line_pos_y: -1.0,
            tree_depth: 0,
            last_item_id: 0,
            last_item_rect: Rect::from_coords(0.0, 0.0, 0.0, 0.0),
            last_item_hovered_and_usable: false,
            last_item_hovered_rect: false,
            menu_bar_appending: false,
            menu_bar_offset_x: 0.0,
            child_windows: Vec::new(),
            layout_type: LayoutType::Vertical,
            item_width: item_width_default,
            text_wrap_pos: -1.0,
            allow_keyboard_focus: true,
            button_repeat: false,
            item_width_default,
            item_width_stack: SmallVec::new(),
            text_wrap_pos_stack: SmallVec::new(),
            allow_keyboard_focus_stack: SmallVec::new(),
            button_repeat_stack: SmallVec::new(),
            group_stack: Vec::new(),
            stack_sizes_backup: [0; 6],
            indent_x: cursor_start.x - window_pos.x,
            group_offset_x: 0.0,
            columns_offset_x: 0.0,
            columns_current: 0,
            columns_count: 1,
            columns_min_x: 0.0,
            columns_max_x: 0.0,
            columns_start_pos_y: 0.0,
            columns_cell_min_y: 0.0,
            columns_cell_max_y: 0.0,
            columns_show_borders: true,
            columns_set_id: 0,
            columns_data: Vec::new(),
            window_pos,
            alive_ids: AHashSet::new(),
        }
    }

    pub fn keep_alive(&mut self, id: Id) {
        self.alive_ids.insert(id);
    }

    pub fn is_alive(&self, id: Id) -> bool {
        self.alive_ids.contains(&id)
    }

    /// Moves everything already placed this frame by `delta` (the window was
    /// moved while being filled).
    pub fn shift(&mut self, delta: Vec2) {
        self.window_pos += delta;
        self.cursor_pos += delta;
        self.cursor_max_pos += delta;
    }

    fn line_start_x(&self) -> f32 {
        (self.window_pos.x + self.indent_x + self.columns_offset_x).trunc()
    }

    // Cached-top stacks

    pub fn push_item_width(&mut self, w: f32) {
        self.item_width_stack.push(w);
        self.item_width = w;
    }

    pub fn pop_item_width(&mut self) {
        if self.item_width_stack.pop().is_none() {
            log::warn!("pop_item_width: stack already empty");
        }
        self.item_width = self
            .item_width_stack
            .last()
            .copied()
            .unwrap_or(self.item_width_default);
    }

    pub fn item_width_depth(&self) -> usize {
        self.item_width_stack.len()
    }

    pub fn push_text_wrap_pos(&mut self, x: f32) {
        self.text_wrap_pos_stack.push(x);
        self.text_wrap_pos = x;
    }

    pub fn pop_text_wrap_pos(&mut self) {
        if self.text_wrap_pos_stack.pop().is_none() {
            log::warn!("pop_text_wrap_pos: stack already empty");
        }
        self.text_wrap_pos = self.text_wrap_pos_stack.last().copied().unwrap_or(-1.0);
    }

    pub fn push_allow_keyboard_focus(&mut self, allow: bool) {
        self.allow_keyboard_focus_stack.push(allow);
        self.allow_keyboard_focus = allow;
    }

    pub fn pop_allow_keyboard_focus(&mut self) {
        if self.allow_keyboard_focus_stack.pop().is_none() {
            log::warn!("pop_allow_keyboard_focus: stack already empty");
        }
        self.allow_keyboard_focus = self
            .allow_keyboard_focus_stack
            .last()
            .copied()
            .unwrap_or(true);
    }

    pub fn push_button_repeat(&mut self, repeat: bool) {
        self.button_repeat_stack.push(repeat);
        self.button_repeat = repeat;
    }

    pub fn pop_button_repeat(&mut self) {
        if self.button_repeat_stack.pop().is_none() {
            log::warn!("pop_button_repeat: stack already empty");
        }
        self.button_repeat = self.button_repeat_stack.last().copied().unwrap_or(false);
    }

    // Layout

    /// Lays out an item of `size` on the current line and moves the cursor
    /// to the start of the next line.
    pub fn item_size(&mut self, size: Vec2, text_offset_y: f32, item_spacing: Vec2) {
        let line_height = self.current_line_height.max(size.y);
        let text_base_offset = self.current_line_text_base_offset.max(text_offset_y);
        self.cursor_pos_prev_line = Vec2::new(self.cursor_pos.x + size.x, self.cursor_pos.y);
        self.cursor_pos = Vec2::new(
            self.line_start_x(),
            self.cursor_pos.y + line_height + item_spacing.y,
        );
        self.cursor_max_pos.x = self.cursor_max_pos.x.max(self.cursor_pos_prev_line.x);
        self.cursor_max_pos.y = self.cursor_max_pos.y.max(self.cursor_pos.y);

        self.prev_line_height = line_height;
        self.prev_line_text_base_offset = text_base_offset;
        self.current_line_height = 0.0;
        self.current_line_text_base_offset = 0.0;
    }

    /// Puts the next item on the previous line, `spacing` pixels after the
    /// last item.
    pub fn same_line(&mut self, spacing: f32) {
        self.cursor_pos = Vec2::new(
            self.cursor_pos_prev_line.x + spacing.max(0.0),
            self.cursor_pos_prev_line.y,
        );
        self.current_line_height = self.prev_line_height;
        self.current_line_text_base_offset = self.prev_line_text_base_offset;
    }

    /// Like [`same_line`](Self::same_line) but at `local_x` from the window's
    /// left edge (after scrolling by `scroll_x`).
    pub fn same_line_at(&mut self, local_x: f32, spacing: f32, scroll_x: f32) {
        self.cursor_pos = Vec2::new(
            self.window_pos.x - scroll_x
                + local_x
                + spacing.max(0.0)
                + self.group_offset_x
                + self.columns_offset_x,
            self.cursor_pos_prev_line.y,
        );
        self.current_line_height = self.prev_line_height;
        self.current_line_text_base_offset = self.prev_line_text_base_offset;
    }

    pub fn new_line(&mut self, font_size: f32, item_spacing: Vec2) {
        if self.current_line_height > 0.0 {
            self.item_size(Vec2::ZERO, 0.0, item_spacing);
        } else {
            self.item_size(Vec2::new(0.0, font_size), 0.0, item_spacing);
        }
    }

    pub fn indent(&mut self, w: f32) {
        self.indent_x += w;
        self.cursor_pos.x = self.line_start_x();
    }

    pub fn unindent(&mut self, w: f32) {
        self.indent_x -= w;
        self.cursor_pos.x = self.line_start_x();
    }

    /// Records `rect` as the last submitted item.
    pub fn item_add(&mut self, rect: Rect, id: Id) {
        self.last_item_id = id;
        self.last_item_rect = rect;
    }

    // Groups

    pub fn begin_group(&mut self, active_id_is_alive: bool) {
        self.group_stack.push(GroupData {
            backup_cursor_pos: self.cursor_pos,
            backup_cursor_max_pos: self.cursor_max_pos,
            backup_indent_x: self.indent_x,
            backup_group_offset_x: self.group_offset_x,
            backup_current_line_height: self.current_line_height,
            backup_current_line_text_base_offset: self.current_line_text_base_offset,
            backup_log_line_pos_y: self.log_line_pos_y,
            backup_active_id_is_alive: active_id_is_alive,
            advance_cursor: true,
        });
        self.group_offset_x = self.cursor_pos.x - self.window_pos.x - self.columns_offset_x;
        self.indent_x = self.group_offset_x;
        self.cursor_max_pos = self.cursor_pos;
        self.current_line_height = 0.0;
        self.log_line_pos_y = -f32::MAX;
    }

    /// Closes the innermost group and lays it out as one item. Returns the
    /// group's bounding box and the saved state.
    pub fn end_group(&mut self, item_spacing: Vec2) -> (Rect, GroupData) {
        let group = self
            .group_stack
            .pop()
            .unwrap_or_else(|| panic!("end_group: no group open"));

        let group_bb = Rect::new(
            group.backup_cursor_pos,
            self.cursor_max_pos.max(group.backup_cursor_pos),
        );
        self.cursor_pos = group.backup_cursor_pos;
        self.cursor_max_pos = group.backup_cursor_max_pos.max(self.cursor_max_pos);
        self.current_line_height = group.backup_current_line_height;
        self.current_line_text_base_offset = group.backup_current_line_text_base_offset;
        self.indent_x = group.backup_indent_x;
        self.group_offset_x = group.backup_group_offset_x;
        self.log_line_pos_y = group.backup_log_line_pos_y;

        if group.advance_cursor {
            self.current_line_text_base_offset = self
                .prev_line_text_base_offset
                .max(group.backup_current_line_text_base_offset);
            self.item_size(
                group_bb.size(),
                group.backup_current_line_text_base_offset,
                item_spacing,
            );
            self.item_add(group_bb, 0);
        }
        (group_bb, group)
    }

    pub fn group_depth(&self) -> usize {
        self.group_stack.len()
    }

    // Columns

    /// Opens `offsets.len() - 1` (at least two) columns whose normalized start offsets are
    /// `offsets` (the last entry is the right edge). `content_max_x` is the
    /// right edge of the usable region, relative to the window.
    pub fn begin_columns(
        &mut self,
        set_id: Id,
        offsets: &[f32],
        show_borders: bool,
        content_max_x: f32,
    ) {
        assert!(
            self.columns_count == 1,
            "begin_columns: columns {:#x} already open",
            self.columns_set_id
        );
        // one column is the closed state; a set needs at least two
        assert!(
            offsets.len() >= 3,
            "begin_columns: need at least two columns, got {}",
            offsets.len().saturating_sub(1)
        );
        self.columns_current = 0;
        self.columns_count = offsets.len() - 1;
        self.columns_show_borders = show_borders;
        self.columns_set_id = set_id;
        self.columns_min_x = self.indent_x;
        self.columns_max_x = content_max_x;
        self.columns_start_pos_y = self.cursor_pos.y;
        self.columns_cell_min_y = self.cursor_pos.y;
        self.columns_cell_max_y = self.cursor_pos.y;
        self.columns_offset_x = 0.0;
        self.cursor_pos.x = self.line_start_x();
        self.columns_data = offsets
            .iter()
            .map(|&offset_norm| ColumnData { offset_norm })
            .collect();
        self.push_item_width(self.column_width(0) * 0.65);
    }

    /// Offset of column `i`'s left edge from the window's left edge.
    pub fn column_offset(&self, i: usize) -> f32 {
        let t = self.columns_data.get(i).map_or(0.0, |c| c.offset_norm);
        (self.columns_min_x + (self.columns_max_x - self.columns_min_x) * t).trunc()
    }

    pub fn column_width(&self, i: usize) -> f32 {
        self.column_offset(i + 1) - self.column_offset(i)
    }

    pub fn next_column(&mut self, item_spacing: Vec2) {
        if self.columns_count <= 1 {
            return;
        }
        self.pop_item_width();
        self.columns_cell_max_y = self.columns_cell_max_y.max(self.cursor_pos.y);
        self.columns_current += 1;
        if self.columns_current < self.columns_count {
            self.columns_offset_x =
                self.column_offset(self.columns_current) - self.indent_x + item_spacing.x;
        } else {
            self.columns_current = 0;
            self.columns_offset_x = 0.0;
            self.columns_cell_min_y = self.columns_cell_max_y;
        }
        self.cursor_pos.x = self.line_start_x();
        self.cursor_pos.y = self.columns_cell_min_y;
        self.current_line_height = 0.0;
        self.current_line_text_base_offset = 0.0;
        self.push_item_width(self.column_width(self.columns_current) * 0.65);
    }

    pub fn end_columns(&mut self, item_spacing: Vec2) {
        assert!(self.columns_count > 1, "end_columns: no columns open");
        if self.columns_current != 0 {
            self.item_size(Vec2::ZERO, 0.0, item_spacing);
        }
        self.pop_item_width();
        self.columns_cell_max_y = self.columns_cell_max_y.max(self.cursor_pos.y);
        self.cursor_pos.y = self.columns_cell_max_y;
        self.cursor_max_pos.y = self.cursor_max_pos.y.max(self.cursor_pos.y);

        self.columns_count = 1;
        self.columns_current = 0;
        self.columns_offset_x = 0.0;
        self.columns_set_id = 0;
        self.columns_data.clear();
        self.cursor_pos.x = self.line_start_x();
    }

    pub fn assert_columns_closed(&self) {
        assert!(
            self.columns_count == 1,
            "columns {:#x} still open ({} columns); call end_columns first",
            self.columns_set_id,
            self.columns_count
        );
    }
}
