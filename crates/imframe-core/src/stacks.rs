//! Small value objects pushed on stacks so a scoped change can be undone.

use crate::style::{Col, StyleValue, StyleVar};
use crate::{Color, Vec2};

/// Colour override, with the value it replaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColMod {
    pub col: Col,
    pub backup: Color,
}

/// Style variable override, with the value it replaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleMod {
    pub var: StyleVar,
    pub backup: StyleValue,
}

/// Layout state saved by `begin_group` and restored by `end_group`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupData {
    pub backup_cursor_pos: Vec2,
    pub backup_cursor_max_pos: Vec2,
    pub backup_indent_x: f32,
    pub backup_group_offset_x: f32,
    pub backup_current_line_height: f32,
    pub backup_current_line_text_base_offset: f32,
    pub backup_log_line_pos_y: f32,
    pub backup_active_id_is_alive: bool,
    pub advance_cursor: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnData {
    /// Column start, normalized: 0.0 is the far left, 1.0 the far right.
    pub offset_norm: f32,
}

pub const SIMPLE_COLUMNS_MAX: usize = 8;

/// Throw-away column measurement for menu items (label, shortcut, check mark).
///
/// Widths declared during a frame with [`decl_columns`](Self::decl_columns)
/// become the column positions on the next [`update`](Self::update).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimpleColumns {
    pub count: usize,
    pub spacing: f32,
    pub width: f32,
    pub next_width: f32,
    pub pos: [f32; SIMPLE_COLUMNS_MAX],
    pub next_widths: [f32; SIMPLE_COLUMNS_MAX],
}

impl SimpleColumns {
    pub fn update(&mut self, count: usize, spacing: f32, clear: bool) {
        assert!(
            count <= SIMPLE_COLUMNS_MAX,
            "SimpleColumns::update: {count} columns, at most {SIMPLE_COLUMNS_MAX}"
        );
        self.count = count;
        self.width = 0.0;
        self.next_width = 0.0;
        self.spacing = spacing;
        if clear {
            self.next_widths = [0.0; SIMPLE_COLUMNS_MAX];
        }
        for i in 0..count {
            if i > 0 && self.next_widths[i] > 0.0 {
                self.width += spacing;
            }
            self.pos[i] = self.width.trunc();
            self.width += self.next_widths[i];
            self.next_widths[i] = 0.0;
        }
    }

    /// Declares this item's column widths; returns the width the row needs.
    pub fn decl_columns(&mut self, w0: f32, w1: f32, w2: f32) -> f32 {
        self.next_width = 0.0;
        for (i, w) in [w0, w1, w2].into_iter().enumerate() {
            self.next_widths[i] = self.next_widths[i].max(w);
            self.next_width += self.next_widths[i]
                + if i > 0 && self.next_widths[i] > 0.0 {
                    self.spacing
                } else {
                    0.0
                };
        }
        self.width.max(self.next_width)
    }

    pub fn calc_extra_space(&self, avail_w: f32) -> f32 {
        (avail_w - self.width).max(0.0)
    }
}
