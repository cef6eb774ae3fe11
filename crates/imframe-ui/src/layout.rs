use smallvec::SmallVec;

use imframe_core::id::hash_int;
use imframe_core::{Col, ColMod, Color, Id, Rect, SettingsStore, StyleMod, StyleValue, StyleVar, Vec2};

use crate::Context;

impl<S: SettingsStore> Context<S> {
    // Ids

    /// Id of `label` in the current window's scope, kept alive this frame.
    pub fn get_id(&mut self, label: &str) -> Id {
        self.current_window_mut("get_id").get_id(label, None)
    }

    pub fn push_id(&mut self, label: &str) -> Id {
        self.current_window_mut("push_id").push_id(label)
    }

    pub fn push_id_int(&mut self, v: i64) -> Id {
        self.current_window_mut("push_id_int").push_id_int(v)
    }

    pub fn pop_id(&mut self) {
        self.current_window_mut("pop_id").pop_id();
    }

    // Style stacks

    pub fn push_style_color(&mut self, col: Col, color: Color) {
        let style = &mut self.config.style;
        self.color_modifiers.push(ColMod {
            col,
            backup: style.color(col),
        });
        style.set_color(col, color);
    }

    pub fn pop_style_color(&mut self, count: usize) {
        for _ in 0..count {
            let m = self
                .color_modifiers
                .pop()
                .unwrap_or_else(|| panic!("pop_style_color: more pops than pushes"));
            self.config.style.set_color(m.col, m.backup);
        }
    }

    /// Overrides `var` until the matching pop. Panics when `value` is not
    /// the kind `var` holds.
    pub fn push_style_var(&mut self, var: StyleVar, value: StyleValue) {
        let style = &mut self.config.style;
        let backup = style.var(var);
        style.set_var(var, value);
        self.style_modifiers.push(StyleMod { var, backup });
    }

    pub fn pop_style_var(&mut self, count: usize) {
        for _ in 0..count {
            let m = self
                .style_modifiers
                .pop()
                .unwrap_or_else(|| panic!("pop_style_var: more pops than pushes"));
            self.config.style.set_var(m.var, m.backup);
        }
    }

    pub fn push_item_width(&mut self, w: f32) {
        self.current_window_mut("push_item_width").dc.push_item_width(w);
    }

    pub fn pop_item_width(&mut self) {
        self.current_window_mut("pop_item_width").dc.pop_item_width();
    }

    // Layout

    /// Reserves `size` on the current line and moves to the next one.
    pub fn item_size(&mut self, size: Vec2) {
        let spacing = self.config.style.item_spacing;
        let dc = &mut self.current_window_mut("item_size").dc;
        dc.item_size(size, 0.0, spacing);
    }

    /// Records `bb` as the last item, `id` kept alive for this frame.
    pub fn item_add(&mut self, bb: Rect, id: Id) {
        let w = self.current_window_mut("item_add");
        if id != 0 {
            w.dc.keep_alive(id);
        }
        w.dc.item_add(bb, id);
    }

    /// Continues the current line. `pos_x` > 0 places the next item at that
    /// offset from the window's left edge; a negative `spacing` means the
    /// style's item spacing.
    pub fn same_line(&mut self, pos_x: f32, spacing: f32) {
        let default_spacing = self.config.style.item_spacing.x;
        let w = self.current_window_mut("same_line");
        if pos_x != 0.0 {
            let scroll_x = w.scroll.x;
            w.dc.same_line_at(pos_x, spacing.max(0.0), scroll_x);
        } else {
            let spacing = if spacing < 0.0 { default_spacing } else { spacing };
            w.dc.same_line(spacing);
        }
    }

    pub fn new_line(&mut self) {
        let font_size = self.config.style.font_size;
        let spacing = self.config.style.item_spacing;
        let w = self.current_window_mut("new_line");
        let font_size = font_size * w.font_window_scale;
        w.dc.new_line(font_size, spacing);
    }

    pub fn indent(&mut self) {
        let amount = self.config.style.indent_spacing;
        self.current_window_mut("indent").dc.indent(amount);
    }

    pub fn unindent(&mut self) {
        let amount = self.config.style.indent_spacing;
        self.current_window_mut("unindent").dc.unindent(amount);
    }

    pub fn cursor_pos(&self) -> Vec2 {
        self.current_window()
            .map_or(Vec2::ZERO, |w| w.dc.cursor_pos)
    }

    // Groups

    pub fn begin_group(&mut self) {
        let active_id = self.active_id();
        let w = self.current_window_mut("begin_group");
        let alive = active_id != 0 && w.dc.is_alive(active_id);
        w.dc.begin_group(alive);
    }

    /// Closes the group; its bounding box becomes the last item. An active
    /// widget first seen inside the group makes the group the active item.
    pub fn end_group(&mut self) -> Rect {
        let spacing = self.config.style.item_spacing;
        let active_id = self.active_id();
        let w = self.current_window_mut("end_group");
        let (bb, group) = w.dc.end_group(spacing);
        if !group.backup_active_id_is_alive && active_id != 0 && w.dc.is_alive(active_id) {
            w.dc.last_item_id = active_id;
        }
        bb
    }

    // Columns

    /// Switches the current window to `count` columns (1 closes any open
    /// set). Column offsets persist in the window under the set's id.
    pub fn columns(&mut self, count: usize, id: Option<&str>, border: bool) {
        assert!(count >= 1, "columns: count must be at least 1");
        let spacing = self.config.style.item_spacing;
        let w = self.current_window_mut("columns");
        if w.dc.columns_count != 1 {
            w.dc.end_columns(spacing);
        }
        if count == 1 {
            return;
        }
        let base = w.get_id(id.unwrap_or("#COLUMNS"), None);
        let set_id = hash_int(count as i64, base);
        let offsets: SmallVec<[f32; 8]> = (0..=count)
            .map(|i| {
                *w.state_storage
                    .entry(hash_int(i as i64, set_id))
                    .or_insert(i as f32 / count as f32)
            })
            .collect();
        let max_x = w.content_region_max_x();
        w.dc.begin_columns(set_id, &offsets, border, max_x);
    }

    pub fn next_column(&mut self) {
        let spacing = self.config.style.item_spacing;
        self.current_window_mut("next_column").dc.next_column(spacing);
    }

    pub fn column_index(&self) -> usize {
        self.current_window().map_or(0, |w| w.dc.columns_current)
    }

    /// Moves column `i`'s left edge to `offset_x` from the window's left edge.
    /// Takes effect now and in later frames.
    pub fn set_column_offset(&mut self, i: usize, offset_x: f32) {
        let w = self.current_window_mut("set_column_offset");
        let dc = &mut w.dc;
        assert!(
            i < dc.columns_data.len(),
            "set_column_offset: column {i} of {}",
            dc.columns_count
        );
        let span = dc.columns_max_x - dc.columns_min_x;
        let norm = if span > 0.0 {
            (offset_x - dc.columns_min_x) / span
        } else {
            0.0
        };
        dc.columns_data[i].offset_norm = norm;
        let key = hash_int(i as i64, dc.columns_set_id);
        w.state_storage.insert(key, norm);
    }
}
