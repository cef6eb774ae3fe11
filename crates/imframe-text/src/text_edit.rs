//! # Text edit state
//!
//! At most one text field is being edited at a time. It owns a
//! [`TextEditState`]: a private copy of the buffer (the caller's buffer is
//! not guaranteed to outlive the frame), a snapshot taken when focus was
//! gained, and the cursor/selection indices.
//!
//! Indices count `char`s. Every mutation keeps `cursor`, `select_start` and
//! `select_end` within `0..=len`.
//!
//! Positions on screen are turned into indices through a [`TextLayout`],
//! which is consulted one visual row at a time.
//!
//! ```rust
//! use imframe_text::{EditKey, FixedAdvance, LineBreaker, TextEditState};
//!
//! let layout = LineBreaker::new(FixedAdvance::new(7.0, 13.0), 13.0);
//! let mut st = TextEditState::new(1, "hello", 64);
//! st.click(&layout, 15.0, 4.0);
//! assert_eq!(st.cursor(), 2);
//! st.on_key_pressed(&layout, EditKey::Right, true);
//! st.on_key_pressed(&layout, EditKey::Backspace, false);
//! assert_eq!(st.text(), "helo");
//! ```

use imframe_core::Id;

use crate::layout::{NEWLINE_WIDTH, TextEditRow, TextLayout};

/// Caret blink period in seconds.
const CURSOR_BLINK_PERIOD: f32 = 1.2;
/// Portion of each period during which the caret is drawn.
const CURSOR_BLINK_ON: f32 = 0.8;
/// Caret timer value after input; the caret stays solid until it reaches 0.
const CURSOR_ANIM_RESET: f32 = -0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    TextStart,
    TextEnd,
    Backspace,
    Delete,
    Char(char),
}

/// Where a character index sits in the row layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RowPos {
    x: f32,
    first_char: usize,
    length: usize,
    prev_first: usize,
}

#[derive(Clone, Debug)]
pub struct TextEditState {
    /// Widget owning this state.
    pub id: Id,
    text: Vec<char>,
    initial_text: Vec<char>,
    /// Staging area for handing the buffer back as UTF-8.
    temp_text_buffer: String,
    /// Buffer length in UTF-8 bytes.
    pub cur_len_a: usize,
    /// Buffer length in chars.
    pub cur_len_w: usize,
    /// Maximum UTF-8 length the caller's buffer accepts.
    pub buf_capacity: usize,
    pub scroll_x: f32,
    cursor: usize,
    select_start: usize,
    select_end: usize,
    has_preferred_x: bool,
    preferred_x: f32,
    pub cursor_anim: f32,
    /// Set by keyboard input so the owner scrolls the caret into view.
    pub cursor_follow: bool,
    pub selected_all_mouse_lock: bool,
}

impl TextEditState {
    pub fn new(id: Id, initial: &str, buf_capacity: usize) -> Self {
        let text: Vec<char> = initial.chars().collect();
        Self {
            id,
            cur_len_a: initial.len(),
            cur_len_w: text.len(),
            initial_text: text.clone(),
            text,
            temp_text_buffer: String::with_capacity(initial.len()),
            buf_capacity,
            scroll_x: 0.0,
            cursor: 0,
            select_start: 0,
            select_end: 0,
            has_preferred_x: false,
            preferred_x: 0.0,
            cursor_anim: CURSOR_ANIM_RESET,
            cursor_follow: false,
            selected_all_mouse_lock: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn select_start(&self) -> usize {
        self.select_start
    }
    pub fn select_end(&self) -> usize {
        self.select_end
    }
    pub fn has_preferred_x(&self) -> bool {
        self.has_preferred_x
    }

    pub fn chars(&self) -> &[char] {
        &self.text
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// The buffer as UTF-8, staged in an internal buffer reused across calls.
    pub fn text_utf8(&mut self) -> &str {
        self.temp_text_buffer.clear();
        self.temp_text_buffer.extend(self.text.iter());
        &self.temp_text_buffer
    }

    pub fn initial_text(&self) -> String {
        self.initial_text.iter().collect()
    }

    /// Sorted selection range.
    pub fn selection(&self) -> std::ops::Range<usize> {
        self.select_start.min(self.select_end)..self.select_start.max(self.select_end)
    }

    pub fn has_selection(&self) -> bool {
        self.select_start != self.select_end
    }

    pub fn clear_selection(&mut self) {
        self.select_start = self.cursor;
        self.select_end = self.cursor;
    }

    pub fn select_all(&mut self) {
        self.select_start = 0;
        self.select_end = self.cur_len_w;
        self.cursor = self.select_end;
        self.has_preferred_x = false;
    }

    /// Pulls the cursor and selection back inside the buffer after it was
    /// changed from outside.
    pub fn cursor_clamp(&mut self) {
        self.cursor = self.cursor.min(self.cur_len_w);
        self.select_start = self.select_start.min(self.cur_len_w);
        self.select_end = self.select_end.min(self.cur_len_w);
    }

    pub fn cursor_anim_reset(&mut self) {
        self.cursor_anim = CURSOR_ANIM_RESET;
    }

    pub fn advance_cursor_anim(&mut self, dt: f32) {
        self.cursor_anim += dt;
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_anim <= 0.0 || self.cursor_anim % CURSOR_BLINK_PERIOD <= CURSOR_BLINK_ON
    }

    /// Replaces the whole buffer, as when the caller rewrote its value.
    pub fn replace_text(&mut self, s: &str) {
        self.text = s.chars().collect();
        self.sync_lengths();
        self.cursor_clamp();
    }

    /// Restores the buffer captured when focus was gained.
    pub fn revert(&mut self) {
        self.text = self.initial_text.clone();
        self.sync_lengths();
        self.cursor_clamp();
        self.has_preferred_x = false;
    }

    fn sync_lengths(&mut self) {
        self.cur_len_w = self.text.len();
        self.cur_len_a = self.text.iter().map(|c| c.len_utf8()).sum();
    }

    /// Inserts `new` at `pos`. Refused (returns false) when the result would
    /// not fit `buf_capacity`.
    pub fn insert_chars(&mut self, pos: usize, new: &[char]) -> bool {
        let added: usize = new.iter().map(|c| c.len_utf8()).sum();
        if self.cur_len_a + added > self.buf_capacity {
            return false;
        }
        let pos = pos.min(self.text.len());
        self.text.splice(pos..pos, new.iter().copied());
        self.cur_len_w += new.len();
        self.cur_len_a += added;
        true
    }

    pub fn delete_chars(&mut self, pos: usize, n: usize) {
        let start = pos.min(self.text.len());
        let end = (start + n).min(self.text.len());
        let removed: usize = self.text.drain(start..end).map(|c| c.len_utf8()).sum();
        self.cur_len_w -= end - start;
        self.cur_len_a -= removed;
        self.cursor_clamp();
    }

    // Pointer

    /// Collapses the selection at the index under (`x`, `y`).
    pub fn click(&mut self, layout: &impl TextLayout, x: f32, y: f32) {
        self.cursor = self.locate_coord(layout, x, y);
        self.select_start = self.cursor;
        self.select_end = self.cursor;
        self.has_preferred_x = false;
    }

    /// Extends the selection to the index under (`x`, `y`).
    pub fn drag(&mut self, layout: &impl TextLayout, x: f32, y: f32) {
        let p = self.locate_coord(layout, x, y);
        if self.select_start == self.select_end {
            self.select_start = self.cursor;
        }
        self.cursor = p;
        self.select_end = p;
    }

    /// Index of the character boundary nearest to (`x`, `y`), in coordinates
    /// relative to the first row's top-left. Above the text is 0, below it is
    /// the end.
    pub fn locate_coord(&self, layout: &impl TextLayout, x: f32, y: f32) -> usize {
        let n = self.cur_len_w;
        let mut base_y = 0.0;
        let mut i = 0;
        let mut row = TextEditRow::default();

        while i < n {
            row = layout.layout_row(&self.text, i);
            if row.num_chars == 0 {
                return n;
            }
            if i == 0 && y < base_y + row.y_min {
                return 0;
            }
            if y < base_y + row.y_max {
                break;
            }
            i += row.num_chars;
            base_y += row.baseline_y_delta;
        }

        if i >= n {
            return n;
        }
        if x < row.x0 {
            return i;
        }
        if x < row.x1 {
            let mut prev_x = row.x0;
            for k in 0..row.num_chars {
                let w = layout.char_width(&self.text, i, k);
                if x < prev_x + w {
                    return if x < prev_x + w / 2.0 { i + k } else { i + k + 1 };
                }
                prev_x += w;
            }
        }

        let last = i + row.num_chars - 1;
        if self.text.get(last) == Some(&'\n') {
            last
        } else {
            i + row.num_chars
        }
    }

    // Keyboard

    /// Applies one key press. `shift` extends the selection for movement keys.
    pub fn on_key_pressed(&mut self, layout: &impl TextLayout, key: EditKey, shift: bool) {
        match key {
            EditKey::Left => {
                if shift {
                    self.cursor_clamp();
                    self.prep_selection_at_cursor();
                    self.select_end = self.select_end.saturating_sub(1);
                    self.cursor = self.select_end;
                } else if self.has_selection() {
                    self.move_to_first();
                } else {
                    self.cursor = self.cursor.saturating_sub(1);
                }
                self.has_preferred_x = false;
            }
            EditKey::Right => {
                if shift {
                    self.prep_selection_at_cursor();
                    self.select_end += 1;
                    self.cursor_clamp();
                    self.cursor = self.select_end;
                } else if self.has_selection() {
                    self.move_to_last();
                } else {
                    self.cursor += 1;
                }
                self.cursor_clamp();
                self.has_preferred_x = false;
            }
            EditKey::Up | EditKey::Down => {
                if shift {
                    self.prep_selection_at_cursor();
                } else if self.has_selection() {
                    if key == EditKey::Up {
                        self.move_to_first();
                    } else {
                        self.move_to_last();
                    }
                }
                self.cursor_clamp();
                self.move_vertically(layout, key == EditKey::Down, shift);
            }
            EditKey::LineStart | EditKey::LineEnd => {
                self.cursor_clamp();
                if shift {
                    self.prep_selection_at_cursor();
                } else {
                    self.move_to_first();
                }
                let find = self.find_charpos(layout, self.cursor);
                self.cursor = if key == EditKey::LineStart {
                    find.first_char
                } else {
                    let end = find.first_char + find.length;
                    if find.length > 0 && self.text.get(end - 1) == Some(&'\n') {
                        end - 1
                    } else {
                        end
                    }
                };
                if shift {
                    self.select_end = self.cursor;
                } else {
                    self.clear_selection();
                }
                self.has_preferred_x = false;
            }
            EditKey::TextStart | EditKey::TextEnd => {
                let target = if key == EditKey::TextStart { 0 } else { self.cur_len_w };
                if shift {
                    self.prep_selection_at_cursor();
                    self.select_end = target;
                } else {
                    self.select_start = target;
                    self.select_end = target;
                }
                self.cursor = target;
                self.has_preferred_x = false;
            }
            EditKey::Backspace => {
                self.cursor_clamp();
                if self.has_selection() {
                    self.delete_selection();
                } else if self.cursor > 0 {
                    self.cursor -= 1;
                    self.delete_chars(self.cursor, 1);
                    self.clear_selection();
                }
                self.has_preferred_x = false;
            }
            EditKey::Delete => {
                self.cursor_clamp();
                if self.has_selection() {
                    self.delete_selection();
                } else if self.cursor < self.cur_len_w {
                    self.delete_chars(self.cursor, 1);
                    self.clear_selection();
                }
                self.has_preferred_x = false;
            }
            EditKey::Char(c) => {
                if self.has_selection() {
                    self.delete_selection();
                }
                if self.insert_chars(self.cursor, &[c]) {
                    self.cursor += 1;
                    self.clear_selection();
                } else {
                    log::trace!("text edit {:#x}: buffer full, dropped {c:?}", self.id);
                }
                self.has_preferred_x = false;
            }
        }
        self.cursor_follow = true;
        self.cursor_anim_reset();
    }

    fn prep_selection_at_cursor(&mut self) {
        if self.has_selection() {
            self.cursor = self.select_end;
        } else {
            self.select_start = self.cursor;
            self.select_end = self.cursor;
        }
    }

    fn sort_selection(&mut self) {
        if self.select_end < self.select_start {
            std::mem::swap(&mut self.select_start, &mut self.select_end);
        }
    }

    fn move_to_first(&mut self) {
        if self.has_selection() {
            self.sort_selection();
            self.cursor = self.select_start;
            self.select_end = self.select_start;
            self.has_preferred_x = false;
        }
    }

    fn move_to_last(&mut self) {
        if self.has_selection() {
            self.sort_selection();
            self.cursor_clamp();
            self.cursor = self.select_end;
            self.select_start = self.select_end;
            self.has_preferred_x = false;
        }
    }

    fn delete_selection(&mut self) {
        self.cursor_clamp();
        if self.has_selection() {
            self.sort_selection();
            self.delete_chars(self.select_start, self.select_end - self.select_start);
            self.cursor = self.select_start;
            self.select_end = self.select_start;
        }
        self.has_preferred_x = false;
    }

    /// Row containing index `n`, and the caret x at `n` within it.
    fn find_charpos(&self, layout: &impl TextLayout, n: usize) -> RowPos {
        let z = self.cur_len_w;
        let mut i = 0;
        let mut prev_start = 0;
        let mut row;
        loop {
            row = layout.layout_row(&self.text, i);
            if n < i + row.num_chars {
                break;
            }
            // caret after the last character of a last row with no newline
            if i + row.num_chars == z && z > 0 && self.text[z - 1] != '\n' {
                break;
            }
            prev_start = i;
            i += row.num_chars;
            if i == z || row.num_chars == 0 {
                row.num_chars = 0;
                break;
            }
        }
        let mut x = row.x0;
        for k in 0..n.saturating_sub(i) {
            x += layout.char_width(&self.text, i, k);
        }
        RowPos {
            x,
            first_char: i,
            length: row.num_chars,
            prev_first: prev_start,
        }
    }

    fn move_vertically(&mut self, layout: &impl TextLayout, down: bool, shift: bool) {
        let find = self.find_charpos(layout, self.cursor);
        let start = if down {
            if find.length == 0 {
                return;
            }
            find.first_char + find.length
        } else {
            if find.prev_first == find.first_char {
                return;
            }
            find.prev_first
        };
        let goal_x = if self.has_preferred_x {
            self.preferred_x
        } else {
            find.x
        };

        self.cursor = start;
        let row = layout.layout_row(&self.text, start);
        let mut x = row.x0;
        for k in 0..row.num_chars {
            let dx = layout.char_width(&self.text, start, k);
            if dx == NEWLINE_WIDTH {
                break;
            }
            x += dx;
            if x > goal_x {
                break;
            }
            self.cursor += 1;
        }
        self.cursor_clamp();
        self.has_preferred_x = true;
        self.preferred_x = goal_x;
        if shift {
            self.select_end = self.cursor;
        } else {
            self.clear_selection();
        }
    }
}
