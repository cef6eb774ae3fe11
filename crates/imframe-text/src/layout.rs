use crate::metrics::GlyphMetrics;

/// Width reported for a newline; never equal to a real advance, so a row's
/// trailing newline is never picked by a horizontal search.
pub const NEWLINE_WIDTH: f32 = -1.0;

/// One visual row of an edit buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextEditRow {
    pub x0: f32,
    pub x1: f32,
    /// Distance from this row's baseline to the next one.
    pub baseline_y_delta: f32,
    pub y_min: f32,
    pub y_max: f32,
    /// Characters in the row, trailing newline included. 0 only past the end.
    pub num_chars: usize,
}

/// Splits an edit buffer into visual rows and measures characters.
pub trait TextLayout {
    /// Row starting at `start`. A row ends after a newline, or where the
    /// next character would overflow the wrap width.
    fn layout_row(&self, text: &[char], start: usize) -> TextEditRow;

    /// Width of character `char_idx` of the row starting at `line_start`,
    /// [`NEWLINE_WIDTH`] for a newline.
    fn char_width(&self, text: &[char], line_start: usize, char_idx: usize) -> f32;
}

/// Breaks rows at newlines and, optionally, at a wrap width. Advances come
/// from `metrics` rescaled to `font_size`.
#[derive(Clone, Debug)]
pub struct LineBreaker<M> {
    metrics: M,
    font_size: f32,
    wrap_width: Option<f32>,
}

impl<M: GlyphMetrics> LineBreaker<M> {
    pub fn new(metrics: M, font_size: f32) -> Self {
        Self {
            metrics,
            font_size,
            wrap_width: None,
        }
    }

    pub fn with_wrap_width(mut self, width: f32) -> Self {
        self.wrap_width = Some(width);
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn advance(&self, c: char) -> f32 {
        self.metrics.advance(c) * (self.font_size / self.metrics.native_size())
    }
}

impl<M: GlyphMetrics> TextLayout for LineBreaker<M> {
    fn layout_row(&self, text: &[char], start: usize) -> TextEditRow {
        let mut width = 0.0;
        let mut n = 0;
        for &c in text.get(start..).unwrap_or_default() {
            if c == '\n' {
                n += 1;
                break;
            }
            let w = self.advance(c);
            if let Some(wrap) = self.wrap_width
                && n > 0
                && width + w > wrap
            {
                break;
            }
            width += w;
            n += 1;
        }
        TextEditRow {
            x0: 0.0,
            x1: width,
            baseline_y_delta: self.font_size,
            y_min: 0.0,
            y_max: self.font_size,
            num_chars: n,
        }
    }

    fn char_width(&self, text: &[char], line_start: usize, char_idx: usize) -> f32 {
        match text.get(line_start + char_idx) {
            Some('\n') => NEWLINE_WIDTH,
            Some(&c) => self.advance(c),
            None => 0.0,
        }
    }
}
