use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::FontError;

/// Per-character advances of one font face.
pub trait GlyphMetrics {
    /// Horizontal advance of `c`, in pixels at [`native_size`](Self::native_size).
    fn advance(&self, c: char) -> f32;
    /// Pixel size the advances are measured at.
    fn native_size(&self) -> f32;
}

/// Monospace stand-in: every character advances by the same amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
    pub size: f32,
}

impl FixedAdvance {
    pub fn new(advance: f32, size: f32) -> Self {
        Self { advance, size }
    }
}

impl GlyphMetrics for FixedAdvance {
    fn advance(&self, _c: char) -> f32 {
        self.advance
    }
    fn native_size(&self) -> f32 {
        self.size
    }
}

/// Advances read from an outline font through `ab_glyph`.
#[derive(Clone)]
pub struct AbGlyphMetrics {
    font: FontArc,
    px: f32,
}

impl std::fmt::Debug for AbGlyphMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbGlyphMetrics").field("px", &self.px).finish_non_exhaustive()
    }
}

impl AbGlyphMetrics {
    pub fn new(font: FontArc, px: f32) -> Result<Self, FontError> {
        if px.is_nan() || px <= 0.0 {
            return Err(FontError::BadSize(px));
        }
        Ok(Self { font, px })
    }

    /// Parses TTF/OTF bytes.
    pub fn from_bytes(bytes: Vec<u8>, px: f32) -> Result<Self, FontError> {
        let font = FontArc::try_from_vec(bytes)?;
        Self::new(font, px)
    }
}

impl GlyphMetrics for AbGlyphMetrics {
    fn advance(&self, c: char) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(self.px));
        scaled.h_advance(self.font.glyph_id(c))
    }
    fn native_size(&self) -> f32 {
        self.px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_font_is_an_error() {
        let err = AbGlyphMetrics::from_bytes(vec![0, 1, 2, 3], 16.0).unwrap_err();
        assert!(matches!(err, FontError::Invalid(_)));
        assert!(err.to_string().starts_with("font data could not be parsed"));
    }

    #[test]
    fn test_fixed_advance() {
        let m = FixedAdvance::new(7.0, 13.0);
        assert_eq!(m.advance('W'), 7.0);
        assert_eq!(m.advance('i'), 7.0);
        assert_eq!(m.native_size(), 13.0);
    }
}
