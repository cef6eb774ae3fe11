use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font data could not be parsed: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
    #[error("font size must be positive, got {0}")]
    BadSize(f32),
}
