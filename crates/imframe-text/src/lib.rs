//! Text editing support for imframe: the [`TextEditState`] of the focused
//! field, the [`TextLayout`] row seam it measures through, and glyph metrics
//! providers to back it.

mod error;
pub mod layout;
pub mod metrics;
pub mod text_edit;

pub use error::FontError;
pub use layout::{LineBreaker, NEWLINE_WIDTH, TextEditRow, TextLayout};
pub use metrics::{AbGlyphMetrics, FixedAdvance, GlyphMetrics};
pub use text_edit::{EditKey, TextEditState};
