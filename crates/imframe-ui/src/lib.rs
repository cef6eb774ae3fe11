//! # imframe-ui
//!
//! The frame driver. [`Context`] sequences window visits within a frame and
//! carries the state shared between them: the id and style stacks, the popup
//! stacks, focus, the active id and the focused text field.
//!
//! Widgets are plain functions over a `&mut Context`; nothing here draws.
//! A renderer walks [`Context::render_list`] after `end_frame`.

mod context;
mod layout;
mod popup;
pub mod tests;

pub use context::Context;
