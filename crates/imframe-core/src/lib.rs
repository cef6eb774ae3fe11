//! # Windows, ids and draw contexts
//!
//! Imframe keeps no widget tree. What survives from one frame to the next is
//! a table of [`Window`]s keyed by the hash of their names, plus whatever
//! small values widgets store under their own hashed [`Id`]s.
//!
//! - [`Rect`] / [`Vec2`]: geometry, with an inverted rect as the empty
//!   accumulator.
//! - [`IdStack`]: nested hash seeds; a widget's id is its label hashed with
//!   the seed of the scope it was declared in.
//! - [`DrawContext`]: the layout cursor and small style stacks of one window
//!   visit, built fresh each time the window is begun.
//! - [`Window`]: the persistent record. Position, size, scroll, collapse
//!   state and auto-fit survive between frames.
//! - [`Windows`]: the owning registry, with an explicit sweep of windows left
//!   unvisited for too long.
//!
//! ```rust
//! use imframe_core::*;
//!
//! let mut windows = Windows::new();
//! let key = windows.insert(Window::new("Inspector"));
//! let w = windows.get_mut(key).unwrap();
//!
//! let before = w.get_id("Apply", None);
//! w.push_id("row 2");
//! let nested = w.get_id("Apply", None);
//! w.pop_id();
//!
//! assert_ne!(before, nested);
//! assert_eq!(before, w.get_id("Apply", None));
//! ```
//!
//! ## Paint and hit-test order
//!
//! Every frame each root window contributes itself and its active children.
//! [`Window::add_to`] builds the paint list; [`Window::add_to_sorted`] builds
//! the hit-test order, where popups, tooltips and combo boxes come before
//! ordinary siblings.

pub mod color;
pub mod draw_context;
pub mod flags;
pub mod geometry;
pub mod id;
pub mod popup;
pub mod registry;
pub mod settings;
pub mod stacks;
pub mod style;
pub mod window;

pub use color::*;
pub use draw_context::{DrawContext, LayoutType};
pub use flags::{SetCond, WindowFlags};
pub use geometry::*;
pub use id::{Id, IdStack};
pub use popup::PopupRef;
pub use registry::Windows;
pub use settings::{MemorySettings, SettingsStore, WindowSettings};
pub use stacks::*;
pub use style::*;
pub use window::{Window, WindowKey};
