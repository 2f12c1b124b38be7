//! Outline paths for popup bubbles.
//!
//! A [`Path`] is a flat list of move/line/arc/close commands. The layout
//! engine builds one per pass for the popup outline; painters either read the
//! commands directly, parse the serialised string form, or hand the path to
//! lyon through [`Path::to_lyon`].
//!
//! ```
//! use bubblekit_geometry::{Path, PathBuilder};
//! use glam::Vec2;
//!
//! let mut builder = PathBuilder::new();
//! builder
//!     .move_to(Vec2::new(0.0, 0.0))
//!     .line_to(Vec2::new(10.0, 0.0))
//!     .close();
//! let path = builder.build();
//! assert_eq!(path.to_string(), "M0 0 L10 0 Z");
//! assert_eq!(Path::from_svg("M0 0 L10 0 Z").unwrap(), path);
//! ```

mod convert;
mod error;
mod parse;
mod path;

pub use error::PathParseError;
pub use path::{Path, PathBuilder, PathCommand, Segment};
