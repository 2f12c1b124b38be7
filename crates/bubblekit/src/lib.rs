//! Bubblekit - popup bubble layout
//!
//! Places a popup bubble next to the element it describes and draws the
//! outline with an arrow pointing back at it.
//!
//! - **Placement**: twelve placements with fallback lists, keyboard, fold and
//!   sub-window aware viewports
//! - **Outline**: rounded rectangle with a filleted arrow notch, serialised as
//!   an SVG-like path or converted to lyon
//! - **Profiling**: puffin scopes behind the `profiling` feature
//!
//! # Quick Start
//!
//! ```ignore
//! use bubblekit::prelude::*;
//!
//! bubblekit::init_logging();
//! let mut bubble = BubbleLayoutAlgorithm::new(target, BubbleConfig::default(), PopupTheme::default());
//! bubble.measure(&window, Some(&mut content));
//! if let Some(result) = bubble.layout(&window, Some(&mut content)) {
//!     canvas.clip(&result.clip_path_string());
//! }
//! ```

pub use bubblekit_core as core;
pub use bubblekit_geometry as geometry;
pub use bubblekit_layout as layout;

pub use bubblekit_core::logging::init as init_logging;
pub use bubblekit_core::profiling;

pub use bubblekit_core::{Dimension, DimensionUnit, Rect, Size};
pub use bubblekit_geometry::{Path, PathBuilder, PathCommand, PathParseError};
pub use bubblekit_layout::{
    ArrowGeometryError, AvoidanceMode, BubbleConfig, BubbleLayoutAlgorithm, BubbleLayoutResult, LayoutConstraint,
    MeasureChild, Placement, PopupTheme, SearchStage, TargetId, TargetInfo, TipsAnchor, ViewportContext,
};

pub mod prelude {
    pub use crate::{
        AvoidanceMode, BubbleConfig, BubbleLayoutAlgorithm, BubbleLayoutResult, Dimension, LayoutConstraint,
        MeasureChild, Path, Placement, PopupTheme, Rect, Size, TargetId, TargetInfo, TipsAnchor, ViewportContext,
    };
}
