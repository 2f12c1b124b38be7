//! Test doubles for the bubblekit layout engine.
//!
//! - [`FakeViewport`] - in-memory [`ViewportContext`](bubblekit_layout::ViewportContext)
//!   that records the hot areas posted to it
//! - [`FakeChild`] - a child with a fixed natural size that records the
//!   constraints it was measured with
//!
//! # Example
//!
//! ```rust
//! use bubblekit_core::Size;
//! use bubblekit_layout::{BubbleConfig, BubbleLayoutAlgorithm, PopupTheme, TargetId};
//! use bubblekit_test_utils::{FakeChild, FakeViewport};
//! use glam::Vec2;
//!
//! let viewport = FakeViewport::new(720.0, 1280.0).with_target(TargetId(1), Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
//! let mut child = FakeChild::new(200.0, 60.0);
//! let mut bubble = BubbleLayoutAlgorithm::new(TargetId(1), BubbleConfig::default(), PopupTheme::default());
//! bubble.measure(&viewport, Some(&mut child));
//! assert!(bubble.layout(&viewport, Some(&mut child)).is_some());
//! assert_eq!(child.measure_count(), 1);
//! ```

mod fake_child;
mod fake_viewport;

pub use fake_child::*;
pub use fake_viewport::*;
