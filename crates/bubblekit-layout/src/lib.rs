//! Placement and outline engine for popup bubbles.
//!
//! A bubble is a popup anchored to a target element, optionally carrying an
//! arrow that points at the target. [`BubbleLayoutAlgorithm`] takes part in
//! the host's measure/layout passes: it reads the window through a
//! [`ViewportContext`], sizes the child through [`MeasureChild`] and leaves a
//! [`BubbleLayoutResult`] with the final offsets and the clip outline.
//!
//! ```
//! use bubblekit_core::{Rect, Size};
//! use bubblekit_layout::{
//!     BubbleConfig, BubbleLayoutAlgorithm, LayoutConstraint, MeasureChild, Placement, PopupTheme, TargetId,
//!     TargetInfo, ViewportContext,
//! };
//! use glam::Vec2;
//!
//! struct Window;
//!
//! impl ViewportContext for Window {
//!     fn wrapper_size(&self) -> Size<f32> {
//!         Size::new(720.0, 1280.0)
//!     }
//!
//!     fn target(&self, _id: TargetId) -> Option<TargetInfo> {
//!         Some(TargetInfo::new(Vec2::new(300.0, 400.0), Size::new(120.0, 48.0)))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Label {
//!     frame: Size<f32>,
//! }
//!
//! impl MeasureChild for Label {
//!     fn measure(&mut self, constraint: &LayoutConstraint) -> Size<f32> {
//!         self.frame = constraint.constrain(Size::new(200.0, 60.0));
//!         self.frame
//!     }
//!
//!     fn frame_size(&self) -> Size<f32> {
//!         self.frame
//!     }
//!
//!     fn set_frame_size(&mut self, size: Size<f32>) {
//!         self.frame = size;
//!     }
//!
//!     fn set_frame_offset(&mut self, _offset: Vec2) {}
//! }
//!
//! let mut bubble = BubbleLayoutAlgorithm::new(TargetId(1), BubbleConfig::default(), PopupTheme::default());
//! let mut label = Label::default();
//! bubble.measure(&Window, Some(&mut label));
//! let result = bubble.layout(&Window, Some(&mut label)).unwrap();
//! assert_eq!(result.arrow_placement, Placement::Bottom);
//! assert!(result.clip_path.is_closed());
//! ```

mod algorithm;
pub mod arrow;
mod avoid;
mod config;
mod error;
mod fit;
mod placement;
mod position;
mod search;
mod viewport;

pub use algorithm::{BubbleLayoutAlgorithm, BubbleLayoutResult, LayoutConstraint, MeasureChild};
pub use arrow::{ARROW_FILLET, ArrowGeometry, ArrowOffset};
pub use config::{ARROW_HEIGHT, ARROW_WIDTH, AvoidanceMode, BubbleConfig, PopupTheme, TipsAnchor};
pub use error::ArrowGeometryError;
pub use placement::Placement;
pub use search::{SearchStage, SideFlags};
pub use viewport::{
    AnchorInfo, CaretInfo, DisplayArea, FoldState, InsetBand, KeyboardInsets, Margins, SafeAreaInsets,
    SubWindowState, TargetId, TargetInfo, UiExtensionHost, Viewport, ViewportContext,
};
