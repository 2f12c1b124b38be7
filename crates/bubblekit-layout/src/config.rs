//! Bubble configuration.
//!
//! [`PopupTheme`] carries the resolved theme values shared by every bubble,
//! [`BubbleConfig`] the properties set on one bubble. Lengths stay
//! [`Dimension`]s until the viewport density is known.

use bubblekit_core::Dimension;
use glam::Vec2;

use crate::placement::Placement;

/// Default arrow width.
pub const ARROW_WIDTH: Dimension = Dimension::vp(16.0);
/// Default arrow height.
pub const ARROW_HEIGHT: Dimension = Dimension::vp(8.0);

/// What to do when no placement fits around the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvoidanceMode {
    /// Clamp the bubble into the viewport, covering the target if needed.
    #[default]
    CoverTarget,
    /// Shrink the bubble into the free space beside the target.
    AvoidAroundTarget,
}

/// What a tips bubble points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TipsAnchor {
    #[default]
    Target,
    /// The mouse cursor position reported by the viewport context.
    Cursor,
}

/// Theme values read by the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupTheme {
    /// Content padding for regular bubbles.
    pub padding: Dimension,
    /// Content padding for tips bubbles.
    pub tips_padding: Dimension,
    /// Gap between target and bubble when the bubble does not set one.
    pub target_space: Dimension,
    pub radius: Dimension,
    /// Minimum child height, ignored when zero.
    pub min_height: Dimension,
    /// Grid columns the bubble may span.
    pub max_columns: u32,
    /// Round offsets to whole pixels so a double border stays crisp.
    pub double_border_enable: bool,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            padding: Dimension::vp(12.0),
            tips_padding: Dimension::vp(8.0),
            target_space: Dimension::vp(8.0),
            radius: Dimension::vp(20.0),
            min_height: Dimension::ZERO,
            max_columns: 4,
            double_border_enable: false,
        }
    }
}

/// Properties of a single bubble.
///
/// Unset optional values fall back to the [`PopupTheme`].
///
/// # Example
///
/// ```
/// use bubblekit_core::Dimension;
/// use bubblekit_layout::{BubbleConfig, Placement};
///
/// let config = BubbleConfig::default()
///     .with_placement(Placement::TopLeft)
///     .with_arrow_offset(Dimension::percent(0.0))
///     .with_avoid_keyboard(true);
/// assert_eq!(config.placement, Some(Placement::TopLeft));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleConfig {
    /// Requested placement. `None` means the caller did not ask for one and
    /// `Bottom` is used.
    pub placement: Option<Placement>,
    pub target_space: Option<Dimension>,
    pub radius: Option<Dimension>,
    pub arrow_width: Dimension,
    pub arrow_height: Dimension,
    /// Position of the arrow along the docking edge. Percentages are relative
    /// to the target's span, lengths to the bubble edge.
    pub arrow_offset: Option<Dimension>,
    pub enable_arrow: bool,
    /// Added to the final position.
    pub position_offset: Vec2,
    /// Point at the caret when the target is a text input.
    pub caret_mode: bool,
    /// Use the target's transformed paint rect.
    pub follow_transform: bool,
    pub avoid_keyboard: bool,
    /// Keep the bubble on the target's half of a half-folded device.
    pub enable_hover_mode: bool,
    pub show_in_sub_window: bool,
    /// Block events outside the bubble (the host window becomes a hot area).
    pub block_event: bool,
    /// Fit into the display's available rect instead of the window.
    pub expand_display: bool,
    pub tips: bool,
    pub tips_anchor: TipsAnchor,
    pub avoidance: AvoidanceMode,
    /// The content is a custom builder rather than a message.
    pub use_custom: bool,
    /// The caller fixed the bubble width.
    pub has_width: bool,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            placement: None,
            target_space: None,
            radius: None,
            arrow_width: ARROW_WIDTH,
            arrow_height: ARROW_HEIGHT,
            arrow_offset: None,
            enable_arrow: true,
            position_offset: Vec2::ZERO,
            caret_mode: true,
            follow_transform: false,
            avoid_keyboard: false,
            enable_hover_mode: false,
            show_in_sub_window: false,
            block_event: true,
            expand_display: false,
            tips: false,
            tips_anchor: TipsAnchor::Target,
            avoidance: AvoidanceMode::CoverTarget,
            use_custom: false,
            has_width: false,
        }
    }
}

impl BubbleConfig {
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_target_space(mut self, space: Dimension) -> Self {
        self.target_space = Some(space);
        self
    }

    pub fn with_radius(mut self, radius: Dimension) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_arrow_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.arrow_width = width;
        self.arrow_height = height;
        self
    }

    pub fn with_arrow_offset(mut self, offset: Dimension) -> Self {
        self.arrow_offset = Some(offset);
        self
    }

    pub fn with_enable_arrow(mut self, enable: bool) -> Self {
        self.enable_arrow = enable;
        self
    }

    pub fn with_position_offset(mut self, offset: Vec2) -> Self {
        self.position_offset = offset;
        self
    }

    pub fn with_caret_mode(mut self, caret: bool) -> Self {
        self.caret_mode = caret;
        self
    }

    pub fn with_follow_transform(mut self, follow: bool) -> Self {
        self.follow_transform = follow;
        self
    }

    pub fn with_avoid_keyboard(mut self, avoid: bool) -> Self {
        self.avoid_keyboard = avoid;
        self
    }

    pub fn with_hover_mode(mut self, enable: bool) -> Self {
        self.enable_hover_mode = enable;
        self
    }

    pub fn with_sub_window(mut self, show: bool) -> Self {
        self.show_in_sub_window = show;
        self
    }

    pub fn with_block_event(mut self, block: bool) -> Self {
        self.block_event = block;
        self
    }

    pub fn with_expand_display(mut self, expand: bool) -> Self {
        self.expand_display = expand;
        self
    }

    pub fn with_tips(mut self, anchor: TipsAnchor) -> Self {
        self.tips = true;
        self.tips_anchor = anchor;
        self
    }

    pub fn with_avoidance(mut self, mode: AvoidanceMode) -> Self {
        self.avoidance = mode;
        self
    }

    pub fn with_use_custom(mut self, custom: bool) -> Self {
        self.use_custom = custom;
        self
    }

    pub fn with_fixed_width(mut self, fixed: bool) -> Self {
        self.has_width = fixed;
        self
    }

    /// Tips bubble anchored to the cursor.
    pub fn follows_cursor(&self) -> bool {
        self.tips && self.tips_anchor == TipsAnchor::Cursor
    }
}
