//! The measure/layout facade.
//!
//! [`BubbleLayoutAlgorithm`] drives one bubble through the host's two-phase
//! layout. `measure` resolves the viewport and sizes the child, `layout`
//! resolves the target, runs the placement search and produces a
//! [`BubbleLayoutResult`] with the offsets, touch region and clip path the
//! host needs to position and paint the bubble.

use bubblekit_core::math::great_not_equal;
use bubblekit_core::profiling::{profile_function, profile_scope};
use bubblekit_core::{Rect, Size};
use bubblekit_geometry::Path;
use glam::Vec2;

use crate::arrow::{ARROW_FILLET, ArrowGeometry, ArrowOffset, NotchRequest, build_outline, place_notch};
use crate::config::{BubbleConfig, PopupTheme};
use crate::placement::{Placement, candidate_list};
use crate::search::{SearchFrame, SearchStage, SearchState};
use crate::viewport::{
    AnchorInfo, CaretInfo, KEYBOARD_SPACE_VP, TargetId, Viewport, ViewportContext, ViewportRequest, fit_cursor_to_sub_container,
    is_resolvable, resolve_viewport,
};

/// Gap kept from the target when a bubble is clamped over it.
const TARGET_SECURITY_VP: f32 = 8.0;
/// Room a side needs beyond the arrow before a bubble may be squeezed into it.
/// Also kept free above and below a bubble at its maximum height.
const OUT_RANGE_SPACE_VP: f32 = 40.0;
/// Size of the cursor a tips bubble follows.
const MOUSE_WIDTH_VP: f32 = 16.0;
const MOUSE_HEIGHT_VP: f32 = 24.0;
/// Gap between the cursor and a tips bubble.
const TIPS_MOUSE_SPACE_VP: f32 = 8.0;
const MAX_TIP_WIDTH_VP: f32 = 480.0;

/// Size limits handed to the child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConstraint {
    pub min_size: Size<f32>,
    pub max_size: Size<f32>,
}

impl LayoutConstraint {
    pub fn new(min_size: Size<f32>, max_size: Size<f32>) -> Self {
        Self { min_size, max_size }
    }

    pub fn loose(max_size: Size<f32>) -> Self {
        Self::new(Size::ZERO, max_size)
    }

    /// Lowers the max size to `cap`, never below the min size.
    pub fn cap_max(&mut self, cap: Size<f32>) {
        self.max_size = self.max_size.min(cap).max(self.min_size);
    }

    /// Fits `size` between the min and max size.
    pub fn constrain(&self, size: Size<f32>) -> Size<f32> {
        size.max(self.min_size).min(self.max_size)
    }
}

/// The bubble's single child as seen by the layout.
///
/// The frame size is the child's size including the room reserved for the
/// arrow on every side; the layout grows and shrinks it by twice the arrow
/// height between passes.
pub trait MeasureChild {
    /// Measures the child under `constraint`. The result also becomes the
    /// frame size.
    fn measure(&mut self, constraint: &LayoutConstraint) -> Size<f32>;

    fn frame_size(&self) -> Size<f32>;

    fn set_frame_size(&mut self, size: Size<f32>);

    /// Places the child's frame relative to the overlay.
    fn set_frame_offset(&mut self, offset: Vec2);
}

/// Everything a layout pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleLayoutResult {
    /// Top-left of the content box in overlay coordinates.
    pub child_offset: Vec2,
    /// Content size, without the arrow margin.
    pub child_size: Size<f32>,
    /// Offset given to the child frame, `child_offset - (arrow height, arrow height)`.
    pub frame_offset: Vec2,
    /// Placement the bubble ended up at.
    pub arrow_placement: Placement,
    pub show_arrow: bool,
    /// Arrow tip distance from the start of the docking edge, before it is
    /// kept clear of the corners. Zero without an arrow.
    pub arrow_offset: f32,
    /// Arrow tip in overlay coordinates as found by the search.
    pub arrow_position: Vec2,
    pub stage: SearchStage,
    /// Size the bubble was compressed to by target avoidance.
    pub compressed_size: Option<Size<f32>>,
    /// Content box plus the arrow.
    pub touch_region: Rect<f32>,
    /// Outline in the child frame, content starting at (arrow height, arrow height).
    pub clip_path: Path,
    /// Points of the arrow notch in the child frame.
    pub arrow_clip_offsets: [Vec2; 4],
    pub radius: f32,
    /// Content padding the host applies inside the bubble.
    pub padding: f32,
    pub host_window_rect: Rect<f32>,
    /// Placement chosen for a cursor tips bubble during measure.
    pub tips_placement: Option<Placement>,
}

static_assertions::assert_impl_all!(BubbleLayoutResult: Send, Sync, Clone);

impl BubbleLayoutResult {
    /// The clip path as `M`/`L`/`A`/`Z` commands.
    pub fn clip_path_string(&self) -> String {
        self.clip_path.to_string()
    }
}

/// What `measure` leaves for `layout`.
#[derive(Debug, Clone, Copy, Default)]
struct MeasurePass {
    viewport: Viewport,
    popup_max: Size<f32>,
    measured_last: Size<f32>,
    cursor_anchor: Option<AnchorInfo>,
    tips_placement: Option<Placement>,
    reset_tips_size: bool,
}

/// Places one bubble around its target.
///
/// # Example
///
/// ```ignore
/// let mut algorithm = BubbleLayoutAlgorithm::new(target, config, PopupTheme::default());
/// algorithm.measure(&context, Some(&mut child));
/// if let Some(result) = algorithm.layout(&context, Some(&mut child)) {
///     paint(result.child_offset, &result.clip_path_string());
/// }
/// ```
#[derive(Debug)]
pub struct BubbleLayoutAlgorithm {
    target: TargetId,
    config: BubbleConfig,
    theme: PopupTheme,
    exiting: bool,
    pass: MeasurePass,
    /// Last resolved target in window coordinates.
    anchor: Option<AnchorInfo>,
    result: Option<BubbleLayoutResult>,
}

impl BubbleLayoutAlgorithm {
    pub fn new(target: TargetId, config: BubbleConfig, theme: PopupTheme) -> Self {
        Self {
            target,
            config,
            theme,
            exiting: false,
            pass: MeasurePass::default(),
            anchor: None,
            result: None,
        }
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BubbleConfig) {
        self.config = config;
    }

    /// An exiting bubble keeps its last geometry while it animates out.
    pub fn set_exiting(&mut self, exiting: bool) {
        self.exiting = exiting;
    }

    /// Result of the last completed layout pass.
    pub fn result(&self) -> Option<&BubbleLayoutResult> {
        self.result.as_ref()
    }

    fn arrow_geometry(&self, density: f32) -> ArrowGeometry {
        let width = self.config.arrow_width.to_px(density);
        let height = self.config.arrow_height.to_px(density);
        ArrowGeometry::derive(width, height, ARROW_FILLET.to_px(density)).unwrap_or_else(|err| {
            tracing::warn!("{}, using the default arrow", err);
            ArrowGeometry::default_for_density(density)
        })
    }

    /// Corner radius for a `child` sized bubble, at most half its smaller side.
    fn resolve_radius(&self, density: f32, child: Size<f32>) -> f32 {
        let radius = self.config.radius.unwrap_or(self.theme.radius);
        let half_min = child.width.min(child.height) / 2.0;
        let radius = if radius.is_percent() {
            radius.value * half_min
        } else {
            radius.to_px(density)
        };
        radius.min(child.height / 2.0).min(child.width / 2.0).max(0.0)
    }

    /// Largest size a non-tips bubble may take.
    fn popup_max_size<C: ViewportContext + ?Sized>(&self, ctx: &C, density: f32) -> Size<f32> {
        let window_height = if self.config.show_in_sub_window {
            ctx.device_height()
        } else {
            ctx.window_height()
        };
        let height = window_height - 2.0 * OUT_RANGE_SPACE_VP * density - ctx.safe_area().top;
        let width = if self.config.use_custom {
            f32::INFINITY
        } else {
            ctx.grid_max_width(self.theme.max_columns)
        };
        Size::new(width, height)
    }

    fn search_frame(
        &self,
        density: f32,
        viewport: Viewport,
        anchor: AnchorInfo,
        geometry: &ArrowGeometry,
        radius: f32,
    ) -> SearchFrame {
        let config = &self.config;
        let follow_cursor = config.follows_cursor();
        SearchFrame {
            viewport,
            anchor,
            arrow_width: geometry.width,
            arrow_height: geometry.height,
            radius,
            target_space: config.target_space.unwrap_or(self.theme.target_space).to_px(density),
            user_target_space: config.target_space.map_or(0.0, |space| space.to_px(density)),
            target_security: TARGET_SECURITY_VP * density,
            out_range: OUT_RANGE_SPACE_VP * density,
            cursor_gap: TIPS_MOUSE_SPACE_VP * density,
            max_tip_width: MAX_TIP_WIDTH_VP * density,
            enable_arrow: config.enable_arrow && !follow_cursor,
            avoid_keyboard: config.avoid_keyboard,
            follow_cursor,
            caret: false,
            great_width: false,
            reset_tips_size: self.pass.reset_tips_size,
            avoidance: config.avoidance,
            has_placement: config.placement.is_some(),
            has_width: config.has_width,
        }
    }

    /// Measures the child. Without a child the pass is skipped.
    pub fn measure<C, M>(&mut self, ctx: &C, child: Option<&mut M>)
    where
        C: ViewportContext + ?Sized,
        M: MeasureChild + ?Sized,
    {
        profile_function!();
        let Some(child) = child else {
            tracing::debug!("Bubble has no child, skipping measure");
            return;
        };

        let config = self.config;
        let density = ctx.density();
        let geometry = self.arrow_geometry(density);
        let arrow = geometry.height;
        let follow_cursor = config.follows_cursor();

        let cursor_anchor = if follow_cursor {
            ctx.cursor_position().map(|position| {
                let position = match ctx.sub_window() {
                    Some(sub_window) if !config.expand_display => fit_cursor_to_sub_container(position, &sub_window),
                    _ => position,
                };
                AnchorInfo::new(
                    position,
                    Size::new(MOUSE_WIDTH_VP * density, MOUSE_HEIGHT_VP * density),
                )
            })
        } else {
            None
        };
        let anchor_y = cursor_anchor
            .map(|anchor| anchor.offset.y)
            .or_else(|| ctx.target(self.target).map(|info| info.offset.y));

        let viewport = resolve_viewport(
            ctx,
            &ViewportRequest {
                tips: config.tips,
                follow_cursor,
                avoid_keyboard: config.avoid_keyboard,
                in_sub_window: config.show_in_sub_window,
                expand_display: config.expand_display,
                hover_mode: config.enable_hover_mode,
                anchor_y,
            },
        );
        let popup_max = self.popup_max_size(ctx, density);
        let margins = viewport.margins;

        let mut constraint = LayoutConstraint::loose(viewport.size);
        if config.avoid_keyboard {
            constraint.max_size = Size::new(
                viewport.size.width,
                viewport.size.height - margins.top - KEYBOARD_SPACE_VP * density,
            )
            .non_negative();
        }
        let min_height = self.theme.min_height.to_px(density);
        if great_not_equal(min_height, 0.0) {
            constraint.min_size.height = min_height;
        }
        if let Some(split) = viewport.hover_split {
            constraint.cap_max(Size::new(constraint.max_size.width, split.height.floor()));
        }
        if !config.tips {
            if config.use_custom {
                constraint.cap_max(Size::new(constraint.max_size.width, popup_max.height));
            } else if great_not_equal(popup_max.width, 0.0) && great_not_equal(popup_max.height, 0.0) {
                constraint.cap_max(popup_max);
            }
        }
        tracing::trace!(
            "Child constraint min {} max {}",
            constraint.min_size,
            constraint.max_size
        );

        self.pass = MeasurePass {
            viewport,
            popup_max,
            cursor_anchor,
            ..MeasurePass::default()
        };

        let before = child.frame_size();
        let mut after = child.measure(&constraint);

        if config.tips {
            profile_scope!("tips_region");
            let max_tip_width = MAX_TIP_WIDTH_VP * density;
            if let Some(anchor) = cursor_anchor {
                let radius = self.resolve_radius(density, after);
                let frame = self.search_frame(density, viewport, anchor, &geometry, radius);
                let mut state = SearchState::default();
                let (placement, shrink) = frame.fit_cursor_tips(&mut state, after);
                if let Some(size) = shrink {
                    let mut tips = constraint;
                    tips.max_size = size;
                    after = child.measure(&tips);
                    self.pass.reset_tips_size = true;
                }
                self.pass.tips_placement = Some(placement);
            } else {
                let height = viewport
                    .hover_split
                    .map_or(viewport.size.height - margins.top - margins.bottom, |split| split.height);
                let width = (viewport.size.width - margins.end - margins.start).min(max_tip_width);
                let mut tips = constraint;
                tips.max_size = Size::new(width, height).non_negative();
                after = child.measure(&tips);
            }
        }

        if !before.near_equal(&after) {
            child.set_frame_size(child.frame_size().inflate(2.0 * arrow));
        }
        self.pass.measured_last = child.frame_size();

        let placement = config.placement.unwrap_or_default();
        if config.use_custom && !config.show_in_sub_window {
            let Some(info) = ctx.target(self.target) else {
                return;
            };
            let wrapper = ctx.wrapper_size();
            let max_width = wrapper.width - 2.0 * TARGET_SECURITY_VP * density;
            let mut width = wrapper.width;
            if placement.is_horizontal() {
                let frame = child.frame_size();
                let spacing = 2.0 * arrow;
                let fits = frame.width + info.offset.x + info.size.width + spacing <= wrapper.width
                    && info.offset.x - frame.width - spacing >= 0.0;
                if fits {
                    return;
                }
                width = wrapper.width - spacing;
            }
            let mut custom = constraint;
            custom.cap_max(Size::new(width.min(max_width), wrapper.height));
            let size = child.measure(&custom);
            child.set_frame_size(size.inflate(2.0 * arrow));
            self.pass.measured_last = child.frame_size();
            tracing::debug!("Custom bubble limited to {} on {}", size, placement);
        }
    }

    /// Resolves the target for this pass in window coordinates, and the
    /// caret when the bubble points at one.
    ///
    /// A target that is neither on the main tree nor visible keeps the
    /// previous anchor.
    fn resolve_anchor<C: ViewportContext + ?Sized>(&mut self, ctx: &C) -> Option<(AnchorInfo, Option<CaretInfo>)> {
        let info = ctx.target(self.target)?;
        let config = self.config;

        let anchor = if config.follows_cursor() {
            self.pass.cursor_anchor.or(self.anchor)?
        } else if !is_resolvable(&info) {
            tracing::warn!("Target {:?} is detached, keeping the previous anchor", self.target);
            self.anchor.unwrap_or(AnchorInfo::new(info.offset, info.size))
        } else {
            let mut anchor = match info.transformed_rect {
                Some(rect) if config.follow_transform => AnchorInfo::new(rect.origin(), rect.size()),
                _ => AnchorInfo::new(info.offset, info.size),
            };
            if config.show_in_sub_window
                && config.expand_display
                && let Some(sub_window) = ctx.sub_window()
            {
                anchor.offset += sub_window.display_window_offset - sub_window.rect.origin();
            }
            anchor
        };
        self.anchor = Some(anchor);

        let caret = info.caret.filter(|_| config.caret_mode && !config.follows_cursor());
        let anchor = caret.map_or(anchor, |caret| AnchorInfo::new(caret.offset, Size::new(0.0, caret.height)));
        Some((anchor, caret))
    }

    /// Positions the child and builds the result. Returns the previous
    /// result when the pass is skipped.
    pub fn layout<C, M>(&mut self, ctx: &C, child: Option<&mut M>) -> Option<&BubbleLayoutResult>
    where
        C: ViewportContext + ?Sized,
        M: MeasureChild + ?Sized,
    {
        profile_function!();
        let Some(child) = child else {
            return self.result.as_ref();
        };

        let config = self.config;
        let density = ctx.density();
        let geometry = self.arrow_geometry(density);
        let arrow = geometry.height;

        let mut frame_size = child.frame_size();
        if frame_size.near_equal(&self.pass.popup_max) || !self.pass.measured_last.near_equal(&frame_size) {
            frame_size = frame_size.inflate(2.0 * arrow);
            child.set_frame_size(frame_size);
        }

        if self.exiting {
            tracing::debug!("Bubble is exiting, keeping its geometry");
            return self.result.as_ref();
        }
        let Some((mut anchor, caret)) = self.resolve_anchor(ctx) else {
            tracing::debug!("Target {:?} not found, stopping layout", self.target);
            return self.result.as_ref();
        };

        let mut placement = config.placement.unwrap_or_default();
        let mut position_offset = config.position_offset;
        if caret.is_some() {
            position_offset = Vec2::ZERO;
            if !matches!(placement, Placement::Top | Placement::Bottom) {
                placement = Placement::Bottom;
            }
        }
        anchor.offset -= ctx.overlay_offset();

        let mut child_size = frame_size.inflate(-2.0 * arrow).non_negative();
        let radius = self.resolve_radius(density, child_size);

        let mut viewport = self.pass.viewport;
        let margins = &mut viewport.margins;
        let great_width = child_size.width >= viewport.size.width - margins.start - margins.end;
        if great_width {
            margins.start = 0.0;
            margins.end = 0.0;
        }

        let mut frame = self.search_frame(density, viewport, anchor, &geometry, radius);
        frame.caret = caret.is_some();
        frame.great_width = great_width;

        let tips_placement = self.pass.tips_placement.filter(|_| frame.follow_cursor);
        let candidates = candidate_list(placement, tips_placement);
        let mut state = SearchState::default();
        let outcome = frame.resolve(&mut state, placement, &candidates, child_size);

        if let Some(size) = outcome.compressed {
            child.measure(&LayoutConstraint::loose(size));
            child.set_frame_size(size.inflate(2.0 * arrow));
            child_size = size;
        }

        let mut child_offset = outcome.offset + position_offset;
        if self.theme.double_border_enable {
            child_offset = child_offset.round();
        }
        let show_arrow = outcome.show_arrow && frame.enable_arrow;

        let touch_region = touch_region(outcome.placement, show_arrow, child_offset, child_size, arrow);
        let frame_offset = child_offset - Vec2::splat(arrow);
        child.set_frame_offset(frame_offset);

        let host_window_rect = ctx.host_window_rect();
        if !config.tips && config.show_in_sub_window {
            let mut areas = Vec::with_capacity(2);
            if config.block_event {
                areas.push(host_window_rect);
            }
            areas.push(Rect::from_origin_size(child_offset, child_size));
            tracing::trace!("Posting {} hot areas", areas.len());
            ctx.post_hot_areas(areas);
        }

        let origin = Vec2::splat(arrow);
        let notch = if show_arrow {
            let request = NotchRequest {
                placement: outcome.placement,
                offset: ArrowOffset::resolve(config.arrow_offset, outcome.placement, density),
                content: Rect::from_origin_size(child_offset, child_size),
                target: anchor.rect(),
                caret: caret.map(|_| state.arrow_position),
                radius,
            };
            place_notch(&request, origin, &geometry)
        } else {
            None
        };
        let arrow_offset = notch.map_or(0.0, |(_, raw)| raw);
        let notch = notch.map(|(mut notch, _)| {
            if self.theme.double_border_enable {
                notch.tip = notch.tip.round();
            }
            notch
        });
        let outline = build_outline(origin, child_size, radius, &geometry, notch.as_ref());

        tracing::debug!(
            "Bubble laid out at {} on {} ({:?}), arrow {}",
            Rect::from_origin_size(child_offset, child_size),
            outcome.placement,
            outcome.stage,
            show_arrow
        );

        let padding = if config.tips {
            self.theme.tips_padding
        } else {
            self.theme.padding
        };
        self.result = Some(BubbleLayoutResult {
            child_offset,
            child_size,
            frame_offset,
            arrow_placement: outcome.placement,
            show_arrow,
            arrow_offset,
            arrow_position: state.arrow_position,
            stage: outcome.stage,
            compressed_size: outcome.compressed,
            touch_region,
            clip_path: outline.path,
            arrow_clip_offsets: outline.notch_points,
            radius,
            padding: padding.to_px(density),
            host_window_rect,
            tips_placement,
        });
        self.result.as_ref()
    }
}

/// Content box grown by the arrow on the side facing the target.
fn touch_region(placement: Placement, show_arrow: bool, offset: Vec2, size: Size<f32>, arrow: f32) -> Rect<f32> {
    let mut top_left = offset;
    let mut extent = size;
    if show_arrow {
        match placement.simplify() {
            Placement::Top => extent.height += arrow,
            Placement::Bottom => {
                top_left.y -= arrow;
                extent.height += arrow;
            }
            Placement::Left => extent.width += arrow,
            Placement::Right => {
                top_left.x -= arrow;
                extent.width += arrow;
            }
            _ => {}
        }
    }
    Rect::from_origin_size(top_left, extent)
}
