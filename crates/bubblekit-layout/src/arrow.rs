//! Arrow notch geometry and the bubble outline.
//!
//! The outline is a rounded rectangle walked clockwise from the top-left
//! corner. The edge facing the target carries the arrow notch: two straight
//! flanks joined by a small fillet at the tip. When the arrow sits within a
//! corner radius of either end of that edge, the corner arc is dropped and
//! the notch is fused into the corner instead.

use bubblekit_core::math::{clamp_band, near_equal, near_zero};
use bubblekit_core::profiling::profile_function;
use bubblekit_core::{Dimension, Rect, Size};
use bubblekit_geometry::{Path, PathBuilder};
use glam::Vec2;

use crate::error::ArrowGeometryError;
use crate::placement::Placement;

/// Radius of the rounded arrow tip.
pub const ARROW_FILLET: Dimension = Dimension::vp(2.0);

// Notch measurements for the stock 16x8vp arrow with a 2vp fillet.
const DEFAULT_WIDTH_VP: f32 = 16.0;
const DEFAULT_HEIGHT_VP: f32 = 8.0;
const DEFAULT_FILLET_VP: f32 = 2.0;
const DEFAULT_SHOULDER_HEIGHT_VP: f32 = 7.32;
const DEFAULT_SHOULDER_WIDTH_VP: f32 = 1.5;
const DEFAULT_STEM_VP: f32 = 6.0;
const DEFAULT_END_X_VP: f32 = 12.8;
const DEFAULT_END_Y_VP: f32 = 7.6;

/// Measurements of the arrow notch, in pixels.
///
/// Derived once per arrow size from the width, height and tip fillet radius.
/// All heights are measured outwards from the bubble edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub width: f32,
    pub height: f32,
    pub fillet: f32,
    /// Height where the flanks meet the tip fillet.
    pub shoulder_height: f32,
    /// Distance of those points from the tip's centre line.
    pub shoulder_width: f32,
    /// Height of the fillet centre.
    pub stem: f32,
    /// For a corner-fused notch: where the inner flank meets the fillet,
    /// measured from the flank's base point along the edge.
    pub end_x: f32,
    /// Height of that point.
    pub end_y: f32,
}

impl ArrowGeometry {
    /// Derives the notch for an arrow of `width` x `height` whose tip is
    /// rounded with `fillet`.
    pub fn derive(width: f32, height: f32, fillet: f32) -> Result<Self, ArrowGeometryError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ArrowGeometryError::InvalidSize { width, height });
        }
        let stem = height - fillet;
        if !fillet.is_finite() || fillet < 0.0 || stem <= 0.0 {
            return Err(ArrowGeometryError::FilletTooLarge { fillet, height });
        }

        let half = width / 2.0;
        let (angle, length) = tangent_flank(half, stem, fillet, height)?;
        let shoulder_height = length * angle.sin();
        let shoulder_width = half - length * angle.cos();

        let (angle, length) = tangent_flank(width - fillet, stem, fillet, height)?;
        let end_x = length * angle.cos();
        let end_y = length * angle.sin();

        let geometry = Self {
            width,
            height,
            fillet,
            shoulder_height,
            shoulder_width,
            stem,
            end_x,
            end_y,
        };
        if [shoulder_height, shoulder_width, end_x, end_y]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(geometry)
        } else {
            Err(ArrowGeometryError::Degenerate)
        }
    }

    /// The stock 16x8vp arrow.
    pub fn default_for_density(density: f32) -> Self {
        Self {
            width: DEFAULT_WIDTH_VP * density,
            height: DEFAULT_HEIGHT_VP * density,
            fillet: DEFAULT_FILLET_VP * density,
            shoulder_height: DEFAULT_SHOULDER_HEIGHT_VP * density,
            shoulder_width: DEFAULT_SHOULDER_WIDTH_VP * density,
            stem: DEFAULT_STEM_VP * density,
            end_x: DEFAULT_END_X_VP * density,
            end_y: DEFAULT_END_Y_VP * density,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// A straight flank from a base point on the edge to its tangent point on the
/// fillet circle. `run` and `rise` locate the circle centre from the base
/// point. Returns the flank angle against the edge and the flank length.
fn tangent_flank(run: f32, rise: f32, fillet: f32, height: f32) -> Result<(f32, f32), ArrowGeometryError> {
    if run <= 0.0 {
        return Err(ArrowGeometryError::FilletTooLarge { fillet, height });
    }
    let theta = (rise / run).atan();
    let side = run / theta.cos();
    if side <= fillet {
        return Err(ArrowGeometryError::FilletTooLarge { fillet, height });
    }
    let alpha = (fillet / side).asin();
    Ok((theta + alpha, side * alpha.cos()))
}

/// Where the arrow sits along the docking edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowOffset {
    /// Fraction of the target span; the arrow's leading flank starts there.
    Start(f32),
    /// Fraction of the target span; the arrow's centre line sits there.
    Center(f32),
    /// Fraction of the target span; the arrow's trailing flank ends there.
    End(f32),
    /// Pixels from the start of the bubble edge.
    Absolute(f32),
}

impl ArrowOffset {
    /// Classifies a requested offset. Without one, cardinal placements point
    /// at the target centre and aligned placements at the aligned edge.
    pub fn resolve(offset: Option<Dimension>, placement: Placement, density: f32) -> Self {
        match offset {
            None => match placement {
                Placement::TopLeft | Placement::BottomLeft | Placement::LeftTop | Placement::RightTop => {
                    Self::Start(0.0)
                }
                Placement::TopRight
                | Placement::BottomRight
                | Placement::LeftBottom
                | Placement::RightBottom => Self::End(1.0),
                _ => Self::Center(0.5),
            },
            Some(offset) if offset.is_percent() => {
                if near_zero(offset.value) {
                    Self::Start(0.0)
                } else if near_equal(offset.value, 0.5) {
                    Self::Center(0.5)
                } else {
                    Self::End(clamp_band(offset.value, 0.0, 1.0))
                }
            }
            Some(offset) => Self::Absolute(offset.to_px(density)),
        }
    }
}

/// Bubble edge carrying the arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl ArrowEdge {
    /// The edge facing the target for a bubble placed at `placement`.
    pub fn facing(placement: Placement) -> Option<Self> {
        match placement.simplify() {
            Placement::Bottom => Some(Self::Top),
            Placement::Top => Some(Self::Bottom),
            Placement::Left => Some(Self::Right),
            Placement::Right => Some(Self::Left),
            _ => None,
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// How the notch is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotchKind {
    /// Notch in the straight part of the edge.
    Normal,
    /// Notch fused with the corner at the low-coordinate end of the edge.
    CornerStart,
    /// Notch fused with the corner at the high-coordinate end of the edge.
    CornerEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notch {
    pub edge: ArrowEdge,
    pub kind: NotchKind,
    /// Tip coordinate along the edge, in the outline's frame. Only used by
    /// [`NotchKind::Normal`].
    pub tip: f32,
}

/// Everything needed to put the arrow on the docking edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchRequest {
    pub placement: Placement,
    pub offset: ArrowOffset,
    /// Bubble content box in screen space.
    pub content: Rect<f32>,
    /// Target rect in screen space.
    pub target: Rect<f32>,
    /// Arrow tip in screen space when pointing at a caret.
    pub caret: Option<Vec2>,
    pub radius: f32,
}

/// Places the notch on the edge facing the target.
///
/// `origin` is where the content box starts in the outline's frame. Returns
/// the notch and the tip distance from the start of the edge before it is
/// kept clear of the corners.
pub fn place_notch(request: &NotchRequest, origin: Vec2, geometry: &ArrowGeometry) -> Option<(Notch, f32)> {
    let edge = ArrowEdge::facing(request.placement)?;
    let content = request.content;
    let target = request.target;
    let (start, extent, target_start, target_extent, caret, base) = if edge.is_horizontal() {
        (content.x, content.width, target.x, target.width, request.caret.map(|c| c.x), origin.x)
    } else {
        (content.y, content.height, target.y, target.height, request.caret.map(|c| c.y), origin.y)
    };
    let half = geometry.half_width();
    let relative = target_start - start;

    let (tip, kind, raw) = match (caret, request.offset) {
        (Some(caret), _) => (base + caret - start, NotchKind::Normal, caret - start),
        (None, ArrowOffset::Start(fraction)) => {
            let along = relative + fraction * target_extent + half;
            (base + along, NotchKind::Normal, along)
        }
        (None, ArrowOffset::Center(fraction)) => {
            let along = relative + fraction * target_extent;
            (base + along, NotchKind::Normal, along)
        }
        (None, ArrowOffset::End(fraction)) => {
            let along = relative + fraction * target_extent - half;
            (base + along, NotchKind::Normal, along)
        }
        // Absolute distances are measured from one arrow height past the
        // content edge.
        (None, ArrowOffset::Absolute(distance)) => {
            let distance = clamp_band(distance, 0.0, extent);
            let kind = if distance + geometry.height > extent - request.radius - half {
                NotchKind::CornerEnd
            } else if distance < request.radius {
                NotchKind::CornerStart
            } else {
                NotchKind::Normal
            };
            (base + geometry.height + distance, kind, distance)
        }
    };

    let tip = match kind {
        NotchKind::Normal => clamp_band(
            tip,
            base + request.radius + half,
            base + extent - request.radius - half,
        ),
        _ => tip,
    };
    Some((Notch { edge, kind, tip }, raw))
}

/// A bubble outline and the four points of its notch.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub path: Path,
    /// Notch points in drawing order: flank base, shoulder, far shoulder,
    /// far flank base. All zero when there is no notch.
    pub notch_points: [Vec2; 4],
}

/// Builds the outline of a content box at `origin` with corner `radius`,
/// optionally carrying `notch`.
pub fn build_outline(
    origin: Vec2,
    size: Size<f32>,
    radius: f32,
    geometry: &ArrowGeometry,
    notch: Option<&Notch>,
) -> Outline {
    profile_function!();

    let (cx, cy) = (origin.x, origin.y);
    let (cw, ch) = (size.width, size.height);
    let r = radius.max(0.0);
    let fused = |edge: ArrowEdge, kind: NotchKind| notch.is_some_and(|n| n.edge == edge && n.kind == kind);
    let top_start = fused(ArrowEdge::Top, NotchKind::CornerStart);
    let top_end = fused(ArrowEdge::Top, NotchKind::CornerEnd);
    let right_start = fused(ArrowEdge::Right, NotchKind::CornerStart);
    let right_end = fused(ArrowEdge::Right, NotchKind::CornerEnd);
    let bottom_start = fused(ArrowEdge::Bottom, NotchKind::CornerStart);
    let bottom_end = fused(ArrowEdge::Bottom, NotchKind::CornerEnd);
    let left_start = fused(ArrowEdge::Left, NotchKind::CornerStart);
    let left_end = fused(ArrowEdge::Left, NotchKind::CornerEnd);

    let points = notch.map(|n| notch_points(n, geometry, origin, size));
    let mut builder = PathBuilder::new();
    let draw_notch = |builder: &mut PathBuilder, edge: ArrowEdge| {
        if let (Some(n), Some(p)) = (notch, points)
            && n.edge == edge
        {
            builder
                .line_to(p[0])
                .line_to(p[1])
                .corner_to(geometry.fillet, p[2])
                .line_to(p[3]);
        }
    };

    if top_start || left_start {
        builder.move_to(Vec2::new(cx, cy));
    } else {
        builder.move_to(Vec2::new(cx + r, cy));
    }

    draw_notch(&mut builder, ArrowEdge::Top);
    if !top_end {
        builder.line_to(Vec2::new(cx + cw - r, cy));
        if !right_start {
            builder.corner_to(r, Vec2::new(cx + cw, cy + r));
        }
    }

    draw_notch(&mut builder, ArrowEdge::Right);
    if !right_end {
        builder.line_to(Vec2::new(cx + cw, cy + ch - r));
        if !bottom_end {
            builder.corner_to(r, Vec2::new(cx + cw - r, cy + ch));
        }
    }

    draw_notch(&mut builder, ArrowEdge::Bottom);
    if !bottom_start {
        builder.line_to(Vec2::new(cx + r, cy + ch));
        if !left_end {
            builder.corner_to(r, Vec2::new(cx, cy + ch - r));
        }
    }

    draw_notch(&mut builder, ArrowEdge::Left);
    if !left_start {
        builder.line_to(Vec2::new(cx, cy + r));
        if !top_start {
            builder.corner_to(r, Vec2::new(cx + r, cy));
        }
    }

    builder.close();
    Outline {
        path: builder.build(),
        notch_points: points.unwrap_or([Vec2::ZERO; 4]),
    }
}

fn notch_points(notch: &Notch, g: &ArrowGeometry, origin: Vec2, size: Size<f32>) -> [Vec2; 4] {
    let (cx, cy) = (origin.x, origin.y);
    let (cw, ch) = (size.width, size.height);
    let right = cx + cw;
    let bottom = cy + ch;
    let t = notch.tip;
    let half = g.half_width();
    let (sw, sh) = (g.shoulder_width, g.shoulder_height);
    let (w, stem, ex, ey) = (g.width, g.stem, g.end_x, g.end_y);
    let v = Vec2::new;

    match (notch.edge, notch.kind) {
        (ArrowEdge::Top, NotchKind::Normal) => [v(t - half, cy), v(t - sw, cy - sh), v(t + sw, cy - sh), v(t + half, cy)],
        (ArrowEdge::Right, NotchKind::Normal) => {
            [v(right, t - half), v(right + sh, t - sw), v(right + sh, t + sw), v(right, t + half)]
        }
        (ArrowEdge::Bottom, NotchKind::Normal) => {
            [v(t + half, bottom), v(t + sw, bottom + sh), v(t - sw, bottom + sh), v(t - half, bottom)]
        }
        (ArrowEdge::Left, NotchKind::Normal) => [v(cx, t + half), v(cx - sh, t + sw), v(cx - sh, t - sw), v(cx, t - half)],

        (ArrowEdge::Top, NotchKind::CornerStart) => [v(cx, cy), v(cx, cy - stem), v(cx + w - ex, cy - ey), v(cx + w, cy)],
        (ArrowEdge::Top, NotchKind::CornerEnd) => {
            [v(right - w, cy), v(right - w + ex, cy - ey), v(right, cy - stem), v(right, cy)]
        }
        (ArrowEdge::Right, NotchKind::CornerStart) => {
            [v(right, cy), v(right + stem, cy), v(right + ey, cy + w - ex), v(right, cy + w)]
        }
        (ArrowEdge::Right, NotchKind::CornerEnd) => [
            v(right, bottom - w),
            v(right + ey, bottom - w + ex),
            v(right + stem, bottom),
            v(right, bottom),
        ],
        (ArrowEdge::Bottom, NotchKind::CornerEnd) => [
            v(right, bottom),
            v(right, bottom + stem),
            v(right - w + ex, bottom + ey),
            v(right - w, bottom),
        ],
        (ArrowEdge::Bottom, NotchKind::CornerStart) => {
            [v(cx + w, bottom), v(cx + w - ex, bottom + ey), v(cx, bottom + stem), v(cx, bottom)]
        }
        (ArrowEdge::Left, NotchKind::CornerEnd) => {
            [v(cx, bottom), v(cx - stem, bottom), v(cx - ey, bottom - w + ex), v(cx, bottom - w)]
        }
        (ArrowEdge::Left, NotchKind::CornerStart) => [v(cx, cy + w), v(cx - ey, cy + w - ex), v(cx - stem, cy), v(cx, cy)],
    }
}
