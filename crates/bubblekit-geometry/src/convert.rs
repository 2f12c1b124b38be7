//! Conversion to lyon paths.

use bubblekit_core::Rect;
use glam::Vec2;
use lyon::geom::{ArcFlags, SvgArc};
use lyon::math::{Angle, Point, point, vector};
use lyon::path::PathEvent;
use lyon::path::iterator::PathIterator;

use crate::path::{Path, PathCommand};

/// Flattening tolerance used by [`Path::lyon_bounds`].
pub const DEFAULT_TOLERANCE: f32 = 0.01;

fn to_point(v: Vec2) -> Point {
    point(v.x, v.y)
}

impl Path {
    /// Convert to a lyon path.
    ///
    /// Arcs are approximated with quadratic béziers. Every sub-path gets its
    /// matching end event, closed or open.
    pub fn to_lyon(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder();
        let mut current = point(0.0, 0.0);
        let mut in_subpath = false;

        for cmd in self.commands() {
            match *cmd {
                PathCommand::MoveTo(to) => {
                    if in_subpath {
                        builder.end(false);
                    }
                    current = to_point(to);
                    builder.begin(current);
                    in_subpath = true;
                }
                PathCommand::LineTo(to) => {
                    if !in_subpath {
                        builder.begin(current);
                        in_subpath = true;
                    }
                    current = to_point(to);
                    builder.line_to(current);
                }
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    if !in_subpath {
                        builder.begin(current);
                        in_subpath = true;
                    }
                    let arc = SvgArc {
                        from: current,
                        to: to_point(to),
                        radii: vector(radii.x, radii.y),
                        x_rotation: Angle::radians(x_rotation),
                        flags: ArcFlags { large_arc, sweep },
                    };
                    if arc.is_straight_line() {
                        builder.line_to(arc.to);
                    } else {
                        arc.for_each_quadratic_bezier(&mut |q| {
                            builder.quadratic_bezier_to(q.ctrl, q.to);
                        });
                    }
                    current = arc.to;
                }
                PathCommand::Close => {
                    if in_subpath {
                        builder.end(true);
                        in_subpath = false;
                    }
                }
            }
        }

        if in_subpath {
            builder.end(false);
        }

        builder.build()
    }

    /// Tight bounding box of the flattened outline, including arc bulges.
    pub fn lyon_bounds(&self) -> Option<Rect<f32>> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);

        let lyon_path = self.to_lyon();
        for event in lyon_path.iter().flattened(DEFAULT_TOLERANCE) {
            let p = match event {
                PathEvent::Begin { at } => at,
                PathEvent::Line { to, .. } => to,
                PathEvent::Quadratic { to, .. } | PathEvent::Cubic { to, .. } => to,
                PathEvent::End { last, .. } => last,
            };
            min = min.min(Vec2::new(p.x, p.y));
            max = max.max(Vec2::new(p.x, p.y));
        }

        if min.x.is_finite() && max.x.is_finite() {
            Some(Rect::from_corners(min, max))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathBuilder;

    #[test]
    fn test_to_lyon_closes_subpath() {
        let mut builder = PathBuilder::new();
        builder.rounded_rect(Vec2::ZERO, Vec2::new(20.0, 10.0), 2.0);
        let lyon_path = builder.build().to_lyon();

        let closes = lyon_path
            .iter()
            .filter(|e| matches!(e, PathEvent::End { close: true, .. }))
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_lyon_bounds_includes_arc_bulge() {
        // A half circle above the chord from (0, 10) to (20, 10).
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(0.0, 10.0))
            .arc_to(Vec2::splat(10.0), 0.0, false, true, Vec2::new(20.0, 10.0));
        let bounds = builder.build().lyon_bounds().unwrap();

        assert!((bounds.top() - 0.0).abs() < 0.05);
        assert!((bounds.left() - 0.0).abs() < 0.05);
        assert!((bounds.right() - 20.0).abs() < 0.05);
        assert!((bounds.bottom() - 10.0).abs() < 0.05);
    }

    #[test]
    fn test_lyon_bounds_empty() {
        assert!(Path::new().lyon_bounds().is_none());
    }
}
