//! Path primitives for popup outlines.
//!
//! A path is a sequence of drawing commands that define a shape.

use std::fmt;

use glam::Vec2;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(Vec2),
    /// Draw a line to a position.
    LineTo(Vec2),
    /// Draw an elliptical arc.
    ArcTo {
        /// Radii of the ellipse
        radii: Vec2,
        /// X-axis rotation in radians
        x_rotation: f32,
        /// Use large arc
        large_arc: bool,
        /// Sweep direction (clockwise in y-down space if true)
        sweep: bool,
        /// End point
        to: Vec2,
    },
    /// Close the current sub-path by drawing a line to the start.
    Close,
}

/// One drawn piece of a path, from its start point to its end point.
///
/// `radii` is set for arcs and `None` for straight lines, including the
/// implicit line drawn by [`PathCommand::Close`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub radii: Option<Vec2>,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the last command closes the path.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Iterates over the drawn segments, including the closing line.
    ///
    /// Move commands start a new sub-path and emit nothing. A close on a
    /// sub-path that already ends at its start emits a zero-length segment.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let mut current = Vec2::ZERO;
        let mut subpath_start = Vec2::ZERO;
        self.commands.iter().filter_map(move |cmd| match *cmd {
            PathCommand::MoveTo(to) => {
                current = to;
                subpath_start = to;
                None
            }
            PathCommand::LineTo(to) => {
                let from = current;
                current = to;
                Some(Segment {
                    from,
                    to,
                    radii: None,
                })
            }
            PathCommand::ArcTo { radii, to, .. } => {
                let from = current;
                current = to;
                Some(Segment {
                    from,
                    to,
                    radii: Some(radii),
                })
            }
            PathCommand::Close => {
                let from = current;
                current = subpath_start;
                Some(Segment {
                    from,
                    to: subpath_start,
                    radii: None,
                })
            }
        })
    }

    /// Get the bounding box of the command end points.
    ///
    /// Arcs contribute their radii around the start point, so the box is
    /// conservative. [`Path::lyon_bounds`] gives the tight box.
    ///
    /// Returns (min, max) corners.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        if self.commands.is_empty() {
            return None;
        }

        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut current = Vec2::ZERO;

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    min = min.min(*to);
                    max = max.max(*to);
                    current = *to;
                }
                PathCommand::ArcTo { to, radii, .. } => {
                    min = min.min(*to).min(current - *radii);
                    max = max.max(*to).max(current + *radii);
                    current = *to;
                }
                PathCommand::Close => {}
            }
        }

        if min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

/// Serialises to the compact SVG-like form `M{x} {y} L{x} {y} A{rx} {ry} {rot} {large} {sweep} {x} {y} Z`.
///
/// Rotation is written in degrees, flags as `0`/`1`, and commands are
/// separated by single spaces.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(to) => write!(f, "M{} {}", to.x, to.y)?,
                PathCommand::LineTo(to) => write!(f, "L{} {}", to.x, to.y)?,
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A{} {} {} {} {} {} {}",
                    radii.x,
                    radii.y,
                    x_rotation.to_degrees(),
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    to.x,
                    to.y
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    current_pos: Vec2,
    subpath_start: Vec2,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self.current_pos = to;
        self.subpath_start = to;
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self.current_pos = to;
        self
    }

    /// Draw an arc.
    pub fn arc_to(
        &mut self,
        radii: Vec2,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Vec2,
    ) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            x_rotation,
            large_arc,
            sweep,
            to,
        });
        self.current_pos = to;
        self
    }

    /// Draw a clockwise circular arc of `radius` that is at most a half turn.
    pub fn corner_to(&mut self, radius: f32, to: Vec2) -> &mut Self {
        self.arc_to(Vec2::splat(radius), 0.0, false, true, to)
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self.current_pos = self.subpath_start;
        self
    }

    /// Add a rounded rectangle to the path, clockwise from the top-left.
    pub fn rounded_rect(&mut self, position: Vec2, size: Vec2, radius: f32) -> &mut Self {
        let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);

        self.move_to(position + Vec2::new(r, 0.0));
        self.line_to(position + Vec2::new(size.x - r, 0.0));
        self.corner_to(r, position + Vec2::new(size.x, r));
        self.line_to(position + Vec2::new(size.x, size.y - r));
        self.corner_to(r, position + Vec2::new(size.x - r, size.y));
        self.line_to(position + Vec2::new(r, size.y));
        self.corner_to(r, position + Vec2::new(0.0, size.y - r));
        self.line_to(position + Vec2::new(0.0, r));
        self.corner_to(r, position + Vec2::new(r, 0.0));

        self.close()
    }

    /// Get the current position.
    pub fn current_pos(&self) -> Vec2 {
        self.current_pos
    }

    /// Build the path.
    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder_line() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(100.0, 0.0))
            .line_to(Vec2::new(100.0, 100.0))
            .close();
        let path = builder.build();

        assert_eq!(path.len(), 4);
        assert!(path.is_closed());
    }

    #[test]
    fn test_path_bounds() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(10.0, 20.0))
            .line_to(Vec2::new(100.0, 50.0))
            .line_to(Vec2::new(50.0, 100.0));
        let path = builder.build();

        let (min, max) = path.bounds().unwrap();
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_display_format() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(8.0, 8.0))
            .line_to(Vec2::new(20.5, 8.0))
            .corner_to(4.0, Vec2::new(24.5, 12.0))
            .close();
        let path = builder.build();

        assert_eq!(path.to_string(), "M8 8 L20.5 8 A4 4 0 0 1 24.5 12 Z");
    }

    #[test]
    fn test_segments_include_close() {
        let mut builder = PathBuilder::new();
        builder.rounded_rect(Vec2::ZERO, Vec2::new(40.0, 20.0), 4.0);
        let path = builder.build();

        let segments: Vec<_> = path.segments().collect();
        // Four edges, four corners and the closing line.
        assert_eq!(segments.len(), 9);
        assert_eq!(segments.iter().filter(|s| s.radii.is_some()).count(), 4);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        let last = segments[segments.len() - 1];
        assert_eq!(last.to, Vec2::new(4.0, 0.0));
        assert_eq!(last.length(), 0.0);
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let mut builder = PathBuilder::new();
        builder.rounded_rect(Vec2::ZERO, Vec2::new(10.0, 6.0), 20.0);
        let path = builder.build();

        assert_eq!(path.commands()[0], PathCommand::MoveTo(Vec2::new(3.0, 0.0)));
    }
}
