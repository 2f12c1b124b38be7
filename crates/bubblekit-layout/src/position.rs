//! Candidate positions for each placement.

use bubblekit_core::Size;
use bubblekit_core::math::great_or_equal;
use glam::Vec2;

use crate::placement::Placement;
use crate::search::{SearchFrame, SearchState};

/// A tentative bubble position and the arrow tip that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Candidate {
    /// Top-left of the content box.
    pub offset: Vec2,
    /// Arrow tip in screen space.
    pub arrow: Vec2,
}

impl SearchFrame {
    /// Content centred on the target.
    pub(crate) fn default_position(&self, child: Size<f32>) -> Vec2 {
        let anchor = &self.anchor;
        Vec2::new(
            anchor.offset.x + (anchor.size.width - child.width) / 2.0,
            anchor.offset.y + (anchor.size.height - child.height) / 2.0,
        )
    }

    /// Horizontal position of a cursor-following tips bubble: against the
    /// end margin unless the cursor is already at the start margin.
    pub(crate) fn cursor_default_x(&self, child: Size<f32>) -> f32 {
        let m = &self.viewport.margins;
        if self.anchor.offset.x > m.start {
            self.viewport.size.width - m.end - child.width
        } else {
            m.start
        }
    }

    /// Position of a `child` sized bubble at `placement`, before arrow
    /// compensation.
    pub(crate) fn position(&self, placement: Placement, child: Size<f32>) -> Candidate {
        let (tx, ty) = (self.anchor.offset.x, self.anchor.offset.y);
        let (tw, th) = (self.anchor.size.width, self.anchor.size.height);
        let (cw, ch) = (child.width, child.height);
        let space = self.target_space;
        let arrow = self.arrow_height;
        let inset = self.radius + self.arrow_width / 2.0;

        let (above, below) = if self.follow_cursor {
            let x = self.cursor_default_x(child);
            (
                Vec2::new(x, ty - ch - space - self.cursor_gap),
                Vec2::new(x, ty + th + space + self.cursor_gap),
            )
        } else {
            let x = tx + (tw - cw) / 2.0;
            (
                Vec2::new(x, ty - ch - space - arrow),
                Vec2::new(x, ty + th + space + arrow),
            )
        };
        let above_y = ty - ch - space - arrow;
        let below_y = ty + th + space + arrow;
        let left_x = tx - space - arrow - cw;
        let right_x = tx + tw + space + arrow;
        let middle_y = ty + th / 2.0 - ch / 2.0;

        let on_top = |offset: Vec2| Candidate {
            offset,
            arrow: offset + Vec2::new(inset, ch + arrow),
        };
        let on_bottom = |offset: Vec2| Candidate {
            offset,
            arrow: offset + Vec2::new(inset, -arrow),
        };
        let on_left = |offset: Vec2| Candidate {
            offset,
            arrow: offset + Vec2::new(cw + arrow, inset),
        };
        let on_right = |offset: Vec2| Candidate {
            offset,
            arrow: offset + Vec2::new(-arrow, inset),
        };

        match placement {
            Placement::Top => {
                let mut candidate = on_top(above);
                if self.caret {
                    candidate.arrow = Vec2::new(tx, ty - arrow);
                }
                candidate
            }
            Placement::TopLeft => on_top(Vec2::new(tx, above_y)),
            Placement::TopRight => on_top(Vec2::new(tx + tw - cw, above_y)),
            Placement::Bottom => {
                let mut candidate = on_bottom(below);
                if self.caret {
                    candidate.arrow = Vec2::new(tx, ty + th + arrow);
                }
                candidate
            }
            Placement::BottomLeft => on_bottom(Vec2::new(tx, below_y)),
            Placement::BottomRight => on_bottom(Vec2::new(tx + tw - cw, below_y)),
            Placement::Left => on_left(Vec2::new(left_x, middle_y)),
            Placement::LeftTop => on_left(Vec2::new(left_x, self.tips_top(ty, ch))),
            Placement::LeftBottom => on_left(Vec2::new(left_x, ty + th - ch)),
            Placement::Right => on_right(Vec2::new(right_x, middle_y)),
            Placement::RightTop => on_right(Vec2::new(right_x, self.tips_top(ty, ch))),
            Placement::RightBottom => on_right(Vec2::new(right_x, ty + th - ch)),
            Placement::None => {
                let offset = self.default_position(child);
                Candidate { offset, arrow: offset }
            }
        }
    }

    /// Top edge of a side-aligned bubble. A tips bubble that was resized to
    /// fit is kept above the bottom margin.
    fn tips_top(&self, ty: f32, ch: f32) -> f32 {
        if !self.reset_tips_size {
            return ty;
        }
        let floor = self
            .viewport
            .hover_split
            .map_or(self.viewport.size.height - self.viewport.margins.bottom, |split| split.bottom());
        (floor - ch).min(ty)
    }

    /// Whether the arrow plus both corner radii fit across the edge facing
    /// the target.
    pub(crate) fn arrow_fits(&self, placement: Placement, child: Size<f32>) -> bool {
        let span = if placement.is_vertical() {
            child.width
        } else if placement.is_horizontal() {
            child.height
        } else {
            return false;
        };
        great_or_equal(span - 2.0 * self.radius, self.arrow_width)
    }

    /// Decides whether the arrow is drawn and, when it is not, pulls the
    /// bubble one arrow height towards the target to close the gap.
    pub(crate) fn update_child_position(
        &self,
        state: &mut SearchState,
        placement: Placement,
        offset: &mut Vec2,
        child: Size<f32>,
    ) {
        let shown = self.enable_arrow && self.arrow_fits(placement, child);
        if !shown {
            let h = self.arrow_height;
            match placement.simplify() {
                Placement::Top => offset.y += h,
                Placement::Bottom => offset.y -= h,
                Placement::Left => offset.x += h,
                Placement::Right => offset.x -= h,
                _ => {}
            }
        }
        state.show_arrow = shown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::frame;

    #[test]
    fn test_bottom_position_clears_target_and_arrow() {
        let frame = frame(Vec2::new(100.0, 150.0), Size::new(100.0, 200.0));
        let child = Size::new(80.0, 60.0);
        let candidate = frame.position(Placement::Bottom, child);
        assert_eq!(candidate.offset, Vec2::new(110.0, 150.0 + 200.0 + 8.0 + 8.0));
        assert_eq!(candidate.arrow, candidate.offset + Vec2::new(frame.radius + 8.0, -8.0));
    }

    #[test]
    fn test_aligned_positions() {
        let frame = frame(Vec2::new(100.0, 150.0), Size::new(100.0, 200.0));
        let child = Size::new(80.0, 60.0);
        assert_eq!(frame.position(Placement::TopLeft, child).offset, Vec2::new(100.0, 150.0 - 60.0 - 16.0));
        assert_eq!(frame.position(Placement::TopRight, child).offset.x, 120.0);
        assert_eq!(frame.position(Placement::LeftBottom, child).offset, Vec2::new(100.0 - 16.0 - 80.0, 290.0));
        assert_eq!(frame.position(Placement::RightTop, child).offset, Vec2::new(216.0, 150.0));
        assert_eq!(frame.position(Placement::Right, child).offset.y, 220.0);
    }

    #[test]
    fn test_narrow_bubble_drops_arrow() {
        let mut frame = frame(Vec2::new(100.0, 300.0), Size::new(50.0, 50.0));
        frame.radius = 16.0;
        let child = Size::new(16.0, 40.0);
        let mut state = SearchState::default();
        let mut candidate = frame.position(Placement::Top, child);
        let before = candidate.offset;
        frame.update_child_position(&mut state, Placement::Top, &mut candidate.offset, child);
        assert!(!state.show_arrow);
        assert_eq!(candidate.offset, before + Vec2::new(0.0, frame.arrow_height));
    }

    #[test]
    fn test_caret_arrow_points_at_caret() {
        let mut frame = frame(Vec2::new(40.0, 300.0), Size::new(0.0, 20.0));
        frame.caret = true;
        let candidate = frame.position(Placement::Bottom, Size::new(100.0, 40.0));
        assert_eq!(candidate.arrow, Vec2::new(40.0, 328.0));
        assert_eq!(candidate.offset.x, -10.0);
    }
}
