//! Clamping candidates into the viewport.

use bubblekit_core::math::{clamp_band, great_not_equal, great_or_equal, less_not_equal};
use bubblekit_core::Size;
use glam::Vec2;

use crate::placement::Placement;
use crate::search::{SearchFrame, SearchState};

/// Allowed range for the top-left corner of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Band {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Band {
    fn x_valid(&self) -> bool {
        great_or_equal(self.x_max, self.x_min)
    }

    fn y_valid(&self) -> bool {
        great_or_equal(self.y_max, self.y_min)
    }

    fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            clamp_band(position.x, self.x_min, self.x_max),
            clamp_band(position.y, self.y_min, self.y_max),
        )
    }
}

impl SearchFrame {
    /// Band a `width` x `height` box may occupy on the current placement's
    /// side, `space` away from the target, and the vertical nudge used when
    /// the box is wider than the viewport.
    fn side_band(&self, placement: Placement, width: f32, height: f32, space: f32) -> (Band, f32) {
        let m = &self.viewport.margins;
        let (vw, vh) = (self.viewport.size.width, self.viewport.size.height);
        let anchor = &self.anchor;
        let split = self.viewport.hover_split;
        let floor = split.map_or(vh - m.bottom, |s| s.bottom());
        let ceiling = split.map_or(m.top, |s| s.top());

        let mut band = Band {
            x_min: m.start,
            x_max: vw - width - m.end,
            y_min: ceiling,
            y_max: floor - height,
        };
        let mut nudge = 0.0;
        match placement.simplify() {
            Placement::Left => band.x_max = (anchor.offset.x - width - space).min(vw - m.end - width),
            Placement::Right => band.x_min = (anchor.right() + space).max(m.start),
            Placement::Top => {
                band.y_max = (anchor.offset.y - height - space).min(floor - height);
                nudge = self.target_security;
            }
            Placement::Bottom => {
                band.y_min = (anchor.bottom() + space).max(ceiling);
                nudge = -self.target_security;
            }
            _ => {}
        }
        (band, nudge)
    }

    /// Clamps a `width` x `height` box at `position` into the band of the
    /// current placement. `None` when the band is empty and dropping the
    /// arrow does not open it.
    pub(crate) fn adjust_position(
        &self,
        state: &mut SearchState,
        position: Vec2,
        width: f32,
        height: f32,
        space: f32,
    ) -> Option<Vec2> {
        let (mut band, nudge) = self.side_band(state.placement, width, height, space);

        let mut need_remove = false;
        if (!band.x_valid() && !self.great_width) || !band.y_valid() {
            need_remove = self.remove_arrow_for_space(state, &mut band);
            if !need_remove {
                return None;
            }
        } else if !band.x_valid() {
            return Some(Vec2::new(0.0, clamp_band(position.y, band.y_min, band.y_max) + nudge));
        }

        let offset = self.bubble_position(state, position, &band, need_remove);
        Some(self.check_arrow_position(state, offset, width, height))
    }

    /// Drops the arrow when that frees just enough room along the placement
    /// axis. Only done while avoiding the keyboard.
    fn remove_arrow_for_space(&self, state: &mut SearchState, band: &mut Band) -> bool {
        if !state.show_arrow || !self.avoid_keyboard {
            return false;
        }
        let h = self.arrow_height;
        let placement = state.placement;
        if placement.is_horizontal() && band.y_valid() && band.x_max + h >= band.x_min {
            band.x_max += h;
        } else if placement.is_vertical() && band.x_valid() && band.y_max + h >= band.y_min {
            band.y_max += h;
        } else {
            return false;
        }
        state.show_arrow = false;
        true
    }

    fn bubble_position(&self, state: &mut SearchState, position: Vec2, band: &Band, need_remove: bool) -> Vec2 {
        let h = self.arrow_height;
        let side = state.placement.simplify();
        let mut position = position;
        let mut band = *band;

        if need_remove {
            match side {
                Placement::Top => position.y += h,
                Placement::Bottom => position.y -= h,
                Placement::Left => position.x += h,
                Placement::Right => position.x -= h,
                _ => {}
            }
        } else if state.show_arrow {
            // The band starts at the arrow base; the content sits past it.
            match side {
                Placement::Bottom => {
                    band.y_min += h;
                    band.y_max += h;
                }
                Placement::Right => {
                    band.x_min += h;
                    band.x_max += h;
                }
                _ => {}
            }
        }

        let mut offset = band.clamp(position);
        if state.show_arrow && self.avoid_keyboard {
            let (value, min, max) = if side.is_horizontal() {
                (position.x, band.x_min, band.x_max)
            } else {
                (position.y, band.y_min, band.y_max)
            };
            if value > max {
                state.show_arrow = false;
                if side.is_horizontal() {
                    offset.x += h;
                } else {
                    offset.y += h;
                }
            } else if value < min {
                state.show_arrow = false;
            }
        }
        offset
    }

    /// Drops the arrow when the clamped bubble no longer overlaps the
    /// target along its edge, and closes the gap it leaves.
    fn check_arrow_position(&self, state: &mut SearchState, offset: Vec2, width: f32, height: f32) -> Vec2 {
        if !state.show_arrow || !self.avoid_keyboard {
            return offset;
        }
        let inset = self.radius + self.arrow_width / 2.0;
        let h = self.arrow_height;
        let anchor = &self.anchor;
        let mut offset = offset;
        match state.placement.simplify() {
            side @ (Placement::Left | Placement::Right) => {
                let first = offset.y + inset;
                let last = offset.y + height - inset;
                if first > anchor.bottom() || last < anchor.offset.y {
                    state.show_arrow = false;
                    offset.x += if side == Placement::Left { h } else { -h };
                }
            }
            side @ (Placement::Top | Placement::Bottom) => {
                let first = offset.x + inset;
                let last = offset.x + width - inset;
                if first > anchor.right() || last < anchor.offset.x {
                    state.show_arrow = false;
                    offset.y += if side == Placement::Top { h } else { -h };
                }
            }
            _ => {}
        }
        offset
    }

    /// Pushes a box back inside the margins, far edges first.
    pub(crate) fn clamp_into_viewport(&self, position: Vec2, size: Size<f32>) -> Vec2 {
        self.clamp_with_arrow(position, size, Vec2::ZERO).0
    }

    /// Like [`Self::clamp_into_viewport`], moving `arrow` along with the box.
    pub(crate) fn clamp_with_arrow(&self, position: Vec2, size: Size<f32>, arrow: Vec2) -> (Vec2, Vec2) {
        let m = &self.viewport.margins;
        let right = self.viewport.size.width - m.end;
        let bottom = self.viewport.size.height - m.bottom;
        let mut result = position;
        let mut arrow = arrow;

        if great_not_equal(position.x + size.width, right) {
            result.x = right - size.width;
            arrow.x += result.x - position.x;
        }
        if great_not_equal(position.y + size.height, bottom) {
            result.y = bottom - size.height;
            arrow.y += result.y - position.y;
        }
        if less_not_equal(position.x, m.start) {
            result.x = m.start;
            arrow.x += m.start - position.x;
        }
        if less_not_equal(position.y, m.top) {
            result.y = m.top;
            arrow.y += m.top - position.y;
        }
        (result, arrow)
    }
}
