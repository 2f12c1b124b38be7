//! Last-resort placement when nothing fits.
//!
//! With [`AvoidanceMode::AvoidAroundTarget`] the bubble is shrunk into the
//! roomiest free space around the target so the target stays visible.
//! Otherwise it is clamped into the viewport, covering the target.

use bubblekit_core::math::clamp_band;
use bubblekit_core::Size;
use glam::Vec2;

use crate::config::AvoidanceMode;
use crate::placement::Placement;
use crate::search::{SearchFrame, SearchOutcome, SearchStage, SearchState, SideFlags};

/// A compressed bubble: offset, size and arrow tip.
type Squeezed = (Vec2, Size<f32>, Vec2);

impl SearchFrame {
    pub(crate) fn avoid_or_cover(&self, state: &mut SearchState, child: Size<f32>, origin: Placement) -> SearchOutcome {
        let sides = state.can_place;
        let eligible = self.avoidance == AvoidanceMode::AvoidAroundTarget
            && if self.has_width {
                sides.intersects(SideFlags::TOP | SideFlags::BOTTOM)
            } else {
                !sides.is_empty()
            };

        if eligible && let Some(outcome) = self.avoid_around_target(state, child, origin) {
            return outcome;
        }
        self.cover_parent(state, child, origin)
    }

    fn avoid_around_target(&self, state: &mut SearchState, child: Size<f32>, origin: Placement) -> Option<SearchOutcome> {
        let max_area = state.max_area?;
        state.placement = origin;

        let squeezed = if self.has_placement {
            self.avoid_to_target_placement(state, child, !self.has_width)
        } else {
            None
        };
        let (offset, size, arrow) = match squeezed {
            Some(squeezed) => squeezed,
            None if self.has_width => {
                let (offset, size, arrow) = self.avoid_to_top_or_bottom_by_width(state, child);
                let (offset, arrow) = self.clamp_with_arrow(offset, size, arrow);
                (offset, size, arrow)
            }
            None => {
                state.placement = max_area.placement;
                let (offset, arrow) = self.clamp_with_arrow(max_area.offset, max_area.size, max_area.arrow);
                (offset, max_area.size, arrow)
            }
        };

        state.arrow_position = arrow;
        state.show_arrow = self.enable_arrow && self.arrow_fits(state.placement, size);
        tracing::debug!(
            "Compressed bubble to {} on {} at ({}, {})",
            size,
            state.placement,
            offset.x,
            offset.y
        );
        Some(SearchOutcome {
            placement: state.placement,
            offset,
            show_arrow: state.show_arrow,
            stage: SearchStage::Avoided,
            compressed: Some(size),
        })
    }

    /// Clamps the bubble over the target.
    pub(crate) fn cover_parent(&self, state: &mut SearchState, child: Size<f32>, origin: Placement) -> SearchOutcome {
        state.show_arrow = false;
        let offset = if self.avoid_keyboard && self.viewport.hover_split.is_none() {
            state.placement = origin;
            Some(self.clamp_into_viewport(self.position(origin, child).offset, child))
        } else {
            let position = self.default_position(child);
            self.adjust_position(state, position, child.width, child.height, self.target_security)
        };

        let offset = offset.unwrap_or_else(|| {
            let m = &self.viewport.margins;
            let x = clamp_band(
                self.default_position(child).x,
                m.start,
                self.viewport.size.width - child.width - m.end,
            );
            Vec2::new(x, m.top)
        });
        tracing::debug!("Bubble covers its target at ({}, {})", offset.x, offset.y);
        SearchOutcome {
            placement: state.placement,
            offset,
            show_arrow: false,
            stage: SearchStage::Covered,
            compressed: None,
        }
    }

    /// Shrinks the bubble into the free space on the requested side.
    ///
    /// Without `compress` a side whose width cannot hold the bubble is
    /// refused instead of narrowing the bubble.
    fn avoid_to_target_placement(&self, state: &SearchState, child: Size<f32>, compress: bool) -> Option<Squeezed> {
        let placement = state.placement;
        let side = placement.simplify();
        if !state.can_place.contains(SideFlags::from_placement(side)) || side == Placement::None {
            return None;
        }

        let rect = self.side_rect(side, self.target_space);
        let before = self.position(placement, child).offset;
        let anchor = &self.anchor;
        let (tx, ty) = (anchor.offset.x, anchor.offset.y);
        let (tw, th) = (anchor.size.width, anchor.size.height);
        let (cw, ch) = (child.width, child.height);
        let h = self.arrow_height;
        let space = self.target_space;
        let inset = self.radius + self.arrow_width / 2.0;

        let squeezed = match side {
            Placement::Bottom => {
                let max_h = (rect.height - h).min(ch);
                let (x, max_w) = match placement {
                    Placement::BottomLeft => {
                        if !compress && cw > rect.right() - before.x {
                            return None;
                        }
                        (before.x, (rect.right() - before.x).min(cw))
                    }
                    Placement::BottomRight => {
                        let x = rect.left().max(before.x);
                        if !compress && cw > tx + tw - x {
                            return None;
                        }
                        (x, (tx + tw - x).min(cw))
                    }
                    _ => {
                        if !compress && before.x < rect.left() {
                            return None;
                        }
                        let x = rect.left().max(before.x);
                        (x, (rect.right() - x).min(cw))
                    }
                };
                let offset = Vec2::new(x, before.y);
                let arrow = if self.caret && placement == Placement::Bottom {
                    Vec2::new(tx, ty + th + h)
                } else {
                    offset + Vec2::new(inset, -h)
                };
                (offset, Size::new(max_w, max_h), arrow)
            }
            Placement::Top => {
                let max_h = (rect.height - h).min(ch);
                let top_y = ty - max_h - space - h;
                let (offset, max_w) = match placement {
                    Placement::TopLeft => {
                        let offset = Vec2::new(tx, top_y).max(rect.origin());
                        if !compress && cw > rect.right() - offset.x {
                            return None;
                        }
                        (offset, (rect.right() - offset.x).min(cw))
                    }
                    Placement::TopRight => {
                        if !compress && cw > tx + tw - rect.left() {
                            return None;
                        }
                        let max_w = (tx + tw - rect.left()).min(cw);
                        (Vec2::new(tx + tw - max_w, top_y).max(rect.origin()), max_w)
                    }
                    _ => {
                        let centred = Vec2::new(tx + (tw - cw) / 2.0, top_y);
                        if !compress && centred.x < rect.left() {
                            return None;
                        }
                        let offset = centred.max(rect.origin());
                        (offset, (rect.right() - offset.x).min(cw))
                    }
                };
                let arrow = if self.caret && placement == Placement::Top {
                    Vec2::new(tx, ty - h)
                } else {
                    offset + Vec2::new(inset, max_h + h)
                };
                (offset, Size::new(max_w, max_h), arrow)
            }
            Placement::Right => {
                if !compress && cw > rect.width - h {
                    return None;
                }
                let max_w = (rect.width - h).min(cw);
                let (offset, max_h) = match placement {
                    Placement::RightTop => (before, (rect.bottom() - before.y).min(ch)),
                    Placement::RightBottom => {
                        let y = rect.top().max(before.y);
                        (Vec2::new(before.x, y), (ty + th - y).min(ch))
                    }
                    _ => {
                        let y = rect.top().max(before.y);
                        (Vec2::new(before.x, y), (rect.bottom() - y).min(ch))
                    }
                };
                (offset, Size::new(max_w, max_h), offset + Vec2::new(-h, inset))
            }
            _ => {
                if !compress && cw > rect.width - h {
                    return None;
                }
                let max_w = (rect.width - h).min(cw);
                let left_x = tx - space - h - max_w;
                let (offset, max_h) = match placement {
                    Placement::LeftTop => {
                        let offset = Vec2::new(left_x, ty).max(rect.origin());
                        (offset, (rect.bottom() - offset.y).min(ch))
                    }
                    Placement::LeftBottom => {
                        let max_h = (ty + th - rect.top()).min(ch);
                        (Vec2::new(left_x, ty + th - max_h).max(rect.origin()), max_h)
                    }
                    _ => {
                        let offset = Vec2::new(left_x, ty + th / 2.0 - ch / 2.0).max(rect.origin());
                        (offset, (rect.bottom() - offset.y).min(ch))
                    }
                };
                (offset, Size::new(max_w, max_h), offset + Vec2::new(max_w + h, inset))
            }
        };
        Some((squeezed.0, squeezed.1.non_negative(), squeezed.2))
    }

    /// Fixed-width bubbles only shrink in height, above or below the target,
    /// whichever is taller.
    fn avoid_to_top_or_bottom_by_width(&self, state: &mut SearchState, child: Size<f32>) -> Squeezed {
        let m = &self.viewport.margins;
        let vh = self.viewport.size.height;
        let anchor = &self.anchor;
        let h = self.arrow_height;
        let space = self.target_space;
        let inset = self.radius + self.arrow_width / 2.0;

        let top_h = (anchor.offset.y - space - m.top - h).min(vh - m.top - m.bottom);
        let bottom_h = (vh - m.bottom - anchor.bottom() - space - h).min(vh - m.bottom - m.top);

        if bottom_h > top_h {
            state.placement = Placement::Bottom;
            let rect = self.side_rect(Placement::Bottom, space);
            let size = Size::new(rect.width.min(child.width), (rect.height - h).min(child.height)).non_negative();
            let offset = self.position(Placement::Bottom, child).offset;
            (offset, size, offset + Vec2::new(inset, -h))
        } else {
            state.placement = Placement::Top;
            let rect = self.side_rect(Placement::Top, space);
            let size = Size::new(rect.width.min(child.width), (rect.height - h).min(child.height)).non_negative();
            let offset = Vec2::new(
                anchor.offset.x + (anchor.size.width - size.width) / 2.0,
                anchor.offset.y - size.height - space - h,
            );
            (offset, size, offset + Vec2::new(inset, size.height + h))
        }
    }
}
