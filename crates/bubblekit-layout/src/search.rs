//! Placement search.
//!
//! The search walks the fallback list of the requested placement and takes
//! the first candidate whose box fits beside the target. When none fits, a
//! second walk clamps each candidate into its side band and takes the first
//! one that yields a position. If that fails too the bubble is either
//! compressed into the free space around the target or clamped over it,
//! depending on the [`AvoidanceMode`].
//!
//! All inputs for one pass live in a [`SearchFrame`]; everything the search
//! changes while it runs lives in a [`SearchState`].

use bitflags::bitflags;
use bubblekit_core::math::great_not_equal;
use bubblekit_core::profiling::profile_function;
use bubblekit_core::{Rect, Size};
use glam::Vec2;

use crate::config::AvoidanceMode;
use crate::placement::{FOLLOW_CURSOR_TIPS, Placement};
use crate::position::Candidate;
use crate::viewport::{AnchorInfo, Viewport};

bitflags! {
    /// Sides of the target with enough room to squeeze a bubble into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SideFlags: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

impl SideFlags {
    pub fn from_placement(placement: Placement) -> Self {
        match placement.simplify() {
            Placement::Top => Self::TOP,
            Placement::Bottom => Self::BOTTOM,
            Placement::Left => Self::LEFT,
            Placement::Right => Self::RIGHT,
            _ => Self::empty(),
        }
    }
}

/// Largest bubble box seen on any side during the search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct MaxAreaInfo {
    pub placement: Placement,
    pub offset: Vec2,
    pub size: Size<f32>,
    pub arrow: Vec2,
}

impl MaxAreaInfo {
    fn area(&self) -> f32 {
        self.size.width * self.size.height
    }
}

/// How the search reached its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchStage {
    /// A candidate fitted beside the target.
    #[default]
    Accepted,
    /// A candidate was clamped into its side band.
    BestEffort,
    /// The bubble was compressed into the free space around the target.
    Avoided,
    /// The bubble was clamped into the viewport, covering the target.
    Covered,
}

/// Mutable state of one search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct SearchState {
    pub placement: Placement,
    pub show_arrow: bool,
    /// A vertical candidate fitted its side's height; horizontal ones are
    /// skipped from then on.
    pub vertical_lock: bool,
    /// A horizontal candidate fitted its side's width; vertical ones are
    /// skipped from then on.
    pub horizontal_lock: bool,
    pub can_place: SideFlags,
    pub max_area: Option<MaxAreaInfo>,
    pub arrow_position: Vec2,
}

impl SearchState {
    fn record_max_space(&mut self, info: MaxAreaInfo) {
        if self.max_area.is_none_or(|max| info.area() > max.area()) {
            self.max_area = Some(info);
        }
    }
}

/// Inputs of one search, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchFrame {
    pub viewport: Viewport,
    pub anchor: AnchorInfo,
    pub arrow_width: f32,
    pub arrow_height: f32,
    pub radius: f32,
    /// Gap between target and bubble.
    pub target_space: f32,
    /// Gap the caller asked for, zero when unset. Used for the fit test.
    pub user_target_space: f32,
    /// Gap kept when clamping over the target.
    pub target_security: f32,
    /// Extra room a side needs beyond the arrow before it can be
    /// compressed into.
    pub out_range: f32,
    /// Gap between a cursor and a tips bubble.
    pub cursor_gap: f32,
    pub max_tip_width: f32,
    pub enable_arrow: bool,
    pub avoid_keyboard: bool,
    pub follow_cursor: bool,
    /// Only plain top and bottom placements are tried.
    pub caret: bool,
    /// The bubble is at least as wide as the viewport.
    pub great_width: bool,
    /// A cursor tips bubble was shrunk to fit beside the cursor.
    pub reset_tips_size: bool,
    pub avoidance: AvoidanceMode,
    pub has_placement: bool,
    pub has_width: bool,
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchOutcome {
    pub placement: Placement,
    pub offset: Vec2,
    pub show_arrow: bool,
    pub stage: SearchStage,
    /// Size the bubble was compressed to.
    pub compressed: Option<Size<f32>>,
}

impl SearchFrame {
    /// Free space on `side` of the target, `space` away from it.
    pub(crate) fn side_rect(&self, side: Placement, space: f32) -> Rect<f32> {
        match side.simplify() {
            Placement::Bottom => self.viewport.bottom_rect(&self.anchor, space),
            Placement::Top => self.viewport.top_rect(&self.anchor, space),
            Placement::Right => self.viewport.right_rect(&self.anchor, space),
            Placement::Left => self.viewport.left_rect(&self.anchor, space),
            _ => self.viewport.usable_rect(),
        }
    }

    fn skipped(&self, state: &SearchState, placement: Placement) -> bool {
        (self.caret && !matches!(placement, Placement::Top | Placement::Bottom))
            || (state.vertical_lock && placement.is_horizontal())
            || (state.horizontal_lock && placement.is_vertical())
    }

    /// Runs the whole search for a `child` sized bubble.
    pub(crate) fn resolve(
        &self,
        state: &mut SearchState,
        requested: Placement,
        candidates: &[Placement],
        child: Size<f32>,
    ) -> SearchOutcome {
        profile_function!();

        if let Some(candidate) = self.first_fit(state, candidates, child) {
            tracing::debug!(
                "Placement {} accepted at ({}, {})",
                state.placement,
                candidate.offset.x,
                candidate.offset.y
            );
            return SearchOutcome {
                placement: state.placement,
                offset: candidate.offset,
                show_arrow: state.show_arrow,
                stage: SearchStage::Accepted,
                compressed: None,
            };
        }

        state.vertical_lock = false;
        state.horizontal_lock = false;
        if let Some(offset) = self.best_effort(state, candidates, child) {
            tracing::debug!(
                "No placement fits, clamped {} to ({}, {})",
                state.placement,
                offset.x,
                offset.y
            );
            return SearchOutcome {
                placement: state.placement,
                offset,
                show_arrow: state.show_arrow,
                stage: SearchStage::BestEffort,
                compressed: None,
            };
        }

        self.avoid_or_cover(state, child, requested)
    }

    /// First candidate that fits beside the target, if any. Leaves
    /// `state.placement` at [`Placement::None`] when the list is exhausted.
    pub(crate) fn first_fit(
        &self,
        state: &mut SearchState,
        candidates: &[Placement],
        child: Size<f32>,
    ) -> Option<Candidate> {
        state.vertical_lock = false;
        state.horizontal_lock = false;
        let mut index = 0;
        while let Some(&placement) = candidates.get(index) {
            state.placement = placement;
            if placement == Placement::None {
                break;
            }
            if self.skipped(state, placement) {
                index += 1;
                continue;
            }
            let mut candidate = self.position(placement, child);
            self.update_child_position(state, placement, &mut candidate.offset, child);
            let fits = self.check_position(state, placement, &candidate, child, &mut index);
            tracing::trace!(
                "Candidate {} at ({}, {}) fits: {}",
                placement,
                candidate.offset.x,
                candidate.offset.y,
                fits
            );
            if fits {
                state.arrow_position = candidate.arrow;
                return Some(candidate);
            }
        }
        state.placement = Placement::None;
        None
    }

    /// Tests a candidate against the free space on its side and records how
    /// much of the bubble that side could hold. Always advances `index`.
    fn check_position(
        &self,
        state: &mut SearchState,
        placement: Placement,
        candidate: &Candidate,
        child: Size<f32>,
        index: &mut usize,
    ) -> bool {
        let rect = self.side_rect(placement, self.user_target_space);
        let room = self.side_rect(placement, self.target_space);
        let arrow = self.arrow_height;
        *index += 1;

        let (room_extent, rect_extent, child_extent, max_size) = if placement.is_vertical() {
            let max = Size::new(room.width.min(child.width), (room.height - arrow).min(child.height));
            (room.height, rect.height, child.height, max)
        } else {
            let max = Size::new((room.width - arrow).min(child.width), room.height.min(child.height));
            (room.width, rect.width, child.width, max)
        };

        if room_extent > arrow + self.out_range {
            state.can_place |= SideFlags::from_placement(placement);
            state.record_max_space(MaxAreaInfo {
                placement,
                offset: candidate.offset,
                size: max_size.non_negative(),
                arrow: candidate.arrow,
            });
        }

        if great_not_equal(child_extent, rect_extent) {
            return false;
        }
        if placement.is_vertical() {
            state.vertical_lock = true;
        } else {
            state.horizontal_lock = true;
        }
        rect.contains_box(candidate.offset, child)
    }

    /// Clamps each candidate into its side band; the first that yields a
    /// position wins.
    fn best_effort(&self, state: &mut SearchState, candidates: &[Placement], child: Size<f32>) -> Option<Vec2> {
        for &placement in candidates {
            state.placement = placement;
            if placement == Placement::None {
                break;
            }
            if self.skipped(state, placement) {
                continue;
            }
            let mut candidate = self.position(placement, child);
            self.update_child_position(state, placement, &mut candidate.offset, child);
            let mut size = child;
            if state.show_arrow {
                if placement.is_horizontal() {
                    size.width += self.arrow_height;
                } else {
                    size.height += self.arrow_height;
                }
            }
            if let Some(offset) = self.adjust_position(state, candidate.offset, size.width, size.height, self.target_space)
            {
                state.arrow_position = candidate.arrow;
                return Some(offset);
            }
        }
        state.placement = Placement::None;
        None
    }

    /// Chooses where a cursor-following tips bubble goes.
    ///
    /// Returns the placement and, when no candidate fits, the size the
    /// bubble has to shrink to for the roomiest side.
    pub(crate) fn fit_cursor_tips(&self, state: &mut SearchState, child: Size<f32>) -> (Placement, Option<Size<f32>>) {
        profile_function!();
        if self.first_fit(state, &FOLLOW_CURSOR_TIPS, child).is_some() {
            return (state.placement, None);
        }
        let (placement, size) = self.tips_directions();
        tracing::debug!("Tips do not fit around the cursor, shrinking to {} on {}", size, placement);
        (placement, Some(size))
    }

    /// The roomiest side around the cursor, checked bottom, top, right, left.
    fn tips_directions(&self) -> (Placement, Size<f32>) {
        let m = &self.viewport.margins;
        let (width, height) = (self.viewport.size.width, self.viewport.size.height);
        let anchor = &self.anchor;
        let gap = self.cursor_gap;
        let split = self.viewport.hover_split;

        let side_height = split.map_or(height - m.top - m.bottom, |s| s.height);
        let across = (width - m.end - m.start).min(self.max_tip_width);
        let left = (anchor.offset.x - gap - m.start).min(self.max_tip_width);
        let right = (width - m.end - anchor.right() - gap).min(self.max_tip_width);
        let top = anchor.offset.y - gap - split.map_or(m.top, |s| s.top());
        let bottom = split.map_or(height - m.bottom, |s| s.bottom()) - anchor.bottom() - gap;

        let options = [
            (Placement::BottomLeft, Size::new(across, bottom)),
            (Placement::TopLeft, Size::new(across, top)),
            (Placement::RightTop, Size::new(right, side_height)),
            (Placement::LeftTop, Size::new(left, side_height)),
        ];
        let mut best = options[0];
        for option in &options[1..] {
            if option.1.width * option.1.height > best.1.width * best.1.height {
                best = *option;
            }
        }
        (best.0, best.1.non_negative())
    }
}
