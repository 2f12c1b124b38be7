//! Popup placements and the order in which they are tried.

use std::fmt;

/// Where a bubble sits relative to its target.
///
/// Compound variants name the side first and the aligned edge second:
/// `TopLeft` is above the target with the left edges flush, `LeftBottom` is
/// to the left with the bottom edges flush.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    Left,
    Right,
    Top,
    #[default]
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    None,
}

static_assertions::assert_eq_size!(Placement, u8);

/// Candidates tried for a tips bubble that follows the mouse cursor, after
/// the bubble's own preferred placement.
pub const FOLLOW_CURSOR_TIPS: [Placement; 9] = [
    Placement::BottomLeft,
    Placement::TopLeft,
    Placement::BottomRight,
    Placement::TopRight,
    Placement::Bottom,
    Placement::Top,
    Placement::RightTop,
    Placement::LeftTop,
    Placement::None,
];

type Fallbacks = [Placement; 5];

use Placement as P;

static BOTTOM_LEFT: Fallbacks = [P::BottomLeft, P::TopLeft, P::RightTop, P::LeftTop, P::None];
static BOTTOM: Fallbacks = [P::Bottom, P::Top, P::Right, P::Left, P::None];
static BOTTOM_RIGHT: Fallbacks = [P::BottomRight, P::TopRight, P::RightBottom, P::LeftBottom, P::None];
static TOP_LEFT: Fallbacks = [P::TopLeft, P::BottomLeft, P::RightTop, P::LeftTop, P::None];
static TOP: Fallbacks = [P::Top, P::Bottom, P::Right, P::Left, P::None];
static TOP_RIGHT: Fallbacks = [P::TopRight, P::BottomRight, P::RightBottom, P::LeftBottom, P::None];
static LEFT_TOP: Fallbacks = [P::LeftTop, P::RightTop, P::BottomLeft, P::TopLeft, P::None];
static LEFT: Fallbacks = [P::Left, P::Right, P::Bottom, P::Top, P::None];
static LEFT_BOTTOM: Fallbacks = [P::LeftBottom, P::RightBottom, P::BottomRight, P::TopRight, P::None];
static RIGHT_TOP: Fallbacks = [P::RightTop, P::LeftTop, P::BottomLeft, P::TopLeft, P::None];
static RIGHT: Fallbacks = [P::Right, P::Left, P::Bottom, P::Top, P::None];
static RIGHT_BOTTOM: Fallbacks = [P::RightBottom, P::LeftBottom, P::BottomRight, P::TopRight, P::None];

impl Placement {
    /// Every placement except [`Placement::None`].
    pub const ALL: [Placement; 12] = [
        P::Left,
        P::Right,
        P::Top,
        P::Bottom,
        P::TopLeft,
        P::TopRight,
        P::BottomLeft,
        P::BottomRight,
        P::LeftTop,
        P::LeftBottom,
        P::RightTop,
        P::RightBottom,
    ];

    /// The cardinal side this placement sits on.
    pub fn simplify(self) -> Placement {
        match self {
            P::Top | P::TopLeft | P::TopRight => P::Top,
            P::Bottom | P::BottomLeft | P::BottomRight => P::Bottom,
            P::Left | P::LeftTop | P::LeftBottom => P::Left,
            P::Right | P::RightTop | P::RightBottom => P::Right,
            P::None => P::None,
        }
    }

    /// Above or below the target.
    pub fn is_vertical(self) -> bool {
        matches!(self.simplify(), P::Top | P::Bottom)
    }

    /// Left or right of the target.
    pub fn is_horizontal(self) -> bool {
        matches!(self.simplify(), P::Left | P::Right)
    }

    /// Ordered alternates tried when this placement does not fit.
    ///
    /// The list starts with the placement itself, continues with the mirrored
    /// side and the two perpendicular sides, and always ends with
    /// [`Placement::None`]. `None` itself uses the list for `Bottom`.
    pub fn fallbacks(self) -> &'static [Placement; 5] {
        match self {
            P::BottomLeft => &BOTTOM_LEFT,
            P::Bottom | P::None => &BOTTOM,
            P::BottomRight => &BOTTOM_RIGHT,
            P::TopLeft => &TOP_LEFT,
            P::Top => &TOP,
            P::TopRight => &TOP_RIGHT,
            P::LeftTop => &LEFT_TOP,
            P::Left => &LEFT,
            P::LeftBottom => &LEFT_BOTTOM,
            P::RightTop => &RIGHT_TOP,
            P::Right => &RIGHT,
            P::RightBottom => &RIGHT_BOTTOM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            P::Left => "left",
            P::Right => "right",
            P::Top => "top",
            P::Bottom => "bottom",
            P::TopLeft => "top-left",
            P::TopRight => "top-right",
            P::BottomLeft => "bottom-left",
            P::BottomRight => "bottom-right",
            P::LeftTop => "left-top",
            P::LeftBottom => "left-bottom",
            P::RightTop => "right-top",
            P::RightBottom => "right-bottom",
            P::None => "none",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidates walked by the search for `placement`.
pub(crate) fn candidate_list(placement: Placement, follow_cursor: Option<Placement>) -> Vec<Placement> {
    match follow_cursor {
        Some(tips) => std::iter::once(tips).chain(FOLLOW_CURSOR_TIPS).collect(),
        None => placement.fallbacks().to_vec(),
    }
}
