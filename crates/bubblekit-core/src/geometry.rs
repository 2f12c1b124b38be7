use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::Vec2;

use crate::math::{great_not_equal, less_not_equal, near_equal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl<T: Add<Output = T>> Add for Size<T> {
    type Output = Size<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Size {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Size<T> {
    type Output = Size<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Size {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

impl Size<f32> {
    pub const ZERO: Self = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Grows both sides by `amount` (negative shrinks).
    pub fn inflate(self, amount: f32) -> Self {
        Size::new(self.width + amount, self.height + amount)
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Clamps negative sides to zero.
    pub fn non_negative(self) -> Self {
        Size::new(self.width.max(0.0), self.height.max(0.0))
    }

    pub fn near_equal(&self, other: &Self) -> bool {
        near_equal(self.width, other.width) && near_equal(self.height, other.height)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl fmt::Display for Size<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2} x {:.2}]", self.width, self.height)
    }
}

impl From<Size<f32>> for mint::Vector2<f32> {
    fn from(size: Size<f32>) -> Self {
        mint::Vector2 {
            x: size.width,
            y: size.height,
        }
    }
}

impl From<mint::Vector2<f32>> for Size<f32> {
    fn from(v: mint::Vector2<f32>) -> Self {
        Size::new(v.x, v.y)
    }
}

impl<T> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Rect<f32> {
    pub const ZERO: Self = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn from_origin_size(origin: Vec2, size: Size<f32>) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    /// Builds the rectangle spanned by two corners.
    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<f32> {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn translate(&self, by: Vec2) -> Self {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Overlap of two rectangles, `None` when they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Whether a box at `origin` with `size` lies inside this rectangle,
    /// allowing the shared float tolerance on every edge.
    pub fn contains_box(&self, origin: Vec2, size: Size<f32>) -> bool {
        !(less_not_equal(origin.x, self.left())
            || great_not_equal(origin.x + size.width, self.right())
            || less_not_equal(origin.y, self.top())
            || great_not_equal(origin.y + size.height, self.bottom()))
    }
}

impl fmt::Display for Rect<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect ({:.2}, {:.2}) - [{:.2} x {:.2}]",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<Rect<f32>> for mint::Vector4<f32> {
    fn from(rect: Rect<f32>) -> Self {
        mint::Vector4 {
            x: rect.x,
            y: rect.y,
            z: rect.width,
            w: rect.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_rect_contains_box_tolerance() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_box(Vec2::new(0.0, 0.0), Size::new(100.0, 100.0)));
        assert!(rect.contains_box(Vec2::new(-0.0005, 0.0), Size::new(100.0, 100.0)));
        assert!(!rect.contains_box(Vec2::new(1.0, 0.0), Size::new(100.0, 100.0)));
        assert!(!rect.contains_box(Vec2::new(0.0, -1.0), Size::new(10.0, 10.0)));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 80.0, 50.0, 20.0)));
        assert_eq!(a.intersection(&Rect::new(200.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_rect_from_corners() {
        let rect = Rect::from_corners(Vec2::new(5.0, 5.0), Vec2::new(15.0, 25.0));
        assert_eq!(rect, Rect::new(5.0, 5.0, 10.0, 20.0));
    }

    #[test]
    fn test_size_helpers() {
        let size = Size::new(40.0_f32, -10.0);
        assert_eq!(size.non_negative(), Size::new(40.0, 0.0));
        assert_eq!(size.inflate(16.0), Size::new(56.0, 6.0));
        assert_eq!(Size::new(2.0_f32, 3.0) * 2.0, Size::new(4.0, 6.0));
        assert!(Size::new(1.0, 1.0).near_equal(&Size::new(1.0004, 0.9996)));
    }

    #[test]
    fn test_mint_round_trip() {
        let v: mint::Vector2<f32> = Size::new(3.0, 4.0).into();
        assert_eq!((v.x, v.y), (3.0, 4.0));
        assert_eq!(Size::from(v), Size::new(3.0, 4.0));
    }
}
