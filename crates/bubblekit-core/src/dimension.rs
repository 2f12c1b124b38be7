//! Lengths that carry their unit.
//!
//! Layout inputs arrive as a mix of physical pixels, density-independent
//! virtual pixels and percentages. [`Dimension`] keeps the unit until the
//! viewport density is known.
//!
//! # Example
//!
//! ```
//! use bubblekit_core::Dimension;
//!
//! let spacing = Dimension::vp(8.0);
//! assert_eq!(spacing.to_px(2.0), 16.0);
//!
//! let half = Dimension::percent(0.5);
//! assert_eq!(half.to_px_of(2.0, 120.0), 60.0);
//! ```

use std::fmt;

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DimensionUnit {
    /// Physical pixels.
    #[default]
    Px,
    /// Virtual pixels, scaled by the display density.
    Vp,
    /// Fraction of a reference length, `1.0` being the whole length.
    Percent,
}

/// A length paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub const ZERO: Self = Dimension {
        value: 0.0,
        unit: DimensionUnit::Px,
    };

    pub const fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, DimensionUnit::Px)
    }

    pub const fn vp(value: f32) -> Self {
        Self::new(value, DimensionUnit::Vp)
    }

    /// A fraction of a reference length (`0.5` is half).
    pub const fn percent(value: f32) -> Self {
        Self::new(value, DimensionUnit::Percent)
    }

    pub fn is_percent(&self) -> bool {
        self.unit == DimensionUnit::Percent
    }

    /// Converts to pixels. Percentages have no reference here and resolve
    /// to zero; use [`Dimension::to_px_of`] for them.
    pub fn to_px(&self, density: f32) -> f32 {
        match self.unit {
            DimensionUnit::Px => self.value,
            DimensionUnit::Vp => self.value * density,
            DimensionUnit::Percent => 0.0,
        }
    }

    /// Converts to pixels, resolving percentages against `base`.
    pub fn to_px_of(&self, density: f32, base: f32) -> f32 {
        match self.unit {
            DimensionUnit::Percent => self.value * base,
            _ => self.to_px(density),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DimensionUnit::Px => write!(f, "{}px", self.value),
            DimensionUnit::Vp => write!(f, "{}vp", self.value),
            DimensionUnit::Percent => write!(f, "{}%", self.value * 100.0),
        }
    }
}
