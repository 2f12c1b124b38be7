//! Bubblekit Core
//!
//! This crate contains the value types and ambient plumbing shared by the
//! bubblekit crates: geometry primitives, unit-carrying lengths, tolerant
//! float comparisons, logging and profiling setup.

pub mod alloc;
pub mod dimension;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

pub use dimension::{Dimension, DimensionUnit};
pub use geometry::{Rect, Size};
