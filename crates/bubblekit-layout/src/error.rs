/// Arrow dimensions that cannot produce a notch outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowGeometryError {
    /// Width or height is zero, negative or not finite.
    InvalidSize { width: f32, height: f32 },
    /// The tip fillet does not fit inside the arrow.
    FilletTooLarge { fillet: f32, height: f32 },
    /// The trigonometric decomposition produced NaN or infinity.
    Degenerate,
}

impl std::fmt::Display for ArrowGeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "Invalid arrow size: {} x {}", width, height)
            }
            Self::FilletTooLarge { fillet, height } => {
                write!(
                    f,
                    "Arrow fillet radius {} does not fit an arrow of height {}",
                    fillet, height
                )
            }
            Self::Degenerate => write!(f, "Arrow geometry is degenerate"),
        }
    }
}

impl std::error::Error for ArrowGeometryError {}
