//! Error types for cloth construction.

use core::fmt;

/// Configuration errors, reported when a cloth is built.
///
/// Nothing inside the simulation loop fails: degenerate geometry is
/// skipped or given a fallback direction.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid must be at least 2x2.
    InvalidGridDimensions { width: usize, height: usize },
    /// Cloth width and height must be positive and finite.
    InvalidExtent,
    /// Particle mass must be positive and finite.
    InvalidMass,
    /// Tear threshold must be finite and greater than 1.
    InvalidTearThreshold,
    /// Damping must be in [0, 1].
    InvalidDamping,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "grid must be at least 2x2 (got {}x{})", width, height)
            }
            ClothError::InvalidExtent => write!(f, "cloth extent must be positive and finite"),
            ClothError::InvalidMass => write!(f, "particle mass must be positive and finite"),
            ClothError::InvalidTearThreshold => write!(f, "tear threshold must be greater than 1"),
            ClothError::InvalidDamping => write!(f, "damping must be in [0, 1]"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}
