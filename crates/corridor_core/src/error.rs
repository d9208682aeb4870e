//! Recycler error types

use std::fmt;

/// Error returned when a recycler is built with unusable parameters
#[derive(Debug, Clone, PartialEq)]
pub enum RecyclerError {
    /// Segment length must be finite and strictly positive
    InvalidSegmentLength(f32),
    /// Window radius must be at least one segment on each side
    InvalidRadius(u32),
}

impl fmt::Display for RecyclerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecyclerError::InvalidSegmentLength(len) => {
                write!(f, "Invalid segment length: {} (must be finite and > 0)", len)
            }
            RecyclerError::InvalidRadius(radius) => {
                write!(f, "Invalid window radius: {} (must be >= 1)", radius)
            }
        }
    }
}

impl std::error::Error for RecyclerError {}
