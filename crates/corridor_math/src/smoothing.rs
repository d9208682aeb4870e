//! Exponential smoothing for camera motion
//!
//! Both controllers chase a target with `current += (target - current) * factor`.
//! The factor either stays fixed per frame (legacy behaviour, frame-rate
//! dependent) or is derived from a half-life and the frame's elapsed time.

use std::fmt;

/// How the per-frame interpolation factor is computed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed lerp factor applied once per rendered frame, ignoring `dt`
    Fixed { factor: f32 },
    /// Half-life in seconds: after `seconds` the remaining distance halves
    HalfLife { seconds: f32 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Fixed { factor: 0.1 }
    }
}

impl Smoothing {
    /// Check the parameters: fixed factor in `(0, 1]`, finite half-life `>= 0`
    pub fn validate(&self) -> Result<(), SmoothingError> {
        match *self {
            Smoothing::Fixed { factor } => {
                if factor > 0.0 && factor <= 1.0 {
                    Ok(())
                } else {
                    Err(SmoothingError::InvalidFactor(factor))
                }
            }
            Smoothing::HalfLife { seconds } => {
                if seconds.is_finite() && seconds >= 0.0 {
                    Ok(())
                } else {
                    Err(SmoothingError::InvalidHalfLife(seconds))
                }
            }
        }
    }

    /// Interpolation factor in `[0, 1]` for a frame of `dt` seconds
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            Smoothing::Fixed { factor } => factor.clamp(0.0, 1.0),
            Smoothing::HalfLife { seconds } => {
                if dt <= 0.0 {
                    0.0
                } else if seconds <= 0.0 {
                    1.0
                } else {
                    1.0 - 2.0f32.powf(-dt / seconds)
                }
            }
        }
    }

    /// Move `current` toward `target` by one frame
    #[inline]
    pub fn step(&self, current: f32, target: f32, dt: f32) -> f32 {
        crate::lerp(current, target, self.factor(dt))
    }

    /// Whether this is the frame-rate independent mode
    pub fn is_frame_rate_independent(&self) -> bool {
        matches!(self, Smoothing::HalfLife { .. })
    }
}

/// Smoothing parameters that would stall or overshoot the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingError {
    /// Fixed factor outside `(0, 1]`
    InvalidFactor(f32),
    /// Half-life negative or not finite
    InvalidHalfLife(f32),
}

impl fmt::Display for SmoothingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingError::InvalidFactor(v) => {
                write!(f, "Smoothing factor must be in (0, 1], got {}", v)
            }
            SmoothingError::InvalidHalfLife(v) => {
                write!(f, "Smoothing half-life must be finite and >= 0, got {}", v)
            }
        }
    }
}

impl std::error::Error for SmoothingError {}
