//! Camera axis ownership
//!
//! The scroll controller owns Z, the parallax controller owns X/Y and the
//! camera orientation. Each controller only receives the capability trait
//! for the axes it owns, and [`AxisLedger`] refuses overlapping claims when
//! controllers are composed into one session.

use std::fmt;

use bitflags::bitflags;
use corridor_math::Vec3;

bitflags! {
    /// Camera degrees of freedom a controller may write
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Axes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        /// Travel axis
        const Z = 1 << 2;
        /// Look direction
        const ORIENTATION = 1 << 3;
        const LATERAL = Self::X.bits() | Self::Y.bits();
    }
}

/// Write access to the travel axis only
pub trait AxialWriter {
    fn axial(&self) -> f32;
    fn set_axial(&mut self, z: f32);
}

/// Write access to the lateral/vertical axes and the look direction
pub trait LateralWriter {
    /// Current (x, y) position
    fn lateral(&self) -> (f32, f32);
    fn set_lateral(&mut self, x: f32, y: f32);
    /// Aim the camera at a world point
    fn look_at(&mut self, target: Vec3);
}

/// Two controllers asked for the same axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisConflict {
    pub requested_by: String,
    pub held_by: String,
    pub axes: Axes,
}

impl fmt::Display for AxisConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Axis conflict: '{}' requested {:?} already owned by '{}'",
            self.requested_by, self.axes, self.held_by
        )
    }
}

impl std::error::Error for AxisConflict {}

/// Records which controller owns which camera axes
#[derive(Debug, Default)]
pub struct AxisLedger {
    claims: Vec<(String, Axes)>,
}

impl AxisLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `axes` for `owner`, failing if any are already owned
    pub fn claim(&mut self, owner: &str, axes: Axes) -> Result<(), AxisConflict> {
        if let Some((held_by, held)) = self.claims.iter().find(|(_, held)| held.intersects(axes)) {
            return Err(AxisConflict {
                requested_by: owner.to_string(),
                held_by: held_by.clone(),
                axes: *held & axes,
            });
        }
        self.claims.push((owner.to_string(), axes));
        Ok(())
    }

    /// Release everything `owner` holds
    pub fn release(&mut self, owner: &str) {
        self.claims.retain(|(name, _)| name != owner);
    }

    /// Union of all claimed axes
    pub fn claimed(&self) -> Axes {
        self.claims.iter().fold(Axes::empty(), |acc, (_, a)| acc | *a)
    }

    /// Owner of a single axis, if any
    pub fn owner_of(&self, axis: Axes) -> Option<&str> {
        self.claims
            .iter()
            .find(|(_, held)| held.contains(axis))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_claims_succeed() {
        let mut ledger = AxisLedger::new();
        ledger.claim("scroll", Axes::Z).unwrap();
        ledger.claim("parallax", Axes::LATERAL | Axes::ORIENTATION).unwrap();
        assert_eq!(ledger.claimed(), Axes::all());
        assert_eq!(ledger.owner_of(Axes::Z), Some("scroll"));
        assert_eq!(ledger.owner_of(Axes::Y), Some("parallax"));
    }

    #[test]
    fn test_overlapping_claim_rejected() {
        let mut ledger = AxisLedger::new();
        ledger.claim("parallax", Axes::LATERAL).unwrap();
        let err = ledger.claim("dolly", Axes::Y | Axes::Z).unwrap_err();
        assert_eq!(err.held_by, "parallax");
        assert_eq!(err.axes, Axes::Y);
        assert!(err.to_string().contains("dolly"));
    }

    #[test]
    fn test_release_frees_axes() {
        let mut ledger = AxisLedger::new();
        ledger.claim("scroll", Axes::Z).unwrap();
        ledger.release("scroll");
        assert!(ledger.claim("other", Axes::Z).is_ok());
    }
}
