//! Net force evaluation for a set of point charges.
//!
//! Forces follow a plain inverse-square superposition scaled by the test
//! charge magnitude. No Coulomb constant is applied: the visualization only
//! depends on direction, and probe lengths are tuned with a draw factor.

use crate::charge::ChargeSet;
use crate::config::{TraceParameters, MIN_DISTANCE_SQ};
use crate::geometry::Segment;
use ultraviolet::Vec2;

#[cfg(test)]
mod tests;

/// Force and its direction at a single point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    pub force: Vec2,
    /// `atan2(force.y, force.x)`, radians.
    pub direction: f32,
}

/// Compute the net force on the test charge at `point`.
///
/// Each charge contributes `q_test * q / d²` directed away from the charge.
/// Squared distances are clamped to [`MIN_DISTANCE_SQ`], and a point exactly
/// on a charge center gets no contribution from that charge, so the result
/// is finite for finite inputs.
pub fn force_at(charges: &ChargeSet, params: &TraceParameters, point: Vec2) -> Vec2 {
    let mut force = Vec2::zero();
    for charge in charges {
        let r = point - charge.pos;
        let dist2 = r.mag_sq().max(MIN_DISTANCE_SQ);
        // r / |r| scaled by q / d²; r == 0 yields no contribution
        force += params.test_charge_magnitude * charge.magnitude * r / (dist2 * dist2.sqrt());
    }
    force
}

/// Force at `point` together with its direction angle.
pub fn sample_at(charges: &ChargeSet, params: &TraceParameters, point: Vec2) -> FieldSample {
    let force = force_at(charges, params, point);
    FieldSample {
        force,
        direction: force.y.atan2(force.x),
    }
}

/// Segment from `point` along the force, `draw_factor` times its length.
pub fn force_probe(
    charges: &ChargeSet,
    params: &TraceParameters,
    point: Vec2,
    draw_factor: f32,
) -> Segment {
    let force = force_at(charges, params, point);
    Segment::new(point, point + force * draw_factor)
}
