// Centralized configuration for tracing and viewer parameters

use crate::error::SceneError;
use serde::{Deserialize, Serialize};

// ====================
// Tracing Parameters
// ====================
/// Euclidean length advanced per integration step.
pub const DEFAULT_STEP: f32 = 10.0;
/// Max number of steps per traced line.
pub const DEFAULT_DRAW_LIMIT: i32 = 500;
/// Lines per positive source charge when dynamic scale is off.
pub const DEFAULT_SCALE: i32 = 50;
/// Lines per unit charge when dynamic scale is on.
pub const DEFAULT_DYNAMIC_SCALE_FACTOR: f32 = 4.0;
pub const DEFAULT_USE_DYNAMIC_SCALE: bool = false;
/// Circle radius drawn around each charge; also the ray start offset and sink radius.
pub const DEFAULT_CHARGE_DRAW_RADIUS: f32 = 15.0;
pub const DEFAULT_TEST_CHARGE_MAGNITUDE: f32 = 1.0;
/// Grid spacing for vector field mode.
pub const DEFAULT_VECTOR_FIELD_SEPARATION: f32 = 25.0;
/// Upper bound on grid points per frame; larger grids are not sampled.
pub const MAX_GRID_POINTS: usize = 1_000_000;

// ====================
// Field Evaluation
// ====================
/// Lower bound on squared distance in the force law (singularity softening).
pub const MIN_DISTANCE_SQ: f32 = 1e-4;

// ====================
// Viewer Parameters
// ====================
/// Magnitude of a charge placed by the user (sign comes from the click).
pub const DEFAULT_PLACED_CHARGE: f32 = 1.0;
/// Scale applied to the raw force when drawing a force probe.
pub const DEFAULT_PROBE_DRAW_FACTOR: f32 = 1.0e5;

// ====================
// Window/Canvas
// ====================
pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 650.0;

/// Tunable tracing options, passed by value into every core call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParameters {
    pub step: f32,
    /// Values <= 0 mean no steps are taken.
    pub draw_limit: i32,
    pub scale: i32,
    pub dynamic_scale_factor: f32,
    pub use_dynamic_scale: bool,
    pub charge_draw_radius: f32,
    pub test_charge_magnitude: f32,
    pub vector_field_separation: f32,
}

impl Default for TraceParameters {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            draw_limit: DEFAULT_DRAW_LIMIT,
            scale: DEFAULT_SCALE,
            dynamic_scale_factor: DEFAULT_DYNAMIC_SCALE_FACTOR,
            use_dynamic_scale: DEFAULT_USE_DYNAMIC_SCALE,
            charge_draw_radius: DEFAULT_CHARGE_DRAW_RADIUS,
            test_charge_magnitude: DEFAULT_TEST_CHARGE_MAGNITUDE,
            vector_field_separation: DEFAULT_VECTOR_FIELD_SEPARATION,
        }
    }
}

impl TraceParameters {
    /// Number of integration steps a single ray may take.
    pub fn step_budget(&self) -> usize {
        self.draw_limit.max(0) as usize
    }

    pub fn termination_radius_sq(&self) -> f32 {
        self.charge_draw_radius * self.charge_draw_radius
    }

    /// Check that every float field is finite. Used by the driver layer
    /// before handing parameters to the tracer.
    pub fn validate(&self) -> Result<(), SceneError> {
        let floats = [
            ("step", self.step),
            ("dynamic_scale_factor", self.dynamic_scale_factor),
            ("charge_draw_radius", self.charge_draw_radius),
            ("test_charge_magnitude", self.test_charge_magnitude),
            ("vector_field_separation", self.vector_field_separation),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(SceneError::InvalidParameter(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_falls_back_to_defaults() {
        let params: TraceParameters = toml::from_str("step = 2.5\nscale = 12").unwrap();
        assert_eq!(params.step, 2.5);
        assert_eq!(params.scale, 12);
        assert_eq!(params.draw_limit, DEFAULT_DRAW_LIMIT);
        assert_eq!(params.charge_draw_radius, DEFAULT_CHARGE_DRAW_RADIUS);
    }

    #[test]
    fn negative_draw_limit_means_no_steps() {
        let params = TraceParameters { draw_limit: -3, ..Default::default() };
        assert_eq!(params.step_budget(), 0);
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let params = TraceParameters { step: f32::NAN, ..Default::default() };
        match params.validate() {
            Err(SceneError::InvalidParameter(message)) => {
                assert!(message.contains("step"), "unexpected message: {}", message)
            }
            other => panic!("expected an invalid parameter error, got {:?}", other),
        }
        assert!(TraceParameters::default().validate().is_ok());
    }
}
