// init_config.rs
// Handles loading and parsing the initial scene from a TOML file

use crate::charge::Charge;
use crate::config::TraceParameters;
use crate::error::SceneError;
use crate::geometry::Viewport;
use crate::viewer::ViewerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SCENE_FILE: &str = "scene.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub parameters: TraceParameters,
    #[serde(default)]
    pub viewer: ViewerSettings,
    /// Overrides `viewer.viewport` when present.
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub charges: Vec<ChargeConfig>,
    #[serde(default)]
    pub random: Vec<RandomConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChargeConfig {
    pub x: f32,
    pub y: f32,
    pub magnitude: f32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RandomConfig {
    pub count: usize,
    /// Unsigned magnitude; each charge gets a random sign.
    #[serde(default = "default_random_magnitude")]
    pub magnitude: f32,
    /// Optional seed for reproducible placement
    pub seed: Option<u64>,
}

fn default_random_magnitude() -> f32 {
    crate::config::DEFAULT_PLACED_CHARGE
}

impl ChargeConfig {
    pub fn to_charge(&self) -> Charge {
        Charge::new(self.x, self.y, self.magnitude)
    }
}

impl SceneConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SceneConfig = toml::from_str(&content).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the tracer cannot use.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.parameters.validate()?;
        for viewport in [Some(self.viewer.viewport), self.viewport].into_iter().flatten() {
            if !viewport.is_finite() {
                return Err(SceneError::InvalidParameter(format!(
                    "viewport {:?} has a non-finite bound",
                    viewport
                )));
            }
        }
        for (i, c) in self.charges.iter().enumerate() {
            if !(c.x.is_finite() && c.y.is_finite() && c.magnitude.is_finite()) {
                return Err(SceneError::InvalidParameter(format!(
                    "charge {} has a non-finite field",
                    i
                )));
            }
        }
        for r in &self.random {
            if !r.magnitude.is_finite() {
                return Err(SceneError::InvalidParameter(
                    "random magnitude must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or(self.viewer.viewport)
    }
}
