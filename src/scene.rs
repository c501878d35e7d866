// scene.rs
// Builds a viewer from a scene configuration

use crate::charge::{Charge, ChargeSet};
use crate::error::SceneError;
use crate::geometry::Viewport;
use crate::init_config::{RandomConfig, SceneConfig};
use crate::viewer::Viewer;
use std::path::Path;

/// Margin kept between random charges and the viewport edge, in draw radii.
const RANDOM_EDGE_MARGIN: f32 = 2.0;

/// Load a scene file and build the viewer it describes.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Viewer, SceneError> {
    let path = path.as_ref();
    let config = SceneConfig::load_from_file(path)?;
    log::info!("loaded scene from {}", path.display());
    Ok(build_viewer(&config))
}

/// Apply a scene configuration to a fresh viewer.
pub fn build_viewer(config: &SceneConfig) -> Viewer {
    let mut settings = config.viewer;
    settings.viewport = config.viewport();

    let mut charges: ChargeSet = config.charges.iter().map(|c| c.to_charge()).collect();
    for random in &config.random {
        let placed = random_charges(random, &settings.viewport, config.parameters.charge_draw_radius);
        log::debug!("placed {} random charges", placed.len());
        charges.extend(placed);
    }

    log::info!(
        "scene: {} charges (net {}), mode {:?}",
        charges.len(),
        charges.net_charge(),
        settings.mode
    );
    Viewer::with_parts(charges, config.parameters, settings)
}

/// Uniformly scatter charges of random sign inside the viewport, keeping
/// them clear of the edges when the viewport is large enough.
pub fn random_charges(random: &RandomConfig, viewport: &Viewport, draw_radius: f32) -> Vec<Charge> {
    let mut rng = match random.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let margin = (draw_radius * RANDOM_EDGE_MARGIN).max(0.0);
    let (x_margin, y_margin) = (
        if viewport.width() > 2.0 * margin { margin } else { 0.0 },
        if viewport.height() > 2.0 * margin { margin } else { 0.0 },
    );
    let magnitude = random.magnitude.abs();

    (0..random.count)
        .map(|_| {
            let x = viewport.x_min + x_margin + rng.f32() * (viewport.width() - 2.0 * x_margin);
            let y = viewport.y_min + y_margin + rng.f32() * (viewport.height() - 2.0 * y_margin);
            let sign = if rng.bool() { 1.0 } else { -1.0 };
            Charge::new(x, y, sign * magnitude)
        })
        .collect()
}
