//! Viewer state: the charge set, the tracing parameters and the view
//! settings that together decide what gets drawn.

use crate::charge::{Charge, ChargeSet, Polarity};
use crate::config::{self, TraceParameters};
use crate::field::force_probe;
use crate::geometry::{Segment, Viewport};
use crate::grid::{par_sample_grid, sample_grid};
use crate::profile_scope;
use crate::tracer::{par_trace_lines, trace_lines, FieldLine};
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Streamlines traced from source charges
    FieldLines,
    /// Fixed-length direction vectors on a uniform grid
    VectorGrid,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::FieldLines
    }
}

/// View-level knobs that are not tracing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Magnitude of a newly placed charge; the click decides the sign.
    pub placed_charge: f32,
    pub mode: RenderMode,
    /// Which charges act as line sources.
    pub trace_from: Polarity,
    pub viewport: Viewport,
    pub probe_draw_factor: f32,
    /// Trace on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            placed_charge: config::DEFAULT_PLACED_CHARGE,
            mode: RenderMode::default(),
            trace_from: Polarity::Positive,
            viewport: Viewport::default(),
            probe_draw_factor: config::DEFAULT_PROBE_DRAW_FACTOR,
            parallel: false,
        }
    }
}

/// Circle drawn around a charge with its signed magnitude as label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeMarker {
    pub center: Vec2,
    pub radius: f32,
    pub label: String,
    pub polarity: Option<Polarity>,
}

/// Everything a renderer needs for one redraw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub lines: Vec<FieldLine>,
    pub vectors: Vec<Segment>,
    pub probes: Vec<Segment>,
    pub markers: Vec<ChargeMarker>,
}

impl Frame {
    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(FieldLine::segment_count).sum::<usize>()
            + self.vectors.len()
            + self.probes.len()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Viewer {
    pub charges: ChargeSet,
    pub params: TraceParameters,
    pub settings: ViewerSettings,
    probes: Vec<Segment>,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(charges: ChargeSet, params: TraceParameters, settings: ViewerSettings) -> Self {
        Self { charges, params, settings, probes: Vec::new() }
    }

    /// Place a charge of `placed_charge` magnitude with the given polarity.
    /// Returns false when the placed magnitude is zero or not finite.
    pub fn place(&mut self, point: Vec2, polarity: Polarity) -> bool {
        let magnitude = self.settings.placed_charge.abs();
        if !(magnitude > 0.0 && magnitude.is_finite()) {
            log::warn!("ignoring placement at {:?}: placed charge is {}", point, self.settings.placed_charge);
            return false;
        }
        let charge = Charge::at(point, polarity.sign() * magnitude);
        log::debug!("placed {} at ({}, {})", charge.label(), point.x, point.y);
        self.charges.add(charge);
        true
    }

    /// Remove every charge and probe.
    pub fn clear(&mut self) {
        log::debug!("clearing {} charges", self.charges.len());
        self.charges.clear();
        self.probes.clear();
    }

    /// Record the force on the test charge at `point`.
    pub fn probe(&mut self, point: Vec2) -> Segment {
        let segment = force_probe(&self.charges, &self.params, point, self.settings.probe_draw_factor);
        self.probes.push(segment);
        segment
    }

    pub fn probes(&self) -> &[Segment] {
        &self.probes
    }

    pub fn markers(&self) -> Vec<ChargeMarker> {
        self.charges
            .iter()
            .map(|c| ChargeMarker {
                center: c.pos,
                radius: self.params.charge_draw_radius,
                label: c.label(),
                polarity: c.polarity(),
            })
            .collect()
    }

    /// Run the tracer or the grid sampler for the current mode.
    pub fn frame(&self) -> Frame {
        profile_scope!("viewer_frame");
        let mut frame = Frame {
            probes: self.probes.clone(),
            markers: self.markers(),
            ..Default::default()
        };
        match self.settings.mode {
            RenderMode::FieldLines => {
                frame.lines = if self.settings.parallel {
                    par_trace_lines(&self.charges, &self.params, self.settings.trace_from)
                } else {
                    trace_lines(&self.charges, &self.params, self.settings.trace_from).collect()
                };
            }
            RenderMode::VectorGrid => {
                let viewport = &self.settings.viewport;
                frame.vectors = if self.settings.parallel {
                    par_sample_grid(&self.charges, &self.params, viewport)
                } else {
                    sample_grid(&self.charges, &self.params, viewport).collect()
                };
            }
        }
        log::info!(
            "frame: {} charges, {} lines, {} vectors, {} segments",
            self.charges.len(),
            frame.lines.len(),
            frame.vectors.len(),
            frame.segment_count()
        );
        frame
    }
}
