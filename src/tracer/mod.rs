//! Field line tracing.
//!
//! Lines start on the boundary circle of every source charge of the
//! requested polarity and follow the net force in fixed-length steps until
//! they enter an opposite charge's circle or exhaust the draw limit.
//! Negative sources walk against the field so their lines also end on
//! opposite charges.

use crate::charge::{Charge, ChargeSet, Polarity};
use crate::config::TraceParameters;
use crate::field::sample_at;
use crate::geometry::{polar_offset, Segment};
use crate::profile_scope;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::iter::FusedIterator;
use ultraviolet::Vec2;

#[cfg(test)]
mod tests;

/// Why a ray stopped stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Entered the circle of the opposite charge at this index.
    ReachedSink { charge: usize },
    /// Took `draw_limit` steps without reaching a sink.
    DrawLimit,
    /// The next point was not finite; only possible with non-finite parameters.
    NonFinite,
}

/// Starting point of one field line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub charge_index: usize,
    pub ray_index: usize,
    /// Start angle around the source, radians.
    pub angle: f32,
    pub start: Vec2,
    pub polarity: Polarity,
}

/// One traced line: the batch of segments produced by a single ray.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldLine {
    pub charge_index: usize,
    pub ray_index: usize,
    pub angle: f32,
    pub start: Vec2,
    pub polarity: Polarity,
    pub segments: Vec<Segment>,
    pub termination: Termination,
}

impl FieldLine {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn reached_sink(&self) -> bool {
        matches!(self.termination, Termination::ReachedSink { .. })
    }

    /// Last point of the line (the start point if no step was taken).
    pub fn end(&self) -> Vec2 {
        self.segments.last().map_or(self.start, |s| s.end)
    }

    /// The line as a polyline: start point followed by every segment end.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(|s| s.end))
    }
}

/// Number of rays leaving `charge`.
///
/// Fixed `scale` unless dynamic scaling is enabled, in which case the count
/// is `ceil(dynamic_scale_factor * |magnitude|)`. Non-positive counts give
/// no rays.
pub fn ray_count(charge: &Charge, params: &TraceParameters) -> usize {
    if params.use_dynamic_scale {
        let n = (params.dynamic_scale_factor * charge.magnitude.abs()).ceil();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    } else {
        params.scale.max(0) as usize
    }
}

/// Traces field lines over a borrowed charge set.
///
/// The charge set cannot change while a tracer borrows it.
#[derive(Clone, Copy, Debug)]
pub struct LineTracer<'a> {
    charges: &'a ChargeSet,
    params: TraceParameters,
}

impl<'a> LineTracer<'a> {
    pub fn new(charges: &'a ChargeSet, params: &TraceParameters) -> Self {
        Self { charges, params: *params }
    }

    /// Every ray leaving a charge of polarity `from`, in charge order then
    /// angle order.
    pub fn rays(&self, from: Polarity) -> impl Iterator<Item = Ray> + 'a {
        let params = self.params;
        self.charges
            .of_polarity(from)
            .flat_map(move |(charge_index, charge)| {
                let n = ray_count(charge, &params);
                let center = charge.pos;
                (0..n).map(move |ray_index| {
                    let angle = TAU * ray_index as f32 / n as f32;
                    Ray {
                        charge_index,
                        ray_index,
                        angle,
                        start: polar_offset(center, params.charge_draw_radius, angle),
                        polarity: from,
                    }
                })
            })
    }

    /// Step along a single ray lazily, one segment at a time.
    pub fn walk(&self, ray: &Ray) -> RayWalk<'a> {
        RayWalk {
            charges: self.charges,
            params: self.params,
            polarity: ray.polarity,
            current: ray.start,
            steps: 0,
            termination: None,
        }
    }

    pub fn trace_ray(&self, ray: &Ray) -> FieldLine {
        let mut walk = self.walk(ray);
        let segments: Vec<Segment> = walk.by_ref().collect();
        FieldLine {
            charge_index: ray.charge_index,
            ray_index: ray.ray_index,
            angle: ray.angle,
            start: ray.start,
            polarity: ray.polarity,
            segments,
            termination: walk.termination().unwrap_or(Termination::DrawLimit),
        }
    }

    /// Lazily trace every ray from charges of polarity `from`.
    pub fn lines(&self, from: Polarity) -> impl Iterator<Item = FieldLine> + 'a {
        let tracer = *self;
        self.rays(from).map(move |ray| tracer.trace_ray(&ray))
    }

    /// Trace every ray on the rayon pool. Output order matches [`Self::lines`].
    pub fn par_lines(&self, from: Polarity) -> Vec<FieldLine> {
        profile_scope!("trace_lines_parallel");
        let rays: Vec<Ray> = self.rays(from).collect();
        let lines: Vec<FieldLine> = rays.par_iter().map(|ray| self.trace_ray(ray)).collect();
        log::debug!(
            "traced {} lines ({} segments) from {:?} charges",
            lines.len(),
            lines.iter().map(FieldLine::segment_count).sum::<usize>(),
            from
        );
        lines
    }
}

/// Lazy stepper for one ray. Yields at most `draw_limit` segments.
#[derive(Clone, Debug)]
pub struct RayWalk<'a> {
    charges: &'a ChargeSet,
    params: TraceParameters,
    polarity: Polarity,
    current: Vec2,
    steps: usize,
    termination: Option<Termination>,
}

impl<'a> RayWalk<'a> {
    /// `None` while the walk can still produce segments.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Index of the first opposite charge whose circle strictly contains `p`.
    fn sink_near(&self, p: Vec2) -> Option<usize> {
        let radius_sq = self.params.termination_radius_sq();
        self.charges
            .of_polarity(self.polarity.opposite())
            .find(|(_, c)| (p - c.pos).mag_sq() < radius_sq)
            .map(|(index, _)| index)
    }
}

impl<'a> Iterator for RayWalk<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.termination.is_some() {
            return None;
        }
        if self.steps >= self.params.step_budget() {
            self.termination = Some(Termination::DrawLimit);
            return None;
        }

        let sample = sample_at(self.charges, &self.params, self.current);
        let heading = match self.polarity {
            Polarity::Positive => sample.direction,
            Polarity::Negative => sample.direction + PI,
        };
        let next = polar_offset(self.current, self.params.step, heading);
        self.steps += 1;

        if !(next.x.is_finite() && next.y.is_finite()) {
            self.termination = Some(Termination::NonFinite);
            return None;
        }

        let segment = Segment::new(self.current, next);
        if let Some(charge) = self.sink_near(next) {
            self.termination = Some(Termination::ReachedSink { charge });
        }
        self.current = next;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            (0, Some(0))
        } else {
            (0, Some(self.params.step_budget().saturating_sub(self.steps)))
        }
    }
}

impl<'a> FusedIterator for RayWalk<'a> {}

/// Lazily trace field lines from every charge of polarity `from`.
pub fn trace_lines<'a>(
    charges: &'a ChargeSet,
    params: &TraceParameters,
    from: Polarity,
) -> impl Iterator<Item = FieldLine> + 'a {
    LineTracer::new(charges, params).lines(from)
}

/// Same lines as [`trace_lines`], one rayon task per ray.
pub fn par_trace_lines(
    charges: &ChargeSet,
    params: &TraceParameters,
    from: Polarity,
) -> Vec<FieldLine> {
    LineTracer::new(charges, params).par_lines(from)
}
