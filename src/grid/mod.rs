use crate::charge::ChargeSet;
use crate::config::{TraceParameters, MAX_GRID_POINTS};
use crate::field::sample_at;
use crate::geometry::{polar_offset, Segment, Viewport};
use crate::profile_scope;
use rayon::prelude::*;
use std::iter::FusedIterator;
use ultraviolet::Vec2;


/// Number of grid coordinates `min + i * separation` that fall below `max`,
/// or `None` when the axis alone would exceed [`MAX_GRID_POINTS`].
fn axis_count(min: f32, max: f32, separation: f32) -> Option<usize> {
    if !(separation > 0.0 && separation.is_finite())
        || !(min.is_finite() && max.is_finite())
        || !(max > min)
    {
        return Some(0);
    }
    let raw = ((max as f64 - min as f64) / separation as f64).ceil();
    if !(raw <= MAX_GRID_POINTS as f64) {
        return None;
    }
    let mut n = raw as usize;
    while n > 0 && min + (n - 1) as f32 * separation >= max {
        n -= 1;
    }
    Some(n)
}

/// Grid dimensions `(columns, rows)` over a half-open viewport. Grids with
/// more than [`MAX_GRID_POINTS`] points come back as `(0, 0)`.
pub fn grid_dims(viewport: &Viewport, separation: f32) -> (usize, usize) {
    let columns = axis_count(viewport.x_min, viewport.x_max, separation);
    let rows = axis_count(viewport.y_min, viewport.y_max, separation);
    let dims = columns
        .zip(rows)
        .filter(|&(c, r)| c.checked_mul(r).map_or(false, |total| total <= MAX_GRID_POINTS));
    match dims {
        Some(dims) => dims,
        None => {
            log::warn!(
                "grid over {:?} at separation {} exceeds {} points, sampling nothing",
                viewport,
                separation,
                MAX_GRID_POINTS
            );
            (0, 0)
        }
    }
}

/// Lazy vector-field sampler: one fixed-length segment per grid point,
/// row by row.
#[derive(Clone, Debug)]
pub struct GridSampler<'a> {
    charges: &'a ChargeSet,
    params: TraceParameters,
    origin: Vec2,
    separation: f32,
    columns: usize,
    rows: usize,
    next_index: usize,
}

impl<'a> GridSampler<'a> {
    pub fn new(charges: &'a ChargeSet, params: &TraceParameters, viewport: &Viewport) -> Self {
        let separation = params.vector_field_separation;
        let (columns, rows) = grid_dims(viewport, separation);
        Self {
            charges,
            params: *params,
            origin: Vec2::new(viewport.x_min, viewport.y_min),
            separation,
            columns,
            rows,
            next_index: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn point(&self, column: usize, row: usize) -> Vec2 {
        self.origin + Vec2::new(column as f32, row as f32) * self.separation
    }

    fn sample(&self, column: usize, row: usize) -> Segment {
        let point = self.point(column, row);
        let direction = sample_at(self.charges, &self.params, point).direction;
        Segment::new(point, polar_offset(point, self.params.step, direction))
    }

    // grid_dims keeps the product within MAX_GRID_POINTS
    fn total(&self) -> usize {
        self.columns * self.rows
    }
}

impl<'a> Iterator for GridSampler<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.next_index >= self.total() {
            return None;
        }
        let column = self.next_index % self.columns;
        let row = self.next_index / self.columns;
        self.next_index += 1;
        Some(self.sample(column, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.next_index.min(self.total());
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for GridSampler<'a> {}
impl<'a> FusedIterator for GridSampler<'a> {}

/// Sample the field direction on a uniform grid over `viewport`, emitting a
/// segment of length `step` from every grid point.
pub fn sample_grid<'a>(
    charges: &'a ChargeSet,
    params: &TraceParameters,
    viewport: &Viewport,
) -> GridSampler<'a> {
    GridSampler::new(charges, params, viewport)
}

/// Same segments as [`sample_grid`], one rayon task per row.
pub fn par_sample_grid(
    charges: &ChargeSet,
    params: &TraceParameters,
    viewport: &Viewport,
) -> Vec<Segment> {
    profile_scope!("sample_grid_parallel");
    let sampler = GridSampler::new(charges, params, viewport);
    let columns = sampler.columns();
    let rows: Vec<Vec<Segment>> = (0..sampler.rows())
        .into_par_iter()
        .map(|row| (0..columns).map(|column| sampler.sample(column, row)).collect())
        .collect();
    rows.into_iter().flatten().collect()
}
