use super::*;
use crate::charge::Charge;

fn dipole() -> ChargeSet {
    vec![Charge::new(0.0, 0.0, 1.0), Charge::new(100.0, 0.0, -1.0)]
        .into_iter()
        .collect()
}

fn params_with(scale: i32, draw_limit: i32) -> TraceParameters {
    TraceParameters {
        scale,
        draw_limit,
        step: 10.0,
        charge_draw_radius: 15.0,
        ..Default::default()
    }
}

#[test]
fn fixed_scale_gives_evenly_spaced_rays_on_the_boundary() {
    let charges: ChargeSet = std::iter::once(Charge::new(40.0, -20.0, 3.0)).collect();
    let params = params_with(12, 5);
    let rays: Vec<Ray> = LineTracer::new(&charges, &params).rays(Polarity::Positive).collect();

    assert_eq!(rays.len(), 12);
    for (i, ray) in rays.iter().enumerate() {
        let expected = 2.0 * std::f32::consts::PI * i as f32 / 12.0;
        assert_eq!(ray.ray_index, i);
        assert!((ray.angle - expected).abs() < 1e-6, "ray {} angle {}", i, ray.angle);
        let dist = (ray.start - Vec2::new(40.0, -20.0)).mag();
        assert!((dist - 15.0).abs() < 1e-4, "ray {} starts {} from center", i, dist);
    }
}

#[test]
fn dynamic_scale_uses_ceiling_of_magnitude_times_factor() {
    let params = TraceParameters {
        use_dynamic_scale: true,
        dynamic_scale_factor: 4.0,
        ..Default::default()
    };
    assert_eq!(ray_count(&Charge::new(0.0, 0.0, 2.5), &params), 10);
    assert_eq!(ray_count(&Charge::new(0.0, 0.0, 1.1), &params), 5);
    assert_eq!(ray_count(&Charge::new(0.0, 0.0, -1.2), &params), 5);
    assert_eq!(ray_count(&Charge::new(0.0, 0.0, 0.0), &params), 0);
}

#[test]
fn non_positive_scale_draws_nothing() {
    let charges = dipole();
    for scale in [0, -4] {
        let params = params_with(scale, 100);
        assert_eq!(trace_lines(&charges, &params, Polarity::Positive).count(), 0);
    }
}

#[test]
fn ray_toward_opposite_charge_terminates_in_its_circle() {
    let charges = dipole();
    let params = params_with(12, 500);
    let tracer = LineTracer::new(&charges, &params);
    let ray = tracer
        .rays(Polarity::Positive)
        .next()
        .expect("positive charge should emit rays");
    assert_eq!(ray.angle, 0.0);

    let line = tracer.trace_ray(&ray);
    assert_eq!(line.termination, Termination::ReachedSink { charge: 1 });
    assert!(line.segment_count() < 500);
    // 15 -> 95 in steps of 10 along the axis
    assert_eq!(line.segment_count(), 8);
    let end = line.end();
    assert!((end - Vec2::new(100.0, 0.0)).mag_sq() < 15.0 * 15.0);
}

#[test]
fn lone_positive_charge_runs_every_ray_to_the_limit() {
    let charges: ChargeSet = std::iter::once(Charge::new(0.0, 0.0, 2.0)).collect();
    let params = params_with(8, 50);
    let lines: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Positive).collect();

    assert_eq!(lines.len(), 8);
    for line in &lines {
        assert_eq!(line.segment_count(), 50);
        assert_eq!(line.termination, Termination::DrawLimit);
    }
}

#[test]
fn same_sign_charges_never_terminate_early() {
    let charges: ChargeSet = vec![Charge::new(0.0, 0.0, 1.0), Charge::new(60.0, 0.0, 1.0)]
        .into_iter()
        .collect();
    let params = params_with(6, 40);
    for line in trace_lines(&charges, &params, Polarity::Positive) {
        assert_eq!(line.segment_count(), 40);
        assert!(!line.reached_sink());
    }
}

#[test]
fn every_ray_is_bounded_by_the_draw_limit() {
    let mut rng = fastrand::Rng::with_seed(3);
    for limit in [1, 7, 37] {
        let charges: ChargeSet = (0..6)
            .map(|_| {
                let sign = if rng.bool() { 1.0 } else { -1.0 };
                let q = sign * (0.5 + rng.f32() * 3.0);
                Charge::new(rng.f32() * 400.0, rng.f32() * 400.0, q)
            })
            .collect();
        let params = params_with(9, limit);
        for from in [Polarity::Positive, Polarity::Negative] {
            for line in trace_lines(&charges, &params, from) {
                assert!(line.segment_count() <= limit as usize);
                assert!(line.segments.iter().all(Segment::is_finite));
            }
        }
    }
}

#[test]
fn non_positive_draw_limit_takes_no_steps() {
    let charges = dipole();
    let params = params_with(4, -2);
    let lines: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Positive).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.segments.is_empty()));
    assert!(lines.iter().all(|l| l.end() == l.start));
}

#[test]
fn segments_have_step_length_and_chain_together() {
    let charges = dipole();
    let params = params_with(5, 30);
    for line in trace_lines(&charges, &params, Polarity::Positive) {
        let mut prev = line.start;
        for seg in &line.segments {
            assert_eq!(seg.start, prev);
            assert!((seg.length() - 10.0).abs() < 1e-3);
            prev = seg.end;
        }
    }
}

#[test]
fn negative_sources_walk_against_the_field() {
    // Sink on the right, source on the left
    let charges: ChargeSet = vec![Charge::new(0.0, 0.0, -1.0), Charge::new(100.0, 0.0, 1.0)]
        .into_iter()
        .collect();
    let params = params_with(12, 500);
    let lines: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Negative).collect();

    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|l| l.charge_index == 0));
    let axis = &lines[0];
    assert_eq!(axis.termination, Termination::ReachedSink { charge: 1 });
    let first = axis.segments[0];
    assert!(first.end.x > first.start.x, "should head toward the positive charge");
}

#[test]
fn zero_charges_are_never_sources() {
    let charges: ChargeSet = vec![Charge::new(0.0, 0.0, 0.0), Charge::new(50.0, 0.0, 0.0)]
        .into_iter()
        .collect();
    let params = params_with(10, 10);
    assert_eq!(trace_lines(&charges, &params, Polarity::Positive).count(), 0);
    assert_eq!(trace_lines(&charges, &params, Polarity::Negative).count(), 0);
}

#[test]
fn empty_set_traces_nothing() {
    let params = params_with(10, 10);
    assert_eq!(trace_lines(&ChargeSet::new(), &params, Polarity::Positive).count(), 0);
}

#[test]
fn tracing_is_restartable() {
    let charges = dipole();
    let params = params_with(7, 60);
    let first: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Positive).collect();
    let second: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Positive).collect();
    assert_eq!(first, second);
}

#[test]
fn walk_streams_the_same_segments_as_trace_ray() {
    let charges = dipole();
    let params = params_with(3, 80);
    let tracer = LineTracer::new(&charges, &params);
    for ray in tracer.rays(Polarity::Positive) {
        let mut walk = tracer.walk(&ray);
        assert!(walk.termination().is_none());
        let streamed: Vec<Segment> = walk.by_ref().collect();
        let line = tracer.trace_ray(&ray);
        assert_eq!(streamed, line.segments);
        assert_eq!(walk.termination(), Some(line.termination));
        assert_eq!(walk.next(), None);
    }
}

#[test]
fn parallel_tracing_matches_sequential_order() {
    let charges: ChargeSet = vec![
        Charge::new(0.0, 0.0, 2.0),
        Charge::new(120.0, 40.0, -1.0),
        Charge::new(-60.0, 90.0, 1.0),
        Charge::new(30.0, -80.0, -2.0),
    ]
    .into_iter()
    .collect();
    let params = params_with(10, 120);
    let sequential: Vec<FieldLine> = trace_lines(&charges, &params, Polarity::Positive).collect();
    let parallel = par_trace_lines(&charges, &params, Polarity::Positive);
    assert_eq!(sequential, parallel);
}

#[test]
fn polyline_points_follow_segments() {
    let charges = dipole();
    let params = params_with(1, 4);
    let line = trace_lines(&charges, &params, Polarity::Positive)
        .next()
        .unwrap();
    let points: Vec<Vec2> = line.points().collect();
    assert_eq!(points.len(), line.segment_count() + 1);
    assert_eq!(points[0], line.start);
    assert_eq!(*points.last().unwrap(), line.end());
}
