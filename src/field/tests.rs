use super::*;
use crate::charge::Charge;

fn set_of(charges: &[Charge]) -> ChargeSet {
    charges.iter().copied().collect()
}

fn assert_close(a: Vec2, b: Vec2, tol: f32) {
    let scale = a.mag().max(b.mag()).max(1.0);
    assert!(
        (a - b).mag() <= tol * scale,
        "vectors differ: {:?} vs {:?}",
        a,
        b
    );
}

#[test]
fn single_positive_charge_pushes_radially_outward() {
    let charges = set_of(&[Charge::new(0.0, 0.0, 2.0)]);
    let params = TraceParameters::default();

    for pos in [
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 10.0),
        Vec2::new(-10.0, 0.0),
        Vec2::new(0.0, -10.0),
    ] {
        let f = force_at(&charges, &params, pos);
        let dot = f.normalized().dot(pos.normalized());
        assert!((dot - 1.0).abs() < 1e-5, "force at {:?} not radial: dot={}", pos, dot);
        // 2 / 10² with a unit test charge
        assert!((f.mag() - 0.02).abs() < 1e-6, "magnitude at {:?} was {}", pos, f.mag());
    }
}

#[test]
fn superposition_of_two_charges() {
    let a = Charge::new(-30.0, 12.0, 3.0);
    let b = Charge::new(45.0, -8.0, -1.5);
    let params = TraceParameters::default();
    let both = set_of(&[a, b]);
    let only_a = set_of(&[a]);
    let only_b = set_of(&[b]);

    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..200 {
        let p = Vec2::new(rng.f32() * 200.0 - 100.0, rng.f32() * 200.0 - 100.0);
        let sum = force_at(&only_a, &params, p) + force_at(&only_b, &params, p);
        assert_close(force_at(&both, &params, p), sum, 1e-5);
    }
}

#[test]
fn opposite_pair_points_toward_negative_charge_at_midpoint() {
    let d = 40.0;
    let charges = set_of(&[Charge::new(-d, 0.0, 1.0), Charge::new(d, 0.0, -1.0)]);
    let f = force_at(&charges, &TraceParameters::default(), Vec2::zero());

    assert!(f.x > 0.0, "expected force toward the negative charge, got {:?}", f);
    assert_eq!(f.y, 0.0);
}

#[test]
fn test_charge_magnitude_scales_force_but_not_direction() {
    let charges = set_of(&[Charge::new(0.0, 0.0, 1.0), Charge::new(50.0, 20.0, -2.0)]);
    let unit = TraceParameters::default();
    let triple = TraceParameters { test_charge_magnitude: 3.0, ..unit };
    let p = Vec2::new(20.0, 30.0);

    let f1 = sample_at(&charges, &unit, p);
    let f3 = sample_at(&charges, &triple, p);
    assert_close(f3.force, f1.force * 3.0, 1e-5);
    assert!((f1.direction - f3.direction).abs() < 1e-5);
}

#[test]
fn zero_magnitude_charge_contributes_nothing() {
    let params = TraceParameters::default();
    let p = Vec2::new(7.0, -3.0);
    let with_zero = set_of(&[Charge::new(0.0, 0.0, 1.0), Charge::new(5.0, -3.0, 0.0)]);
    let without = set_of(&[Charge::new(0.0, 0.0, 1.0)]);
    assert_eq!(force_at(&with_zero, &params, p), force_at(&without, &params, p));
}

#[test]
fn force_on_a_charge_center_is_finite() {
    let charges = set_of(&[Charge::new(10.0, 10.0, 5.0), Charge::new(40.0, 10.0, -1.0)]);
    let f = force_at(&charges, &TraceParameters::default(), Vec2::new(10.0, 10.0));
    assert!(f.x.is_finite() && f.y.is_finite());
    // Only the other charge pulls on the point
    assert!(f.x > 0.0);
    assert_eq!(f.y, 0.0);
}

#[test]
fn empty_set_has_zero_force() {
    let f = force_at(&ChargeSet::new(), &TraceParameters::default(), Vec2::new(1.0, 2.0));
    assert_eq!(f, Vec2::zero());
}

#[test]
fn probe_scales_force_by_draw_factor() {
    let charges = set_of(&[Charge::new(0.0, 0.0, 1.0)]);
    let params = TraceParameters::default();
    let p = Vec2::new(100.0, 0.0);
    let probe = force_probe(&charges, &params, p, 1.0e5);

    assert_eq!(probe.start, p);
    // 1e5 * 1 / 100² = 10 units along +x
    assert!((probe.end.x - 110.0).abs() < 1e-3, "probe end {:?}", probe.end);
    assert!(probe.end.y.abs() < 1e-6);
}
