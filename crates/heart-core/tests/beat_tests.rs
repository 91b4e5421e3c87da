// Beat timeline shape over whole cycles.

use heart_core::{BeatConfig, BeatOscillator, BeatPhase};

fn config() -> BeatConfig {
    BeatConfig {
        peak: 0.5,
        rise_sec: 0.6,
        fall_sec: 0.6,
        repeat_delay_sec: 0.3,
        reduced_motion_fraction: 0.3,
    }
}

#[test]
fn value_stays_within_zero_and_peak() {
    let mut osc = BeatOscillator::new(config(), false);
    for _ in 0..2000 {
        let v = osc.advance(1.0 / 60.0);
        assert!((0.0..=0.5).contains(&v), "beat out of range: {v}");
    }
}

#[test]
fn walks_through_phases_in_order() {
    let mut osc = BeatOscillator::new(config(), false);
    osc.advance(0.3);
    assert_eq!(osc.phase(), BeatPhase::Rising);
    let mid_rise = osc.value();
    // accelerate-in: halfway through the rise is well below half the peak
    assert!(mid_rise < 0.25);

    osc.advance(0.6);
    assert_eq!(osc.phase(), BeatPhase::Falling);
    // decelerate-out: halfway through the fall has already dropped past half
    assert!(osc.value() < 0.25);

    osc.advance(0.45);
    assert_eq!(osc.phase(), BeatPhase::Resting);
    assert_eq!(osc.value(), 0.0);
    assert_eq!(osc.cycles(), 0);

    osc.advance(0.2);
    assert_eq!(osc.phase(), BeatPhase::Rising);
    assert_eq!(osc.cycles(), 1);
}

#[test]
fn reaches_peak_at_end_of_rise() {
    let mut osc = BeatOscillator::new(config(), false);
    osc.advance(0.599_999);
    assert!((osc.value() - 0.5).abs() < 1e-4);
}

#[test]
fn reduced_motion_never_moves() {
    let mut osc = BeatOscillator::new(config(), true);
    assert!(osc.is_held());
    for _ in 0..1000 {
        assert!((osc.advance(0.016) - 0.15).abs() < 1e-7);
    }
    assert_eq!(osc.phase(), BeatPhase::Held);
}

#[test]
fn negative_steps_do_not_rewind() {
    let mut osc = BeatOscillator::new(config(), false);
    let v = osc.advance(0.2);
    assert_eq!(osc.advance(-1.0), v);
}
