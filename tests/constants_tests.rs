// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Camera sits in front of the unit-ish heart with a sane field of view
    assert!(CAMERA_Z > 0.0);
    assert!(CAMERA_FOVY_DEG > 10.0 && CAMERA_FOVY_DEG < 170.0);

    // Colors are normalized
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
    for c in HEART_TINT {
        assert!((0.0..=1.0).contains(&c));
    }

    // Audio levels
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    assert!(THUMP_VELOCITY > 0.0 && THUMP_VELOCITY <= 1.0);
    assert!(THUMP_ATTACK_SEC > 0.0 && THUMP_DECAY_SEC > THUMP_ATTACK_SEC);
    assert!(THUMP_LOWPASS_HZ > THUMP_START_HZ);

    assert!(DODGE_MARGIN >= 0.0 && DODGE_MARGIN < 0.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn thump_pitch_drops() {
    // exponential ramps need strictly positive endpoints
    assert!(THUMP_END_HZ > 0.0);
    assert!(THUMP_START_HZ > THUMP_END_HZ);
}

#[test]
fn dom_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        QUESTION_OVERLAY_ID,
        YES_BUTTON_ID,
        NO_BUTTON_ID,
        LOADING_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn asset_and_query_strings() {
    assert!(HEART_MESH_URL.ends_with(".obj"));
    assert!(REDUCED_MOTION_QUERY.contains("prefers-reduced-motion"));
}
