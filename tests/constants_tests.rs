// Host-side tests for tuning constants and their relationships.

use serpent_core::constants::*;
use serpent_core::{DispersionParams, FieldParams, SpectrumParams, WobbleParams};

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(NUM_POINTS > 0);
    assert!(FIELD_UNITS > 0.0);
    assert!(TIME_STEP > 0.0);

    // Damping keeps some velocity but never adds energy
    assert!(FRICTION > 0.0 && FRICTION < 1.0);
    assert!(SPRING_STRENGTH > 0.0 && SPRING_STRENGTH < 1.0);
    assert!((0.0..=1.0).contains(&HIT_CHANCE));

    assert!(SPECTRUM_BIN_FRACTION > 0.0 && SPECTRUM_BIN_FRACTION <= 1.0);
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
    assert!((0.0..=1.0).contains(&TRACK_VOLUME));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn settle_thresholds_below_impulse() {
    // a fresh particle must never count as settled
    assert!(IMPULSE_STRENGTH * 0.5 * FRICTION > SETTLE_SPEED);
    assert!(SETTLE_DISTANCE < HIT_RADIUS);
}

#[test]
fn fft_size_is_power_of_two_in_web_audio_range() {
    assert!(FFT_SIZE.is_power_of_two());
    assert!((32..=32_768).contains(&FFT_SIZE));
    // enough bins that the low band still covers every output point
    let bins = (FFT_SIZE / 2) as f64;
    assert!(bins * SPECTRUM_BIN_FRACTION >= SPECTRUM_POINTS as f64);
}

#[test]
fn defaults_validate() {
    assert!(FieldParams::default().validate().is_ok());
    assert!(DispersionParams::default().validate().is_ok());
    assert!(WobbleParams::default().validate().is_ok());
    assert!(SpectrumParams::default().validate().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wobble_cycle_mostly_pause() {
    assert!(WOBBLE_PAUSE_MS > WOBBLE_DURATION_MS);
    assert!(WOBBLE_POINTS >= 2 && SPECTRUM_POINTS >= 2);
}
