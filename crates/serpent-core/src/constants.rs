// Shared field/physics/visualizer tuning constants.

use std::f64::consts::PI;

// Field layout
pub const NUM_POINTS: u32 = 10_000;
pub const FIELD_UNITS: f64 = 400.0; // conceptual canvas width the formula is defined on
pub const TIME_STEP: f64 = PI / 480.0; // phase advance per frame, not per second
pub const RECIPROCAL_EPSILON: f64 = 0.00001; // stands in for k == 0 in the 0.2/k term

// Dispersion
pub const HIT_RADIUS: f64 = 25.0; // field units
pub const HIT_CHANCE: f64 = 1.0;
pub const IMPULSE_STRENGTH: f64 = 5.0; // field units per frame
pub const FRICTION: f64 = 0.6; // velocity kept per frame
pub const SPRING_STRENGTH: f64 = 0.008;
pub const TANGENTIAL_RATIO: f64 = 0.8; // swirl vs radial share of the impulse
pub const SETTLE_SPEED: f64 = 0.1;
pub const SETTLE_DISTANCE: f64 = 0.5;

// Hit hash (classic shader one-liner)
pub const HASH_INDEX_MUL: f64 = 12.9898;
pub const HASH_TIME_MUL: f64 = 78.233;
pub const HASH_SCALE: f64 = 43758.5453;

// Idle wobble
pub const WOBBLE_AMPLITUDE: f64 = 10.0; // css px
pub const WOBBLE_DURATION_MS: f64 = 500.0;
pub const WOBBLE_PAUSE_MS: f64 = 3000.0;
pub const WOBBLE_WAVELENGTH: f64 = 15.0; // css px per cycle
pub const WOBBLE_SPEED: f64 = 2.0;
pub const WOBBLE_POINTS: usize = 64;

// Live spectrum
pub const SPECTRUM_POINTS: usize = 128;
pub const SPECTRUM_BIN_FRACTION: f64 = 0.4; // only the low end of the bins is shown
pub const CURVE_LINE_WIDTH: f64 = 2.0;

// Audio pipeline
pub const FFT_SIZE: u32 = 8192;
pub const ANALYSER_SMOOTHING: f64 = 0.85;
pub const TRACK_VOLUME: f64 = 0.7;
