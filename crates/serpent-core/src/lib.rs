//! Platform-free core of the serpent field animation and the audio waveform
//! strip. Nothing here touches the DOM; the web crate supplies a drawing
//! surface, a frame scheduler and input events.

pub mod clock;
pub mod constants;
pub mod dispersion;
pub mod error;
pub mod field;
pub mod playback;
pub mod schedule;
pub mod serpent;
pub mod sizing;
pub mod surface;
pub mod waveform;

pub use clock::AnimationClock;
pub use dispersion::{hit_rand, ActiveSet, DispersionParams, Particle};
pub use error::ConfigError;
pub use field::{sample, sample_variant, FieldParams, FieldVariant};
pub use playback::{PlaybackEvent, PlaybackState};
pub use schedule::{FrameLoop, ManualSchedule, Schedule};
pub use serpent::{FrameStats, Palette, SerpentField};
pub use sizing::{display_fit, effective_dpr, square_fit, CanvasSize};
pub use surface::{DrawOp, Recording, Surface};
pub use waveform::{
    draw_curve, select_mode, spectrum_points, wobble_points, FrameInput, SpectrumParams,
    VisualizerMode, WaveformVisualizer, WobbleParams,
};
