//! Audio-reactive waveform strip.
//!
//! Draws a smoothed curve along the bottom of a canvas. Which curve depends on
//! playback: live spectrum while playing, the last live curve once paused, an
//! idle ripple before the user ever touched the player, and a flat baseline
//! after they did but before anything played.

use crate::constants::{
    CURVE_LINE_WIDTH, SPECTRUM_BIN_FRACTION, SPECTRUM_POINTS, WOBBLE_AMPLITUDE,
    WOBBLE_DURATION_MS, WOBBLE_PAUSE_MS, WOBBLE_POINTS, WOBBLE_SPEED, WOBBLE_WAVELENGTH,
};
use crate::error::{non_negative, ConfigError};
use crate::sizing::display_fit;
use crate::surface::Surface;
use glam::DVec2;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualizerMode {
    Live,
    Frozen,
    Wobble,
    Flat,
}

pub fn select_mode(live: bool, has_cached_curve: bool, interacted: bool) -> VisualizerMode {
    match (live, has_cached_curve, interacted) {
        (true, _, _) => VisualizerMode::Live,
        (false, true, _) => VisualizerMode::Frozen,
        (false, false, false) => VisualizerMode::Wobble,
        (false, false, true) => VisualizerMode::Flat,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WobbleParams {
    pub amplitude: f64,
    pub duration_ms: f64,
    pub pause_ms: f64,
    pub wavelength: f64,
    pub speed: f64,
    pub points: usize,
}

impl Default for WobbleParams {
    fn default() -> Self {
        Self {
            amplitude: WOBBLE_AMPLITUDE,
            duration_ms: WOBBLE_DURATION_MS,
            pause_ms: WOBBLE_PAUSE_MS,
            wavelength: WOBBLE_WAVELENGTH,
            speed: WOBBLE_SPEED,
            points: WOBBLE_POINTS,
        }
    }
}

impl WobbleParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(ConfigError::WobbleDuration(self.duration_ms));
        }
        if self.points < 2 {
            return Err(ConfigError::CurvePoints(self.points));
        }
        non_negative("amplitude", self.amplitude)?;
        non_negative("pause_ms", self.pause_ms)?;
        non_negative("speed", self.speed)?;
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(ConfigError::Negative {
                name: "wavelength",
                value: self.wavelength,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn cycle_ms(&self) -> f64 {
        self.duration_ms + self.pause_ms
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumParams {
    pub points: usize,
    /// Share of the analyser bins spread across the width, from the bottom.
    pub bin_fraction: f64,
    pub line_width: f64,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            points: SPECTRUM_POINTS,
            bin_fraction: SPECTRUM_BIN_FRACTION,
            line_width: CURVE_LINE_WIDTH,
        }
    }
}

impl SpectrumParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points < 2 {
            return Err(ConfigError::CurvePoints(self.points));
        }
        if !(self.bin_fraction > 0.0 && self.bin_fraction <= 1.0) {
            return Err(ConfigError::BinFraction(self.bin_fraction));
        }
        non_negative("line_width", self.line_width)
    }

    /// Bin sampled for output point `i` of `bins`. Quadratic in `i`, so the
    /// low end of the spectrum gets most of the width.
    #[inline]
    pub fn bin_index(&self, i: usize, bins: usize) -> usize {
        let pos = i as f64 / self.points as f64;
        let idx = (pos * pos * bins as f64 * self.bin_fraction).floor() as usize;
        idx.min(bins.saturating_sub(1))
    }
}

/// Ripple at `time_in_cycle_ms`; flat at `base_y` once the ripple is over.
pub fn wobble_points(
    params: &WobbleParams,
    time_in_cycle_ms: f64,
    width: f64,
    base_y: f64,
) -> Vec<DVec2> {
    let last = (params.points - 1) as f64;
    let rippling = time_in_cycle_ms < params.duration_ms;
    let decay = 1.0 - time_in_cycle_ms / params.duration_ms;
    (0..params.points)
        .map(|i| {
            let x = i as f64 / last * width;
            let y = if rippling {
                let phase = x / params.wavelength * TAU - time_in_cycle_ms * params.speed * 0.01;
                base_y + phase.sin() * params.amplitude * decay
            } else {
                base_y
            };
            DVec2::new(x, y)
        })
        .collect()
}

/// Map a byte magnitude snapshot onto curve points rising from the baseline.
pub fn spectrum_points(
    params: &SpectrumParams,
    magnitudes: &[u8],
    width: f64,
    height: f64,
    baseline_offset: f64,
) -> Vec<DVec2> {
    let last = (params.points - 1) as f64;
    let base_y = height - baseline_offset;
    (0..params.points)
        .map(|i| {
            let x = i as f64 / last * width;
            let value = if magnitudes.is_empty() {
                0.0
            } else {
                magnitudes[params.bin_index(i, magnitudes.len())] as f64 / 255.0
            };
            DVec2::new(x, base_y - value * base_y)
        })
        .collect()
}

/// Stroke `points` as a smooth curve through the midpoints between samples.
pub fn draw_curve<S: Surface + ?Sized>(
    surface: &mut S,
    color: &str,
    line_width: f64,
    points: &[DVec2],
) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    surface.begin_path();
    surface.set_stroke_style(color);
    surface.set_line_width(line_width);
    surface.move_to(*first);
    for pair in points[1..].windows(2) {
        surface.quadratic_curve_to(pair[0], (pair[0] + pair[1]) * 0.5);
    }
    surface.line_to(*last);
    surface.stroke();
}

/// What the host knows this frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Monotonic frame timestamp in milliseconds.
    pub timestamp_ms: f64,
    pub playing: bool,
    pub interacted: bool,
    /// Present only while the audio pipeline can be sampled.
    pub magnitudes: Option<&'a [u8]>,
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

#[derive(Debug)]
pub struct WaveformVisualizer {
    wobble: WobbleParams,
    spectrum: SpectrumParams,
    baseline_offset: f64,
    color: String,
    last_curve: Option<Vec<DVec2>>,
    wobble_origin_ms: Option<f64>,
}

impl WaveformVisualizer {
    pub fn new(
        wobble: WobbleParams,
        spectrum: SpectrumParams,
        baseline_offset: f64,
        color: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        wobble.validate()?;
        spectrum.validate()?;
        non_negative("baseline_offset", baseline_offset)?;
        Ok(Self {
            wobble,
            spectrum,
            baseline_offset,
            color: color.into(),
            last_curve: None,
            wobble_origin_ms: None,
        })
    }

    /// The curve redrawn while paused, if anything has played yet.
    pub fn last_curve(&self) -> Option<&[DVec2]> {
        self.last_curve.as_deref()
    }

    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        input: FrameInput<'_>,
    ) -> VisualizerMode {
        let size = display_fit(input.css_width, input.css_height, input.dpr);
        surface.set_size(size.width_px, size.height_px);
        surface.scale(size.dpr, size.dpr);
        let (w, h) = (size.css_width, size.css_height);
        surface.clear_rect(0.0, 0.0, w, h);

        let live = input.playing && input.magnitudes.is_some();
        let mode = select_mode(live, self.last_curve.is_some(), input.interacted);
        match mode {
            VisualizerMode::Live => {
                let magnitudes = input.magnitudes.unwrap_or_default();
                let points =
                    spectrum_points(&self.spectrum, magnitudes, w, h, self.baseline_offset);
                draw_curve(surface, &self.color, self.spectrum.line_width, &points);
                self.last_curve = Some(points);
            }
            VisualizerMode::Frozen => {
                if let Some(points) = &self.last_curve {
                    draw_curve(surface, &self.color, self.spectrum.line_width, points);
                }
            }
            VisualizerMode::Wobble => {
                let origin = *self.wobble_origin_ms.get_or_insert(input.timestamp_ms);
                let elapsed = (input.timestamp_ms - origin).max(0.0);
                let in_cycle = elapsed % self.wobble.cycle_ms();
                let points = wobble_points(&self.wobble, in_cycle, w, h - self.baseline_offset);
                draw_curve(surface, &self.color, self.spectrum.line_width, &points);
            }
            VisualizerMode::Flat => {
                let y = h - self.baseline_offset;
                surface.begin_path();
                surface.set_stroke_style(&self.color);
                surface.set_line_width(self.spectrum.line_width);
                surface.move_to(DVec2::new(0.0, y));
                surface.line_to(DVec2::new(w, y));
                surface.stroke();
            }
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recording};

    #[test]
    fn mode_table() {
        assert_eq!(select_mode(true, false, false), VisualizerMode::Live);
        assert_eq!(select_mode(false, true, true), VisualizerMode::Frozen);
        assert_eq!(select_mode(false, false, false), VisualizerMode::Wobble);
        assert_eq!(select_mode(false, false, true), VisualizerMode::Flat);
    }

    #[test]
    fn bin_index_stays_in_low_band() {
        let p = SpectrumParams::default();
        assert_eq!(p.bin_index(0, 4096), 0);
        let top = p.bin_index(p.points - 1, 4096);
        assert!(top < (4096.0 * p.bin_fraction) as usize);
        assert_eq!(p.bin_index(100, 1), 0);
    }

    #[test]
    fn curve_goes_through_midpoints() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(6.0, 2.0),
        ];
        let mut s = Recording::new(10, 10);
        draw_curve(&mut s, "red", 2.0, &pts);
        assert!(s.ops.contains(&DrawOp::QuadTo(pts[1], DVec2::new(3.0, 1.0))));
        assert!(s.ops.contains(&DrawOp::QuadTo(pts[2], DVec2::new(5.0, 1.0))));
        assert_eq!(s.path_points().last(), Some(&pts[3]));
    }

    #[test]
    fn empty_curve_draws_nothing() {
        let mut s = Recording::new(10, 10);
        draw_curve(&mut s, "red", 2.0, &[]);
        assert!(s.ops.is_empty());
    }

    #[test]
    fn silent_spectrum_sits_on_baseline() {
        let pts = spectrum_points(&SpectrumParams::default(), &[0; 64], 300.0, 100.0, 20.0);
        assert!(pts.iter().all(|p| p.y == 80.0));
        assert_eq!(pts.last().map(|p| p.x), Some(300.0));
    }

    #[test]
    fn full_scale_reaches_top() {
        let pts = spectrum_points(&SpectrumParams::default(), &[255; 64], 300.0, 100.0, 20.0);
        assert!(pts.iter().all(|p| p.y.abs() < 1e-12));
    }
}
