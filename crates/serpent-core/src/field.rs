//! Closed-form parametric dot field.
//!
//! Every point is a pure function of its index and the global phase `t`;
//! nothing is stored per point. The curve family is defined on a 400-unit
//! square and scaled uniformly to the backing surface.

use crate::constants::{FIELD_UNITS, NUM_POINTS, RECIPROCAL_EPSILON, TIME_STEP};
use crate::error::ConfigError;
use glam::DVec2;
use std::str::FromStr;

/// Which member of the formula family to evaluate.
///
/// `Reciprocal` adds a `0.2 / k` term to `q`, which bunches points into
/// sharp spikes wherever `cos(i / 29)` crosses zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldVariant {
    #[default]
    Canonical,
    Reciprocal,
}

impl FromStr for FieldVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "canonical" => Ok(Self::Canonical),
            "reciprocal" | "serpent" => Ok(Self::Reciprocal),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub num_points: u32,
    /// Width of the conceptual canvas the formula is written against.
    pub field_units: f64,
    pub time_step: f64,
    pub variant: FieldVariant,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            num_points: NUM_POINTS,
            field_units: FIELD_UNITS,
            time_step: TIME_STEP,
            variant: FieldVariant::Canonical,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_points == 0 {
            return Err(ConfigError::NoPoints);
        }
        if !(self.field_units.is_finite() && self.field_units > 0.0) {
            return Err(ConfigError::FieldWidth(self.field_units));
        }
        crate::error::non_negative("time_step", self.time_step)
    }

    /// Device pixels per field unit for a backing surface `width_px` wide.
    #[inline]
    pub fn scale_for(&self, width_px: f64) -> f64 {
        width_px / self.field_units
    }
}

/// Base position of point `i` at phase `t`, in device pixels.
#[inline]
pub fn sample(i: u32, t: f64, scale: f64) -> DVec2 {
    sample_variant(FieldVariant::Canonical, i, t, scale)
}

pub fn sample_variant(variant: FieldVariant, i: u32, t: f64, scale: f64) -> DVec2 {
    let x_base = i as f64;
    let y_base = x_base / 235.0;

    let wave_phase = 4.0 + (y_base * 2.0 - t).sin() * 3.0;
    let k = wave_phase * (x_base / 29.0).cos();
    let e = y_base / 8.0 - 13.0;
    let d = (k * k + e * e).sqrt();

    let mut q = 2.0 * (k * 2.0).sin();
    if variant == FieldVariant::Reciprocal {
        q += 0.2 / if k == 0.0 { RECIPROCAL_EPSILON } else { k };
    }
    q += (y_base / 25.0).sin() * k * (5.0 + 2.0 * (e * 9.0 - d * 3.0 + t * 2.0).sin());

    let angle = d - t;
    DVec2::new(
        (q + 30.0 * angle.cos() + 200.0) * scale,
        (q * angle.sin() + d * 39.0 - 220.0) * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_fixture_matches_hand_computation() {
        let d = 185.0_f64.sqrt();
        let q = 2.0 * 8.0_f64.sin();
        let p = sample(0, 0.0, 1.0);
        assert!((p.x - (q + 30.0 * d.cos() + 200.0)).abs() < 1e-9);
        assert!((p.y - (q * d.sin() + 39.0 * d - 220.0)).abs() < 1e-9);
    }

    #[test]
    fn variants_differ_only_by_reciprocal_term() {
        let a = sample_variant(FieldVariant::Canonical, 0, 0.0, 1.0);
        let b = sample_variant(FieldVariant::Reciprocal, 0, 0.0, 1.0);
        // k = 4 at the origin, so q shifts by 0.05 before projection.
        assert!((b.x - a.x - 0.05).abs() < 1e-9);
    }

    #[test]
    fn parse_variant_names() {
        assert_eq!("".parse::<FieldVariant>(), Ok(FieldVariant::Canonical));
        assert_eq!(
            "Reciprocal".parse::<FieldVariant>(),
            Ok(FieldVariant::Reciprocal)
        );
        assert!("spiral".parse::<FieldVariant>().is_err());
    }

    #[test]
    fn zero_points_rejected() {
        let params = FieldParams {
            num_points: 0,
            ..FieldParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoPoints));
    }
}
