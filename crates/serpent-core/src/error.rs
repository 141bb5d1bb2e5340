use thiserror::Error;

/// Rejected tuning values. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("point count must be at least 1")]
    NoPoints,
    #[error("field width must be positive, got {0}")]
    FieldWidth(f64),
    #[error("friction must be in [0, 1), got {0}")]
    Friction(f64),
    #[error("hit chance must be in [0, 1], got {0}")]
    HitChance(f64),
    #[error("{name} must be a non-negative finite number, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("wobble duration must be positive, got {0} ms")]
    WobbleDuration(f64),
    #[error("curve needs at least 2 points, got {0}")]
    CurvePoints(usize),
    #[error("bin fraction must be in (0, 1], got {0}")]
    BinFraction(f64),
    #[error("unknown field variant {0:?}")]
    UnknownVariant(String),
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
