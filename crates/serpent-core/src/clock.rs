use crate::constants::TIME_STEP;

/// Per-frame phase accumulator.
///
/// Advances by a fixed step every rendered frame regardless of how much wall
/// time passed, so the field moves slower on low refresh-rate displays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    t: f64,
    step: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(TIME_STEP)
    }
}

impl AnimationClock {
    pub fn new(step: f64) -> Self {
        Self { t: 0.0, step }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.t
    }

    #[inline]
    pub fn advance(&mut self) {
        self.t += self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_fixed_step() {
        let mut c = AnimationClock::new(0.25);
        c.advance();
        c.advance();
        assert_eq!(c.phase(), 0.5);
    }
}
