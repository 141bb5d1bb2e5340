//! Per-frame driver for the dot field: sample, disperse, draw, advance.

use crate::clock::AnimationClock;
use crate::dispersion::{ActiveSet, DispersionParams};
use crate::error::ConfigError;
use crate::field::{sample_variant, FieldParams};
use crate::surface::Surface;
use glam::DVec2;

/// Colours resolved once from the page theme. Opaque to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#000".to_string(),
            foreground: "#fff".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: u32,
    pub hits: u32,
    pub active: usize,
}

/// All state of one mounted field view.
///
/// With `dispersion` set to `None` the pointer is ignored and the field is
/// drawn straight from the sampler.
#[derive(Debug)]
pub struct SerpentField {
    params: FieldParams,
    dispersion: Option<DispersionParams>,
    palette: Palette,
    clock: AnimationClock,
    active: ActiveSet,
    pointer: Option<DVec2>,
}

impl SerpentField {
    pub fn new(
        params: FieldParams,
        dispersion: Option<DispersionParams>,
        palette: Palette,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if let Some(d) = &dispersion {
            d.validate()?;
        }
        Ok(Self {
            clock: AnimationClock::new(params.time_step),
            params,
            dispersion,
            palette,
            active: ActiveSet::new(),
            pointer: None,
        })
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn phase(&self) -> f64 {
        self.clock.phase()
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Pointer entered or moved, in backing-store pixels.
    pub fn pointer_moved(&mut self, p: DVec2) {
        self.pointer = Some(p);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Render one frame and advance the clock.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let scale = self.params.scale_for(width);
        let t = self.clock.phase();

        surface.set_fill_style(&self.palette.background);
        surface.fill_rect(0.0, 0.0, width, height);
        surface.set_fill_style(&self.palette.foreground);

        let mut stats = FrameStats::default();
        for i in 0..self.params.num_points {
            let base = sample_variant(self.params.variant, i, t, scale);
            let mut pos = base;
            if let Some(d) = &self.dispersion {
                if self.active.try_hit(d, i, base, self.pointer, scale, t) {
                    stats.hits += 1;
                }
                pos += self.active.step(d, i);
            }
            surface.fill_rect(pos.x, pos.y, 1.0, 1.0);
            stats.drawn += 1;
        }

        stats.active = self.active.len();
        self.clock.advance();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recording};

    fn small_field(points: u32, dispersion: Option<DispersionParams>) -> SerpentField {
        let params = FieldParams {
            num_points: points,
            ..FieldParams::default()
        };
        SerpentField::new(params, dispersion, Palette::default()).unwrap()
    }

    #[test]
    fn clears_then_draws_every_point() {
        let mut field = small_field(50, None);
        let mut surface = Recording::new(400, 400);
        let stats = field.tick(&mut surface);
        assert_eq!(stats.drawn, 50);
        assert_eq!(surface.ops[0], DrawOp::FillStyle("#000".into()));
        assert_eq!(surface.ops[1], DrawOp::FillRect(0.0, 0.0, 400.0, 400.0));
        assert_eq!(surface.dots().len(), 50);
    }

    #[test]
    fn pointer_ignored_without_dispersion() {
        let mut field = small_field(10, None);
        let base = sample_variant(field.params.variant, 3, 0.0, 1.0);
        field.pointer_moved(base + DVec2::new(1.0, 0.0));
        let stats = field.tick(&mut Recording::new(400, 400));
        assert_eq!(stats.hits, 0);
        assert!(field.active().is_empty());
    }

    #[test]
    fn invalid_params_rejected() {
        let bad = DispersionParams {
            hit_chance: 2.0,
            ..DispersionParams::default()
        };
        let err = SerpentField::new(FieldParams::default(), Some(bad), Palette::default());
        assert_eq!(err.unwrap_err(), ConfigError::HitChance(2.0));
    }
}
