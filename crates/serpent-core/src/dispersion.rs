//! Pointer-driven dispersion: dots knocked loose near the cursor spring back
//! to their base positions.
//!
//! Only perturbed indices are tracked, in a sparse map keyed by point index.
//! A point is either absent (settled) or has exactly one [`Particle`].

use crate::constants::{
    FRICTION, HASH_INDEX_MUL, HASH_SCALE, HASH_TIME_MUL, HIT_CHANCE, HIT_RADIUS,
    IMPULSE_STRENGTH, SETTLE_DISTANCE, SETTLE_SPEED, SPRING_STRENGTH, TANGENTIAL_RATIO,
};
use crate::error::{non_negative, ConfigError};
use fnv::FnvHashMap;
use glam::DVec2;

#[derive(Clone, Debug, PartialEq)]
pub struct DispersionParams {
    /// Hit radius in field units; multiplied by the surface scale.
    pub hit_radius: f64,
    pub hit_chance: f64,
    pub impulse_strength: f64,
    pub friction: f64,
    pub spring_strength: f64,
    pub tangential_ratio: f64,
    pub settle_speed: f64,
    pub settle_distance: f64,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            hit_radius: HIT_RADIUS,
            hit_chance: HIT_CHANCE,
            impulse_strength: IMPULSE_STRENGTH,
            friction: FRICTION,
            spring_strength: SPRING_STRENGTH,
            tangential_ratio: TANGENTIAL_RATIO,
            settle_speed: SETTLE_SPEED,
            settle_distance: SETTLE_DISTANCE,
        }
    }
}

impl DispersionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.friction) {
            return Err(ConfigError::Friction(self.friction));
        }
        if !(0.0..=1.0).contains(&self.hit_chance) {
            return Err(ConfigError::HitChance(self.hit_chance));
        }
        non_negative("hit_radius", self.hit_radius)?;
        non_negative("impulse_strength", self.impulse_strength)?;
        non_negative("spring_strength", self.spring_strength)?;
        non_negative("tangential_ratio", self.tangential_ratio)?;
        non_negative("settle_speed", self.settle_speed)?;
        non_negative("settle_distance", self.settle_distance)
    }
}

/// Transient offset of one dot from its base position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub offset: DVec2,
    pub velocity: DVec2,
}

impl Particle {
    /// One semi-implicit Euler step. Returns `true` once the particle has
    /// come to rest near its base position.
    #[inline]
    pub fn integrate(&mut self, params: &DispersionParams) -> bool {
        self.offset += self.velocity;
        self.velocity *= params.friction;
        self.velocity -= self.offset * params.spring_strength;
        self.velocity.length() < params.settle_speed
            && self.offset.length() < params.settle_distance
    }
}

/// Deterministic per-(index, phase) draw in `[0, 1)`.
#[inline]
pub fn hit_rand(i: u32, t: f64) -> f64 {
    let seed = (i as f64 * HASH_INDEX_MUL + t * HASH_TIME_MUL).sin() * HASH_SCALE;
    seed - seed.floor()
}

/// Initial velocity for a dot at `base` struck by a pointer at `pointer`.
///
/// `dist` must be the non-zero distance between the two.
pub fn impulse(
    params: &DispersionParams,
    i: u32,
    base: DVec2,
    pointer: DVec2,
    dist: f64,
    scale: f64,
    rand: f64,
) -> DVec2 {
    let radial = (base - pointer) / dist;
    let parity = if i % 2 == 0 { 1.0 } else { -1.0 };
    let tangent_sign = parity * (1.0 + (i as f64 * 0.1).sin() * 0.5);
    let tangential = radial.perp() * params.tangential_ratio * tangent_sign;
    let strength = params.impulse_strength * scale * (0.5 + rand);
    (radial + tangential) * strength
}

/// Sparse set of currently perturbed dots.
#[derive(Debug, Default)]
pub struct ActiveSet {
    particles: FnvHashMap<u32, Particle>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn contains(&self, i: u32) -> bool {
        self.particles.contains_key(&i)
    }

    pub fn get(&self, i: u32) -> Option<&Particle> {
        self.particles.get(&i)
    }

    /// Knock point `i` loose if the pointer is close enough and the draw
    /// passes. Returns `true` when a new particle was created. A point that is
    /// already active is left untouched.
    pub fn try_hit(
        &mut self,
        params: &DispersionParams,
        i: u32,
        base: DVec2,
        pointer: Option<DVec2>,
        scale: f64,
        t: f64,
    ) -> bool {
        let Some(pointer) = pointer else {
            return false;
        };
        if self.contains(i) {
            return false;
        }
        let dist = base.distance(pointer);
        // Zero distance has no radial direction.
        if !(dist < params.hit_radius * scale && dist > 0.0) {
            return false;
        }
        let rand = hit_rand(i, t);
        if rand >= params.hit_chance {
            return false;
        }
        let velocity = impulse(params, i, base, pointer, dist, scale, rand);
        self.particles.insert(
            i,
            Particle {
                offset: DVec2::ZERO,
                velocity,
            },
        );
        true
    }

    /// Integrate point `i` if it is active and return its offset for this
    /// frame. Settled particles are removed and contribute no offset.
    pub fn step(&mut self, params: &DispersionParams, i: u32) -> DVec2 {
        let Some(p) = self.particles.get_mut(&i) else {
            return DVec2::ZERO;
        };
        if p.integrate(params) {
            self.particles.remove(&i);
            DVec2::ZERO
        } else {
            p.offset
        }
    }
}
