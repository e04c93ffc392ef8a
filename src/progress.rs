//! Formation progress: the discrete mode, the smoothed scalar chasing it, and
//! the per-class remaps applied on top.

use serde::{Deserialize, Serialize};

use crate::particle::ParticleClass;

/// Discrete state the user toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Particles disperse into the chaos cloud.
    #[default]
    Chaos,
    /// Particles assemble into the tree.
    Formed,
}

impl Mode {
    /// Progress value this mode converges to.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Mode::Chaos => 0.0,
            Mode::Formed => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Chaos => Mode::Formed,
            Mode::Formed => Mode::Chaos,
        }
    }
}

/// Exponentially smoothed progress toward the current mode's target.
///
/// Each call to [`advance`](Self::advance) moves `progress` a fraction
/// `1 - e^(-rate·dt)` of the remaining distance, so it converges without
/// overshoot and a zero `dt` leaves it untouched.
#[derive(Clone, Copy, Debug)]
pub struct ProgressController {
    progress: f32,
    rate: f32,
}

impl ProgressController {
    /// Controller starting at `progress = 0` (chaos) with rate constant `rate`.
    pub fn new(rate: f32) -> Self {
        Self::starting_at(0.0, rate)
    }

    pub fn starting_at(progress: f32, rate: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            rate: rate.max(0.0),
        }
    }

    /// Integrate one frame of `dt` seconds toward `mode` and return the new progress.
    ///
    /// `dt` must be non-negative.
    pub fn advance(&mut self, dt: f32, mode: Mode) -> f32 {
        let target = mode.target();
        let blend = 1.0 - (-self.rate * dt).exp();
        self.progress = (self.progress + (target - self.progress) * blend).clamp(0.0, 1.0);
        self.progress
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

/// Static remap of shared progress into a class's local progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arrival {
    /// Local progress equals shared progress.
    Direct,
    /// Nothing happens until `onset`, then the rest of the range is stretched
    /// over `[0, 1]`: `(p - onset) / (1 - onset)`. For boxes (onset 0.1) that
    /// is a stretch of 1/0.9, so full shared progress still lands on exactly 1.
    Delayed { onset: f32 },
    /// Local progress runs `factor` times faster and saturates early.
    Accelerated { factor: f32 },
}

impl Arrival {
    pub fn for_class(class: ParticleClass) -> Self {
        match class {
            ParticleClass::Foliage | ParticleClass::Ball => Arrival::Direct,
            ParticleClass::Box => Arrival::Delayed { onset: 0.1 },
            ParticleClass::Light => Arrival::Accelerated { factor: 1.2 },
        }
    }

    /// Map shared progress to local progress, clamped to `[0, 1]`.
    pub fn apply(&self, progress: f32) -> f32 {
        let p = match *self {
            Arrival::Direct => progress,
            Arrival::Delayed { onset } => (progress - onset) / (1.0 - onset),
            Arrival::Accelerated { factor } => progress * factor,
        };
        p.clamp(0.0, 1.0)
    }
}

/// Fast-start, slow-finish curve: `1 - (1 - x)^3`.
#[inline]
pub fn ease_out_cubic(x: f32) -> f32 {
    let inv = 1.0 - x.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Hermite smoothstep between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
