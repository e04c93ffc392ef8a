//! Particle classes and the immutable per-particle record.
//!
//! Every particle in the scene belongs to exactly one [`ParticleClass`]. The
//! class decides how its [`ParticleRecord`] is sampled (see [`crate::field`])
//! and how it is animated each frame (see [`crate::foliage`] and
//! [`crate::ornaments`]).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Visual population a particle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleClass {
    /// Fine needles rendered as a GPU point cloud.
    Foliage,
    /// Spherical ornaments.
    Ball,
    /// Gift-box ornaments. Heavier and later to arrive.
    Box,
    /// Small emissive point-lights. Quick to arrive, always twinkling.
    Light,
}

impl ParticleClass {
    /// All classes, foliage first.
    pub const ALL: [ParticleClass; 4] = [
        ParticleClass::Foliage,
        ParticleClass::Ball,
        ParticleClass::Box,
        ParticleClass::Light,
    ];

    /// The three host-animated ornament classes.
    pub const ORNAMENTS: [ParticleClass; 3] =
        [ParticleClass::Ball, ParticleClass::Box, ParticleClass::Light];

    /// Static look and placement policy for this class.
    pub fn profile(&self) -> &'static ClassProfile {
        match self {
            ParticleClass::Foliage => &FOLIAGE,
            ParticleClass::Ball => &BALL,
            ParticleClass::Box => &BOX,
            ParticleClass::Light => &LIGHT,
        }
    }

    /// Lower-case name, used in logs and config keys.
    pub fn name(&self) -> &'static str {
        match self {
            ParticleClass::Foliage => "foliage",
            ParticleClass::Ball => "balls",
            ParticleClass::Box => "boxes",
            ParticleClass::Light => "lights",
        }
    }
}

/// How a class places its particles on the tree cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConePlacement {
    /// Random angle, `sqrt`-scaled radius: area-uniform fill of each cross-section.
    Fill,
    /// Spiral angle by height plus jitter, radius a fixed fraction of the surface.
    Spiral {
        /// Full turns from base to apex.
        turns: f32,
        /// Maximum angular jitter in radians (either side).
        jitter: f32,
        /// Fraction of the lateral radius at that height, in `(0, 1]`.
        surface: f32,
    },
}

/// Per-class constants that never change during a session.
#[derive(Clone, Copy, Debug)]
pub struct ClassProfile {
    /// Baseline size of one particle in world units.
    pub scale: f32,
    /// Physical weighting. Heavier classes spin slower.
    pub weight: f32,
    /// Colors a particle may be drawn from, linear RGB.
    pub palette: &'static [[f32; 3]],
    /// Placement policy on the tree cone.
    pub placement: ConePlacement,
}

static FOLIAGE: ClassProfile = ClassProfile {
    scale: 1.0,
    weight: 1.0,
    palette: &[
        [0.02, 0.28, 0.10],
        [0.04, 0.36, 0.14],
        [0.01, 0.22, 0.12],
    ],
    placement: ConePlacement::Fill,
};

static BALL: ClassProfile = ClassProfile {
    scale: 0.22,
    weight: 1.0,
    palette: &[
        [1.00, 0.78, 0.25], // gold
        [0.75, 0.05, 0.08], // crimson
        [0.85, 0.85, 0.90], // silver
        [0.95, 0.85, 0.65], // champagne
        [0.45, 0.02, 0.05], // deep red
    ],
    placement: ConePlacement::Spiral {
        turns: 5.0,
        jitter: 0.35,
        surface: 0.92,
    },
};

static BOX: ClassProfile = ClassProfile {
    scale: 0.26,
    weight: 1.6,
    palette: &[
        [0.80, 0.06, 0.08],
        [1.00, 0.78, 0.25],
        [0.02, 0.45, 0.22],
        [0.95, 0.95, 0.92],
    ],
    placement: ConePlacement::Spiral {
        turns: 3.0,
        jitter: 0.35,
        surface: 0.85,
    },
};

static LIGHT: ClassProfile = ClassProfile {
    scale: 0.07,
    weight: 0.5,
    palette: &[
        [1.00, 0.90, 0.70],
        [1.00, 0.84, 0.58],
        [1.00, 0.95, 0.82],
    ],
    placement: ConePlacement::Spiral {
        turns: 9.0,
        jitter: 0.35,
        surface: 0.97,
    },
};

/// Static attributes of one particle.
///
/// Generated once by [`crate::field::generate`] and never mutated. Only the
/// interpolation progress between `chaos_position` and `target_position`
/// changes over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleRecord {
    /// Position in the dispersed configuration.
    pub chaos_position: Vec3,
    /// Position in the formed tree configuration.
    pub target_position: Vec3,
    /// Euler angles (XYZ) held at full formation.
    pub target_orientation: Vec3,
    /// Linear RGB color from the class palette.
    pub color: Vec3,
    /// Baseline size from the class profile.
    pub scale: f32,
    /// Physical weighting from the class profile.
    pub weight: f32,
    /// Per-particle phase in `[0, 1)` for noise, twinkle and size variance.
    pub random_phase: f32,
}

/// Per-vertex attributes uploaded once for the foliage point cloud.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FoliageVertex {
    pub chaos: [f32; 3],
    pub phase: f32,
    pub target: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

impl From<&ParticleRecord> for FoliageVertex {
    fn from(r: &ParticleRecord) -> Self {
        Self {
            chaos: r.chaos_position.to_array(),
            phase: r.random_phase,
            target: r.target_position.to_array(),
            _pad: 0.0,
            color: r.color.to_array(),
            _pad1: 0.0,
        }
    }
}
