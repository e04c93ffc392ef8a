//! Particle field generation.
//!
//! Produces the static [`ParticleRecord`] table for one population: where each
//! particle sits in the chaos cloud, where it lands on the tree, how it is
//! oriented once landed, and its color, size and phase.
//!
//! # Example
//!
//! ```ignore
//! use tinsel::field::{generate_field, FieldLayout};
//! use tinsel::ParticleClass;
//!
//! let layout = FieldLayout::default();
//! let needles = generate_field(15_000, ParticleClass::Foliage, &layout);
//! assert_eq!(needles.len(), 15_000);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::particle::{ConePlacement, ParticleClass, ParticleRecord};
use crate::spawn::Sampler;

/// Dimensions of the tree cone. Base at `y = 0`, apex at `y = height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeShape {
    pub height: f32,
    pub radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 12.0,
            radius: 4.5,
        }
    }
}

impl TreeShape {
    /// Lateral radius of the cone at height `y`.
    #[inline]
    pub fn radius_at(&self, y: f32) -> f32 {
        (1.0 - y / self.height).max(0.0) * self.radius
    }

    /// True if `p` lies inside the cone (with a small tolerance).
    pub fn contains(&self, p: Vec3) -> bool {
        const EPS: f32 = 1e-3;
        let lateral = (p.x * p.x + p.z * p.z).sqrt();
        p.y >= -EPS && p.y <= self.height + EPS && lateral <= self.radius_at(p.y) + EPS
    }
}

/// Spherical shell the chaos cloud is sampled on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaosShell {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Vertical offset of the shell center above the tree base.
    pub lift: f32,
}

impl ChaosShell {
    pub fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.lift, 0.0)
    }

    /// Default shell for a class: wide for needles, tighter for ornaments.
    pub fn for_class(class: ParticleClass) -> Self {
        let (inner_radius, outer_radius) = match class {
            ParticleClass::Foliage => (15.0, 25.0),
            ParticleClass::Ball | ParticleClass::Box => (10.0, 20.0),
            ParticleClass::Light => (12.0, 22.0),
        };
        Self {
            inner_radius,
            outer_radius,
            lift: 6.0,
        }
    }
}

/// Everything the generator needs besides the class and count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLayout {
    pub tree: TreeShape,
    pub chaos: ChaosShell,
}

impl FieldLayout {
    pub fn for_class(class: ParticleClass) -> Self {
        Self {
            tree: TreeShape::default(),
            chaos: ChaosShell::for_class(class),
        }
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::for_class(ParticleClass::Foliage)
    }
}

/// Generate `count` records for `class` from an explicit random source.
///
/// `count == 0` yields an empty table.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    class: ParticleClass,
    layout: &FieldLayout,
    rng: &mut R,
) -> Vec<ParticleRecord> {
    let profile = class.profile();
    let mut sampler = Sampler::new(rng);

    (0..count)
        .map(|_| {
            let chaos_position = sampler.on_shell(
                layout.chaos.center(),
                layout.chaos.inner_radius,
                layout.chaos.outer_radius,
            );
            let target_position = sample_target(&mut sampler, &layout.tree, profile.placement);

            ParticleRecord {
                chaos_position,
                target_position,
                target_orientation: sampler.euler(),
                color: sampler.pick(profile.palette),
                scale: profile.scale,
                weight: profile.weight,
                random_phase: sampler.random(),
            }
        })
        .collect()
}

/// Generate `count` records for `class` with a fresh entropy-seeded source.
///
/// Each call draws independently; two calls never agree.
pub fn generate_field(count: usize, class: ParticleClass, layout: &FieldLayout) -> Vec<ParticleRecord> {
    let mut rng = SmallRng::from_entropy();
    let records = generate(count, class, layout, &mut rng);
    log::info!("generated {} {} particles", records.len(), class.name());
    records
}

fn sample_target<R: Rng + ?Sized>(
    sampler: &mut Sampler<'_, R>,
    tree: &TreeShape,
    placement: ConePlacement,
) -> Vec3 {
    let h = sampler.random();
    let y = h * tree.height;
    let lateral = (1.0 - h) * tree.radius;

    match placement {
        ConePlacement::Fill => {
            let (x, z) = sampler.in_disk(lateral);
            Vec3::new(x, y, z)
        }
        ConePlacement::Spiral {
            turns,
            jitter,
            surface,
        } => {
            let angle = h * turns * TAU + sampler.random_range(-jitter, jitter);
            let r = lateral * surface;
            Vec3::new(r * angle.cos(), y, r * angle.sin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let layout = FieldLayout::default();
        assert!(generate(0, ParticleClass::Ball, &layout, &mut rng).is_empty());
    }

    #[test]
    fn test_radius_at_tapers_to_apex() {
        let tree = TreeShape::default();
        assert_eq!(tree.radius_at(0.0), tree.radius);
        assert_eq!(tree.radius_at(tree.height), 0.0);
        assert!((tree.radius_at(tree.height / 2.0) - tree.radius / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_foliage_fill_not_center_clustered() {
        // With sqrt radius scaling, half the points of a disk lie outside
        // radius R/sqrt(2) at their own height.
        let mut rng = StdRng::seed_from_u64(5);
        let layout = FieldLayout::default();
        let recs = generate(10_000, ParticleClass::Foliage, &layout, &mut rng);
        let outer = recs
            .iter()
            .filter(|r| {
                let p = r.target_position;
                let lateral = (p.x * p.x + p.z * p.z).sqrt();
                lateral > layout.tree.radius_at(p.y) / 2f32.sqrt()
            })
            .count();
        let frac = outer as f32 / recs.len() as f32;
        assert!((frac - 0.5).abs() < 0.03, "outer fraction {}", frac);
    }

    #[test]
    fn test_ornaments_hug_surface() {
        let mut rng = StdRng::seed_from_u64(9);
        let layout = FieldLayout::for_class(ParticleClass::Light);
        for r in generate(500, ParticleClass::Light, &layout, &mut rng) {
            let p = r.target_position;
            let lateral = (p.x * p.x + p.z * p.z).sqrt();
            let expected = layout.tree.radius_at(p.y) * 0.97;
            assert!((lateral - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_class_constants_applied() {
        let mut rng = StdRng::seed_from_u64(2);
        let layout = FieldLayout::for_class(ParticleClass::Box);
        for r in generate(50, ParticleClass::Box, &layout, &mut rng) {
            assert_eq!(r.scale, ParticleClass::Box.profile().scale);
            assert_eq!(r.weight, ParticleClass::Box.profile().weight);
            assert!(r.random_phase >= 0.0 && r.random_phase < 1.0);
        }
    }
}
