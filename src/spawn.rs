//! Random sampling helpers for particle placement.
//!
//! [`Sampler`] wraps any [`Rng`] and exposes the handful of geometric
//! distributions the field generator needs, so the generator reads as
//! placement rules rather than RNG plumbing.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Geometric sampling over a borrowed random source.
pub struct Sampler<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Sampler<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// Uniformly distributed unit vector.
    ///
    /// Uses the inverse CDF: `θ = 2πu`, `φ = acos(2v − 1)`, so directions do
    /// not bunch at the poles.
    pub fn direction(&mut self) -> Vec3 {
        let theta = self.angle();
        let phi = (2.0 * self.random() - 1.0).clamp(-1.0, 1.0).acos();
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.cos(),
            phi.sin() * theta.sin(),
        )
    }

    /// Random point on a spherical shell with radius in `[inner, outer)`,
    /// centered at `center`.
    pub fn on_shell(&mut self, center: Vec3, inner: f32, outer: f32) -> Vec3 {
        let r = self.random_range(inner, outer);
        center + self.direction() * r
    }

    /// Random point inside a disk of the given radius, area-uniform.
    pub fn in_disk(&mut self, radius: f32) -> (f32, f32) {
        let theta = self.angle();
        let r = radius * self.random().sqrt();
        (r * theta.cos(), r * theta.sin())
    }

    /// Three independent angles in `[0, 2π)`.
    pub fn euler(&mut self) -> Vec3 {
        Vec3::new(self.angle(), self.angle(), self.angle())
    }

    /// Pick one entry of a non-empty palette.
    pub fn pick(&mut self, palette: &[[f32; 3]]) -> Vec3 {
        if palette.is_empty() {
            return Vec3::ONE;
        }
        let i = self.rng.gen_range(0..palette.len());
        Vec3::from_array(palette[i])
    }
}
