//! Host side of the foliage point cloud.
//!
//! The needles are far too many to transform on the CPU every frame. Their
//! static attributes are packed into
//! [`FoliageVertex`](crate::particle::FoliageVertex)es and uploaded once;
//! afterwards the host only pushes two scalars per frame ([`FoliageParams`])
//! and `foliage.wgsl` does the interpolation, jitter and shading.

use glam::Vec3;

use crate::particle::ParticleRecord;
use crate::progress::{ease_out_cubic, Mode, ProgressController};

/// Progress above which needle jitter drops to its resting amplitude.
pub const SETTLE_THRESHOLD: f32 = 0.9;
/// Jitter amplitude once settled.
pub const SETTLED_JITTER: f32 = 0.02;

/// The two scalars the shading stage needs each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FoliageParams {
    pub progress: f32,
    pub time: f32,
}

/// Owns the foliage population and its progress.
pub struct FoliageAnimator {
    records: Vec<ParticleRecord>,
    controller: ProgressController,
    params: FoliageParams,
}

impl FoliageAnimator {
    /// Take ownership of a generated foliage table. `rate` is the smoothing
    /// constant of this group's own controller.
    pub fn new(records: Vec<ParticleRecord>, rate: f32) -> Self {
        Self {
            records,
            controller: ProgressController::new(rate),
            params: FoliageParams::default(),
        }
    }

    /// Per-frame callback with this group's own smoothing.
    pub fn frame(&mut self, mode: Mode, elapsed: f32, delta: f32) {
        let progress = self.controller.advance(delta, mode);
        self.update(progress, elapsed);
    }

    /// Set the scalars pushed to the shading stage. Vertex data is untouched.
    pub fn update(&mut self, progress: f32, elapsed: f32) {
        self.params = FoliageParams {
            progress: progress.clamp(0.0, 1.0),
            time: elapsed,
        };
    }

    #[inline]
    pub fn params(&self) -> FoliageParams {
        self.params
    }

    /// Static table; the GPU pass packs it into vertices once at startup.
    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Needle jitter amplitude for a given raw progress.
pub fn jitter_amplitude(progress: f32) -> f32 {
    if progress >= SETTLE_THRESHOLD {
        SETTLED_JITTER
    } else {
        0.6 * (1.0 - ease_out_cubic(progress)) + 0.04
    }
}

/// World position the vertex stage computes for `record`.
///
/// Mirrors `vs_main` in `foliage.wgsl`; keep the two in step.
pub fn shade_position(record: &ParticleRecord, progress: f32, time: f32) -> Vec3 {
    let eased = ease_out_cubic(progress);
    let base = record.chaos_position.lerp(record.target_position, eased);
    let seed = record.random_phase * 100.0;
    let wobble = Vec3::new(
        (time * 1.3 + seed).sin(),
        (time * 1.7 + seed * 1.3).sin(),
        (time * 1.1 + seed * 0.7).sin(),
    );
    base + wobble * jitter_amplitude(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate, FieldLayout};
    use crate::particle::ParticleClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn animator(n: usize) -> FoliageAnimator {
        let mut rng = StdRng::seed_from_u64(42);
        let recs = generate(n, ParticleClass::Foliage, &FieldLayout::default(), &mut rng);
        FoliageAnimator::new(recs, 1.5)
    }

    #[test]
    fn test_update_leaves_records_alone() {
        let mut a = animator(64);
        let before = a.records().to_vec();
        a.update(0.7, 3.0);
        let after = a.records().to_vec();
        assert_eq!(before, after);
        assert_eq!(a.params(), FoliageParams { progress: 0.7, time: 3.0 });
    }

    #[test]
    fn test_frame_converges_to_formed() {
        let mut a = animator(8);
        for i in 0..600 {
            a.frame(Mode::Formed, i as f32 / 60.0, 1.0 / 60.0);
        }
        assert!(a.params().progress > 0.99);
    }

    #[test]
    fn test_jitter_drops_once_settled() {
        assert!(jitter_amplitude(0.0) > 0.6);
        assert!(jitter_amplitude(0.89) > SETTLED_JITTER);
        assert_eq!(jitter_amplitude(0.9), SETTLED_JITTER);
        assert_eq!(jitter_amplitude(1.0), SETTLED_JITTER);
    }

    #[test]
    fn test_shade_position_near_target_when_formed() {
        let a = animator(256);
        for r in a.records() {
            let p = shade_position(r, 1.0, 12.5);
            assert!((p - r.target_position).length() <= SETTLED_JITTER * 3f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn test_shade_position_near_chaos_when_dispersed() {
        let a = animator(256);
        for r in a.records() {
            let p = shade_position(r, 0.0, 0.0);
            assert!((p - r.chaos_position).length() <= jitter_amplitude(0.0) * 3f32.sqrt() + 1e-4);
        }
    }
}
