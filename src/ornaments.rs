//! Host-animated ornaments: balls, boxes and lights.
//!
//! These populations are small (hundreds), so every instance's transform is
//! recomputed on the CPU each frame from its static record and the current
//! progress. Nothing but the progress scalar carries over between frames.
//! Instance storage is allocated once and overwritten in place.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::TAU;

use crate::particle::{ParticleClass, ParticleRecord};
use crate::progress::{smoothstep, Arrival, Mode, ProgressController};

/// Ornament drift is switched off above this local progress.
const FLOAT_CUTOFF: f32 = 0.98;
const FLOAT_AMPLITUDE: f32 = 0.5;
/// Tumble rate in rad/s for a particle of weight 1.
const SPIN_RATE: f32 = 1.2;
/// Balls shrink away below this progress while dispersing.
const VANISH_THRESHOLD: f32 = 0.05;
const TWINKLE_FREQUENCY: f32 = 3.0;

/// Per-instance data read by the ornament vertex stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    /// 0 for lit ornaments, 1 for self-lit lights.
    pub emissive: f32,
}

impl InstanceRaw {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// One instanced population and its instance storage.
pub struct InstancePopulation {
    class: ParticleClass,
    arrival: Arrival,
    records: Vec<ParticleRecord>,
    instances: Vec<InstanceRaw>,
    dirty: bool,
    revision: u64,
}

impl InstancePopulation {
    pub fn new(class: ParticleClass, records: Vec<ParticleRecord>) -> Self {
        let emissive = if class == ParticleClass::Light { 1.0 } else { 0.0 };
        // Color is written here once; per-frame updates only touch `model`.
        let instances = records
            .iter()
            .map(|r| InstanceRaw {
                model: Mat4::from_translation(r.chaos_position).to_cols_array_2d(),
                color: r.color.to_array(),
                emissive,
            })
            .collect();

        Self {
            class,
            arrival: Arrival::for_class(class),
            records,
            instances,
            dirty: true,
            revision: 0,
        }
    }

    /// Recompute every instance transform, then flag the storage once.
    pub fn update(&mut self, progress: f32, elapsed: f32, mode: Mode) {
        let local = self.arrival.apply(progress);
        for (record, instance) in self.records.iter().zip(self.instances.iter_mut()) {
            instance.model = instance_transform(self.class, record, local, elapsed, mode)
                .to_cols_array_2d();
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Returns whether the storage changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of times the storage has been flagged since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn class(&self) -> ParticleClass {
        self.class
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// World transform of one ornament at local progress `p`.
pub fn instance_transform(
    class: ParticleClass,
    record: &ParticleRecord,
    p: f32,
    elapsed: f32,
    mode: Mode,
) -> Mat4 {
    let phase = record.random_phase;
    let mut position = record.chaos_position.lerp(record.target_position, p);
    let target = Quat::from_euler(
        EulerRot::XYZ,
        record.target_orientation.x,
        record.target_orientation.y,
        record.target_orientation.z,
    );

    let (rotation, scale) = match class {
        ParticleClass::Light => {
            let twinkle = 0.75 + 0.35 * (elapsed * TWINKLE_FREQUENCY + phase * TAU).sin();
            (Quat::IDENTITY, record.scale * twinkle)
        }
        ParticleClass::Ball | ParticleClass::Box | ParticleClass::Foliage => {
            if p < FLOAT_CUTOFF {
                let drift = Vec3::new(
                    (elapsed * 0.8 + phase * TAU).sin(),
                    (elapsed * 0.6 + phase * 17.0).cos(),
                    0.0,
                );
                position += drift * FLOAT_AMPLITUDE * (1.0 - p);
            }

            let rotation = target * tumble(record, p, elapsed);

            let mut scale = record.scale * (0.75 + 0.5 * phase);
            if class == ParticleClass::Ball && mode == Mode::Chaos {
                scale *= smoothstep(0.0, VANISH_THRESHOLD, p);
            }
            (rotation, scale)
        }
    };

    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
}

/// Offset from the resting orientation. The tumble angle is scaled by
/// `1 - p`, so the spin rate falls off linearly and vanishes at `p = 1`
/// while staying continuous in time.
fn tumble(record: &ParticleRecord, p: f32, elapsed: f32) -> Quat {
    let angle = (elapsed * SPIN_RATE / record.weight + record.random_phase * TAU) * (1.0 - p);
    Quat::from_euler(EulerRot::XYZ, angle, angle * 0.7, 0.0)
}

/// Owns the three ornament populations and their shared progress.
pub struct OrnamentAnimator {
    populations: Vec<InstancePopulation>,
    controller: ProgressController,
    mode: Mode,
    /// Last progress applied through [`update`](Self::update).
    progress: f32,
}

impl OrnamentAnimator {
    pub fn new(
        balls: Vec<ParticleRecord>,
        boxes: Vec<ParticleRecord>,
        lights: Vec<ParticleRecord>,
        rate: f32,
    ) -> Self {
        Self {
            populations: vec![
                InstancePopulation::new(ParticleClass::Ball, balls),
                InstancePopulation::new(ParticleClass::Box, boxes),
                InstancePopulation::new(ParticleClass::Light, lights),
            ],
            controller: ProgressController::new(rate),
            mode: Mode::default(),
            progress: 0.0,
        }
    }

    /// Per-frame callback with this group's own smoothing.
    pub fn frame(&mut self, mode: Mode, elapsed: f32, delta: f32) {
        self.mode = mode;
        let progress = self.controller.advance(delta, mode);
        self.update(progress, elapsed);
    }

    /// Recompute all three populations at `progress`.
    pub fn update(&mut self, progress: f32, elapsed: f32) {
        let progress = progress.clamp(0.0, 1.0);
        self.progress = progress;
        for population in &mut self.populations {
            population.update(progress, elapsed, self.mode);
        }
    }

    /// Mode used for mode-dependent effects when driven through [`update`](Self::update).
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Progress the populations were last recomputed at, whichever
    /// controller produced it.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn populations(&self) -> &[InstancePopulation] {
        &self.populations
    }

    pub fn populations_mut(&mut self) -> &mut [InstancePopulation] {
        &mut self.populations
    }

    pub fn population(&self, class: ParticleClass) -> Option<&InstancePopulation> {
        self.populations.iter().find(|p| p.class == class)
    }
}
