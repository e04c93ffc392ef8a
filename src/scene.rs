//! The animated scene: mode, foliage and ornaments behind one frame callback.

use crate::config::{SceneConfig, SyncPolicy};
use crate::field::generate_field;
use crate::foliage::FoliageAnimator;
use crate::ornaments::OrnamentAnimator;
use crate::particle::{ParticleClass, ParticleRecord};
use crate::progress::{Mode, ProgressController};

/// Owns every animated population for the lifetime of the mounted scene.
pub struct Scene {
    mode: Mode,
    foliage: FoliageAnimator,
    ornaments: OrnamentAnimator,
    /// Present only under [`SyncPolicy::Shared`].
    shared: Option<ProgressController>,
}

impl Scene {
    /// Generate every population described by `config`.
    pub fn new(config: &SceneConfig) -> Self {
        let populate = |class: ParticleClass| -> Vec<ParticleRecord> {
            generate_field(config.population(class).count, class, &config.layout(class))
        };

        Self::from_records(
            config,
            populate(ParticleClass::Foliage),
            populate(ParticleClass::Ball),
            populate(ParticleClass::Box),
            populate(ParticleClass::Light),
        )
    }

    /// Build from pre-generated tables.
    pub fn from_records(
        config: &SceneConfig,
        foliage: Vec<ParticleRecord>,
        balls: Vec<ParticleRecord>,
        boxes: Vec<ParticleRecord>,
        lights: Vec<ParticleRecord>,
    ) -> Self {
        let shared = match config.sync {
            SyncPolicy::Independent => None,
            SyncPolicy::Shared => Some(ProgressController::new(config.rates.foliage)),
        };

        Self {
            mode: Mode::default(),
            foliage: FoliageAnimator::new(foliage, config.rates.foliage),
            ornaments: OrnamentAnimator::new(balls, boxes, lights, config.rates.ornaments),
            shared,
        }
    }

    /// Per-frame callback from the host render loop.
    pub fn frame(&mut self, elapsed: f32, delta: f32) {
        match self.shared.as_mut() {
            Some(controller) => {
                let progress = controller.advance(delta, self.mode);
                self.foliage.update(progress, elapsed);
                self.ornaments.set_mode(self.mode);
                self.ornaments.update(progress, elapsed);
            }
            None => {
                self.foliage.frame(self.mode, elapsed, delta);
                self.ornaments.frame(self.mode, elapsed, delta);
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::info!("mode -> {:?}", mode);
            self.mode = mode;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn foliage(&self) -> &FoliageAnimator {
        &self.foliage
    }

    pub fn ornaments(&self) -> &OrnamentAnimator {
        &self.ornaments
    }

    pub fn ornaments_mut(&mut self) -> &mut OrnamentAnimator {
        &mut self.ornaments
    }
}
