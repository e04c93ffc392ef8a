//! # Tinsel - chaos-to-tree particle formation
//!
//! Tens of thousands of particles drift between two configurations: a
//! diffuse spherical "chaos" cloud and a cone-shaped "formed" tree dressed
//! with ornaments. A single [`Mode`] toggle decides which one they head for;
//! a smoothed progress scalar per group carries them there.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinsel::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_config(SceneConfig::default())
//!         .run()
//! }
//! ```
//!
//! ## Populations
//!
//! | Class | Path | Count (default) | Notes |
//! |-------|------|-----------------|-------|
//! | [`ParticleClass::Foliage`] | GPU point cloud | 15 000 | interpolation, jitter and sparkle in WGSL |
//! | [`ParticleClass::Ball`] | CPU instanced mesh | 300 | drift, tumble, vanish on disassembly |
//! | [`ParticleClass::Box`] | CPU instanced mesh | 120 | delayed arrival, slower tumble |
//! | [`ParticleClass::Light`] | CPU instanced mesh | 400 | early arrival, constant twinkle |
//!
//! ## Driving a scene without a window
//!
//! [`Scene`] has no GPU dependency, so it can be stepped directly:
//!
//! ```ignore
//! let mut scene = Scene::new(&SceneConfig::default());
//! scene.set_mode(Mode::Formed);
//! scene.frame(elapsed, delta);
//! let needles = scene.foliage().params();     // two scalars for the shader
//! let balls = scene.ornaments().populations(); // per-instance matrices
//! ```

pub mod config;
mod error;
pub mod field;
pub mod foliage;
mod gpu;
pub mod ornaments;
pub mod particle;
pub mod progress;
mod scene;
pub mod shader;
pub mod spawn;
pub mod time;
mod viewer;

pub use config::{PopulationConfig, Rates, SceneConfig, SyncPolicy};
pub use error::{ConfigError, GpuError, ViewerError};
pub use field::{ChaosShell, FieldLayout, TreeShape};
pub use foliage::{FoliageAnimator, FoliageParams};
pub use glam::{Mat4, Quat, Vec3};
pub use ornaments::{InstancePopulation, InstanceRaw, OrnamentAnimator};
pub use particle::{ParticleClass, ParticleRecord};
pub use progress::{Arrival, Mode, ProgressController};
pub use scene::Scene;
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tinsel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SceneConfig, SyncPolicy};
    pub use crate::error::{ConfigError, ViewerError};
    pub use crate::field::{generate_field, FieldLayout, TreeShape};
    pub use crate::particle::{ParticleClass, ParticleRecord};
    pub use crate::progress::{Mode, ProgressController};
    pub use crate::scene::Scene;
    pub use crate::time::FrameClock;
    pub use crate::viewer::Viewer;
    pub use crate::Vec3;
}
