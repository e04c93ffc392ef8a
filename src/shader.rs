//! WGSL sources for the two render passes.
//!
//! Both shaders read the same `CameraUniforms` block at `@group(0) @binding(0)`.

/// Foliage point cloud: interpolation, jitter, round dots and sparkle.
pub const FOLIAGE_SOURCE: &str = include_str!("gpu/shaders/foliage.wgsl");

/// Instanced, lit ornaments.
pub const ORNAMENT_SOURCE: &str = include_str!("gpu/shaders/ornament.wgsl");
