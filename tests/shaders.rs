//! WGSL validation for both render passes.

use tinsel::shader::{FOLIAGE_SOURCE, ORNAMENT_SOURCE};

/// Validates WGSL code using naga.
fn validate_wgsl(code: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(code).map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(())
}

#[test]
fn test_foliage_shader_validates() {
    if let Err(e) = validate_wgsl(FOLIAGE_SOURCE) {
        panic!("foliage shader: {}", e);
    }
}

#[test]
fn test_ornament_shader_validates() {
    if let Err(e) = validate_wgsl(ORNAMENT_SOURCE) {
        panic!("ornament shader: {}", e);
    }
}

#[test]
fn test_shaders_share_camera_binding() {
    for source in [FOLIAGE_SOURCE, ORNAMENT_SOURCE] {
        assert!(source.contains("@group(0) @binding(0)"));
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
    }
}
