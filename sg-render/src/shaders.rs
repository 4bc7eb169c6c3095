//! GLSL programs bundled with the crate.

use std::sync::Arc;

use crate::{
    abs::{ShaderBackend, ShaderProgram, build},
    diagnostic::Diagnostic,
};

/// Vertex stage of the flat shaded solid program.
pub const SOLID_VERT: &str = include_str!("shaders/solid/vert.glsl");
/// Fragment stage of the flat shaded solid program.
pub const SOLID_FRAG: &str = include_str!("shaders/solid/frag.glsl");

/// Attribute location of the vertex position.
pub const POSITION_LOCATION: u32 = 0;
/// Attribute location of the face normal.
pub const NORMAL_LOCATION: u32 = 1;

/// Builds the program that draws a generated solid mesh with flat lighting.
///
/// Expects `u_projection`, `u_view`, `u_model` and `u_color` uniforms.
pub fn solid_program<B: ShaderBackend>(gl: &Arc<B>) -> Result<ShaderProgram<B>, Diagnostic> {
    build(gl, SOLID_VERT, SOLID_FRAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::mock::MockBackend;

    #[test]
    fn test_solid_program_builds() {
        let gl = Arc::new(MockBackend::default());
        let program = solid_program(&gl).unwrap();
        assert_eq!(gl.link_calls(), 1);
        assert_eq!(gl.live_programs(), 1);
        drop(program);
    }

    #[test]
    fn test_solid_program_interface() {
        for uniform in ["u_projection", "u_view", "u_model"] {
            assert!(SOLID_VERT.contains(uniform), "{uniform}");
        }
        assert!(SOLID_FRAG.contains("u_color"));
        assert!(SOLID_VERT.contains("layout(location = 0) in vec3 a_position"));
        assert!(SOLID_VERT.contains("layout(location = 1) in vec3 a_normal"));
    }
}
