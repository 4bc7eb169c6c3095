//! Shader stages and programs
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs which own compiled stages and
//! linked programs of a [`ShaderBackend`], and the [`compile_stage`], [`link_program`] and
//! [`build`] functions that create them. Every failure is returned as a [`Diagnostic`].
//!
//! A linked [`ShaderProgram`] can also be bound and have its matrix and color uniforms set through
//! the [`Uniform`] trait.

use std::{fmt, sync::Arc};

use glam::{Mat4, Vec4};
use sg_core::Transform;

use super::ShaderBackend;
use crate::diagnostic::Diagnostic;

/// The pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    /// Returns the matching OpenGL shader type enum.
    pub fn gl_enum(self) -> u32 {
        match self {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A successfully compiled shader stage. The backend object is deleted on drop.
pub struct Shader<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: B::Shader,
    kind: StageKind,
}

impl<B: ShaderBackend> Shader<B> {
    /// Compiles a new shader stage from the given source code.
    pub fn new(gl: &Arc<B>, kind: StageKind, source: &str) -> Result<Self, Diagnostic> {
        let shader = gl.create_shader(kind).map_err(|e| {
            let diagnostic = Diagnostic::compile(kind, source, e);
            log::error!("{diagnostic}");
            diagnostic
        })?;

        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.compile_status(shader) {
            let info_log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            let diagnostic = Diagnostic::compile(kind, source, info_log);
            log::error!("{diagnostic}");
            return Err(diagnostic);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
            kind,
        })
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn id(&self) -> B::Shader {
        self.id
    }
}

impl<B: ShaderBackend> Drop for Shader<B> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// A linked shader program. The backend object is deleted on drop.
pub struct ShaderProgram<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: B::Program,
}

impl<B: ShaderBackend> ShaderProgram<B> {
    /// Links a new shader program from the given shaders.
    ///
    /// The shaders are detached again after a successful link. On failure the program object is
    /// deleted and the link log returned.
    pub fn new(gl: &Arc<B>, shaders: &[&Shader<B>]) -> Result<Self, Diagnostic> {
        let program = gl.create_program().map_err(|e| {
            let diagnostic = Diagnostic::link(e);
            log::error!("{diagnostic}");
            diagnostic
        })?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        if !gl.link_status(program) {
            let info_log = gl.program_info_log(program);
            gl.delete_program(program);
            let diagnostic = Diagnostic::link(info_log);
            log::error!("{diagnostic}");
            return Err(diagnostic);
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
        })
    }

    pub fn id(&self) -> B::Program {
        self.id
    }
}

impl<B: ShaderBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

/// Compiles one shader stage.
pub fn compile_stage<B: ShaderBackend>(
    gl: &Arc<B>,
    source: &str,
    kind: StageKind,
) -> Result<Shader<B>, Diagnostic> {
    Shader::new(gl, kind, source)
}

/// Links a vertex and a fragment stage into a program.
///
/// The stages are consumed: once the program is linked they are detached and deleted, the
/// program keeps everything it needs.
pub fn link_program<B: ShaderBackend>(
    gl: &Arc<B>,
    vertex: Shader<B>,
    fragment: Shader<B>,
) -> Result<ShaderProgram<B>, Diagnostic> {
    let program = ShaderProgram::new(gl, &[&vertex, &fragment])?;
    log::debug!("Linked shader program");
    Ok(program)
}

/// Compiles both stages and links them.
///
/// Both stages are always compiled, so both failures show up in the log, but only the first one
/// (vertex before fragment) is returned. Linking is never attempted after a compile failure.
pub fn build<B: ShaderBackend>(
    gl: &Arc<B>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<B>, Diagnostic> {
    let vertex = compile_stage(gl, vertex_source, StageKind::Vertex);
    let fragment = compile_stage(gl, fragment_source, StageKind::Fragment);
    link_program(gl, vertex?, fragment?)
}

/// A value that can be uploaded to a uniform variable.
pub trait Uniform {
    /// Uploads the value to the uniform at `location` of the currently bound program.
    fn upload<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation);
}

impl Uniform for Vec4 {
    fn upload<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_vec4(location, self.to_array());
    }
}

impl Uniform for Mat4 {
    fn upload<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_mat4(location, &self.to_cols_array());
    }
}

impl<B: ShaderBackend> ShaderProgram<B> {
    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.bind_program(self.id);
    }

    /// Sets a uniform variable of the bound program. Names the linker optimised away are skipped.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        match self.gl.uniform_location(self.id, name) {
            Some(location) => value.upload(&*self.gl, &location),
            None => log::trace!("Uniform '{name}' is not active"),
        }
    }

    /// Uploads the model matrix and tint of `transform` as `u_model` and `u_color`.
    pub fn set_transform(&self, transform: &Transform) {
        self.set_uniform("u_model", transform.to_matrix());
        self.set_uniform("u_color", transform.color);
    }
}
