//! GPU side of the sacred geometry demo.
//!
//! This crate turns GLSL source into linked programs through the [`abs::ShaderBackend`] seam,
//! reports failures as line annotated [`Diagnostic`]s and ships the GLSL program used to draw the
//! meshes generated by `sg-core`.

pub mod abs;
pub mod diagnostic;
pub mod logging;
pub mod shaders;

pub use diagnostic::{Diagnostic, DiagnosticKind, LogError};
