//! Shader compilation and linking on top of a graphics backend.

pub mod backend;
#[cfg(test)]
pub(crate) mod mock;
pub mod shader;

pub use backend::*;
pub use shader::*;
