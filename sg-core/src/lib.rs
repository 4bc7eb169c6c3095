//! Core of the sacred geometry demo. This crate holds everything that does not need a graphics
//! backend: the table of built-in polyhedra, the flat shaded mesh generator, the model transform
//! and the scene configuration.

pub mod config;
pub mod error;
pub mod mesh;
pub mod solid;
pub mod transform;

pub use config::SceneConfig;
pub use error::{ConfigError, MeshError};
pub use mesh::{Mesh, generate, generate_named};
pub use solid::{Solid, SolidName, SolidRegistry, registry};
pub use transform::Transform;
