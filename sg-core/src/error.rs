//! Error types for mesh generation and scene configuration.

use thiserror::Error;

/// Errors returned when looking up or building a [`Solid`](crate::Solid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The requested name is not one of the built-in solids.
    #[error("Unknown solid: {0}")]
    UnknownSolid(String),

    /// Flat triangle data whose length is not a multiple of 9 floats.
    #[error("Solid '{label}' has {len} floats, which is not a whole number of triangles")]
    MalformedSolid { label: String, len: usize },
}

/// Errors returned when loading or saving a [`SceneConfig`](crate::SceneConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scale must be finite and positive, got {0}")]
    InvalidScale(f32),
}
