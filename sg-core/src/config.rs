//! Scene configuration stored as JSON in the user's config directory.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Mesh, SolidName, Transform, mesh};

/// Which solid to show, at what scale and with which model transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub solid: SolidName,
    pub scale: f32,
    pub transform: Transform,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            solid: SolidName::Earth,
            scale: 1.0,
            transform: Transform::default(),
        }
    }
}

impl SceneConfig {
    /// Returns `<config dir>/sacred-geometry/scene.json`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sacred-geometry").join("scene.json"))
    }

    /// Parses and validates a scene from JSON text. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if !(config.scale.is_finite() && config.scale > 0.0) {
            return Err(ConfigError::InvalidScale(config.scale));
        }
        Ok(config)
    }

    /// Loads a scene file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded scene from {}", path.display());
        Ok(config)
    }

    /// Loads a scene file, falling back to the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::info!("No scene at {}, using defaults", path.display());
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Writes the scene as pretty printed JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Generates the configured solid at the configured scale.
    pub fn mesh(&self) -> Mesh {
        mesh::generate(self.solid, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sg-core-{}-{}", std::process::id(), name))
            .join("scene.json")
    }

    #[test]
    fn test_partial_scene() {
        let config = SceneConfig::from_json(r#"{ "solid": "space" }"#).unwrap();
        assert_eq!(config.solid, SolidName::Space);
        assert_eq!(config.scale, 1.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SceneConfig::from_json(r#"{ "scale": -2.0 }"#),
            Err(ConfigError::InvalidScale(s)) if s == -2.0
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "scale": 0.0 }"#),
            Err(ConfigError::InvalidScale(_))
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "solid": "aether" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let config = SceneConfig {
            solid: SolidName::Water,
            scale: 2.5,
            transform: Transform::default(),
        };
        config.save(&path).unwrap();
        assert_eq!(SceneConfig::load(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = temp_path("missing");
        let config = SceneConfig::load_or_default(&path).unwrap();
        assert_eq!(config.solid, SolidName::Earth);
        assert!(matches!(SceneConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_scene_mesh() {
        let config = SceneConfig {
            solid: SolidName::Fire,
            scale: 3.0,
            ..Default::default()
        };
        let mesh = config.mesh();
        assert_eq!(mesh.triangle_count, 4);
        assert_eq!(mesh, mesh::generate(SolidName::Fire, 3.0));
    }
}
