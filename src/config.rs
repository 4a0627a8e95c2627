use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "config/formation.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormationSettings {
    /// Directory new layout files are saved into.
    pub save_dir: PathBuf,
    /// Hide children that get no generated position.
    pub cull_excess: bool,
    /// Recompute every frame instead of only on change.
    pub live_preview: bool,
    /// Child count used by `preview` when none is given.
    pub children: usize,
}

impl Default for FormationSettings {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("layouts"),
            cull_excess: true,
            live_preview: false,
            children: 8,
        }
    }
}

impl FormationSettings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<FormationSettings>(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    FormationSettings::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_SETTINGS_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                FormationSettings::default()
            }
        }
    }

    /// Save settings to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = FormationSettings::load_from_path(&dir.path().join("absent.toml"));
        assert_eq!(settings, FormationSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("formation.toml");
        fs::write(&path, "children = 3\ncull_excess = false\n").expect("write settings");

        let settings = FormationSettings::load_from_path(&path);
        assert_eq!(settings.children, 3);
        assert!(!settings.cull_excess);
        assert_eq!(settings.save_dir, PathBuf::from("layouts"));
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("formation.toml");
        fs::write(&path, "children = \"many\"").expect("write settings");
        assert_eq!(
            FormationSettings::load_from_path(&path),
            FormationSettings::default()
        );
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/formation.toml");
        let settings = FormationSettings {
            save_dir: PathBuf::from("out"),
            cull_excess: false,
            live_preview: true,
            children: 12,
        };
        settings.save_to_path(&path).expect("save settings");
        assert_eq!(FormationSettings::load_from_path(&path), settings);
    }
}
