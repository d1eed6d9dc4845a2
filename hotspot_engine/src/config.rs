//! Engine settings read from `engine.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::main_loop::DEFAULT_TICK_RATE;

/// Window, audio, font and pacing settings. Every field has a default, so a
/// config file only needs the keys it wants to change.
///
/// Paths are relative to the data root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub caption: String,
    /// Window size in pixels, `[width, height]`.
    pub resolution: (u32, u32),
    pub icon: Option<PathBuf>,
    pub background_music: Option<PathBuf>,
    /// TTF font for labels, menus and the status bar. The backend's built-in
    /// font is used when unset.
    pub font: Option<PathBuf>,
    pub font_size: u16,
    pub tick_rate: u32,
    pub resizable: bool,
    /// World definition (RON).
    pub world: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caption: "Hotspot".into(),
            resolution: (720, 576),
            icon: None,
            background_music: None,
            font: None,
            font_size: 24,
            tick_rate: DEFAULT_TICK_RATE,
            resizable: false,
            world: PathBuf::from("world.ron"),
        }
    }
}

impl EngineConfig {
    #[allow(clippy::cast_precision_loss)]
    pub fn screen_size(&self) -> (f32, f32) {
        (self.resolution.0 as f32, self.resolution.1 as f32)
    }

    fn check(&self) -> Result<()> {
        if self.resolution.0 == 0 || self.resolution.1 == 0 {
            bail!("resolution must be non-zero, got {:?}", self.resolution);
        }
        if self.font_size == 0 {
            bail!("font_size must be non-zero");
        }
        if self.tick_rate == 0 {
            bail!("tick_rate must be non-zero");
        }
        Ok(())
    }
}

/// Load engine settings from a TOML file.
///
/// A missing file is not an error: defaults are used and a warning logged.
///
/// # Errors
/// - on file IO error other than the file being absent
/// - on TOML parsing error or out-of-range values
pub fn load_config(toml_path: &Path) -> Result<EngineConfig> {
    if !toml_path.exists() {
        warn!("no engine config at '{}', using defaults", toml_path.display());
        return Ok(EngineConfig::default());
    }
    let config_file = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    let config: EngineConfig =
        toml::from_str(&config_file).with_context(|| format!("parsing engine config from '{}'", toml_path.display()))?;
    config
        .check()
        .with_context(|| format!("invalid engine config in '{}'", toml_path.display()))?;

    info!(
        "engine config loaded from '{}' ({}x{} @ {} Hz)",
        toml_path.display(),
        config.resolution.0,
        config.resolution.1,
        config.tick_rate
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("engine.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.screen_size(), (720.0, 576.0));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(
            &path,
            "caption = \"Village\"\nresolution = [800, 600]\nbackground_music = \"music.ogg\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.caption, "Village");
        assert_eq!(config.resolution, (800, 600));
        assert_eq!(config.background_music, Some(PathBuf::from("music.ogg")));
        assert_eq!(config.font_size, 24);
        assert_eq!(config.tick_rate, 10);
        assert_eq!(config.world, PathBuf::from("world.ron"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "resolution = \"big\"").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing engine config"));
    }

    #[test]
    fn zero_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "tick_rate = 0").unwrap();
        assert!(load_config(&path).is_err());
    }
}
