/// Startup configuration, read from a RON file.
///
/// ```ron
/// (
///     title: "Gopher Jump",
///     tick_millis: 33,
///     seed: Some(7),
///     sound: false,
///     log_file: Some("gopher_jump.log"),
///     log_filter: "gopher_jump=debug",
/// )
/// ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GOPHER_JUMP_CONFIG";
/// Looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "gopher_jump.ron";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Terminal window title.
    pub title: String,
    /// Length of one logical frame.
    pub tick_millis: u64,
    /// Fixed RNG seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Ring the terminal bell on jumps and hits.
    pub sound: bool,
    /// Tracing output goes here. The terminal is the game screen, so without
    /// a file nothing is logged.
    pub log_file: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            title: "Gopher Jump".to_string(),
            tick_millis: 33,
            seed: None,
            sound: true,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(text: &str) -> Result<GameConfig> {
        ron::from_str(text).context("invalid game config")
    }

    pub fn from_file(path: &Path) -> Result<GameConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `$GOPHER_JUMP_CONFIG`, else `./gopher_jump.ron` if present,
    /// else defaults. A named file that is missing or malformed is an error.
    pub fn load() -> Result<GameConfig> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        Ok(GameConfig::default())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}
