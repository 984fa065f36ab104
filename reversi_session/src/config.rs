use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use reversi::{Disk, PlayerMode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAVE_FILE: &str = "reversi.txt";
pub const DEFAULT_AUTOMATED_DELAY_MS: u64 = 2000;

/// Settings of the session binary, from a JSON file and/or the command line.
///
/// Every field is optional so that the two sources can be layered with
/// [`Self::merge()`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub save_file: Option<PathBuf>,
    pub automated_delay_ms: Option<u64>,
    /// Overrides the mode stored in the saved game.
    pub dark: Option<PlayerMode>,
    /// Overrides the mode stored in the saved game.
    pub light: Option<PlayerMode>,
    pub record_games_to_directory: Option<PathBuf>,
}

impl SessionConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }

    /// Values set in `overrides` win.
    pub fn merge(self, overrides: SessionConfig) -> SessionConfig {
        SessionConfig {
            save_file: overrides.save_file.or(self.save_file),
            automated_delay_ms: overrides.automated_delay_ms.or(self.automated_delay_ms),
            dark: overrides.dark.or(self.dark),
            light: overrides.light.or(self.light),
            record_games_to_directory: overrides
                .record_games_to_directory
                .or(self.record_games_to_directory),
        }
    }

    pub fn save_file(&self) -> PathBuf {
        self.save_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE))
    }

    pub fn automated_delay(&self) -> Duration {
        Duration::from_millis(
            self.automated_delay_ms
                .unwrap_or(DEFAULT_AUTOMATED_DELAY_MS),
        )
    }

    /// Indexed by [`Disk::index()`].
    pub fn mode_overrides(&self) -> [Option<PlayerMode>; 2] {
        let mut overrides = [None; 2];
        overrides[Disk::Dark.index()] = self.dark;
        overrides[Disk::Light.index()] = self.light;
        overrides
    }
}

/// Parses `manual` or `automated`, for the command line.
pub fn parse_player_mode(s: &str) -> Result<PlayerMode, String> {
    match s {
        "manual" => Ok(PlayerMode::Manual),
        "automated" => Ok(PlayerMode::Automated),
        _ => Err(format!(
            "'{}' is not a player mode, expected 'manual' or 'automated'",
            s
        )),
    }
}
