// Optional TOML config. Every field can be left out; the accessors fill in
// the defaults, and a broken file just means "use the defaults".
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::{GUESS_SECONDS, MAX_SECONDS, MAX_SOUNDS, MIN_SECONDS, ROUND_SECONDS};

const CONFIG_FILE: &str = "noisequiz.toml";

#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct Config {
    pub rules: Option<RulesConfig>,
    pub audio: Option<AudioConfig>,
    pub log_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct RulesConfig {
    pub round_seconds: Option<u32>,
    pub guess_seconds: Option<u32>,
    pub min_seconds: Option<u32>,
    pub max_seconds: Option<u32>,
    pub max_sounds: Option<usize>,
}

#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct AudioConfig {
    pub sample_rate: Option<u32>,
    pub master_gain: Option<f32>,
}

/// Resolved rule set handed to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub round_seconds: u32,
    pub guess_seconds: u32,
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub max_sounds: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            guess_seconds: GUESS_SECONDS,
            min_seconds: MIN_SECONDS,
            max_seconds: MAX_SECONDS,
            max_sounds: MAX_SOUNDS,
        }
    }
}

impl Config {
    pub fn rules(&self) -> Rules {
        let d = Rules::default();
        let Some(r) = self.rules.as_ref() else {
            return d;
        };
        let min_seconds = r.min_seconds.unwrap_or(d.min_seconds).max(1);
        let max_seconds = r.max_seconds.unwrap_or(d.max_seconds).max(min_seconds);
        Rules {
            round_seconds: r
                .round_seconds
                .unwrap_or(d.round_seconds)
                .clamp(min_seconds, max_seconds),
            guess_seconds: r.guess_seconds.unwrap_or(d.guess_seconds).max(1),
            min_seconds,
            max_seconds,
            max_sounds: r.max_sounds.unwrap_or(d.max_sounds).max(1),
        }
    }

    // None keeps the device's own rate
    pub fn sample_rate(&self) -> Option<u32> {
        self.audio
            .as_ref()
            .and_then(|a| a.sample_rate)
            .filter(|&rate| rate > 0)
    }

    pub fn master_gain(&self) -> f32 {
        self.audio
            .as_ref()
            .and_then(|a| a.master_gain)
            .unwrap_or(0.8)
            .clamp(0.0, 1.0)
    }
}

// --config wins, then <data_dir>/noisequiz.toml, then ~/.config/noisequiz/config.toml
pub fn config_path(explicit: Option<&Path>, data_dir: &Path) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = data_dir.join(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("noisequiz").join("config.toml"))
}

pub fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid config {}: {}", path.display(), e);
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
