// Static game data: the sound list and the recipient list, both plain JSON
// arrays living next to the WAV files in the data dir.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::error::{QuizError, Result};

mod recipient;
mod sound;

pub use recipient::{Recipient, RiskFunction};
pub use sound::{humanize_id, Amplitude, SoundDescriptor};

const SOUNDS_FILE: &str = "sounds.json";
const RECIPIENTS_FILE: &str = "recipients.json";

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub sounds: Vec<SoundDescriptor>,
    pub recipients: Vec<Recipient>,
}

impl Catalog {
    pub fn new(sounds: Vec<SoundDescriptor>, recipients: Vec<Recipient>) -> Self {
        Self {
            sounds: dedup_sounds(sounds),
            recipients,
        }
    }

    // <data_dir>/sounds.json + <data_dir>/recipients.json, empty on any failure
    pub fn load(data_dir: &Path) -> Self {
        let sounds = load_sounds(&data_dir.join(SOUNDS_FILE));
        let recipients = load_recipients(&data_dir.join(RECIPIENTS_FILE));
        Self::new(sounds, recipients)
    }

    pub fn sound(&self, id: &str) -> Option<&SoundDescriptor> {
        self.sounds.iter().find(|s| s.id == id)
    }

    pub fn recipient(&self, group: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.group == group)
    }
}

pub fn load_sounds(path: &Path) -> Vec<SoundDescriptor> {
    degrade(path, "sounds", read_json(path))
}

pub fn load_recipients(path: &Path) -> Vec<Recipient> {
    degrade(path, "recipients", read_json(path))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data = std::fs::read_to_string(path).map_err(|e| QuizError::data_load(path, e))?;
    serde_json::from_str(&data).map_err(|e| QuizError::data_load(path, e))
}

fn degrade<T>(path: &Path, what: &str, loaded: Result<Vec<T>>) -> Vec<T> {
    match loaded {
        Ok(items) => {
            info!("loaded {} {} from {}", items.len(), what, path.display());
            items
        }
        Err(e) => {
            warn!("{e}; continuing with no {what}");
            Vec::new()
        }
    }
}

fn dedup_sounds(sounds: Vec<SoundDescriptor>) -> Vec<SoundDescriptor> {
    let mut seen = HashSet::new();
    sounds
        .into_iter()
        .filter(|s| {
            let fresh = seen.insert(s.id.clone());
            if !fresh {
                warn!("duplicate sound id '{}' dropped", s.id);
            }
            fresh
        })
        .collect()
}

// asset paths in sounds.json are relative to the data dir
pub fn resolve_asset(data_dir: &Path, asset: &str) -> PathBuf {
    let path = Path::new(asset);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
