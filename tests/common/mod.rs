#![allow(dead_code)]

use std::collections::HashSet;

use noisequiz::catalog::{Catalog, Recipient, SoundDescriptor};
use noisequiz::config::Rules;
use noisequiz::error::{QuizError, Result};
use noisequiz::{AudioPlayback, Controller, PlayOptions};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Play(String, PlayOptions),
    Stop(String),
    StopAll,
}

// Records every call; `looping` mirrors what a real device would be playing.
#[derive(Default)]
pub struct RecordingPlayback {
    pub calls: Vec<Call>,
    pub looping: HashSet<String>,
    pub broken: HashSet<String>, // preloads of these ids fail
}

impl RecordingPlayback {
    pub fn failing(ids: &[&str]) -> Self {
        Self {
            broken: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn plays(&self) -> Vec<(&str, PlayOptions)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Play(id, opts) => Some((id.as_str(), *opts)),
                _ => None,
            })
            .collect()
    }
}

impl AudioPlayback for RecordingPlayback {
    fn preload(&mut self, sound: &SoundDescriptor) -> Result<()> {
        if self.broken.contains(&sound.id) {
            return Err(QuizError::asset_load(&sound.id, "decode failed"));
        }
        Ok(())
    }

    fn play(&mut self, id: &str, opts: PlayOptions) {
        self.looping.insert(id.to_string());
        self.calls.push(Call::Play(id.to_string(), opts));
    }

    fn stop(&mut self, id: &str) {
        self.looping.remove(id);
        self.calls.push(Call::Stop(id.to_string()));
    }

    fn stop_all(&mut self) {
        self.looping.clear();
        self.calls.push(Call::StopAll);
    }
}

pub fn five_sounds() -> Vec<SoundDescriptor> {
    vec![
        SoundDescriptor::new("car_horn", "90-110 dB"),
        SoundDescriptor::new("train_whistle", "up to 95 dB"),
        SoundDescriptor::new("ambulance_siren", "100-120 dB"),
        SoundDescriptor::new("birds", "30-45 dB"),
        SoundDescriptor::new("lawn_mower", "60-80 dB"),
    ]
}

pub fn tone() -> SoundDescriptor {
    SoundDescriptor::new("tinnitus", "up to 20 dB").ambient()
}

pub fn recipients() -> Vec<Recipient> {
    vec![
        Recipient::new("kids", "Djeca", Some("tinnitus")),
        Recipient::new("pets", "Ljubimci", Some("noise_sensitivity")),
        Recipient::new("nurses", "Medicinske Sestre", Some("stress")),
        Recipient::new("plants", "Biljke", Some("photosynthesis")),
    ]
}

pub fn controller_with(
    sounds: Vec<SoundDescriptor>,
    playback: RecordingPlayback,
    seed: u64,
) -> Controller<RecordingPlayback> {
    let mut c = Controller::new(Catalog::new(sounds, recipients()), Rules::default(), playback, Some(seed));
    c.preload_catalog();
    c
}

pub fn controller(seed: u64) -> Controller<RecordingPlayback> {
    controller_with(five_sounds(), RecordingPlayback::default(), seed)
}

// only one sound in the catalog, so the draw is always that sound
pub fn single(sound: SoundDescriptor) -> Controller<RecordingPlayback> {
    controller_with(vec![sound], RecordingPlayback::default(), 1)
}

pub fn run_seconds(c: &mut Controller<RecordingPlayback>, n: u32) {
    for _ in 0..n {
        if let Some(id) = c.timer_id() {
            c.on_second(id);
        }
    }
}
