use std::collections::HashMap;

use crate::audio_api::{AudioCommand, PlayOptions};

use super::frame::StereoFrame;
use super::sample_buffer::{SampleBuffer, SampleId};
use super::voice::Voice;

const MAX_VOICES: usize = 16; // fixed pool so the callback never allocates voices

// Lives on the audio thread. Everything arrives as an AudioCommand.
pub struct Engine {
    master_gain: f32,
    samples: HashMap<SampleId, SampleBuffer>,
    voices: [Voice; MAX_VOICES],
}

impl Engine {
    pub fn new(master_gain: f32) -> Self {
        Self {
            master_gain,
            samples: HashMap::with_capacity(64),
            voices: [Voice::idle(); MAX_VOICES],
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { id, buffer } => {
                self.samples.insert(id, buffer);
            }
            AudioCommand::Play { id, opts } => self.start_voice(id, opts),
            AudioCommand::Stop(id) => self.stop_voice(id),
            AudioCommand::StopAll => {
                for v in &mut self.voices {
                    v.active = false;
                }
            }
        }
    }

    fn start_voice(&mut self, id: SampleId, opts: PlayOptions) {
        if !self.samples.contains_key(&id) {
            return;
        }
        // restarting a sound reuses its voice instead of layering a second copy
        let slot = self
            .voices
            .iter()
            .position(|v| v.active && v.sample == id)
            .or_else(|| self.voices.iter().position(|v| !v.active))
            .unwrap_or(0);
        self.voices[slot] = Voice::new(id, opts);
    }

    fn stop_voice(&mut self, id: SampleId) {
        for v in self.voices.iter_mut().filter(|v| v.sample == id) {
            v.active = false;
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.active).count()
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for v in &mut self.voices {
            if let Some(buf) = self.samples.get(&v.sample) {
                v.render_into(buf, out);
            }
        }
        for f in out.iter_mut() {
            f.left = (f.left * self.master_gain).clamp(-1.0, 1.0);
            f.right = (f.right * self.master_gain).clamp(-1.0, 1.0);
        }
    }
}
