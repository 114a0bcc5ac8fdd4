// The seam between the game and whatever makes noise. The controller only
// ever talks to `AudioPlayback`; the cpal engine behind `AudioHandle` is one
// implementation, `NullPlayback` is the silent one.
pub use crate::audio::{SampleBuffer, SampleId};

use crate::catalog::SoundDescriptor;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayOptions {
    pub looped: bool,
    pub gain_adjust_db: Option<f32>, // on top of the master gain
    pub pan: f32,                    // -1.0 (left) to 1.0 (right)
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            looped: true,
            gain_adjust_db: None,
            pan: 0.0,
        }
    }
}

pub trait AudioPlayback {
    /// Make a sound ready to play. An error here keeps the sound out of rounds.
    fn preload(&mut self, sound: &SoundDescriptor) -> Result<()>;
    fn play(&mut self, id: &str, opts: PlayOptions);
    /// Stopping something that never started is fine.
    fn stop(&mut self, id: &str);
    fn stop_all(&mut self);
}

impl<P: AudioPlayback + ?Sized> AudioPlayback for Box<P> {
    fn preload(&mut self, sound: &SoundDescriptor) -> Result<()> {
        (**self).preload(sound)
    }
    fn play(&mut self, id: &str, opts: PlayOptions) {
        (**self).play(id, opts)
    }
    fn stop(&mut self, id: &str) {
        (**self).stop(id)
    }
    fn stop_all(&mut self) {
        (**self).stop_all()
    }
}

// used when there's no output device; the game still runs, just silently
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPlayback;

impl AudioPlayback for NullPlayback {
    fn preload(&mut self, _sound: &SoundDescriptor) -> Result<()> {
        Ok(())
    }
    fn play(&mut self, _id: &str, _opts: PlayOptions) {}
    fn stop(&mut self, _id: &str) {}
    fn stop_all(&mut self) {}
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (that would stall the audio thread), so a
    // decoded buffer is registered first and then referred to by id.
    RegisterSample { id: SampleId, buffer: SampleBuffer },
    Play { id: SampleId, opts: PlayOptions },
    Stop(SampleId),
    StopAll,
}
