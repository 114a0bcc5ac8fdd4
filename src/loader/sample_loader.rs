use std::path::Path;

use log::debug;

use crate::audio::SampleBuffer;
use crate::catalog::{resolve_asset, SoundDescriptor};
use crate::error::{QuizError, Result};

// Decode the first of a sound's asset paths that works, ready for registering
// with the engine.
pub fn load_sound(sound: &SoundDescriptor, data_dir: &Path, target_rate: u32) -> Result<SampleBuffer> {
    if sound.audio.is_empty() {
        return Err(QuizError::asset_load(&sound.id, "no audio paths listed"));
    }
    let mut last_err = None;
    for asset in &sound.audio {
        let path = resolve_asset(data_dir, asset);
        match SampleBuffer::load_wav(&path, target_rate) {
            Ok(buffer) => return Ok(buffer),
            Err(e) => {
                debug!("'{}': {:#}", sound.id, e);
                last_err = Some(e);
            }
        }
    }
    let reason = last_err.map(|e| format!("{e:#}")).unwrap_or_default();
    Err(QuizError::asset_load(&sound.id, reason))
}
