use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info};

use crate::audio_api::{AudioCommand, AudioPlayback, PlayOptions};
use crate::catalog::SoundDescriptor;
use crate::error::{QuizError, Result};
use crate::loader::sample_loader;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::{db_to_gain, pan_gains, StereoFrame};
pub use sample_buffer::{SampleBuffer, SampleId};

use engine::Engine;

/// Main-thread side of the output stream. Decodes on preload, then only
/// ever sends small commands to the engine.
pub struct AudioHandle {
    queue: CommandQueue,
    data_dir: PathBuf,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

// Sender plus the sound id -> engine buffer map. A sound only counts as
// registered once its buffer actually made it onto the queue.
struct CommandQueue {
    tx: Sender<AudioCommand>,
    next_id: u64,
    registered: HashMap<String, SampleId>,
}

impl CommandQueue {
    fn new(tx: Sender<AudioCommand>) -> Self {
        Self {
            tx,
            next_id: 0,
            registered: HashMap::new(),
        }
    }

    fn send(&self, cmd: AudioCommand) -> bool {
        let sent = self.tx.try_send(cmd).is_ok();
        if !sent {
            debug!("audio command queue full, command dropped");
        }
        sent
    }

    fn register(&mut self, sound_id: &str, buffer: SampleBuffer) -> Result<SampleId> {
        let id = SampleId(self.next_id);
        if !self.send(AudioCommand::RegisterSample { id, buffer }) {
            return Err(QuizError::asset_load(sound_id, "audio command queue full"));
        }
        self.next_id += 1;
        self.registered.insert(sound_id.to_string(), id);
        Ok(id)
    }

    fn lookup(&self, sound_id: &str) -> Option<SampleId> {
        self.registered.get(sound_id).copied()
    }
}

impl AudioPlayback for AudioHandle {
    fn preload(&mut self, sound: &SoundDescriptor) -> Result<()> {
        let buffer = sample_loader::load_sound(sound, &self.data_dir, self.sample_rate)?;
        self.queue.register(&sound.id, buffer)?;
        Ok(())
    }

    fn play(&mut self, id: &str, opts: PlayOptions) {
        match self.queue.lookup(id) {
            Some(sample) => {
                self.queue.send(AudioCommand::Play { id: sample, opts });
            }
            None => debug!("play for unloaded sound '{id}'"),
        }
    }

    fn stop(&mut self, id: &str) {
        if let Some(sample) = self.queue.lookup(id) {
            self.queue.send(AudioCommand::Stop(sample));
        }
    }

    fn stop_all(&mut self) {
        self.queue.send(AudioCommand::StopAll);
    }
}

/// Open the default output device. `rate_override` forces the stream rate,
/// otherwise the device's default is used; samples get resampled to match.
pub fn start_audio(
    data_dir: PathBuf,
    master_gain: f32,
    rate_override: Option<u32>,
) -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let channels = config.channels() as usize;
    let sample_format = config.sample_format();
    let mut stream_config: cpal::StreamConfig = config.into();
    if let Some(rate) = rate_override {
        stream_config.sample_rate = rate;
    }
    let sample_rate = stream_config.sample_rate;
    info!("audio output: {} Hz, {} channels", sample_rate, channels);

    match sample_format {
        cpal::SampleFormat::F32 => {
            let output_stream =
                build_output_stream_f32(&device, &stream_config, rx, channels, master_gain)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioHandle {
                queue: CommandQueue::new(tx),
                data_dir,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 for now)"),
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
    master_gain: f32,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new(master_gain);
    let mut scratch: Vec<StereoFrame> = Vec::with_capacity(4096);

    let err_fn = |err| error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            scratch.resize(n_frames, StereoFrame::zero());
            engine.render_block(&mut scratch);

            // interleave into whatever channel layout the device wants
            for (out, f) in data.chunks_exact_mut(channels.max(1)).zip(&scratch) {
                match out {
                    [mono] => *mono = 0.5 * (f.left + f.right),
                    [l, r, rest @ ..] => {
                        *l = f.left;
                        *r = f.right;
                        rest.fill(0.0);
                    }
                    [] => {}
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
