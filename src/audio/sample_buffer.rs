use std::path::Path;

use anyhow::Context;

use super::frame::StereoFrame;

// Handle-assigned key for a registered buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleId(pub u64);

/// A decoded, device-rate, stereo clip.
#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Decode a WAV and bring it to `target_rate`. Mono gets duplicated,
    // anything wider than stereo keeps its first two channels.
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / full_scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let frames: Vec<StereoFrame> = samples
            .chunks_exact(channels)
            .map(|c| match c {
                [x] => StereoFrame::mono(*x),
                [l, r, ..] => StereoFrame { left: *l, right: *r },
                [] => StereoFrame::zero(),
            })
            .collect();
        if frames.is_empty() {
            anyhow::bail!("{} holds no audio", path.display());
        }

        Ok(Self {
            data: resample_linear(&frames, spec.sample_rate, target_rate),
        })
    }
}

// Plain linear interpolation. Good enough for looping noise beds.
fn resample_linear(frames: &[StereoFrame], from: u32, to: u32) -> Vec<StereoFrame> {
    if from == to || from == 0 || to == 0 || frames.is_empty() {
        return frames.to_vec();
    }
    let step = from as f64 / to as f64;
    let out_len = ((frames.len() as f64) / step).ceil() as usize;
    let last = frames.len() - 1;
    (0..out_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = (pos.floor() as usize).min(last);
            let next = (idx + 1).min(last);
            let t = (pos - idx as f64) as f32;
            let (a, b) = (frames[idx], frames[next]);
            StereoFrame {
                left: a.left + (b.left - a.left) * t,
                right: a.right + (b.right - a.right) * t,
            }
        })
        .collect()
}
