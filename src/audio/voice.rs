use super::frame::{db_to_gain, pan_gains, StereoFrame};
use super::sample_buffer::{SampleBuffer, SampleId};
use crate::audio_api::PlayOptions;

// One playing clip. Looping voices wrap forever until stopped; one-shots
// go inactive at the end of the buffer.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pub sample: SampleId,
    pub active: bool,
    pos: usize,
    looped: bool,
    gain_l: f32,
    gain_r: f32,
}

impl Voice {
    pub fn new(sample: SampleId, opts: PlayOptions) -> Self {
        let gain = db_to_gain(opts.gain_adjust_db.unwrap_or(0.0));
        let (l, r) = pan_gains(opts.pan);
        Self {
            sample,
            active: true,
            pos: 0,
            looped: opts.looped,
            gain_l: gain * l,
            gain_r: gain * r,
        }
    }

    pub fn idle() -> Self {
        Self {
            sample: SampleId(u64::MAX),
            active: false,
            pos: 0,
            looped: false,
            gain_l: 0.0,
            gain_r: 0.0,
        }
    }

    // mix this voice into `out`
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        let len = buffer.data.len();
        if len == 0 {
            self.active = false;
            return;
        }
        for frame in out.iter_mut() {
            if self.pos >= len {
                if !self.looped {
                    self.active = false;
                    break;
                }
                self.pos = 0;
            }
            let s = buffer.data[self.pos];
            frame.left += s.left * self.gain_l;
            frame.right += s.right * self.gain_r;
            self.pos += 1;
        }
    }
}
