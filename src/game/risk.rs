// Per-recipient round modifiers. Every selected recipient contributes
// independently; nothing overrides anything else.
use log::debug;

use crate::catalog::{Recipient, RiskFunction, SoundDescriptor};

pub const BOOST_THRESHOLD_DB: u32 = 50;
pub const BOOST_DB: f32 = 3.0;
pub const STRESS_CUT_SECONDS: u32 = 10;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundModifiers {
    pub ambient: Vec<String>, // ids injected into the round, never guessable
    pub boost_db: f32,        // extra gain for loud sounds, 0 = none
    pub time_cut: u32,        // seconds taken off the listening countdown
}

impl RoundModifiers {
    // Unknown amplitude format just means no boost for that sound.
    pub fn gain_adjust(&self, sound: &SoundDescriptor) -> Option<f32> {
        if self.boost_db == 0.0 || sound.ambient {
            return None;
        }
        match sound.amplitude_floor() {
            Some(floor) if floor >= BOOST_THRESHOLD_DB => Some(self.boost_db),
            _ => None,
        }
    }

    pub fn round_seconds(&self, base: u32, min: u32) -> u32 {
        base.saturating_sub(self.time_cut).max(min)
    }
}

/// `ambient_pool` is every ambient sound that can actually be played.
pub fn apply_risk_functions<'a>(
    recipients: impl IntoIterator<Item = &'a Recipient>,
    ambient_pool: &[&SoundDescriptor],
) -> RoundModifiers {
    let mut mods = RoundModifiers::default();
    for recipient in recipients {
        let Some(risk) = recipient.risk() else {
            continue;
        };
        debug!("risk function {:?} from '{}'", risk, recipient.group);
        match risk {
            RiskFunction::Tinnitus => {
                for sound in ambient_pool {
                    if !mods.ambient.contains(&sound.id) {
                        mods.ambient.push(sound.id.clone());
                    }
                }
            }
            RiskFunction::NoiseSensitivity => mods.boost_db += BOOST_DB,
            RiskFunction::Stress => mods.time_cut += STRESS_CUT_SECONDS,
        }
    }
    mods
}
