use serde::{Deserialize, Serialize};

/// A listener persona the player can pick before a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub group: String,
    pub label: String,
    #[serde(default)]
    pub risk_function: Option<String>,
}

impl Recipient {
    pub fn new(group: &str, label: &str, risk_function: Option<&str>) -> Self {
        Self {
            group: group.to_string(),
            label: label.to_string(),
            risk_function: risk_function.map(str::to_string),
        }
    }

    // unknown identifiers are fine, they just don't do anything
    pub fn risk(&self) -> Option<RiskFunction> {
        self.risk_function.as_deref().and_then(RiskFunction::from_name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskFunction {
    /// adds every ambient catalog track to the round
    Tinnitus,
    /// louder playback for sounds at or above the boost threshold
    NoiseSensitivity,
    /// shorter listening window
    Stress,
}

impl RiskFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "tinnitus" => Some(RiskFunction::Tinnitus),
            "noise_sensitivity" => Some(RiskFunction::NoiseSensitivity),
            "stress" => Some(RiskFunction::Stress),
            _ => None,
        }
    }
}
