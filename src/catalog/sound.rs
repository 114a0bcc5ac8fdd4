use serde::{Deserialize, Serialize};

/// One pollution sound from `sounds.json`. Never mutated after loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    // free-form, e.g. "60-80 dB" or "up to 70 dB"
    #[serde(default)]
    pub amplitude: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub audio: Vec<String>,
    // ambient tracks loop along but can never be guessed
    #[serde(default)]
    pub ambient: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl SoundDescriptor {
    pub fn new(id: &str, amplitude: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            amplitude: amplitude.to_string(),
            audio: vec![format!("{id}.wav")],
            ambient: false,
            description: None,
        }
    }

    pub fn ambient(mut self) -> Self {
        self.ambient = true;
        self
    }

    pub fn is_guessable(&self) -> bool {
        !self.ambient
    }

    pub fn parsed_amplitude(&self) -> Amplitude {
        Amplitude::parse(&self.amplitude)
    }

    pub fn amplitude_floor(&self) -> Option<u32> {
        self.parsed_amplitude().floor()
    }

    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => humanize_id(&self.id),
        }
    }
}

// "car_horn" -> "car horn"
pub fn humanize_id(id: &str) -> String {
    id.replace('_', " ")
}

/// Decibel range as written in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amplitude {
    UpTo(u32),
    Range { low: u32, high: Option<u32> },
    Unparseable,
}

impl Amplitude {
    pub fn parse(text: &str) -> Self {
        if text.to_lowercase().contains("up to") {
            return match first_integer(text) {
                Some(max) => Amplitude::UpTo(max),
                None => Amplitude::Unparseable,
            };
        }
        let mut parts = text.splitn(2, '-');
        let low = parts.next().and_then(first_integer);
        let high = parts.next().and_then(first_integer);
        match low {
            Some(low) => Amplitude::Range { low, high },
            None => Amplitude::Unparseable,
        }
    }

    /// The value scoring works from. "up to N" has only one number, so that's the floor.
    pub fn floor(self) -> Option<u32> {
        match self {
            Amplitude::UpTo(max) => Some(max),
            Amplitude::Range { low, .. } => Some(low),
            Amplitude::Unparseable => None,
        }
    }
}

fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn one_or_many<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(de)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}
