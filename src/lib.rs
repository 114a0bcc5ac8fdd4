pub mod audio;
pub mod audio_api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod loader;
pub mod shared;
pub mod tui;

pub use audio_api::{AudioPlayback, NullPlayback, PlayOptions};
pub use catalog::{Catalog, Recipient, SoundDescriptor};
pub use config::{Config, Rules};
pub use error::QuizError;
pub use game::{AdjustOutcome, Controller, GameSession, GuessOutcome, StartOutcome};
pub use shared::{DisplayState, InputEvent, Phase};
