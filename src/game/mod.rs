pub mod controller;
pub mod format;
pub mod risk;
pub mod scoring;
pub mod session;
pub mod timer;

pub use controller::{AdjustOutcome, Controller, GuessOutcome, StartOutcome};
pub use risk::RoundModifiers;
pub use session::GameSession;
pub use timer::TimerId;
