// Types shared between the game core and the terminal front end.
//
// Keys (see tui/input.rs):
//   Space         //  StartRound (or replay the current round while playing)
//   1 .. 9        //  Pick(n): recipient in Idle, sound in Playing/Guessing
//   [ / ]         //  AdjustTime(-10 / +10)
//   Enter         //  ApplyGuesses
//   r             //  Reset
//   Esc           //  Quit
//
// The rendering idea is the same as always: the controller owns every bit of
// game state, and each frame the TUI asks for a `DisplayState` and just draws it.

pub const ROUND_SECONDS: u32 = 30;
pub const GUESS_SECONDS: u32 = 10;
pub const MIN_SECONDS: u32 = 10;
pub const MAX_SECONDS: u32 = 60;
pub const MAX_SOUNDS: usize = 5;

pub const TIME_STEP: f64 = 10.0; // what one press of [ or ] trades
pub const MAX_PICKS: usize = 9; // number keys available for picking

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Guessing,
    Ended,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Playing => "LISTEN",
            Phase::Guessing => "GUESS",
            Phase::Ended => "OVER",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    StartRound,
    Pick(u8), // index 0-8 into whatever list the current phase shows
    AdjustTime(f64),
    ApplyGuesses,
    Reset,
    Quit,
}

// One entry of the guess list
#[derive(Clone, Debug, PartialEq)]
pub struct GuessOption {
    pub id: String,
    pub label: String,
    pub pending: bool,  // toggled for the next apply
    pub credited: bool, // already scored this round
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecipientOption {
    pub group: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub final_score: i64,
    pub sounds_text: String,
    pub recipients_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub phase: Phase,
    pub time_remaining: u32,
    pub guess_time_remaining: u32,
    pub score: i64,
    pub multiplier: f64,
    pub playing_count: usize, // how many tracks are looping right now
    pub guessable: Vec<GuessOption>,
    pub recipients: Vec<RecipientOption>,
    pub feedback: String, // one line of "what just happened"
    pub summary: Option<RoundSummary>,
}
