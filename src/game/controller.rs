//! Round state machine: Idle -> Playing -> Guessing -> Ended -> (reset) Idle.
//!
//! The controller owns the session, the only live countdown and the playback
//! provider. Nothing here returns an error to the caller: bad input is a
//! no-op and every operation reports what it did through an outcome enum.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::audio_api::{AudioPlayback, PlayOptions};
use crate::catalog::{Catalog, SoundDescriptor};
use crate::config::Rules;
use crate::error::QuizError;
use crate::shared::{
    DisplayState, GuessOption, InputEvent, Phase, RecipientOption, RoundSummary,
};

use super::format::{format_recipients, format_sounds};
use super::risk::{apply_risk_functions, RoundModifiers};
use super::scoring::{base_points, scaled_points, trade_time, WRONG_GUESS_PENALTY};
use super::session::GameSession;
use super::timer::{Countdown, TimerId};

const PAN_SPREAD: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started { sounds: usize },
    Replayed,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AdjustOutcome {
    Adjusted { time: u32, score_delta: i64 },
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: i64 },
    AlreadyCredited,
    Wrong { penalty: i64 },
    NotGuessable,
    Ignored,
}

pub struct Controller<P: AudioPlayback> {
    catalog: Catalog,
    rules: Rules,
    playback: P,
    rng: StdRng,
    session: GameSession,
    playable: HashSet<String>, // preloaded fine
    modifiers: RoundModifiers,
    timer: Option<Countdown>, // at most one live countdown, ever
    feedback: String,
    summary: Option<RoundSummary>,
}

impl<P: AudioPlayback> Controller<P> {
    pub fn new(catalog: Catalog, rules: Rules, playback: P, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            rules,
            playback,
            rng,
            session: GameSession::fresh(&rules),
            playable: HashSet::new(),
            modifiers: RoundModifiers::default(),
            timer: None,
            feedback: String::new(),
            summary: None,
        }
    }

    // ── accessors ───────────────────────────────────────────────────

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(Countdown::id)
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn is_playable(&self, id: &str) -> bool {
        self.playable.contains(id)
    }

    /// The fixed answer list: playable sounds minus ambient tracks.
    pub fn guessable_sounds(&self) -> Vec<&SoundDescriptor> {
        self.catalog
            .sounds
            .iter()
            .filter(|s| s.is_guessable() && self.playable.contains(&s.id))
            .collect()
    }

    // ── preload ─────────────────────────────────────────────────────

    /// Preload every catalog sound. Failures drop that sound and nothing
    /// else; returns how many made it.
    pub fn preload_catalog(&mut self) -> usize {
        self.playable.clear();
        for sound in &self.catalog.sounds {
            match self.playback.preload(sound) {
                Ok(()) => {
                    self.playable.insert(sound.id.clone());
                }
                Err(e) => warn!("{e}"),
            }
        }
        info!(
            "{} of {} sounds ready",
            self.playable.len(),
            self.catalog.sounds.len()
        );
        self.playable.len()
    }

    // ── idle ────────────────────────────────────────────────────────

    pub fn toggle_recipient(&mut self, group: &str) -> bool {
        if self.session.phase != Phase::Idle || self.catalog.recipient(group).is_none() {
            return false;
        }
        let selected = &mut self.session.selected_recipients;
        if let Some(pos) = selected.iter().position(|g| g == group) {
            selected.remove(pos);
        } else {
            selected.push(group.to_string());
        }
        true
    }

    /// Idle -> Playing. While Playing this replays the same selection with a
    /// fresh countdown handle; in Guessing/Ended it waits for a reset.
    pub fn start_round(&mut self) -> StartOutcome {
        match self.session.phase {
            Phase::Idle => self.begin_round(),
            Phase::Playing => {
                self.replay();
                StartOutcome::Replayed
            }
            Phase::Guessing | Phase::Ended => StartOutcome::Ignored,
        }
    }

    fn begin_round(&mut self) -> StartOutcome {
        let pool: Vec<String> = self
            .guessable_sounds()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        if pool.is_empty() {
            warn!("no playable sounds, round not started");
            self.feedback = "nothing to play".to_string();
            return StartOutcome::Ignored;
        }

        let recipients: Vec<_> = self
            .session
            .selected_recipients
            .iter()
            .filter_map(|g| self.catalog.recipient(g))
            .collect();
        let ambient_pool: Vec<&SoundDescriptor> = self
            .catalog
            .sounds
            .iter()
            .filter(|s| s.ambient && self.playable.contains(&s.id))
            .collect();
        self.modifiers = apply_risk_functions(recipients, &ambient_pool);

        let mut pool = pool;
        let wanted = self.rng.gen_range(1..=self.rules.max_sounds.max(1));
        let count = wanted.min(pool.len());
        let (drawn, _) = pool.partial_shuffle(&mut self.rng, count);

        let mut selected = drawn.to_vec();
        selected.extend(self.modifiers.ambient.iter().cloned());
        info!("round started with {} sounds", selected.len());
        debug!("selected: {:?}", selected);

        self.session.selected_sounds = selected;
        self.session.active_sounds = self.session.selected_sounds.iter().cloned().collect();
        self.session.time_remaining = self
            .modifiers
            .round_seconds(self.rules.round_seconds, self.rules.min_seconds);
        self.session.phase = Phase::Playing;
        self.play_selected();
        self.timer = Some(Countdown::start(self.session.time_remaining));
        self.feedback = "listen...".to_string();

        StartOutcome::Started { sounds: count }
    }

    fn replay(&mut self) {
        for id in &self.session.selected_sounds {
            self.playback.stop(id);
        }
        self.play_selected();
        // new handle, same time left; a late tick on the old one goes nowhere
        self.timer = Some(Countdown::start(self.session.time_remaining));
        debug!("round replayed");
    }

    fn play_selected(&mut self) {
        let guessable: Vec<&String> = self
            .session
            .selected_sounds
            .iter()
            .filter(|id| !self.modifiers.ambient.contains(*id))
            .collect();
        let n = guessable.len();
        for (i, id) in guessable.into_iter().enumerate() {
            let gain_adjust_db = self
                .catalog
                .sound(id)
                .and_then(|s| self.modifiers.gain_adjust(s));
            let opts = PlayOptions {
                looped: true,
                gain_adjust_db,
                pan: spread_pan(i, n),
            };
            self.playback.play(id, opts);
        }
        for id in &self.modifiers.ambient {
            self.playback.play(id, PlayOptions::default());
        }
    }

    // ── timers ──────────────────────────────────────────────────────

    /// One second elapsed on countdown `id`. Ticks for cancelled countdowns
    /// are dropped.
    pub fn on_second(&mut self, id: TimerId) {
        let Some(timer) = self.timer.as_mut() else {
            debug!("tick for {:?} with no live countdown", id);
            return;
        };
        if timer.id() != id {
            debug!("stale tick for {:?}", id);
            return;
        }
        let done = timer.tick_second();
        let remaining = timer.remaining();
        match self.session.phase {
            Phase::Playing => {
                self.session.time_remaining = remaining;
                if done {
                    self.enter_guessing();
                }
            }
            Phase::Guessing => {
                self.session.guess_time_remaining = remaining;
                if done {
                    self.end_round();
                }
            }
            Phase::Idle | Phase::Ended => self.timer = None,
        }
    }

    /// Feed wall-clock time; whole seconds are forwarded to `on_second`.
    pub fn tick(&mut self, elapsed_secs: f64) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        let seconds = timer.accumulate(elapsed_secs);
        for _ in 0..seconds {
            let Some(id) = self.timer_id() else {
                break;
            };
            self.on_second(id);
        }
    }

    fn enter_guessing(&mut self) {
        self.timer = None;
        for id in &self.session.selected_sounds {
            self.playback.stop(id);
        }
        self.session.time_remaining = 0;
        self.session.guess_time_remaining = self.rules.guess_seconds;
        self.session.phase = Phase::Guessing;
        self.timer = Some(Countdown::start(self.rules.guess_seconds));
        self.feedback = "what did you hear?".to_string();
        info!("guessing");
    }

    fn end_round(&mut self) {
        self.timer = None;
        let pending = std::mem::take(&mut self.session.pending_guesses);
        let ordered: Vec<String> = self
            .catalog
            .sounds
            .iter()
            .filter(|s| pending.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();
        for id in ordered {
            self.make_guess(Some(id.as_str()));
        }

        self.playback.stop_all();
        self.session.active_sounds.clear();
        self.session.phase = Phase::Ended;

        let labels: Vec<&str> = self
            .session
            .selected_recipients
            .iter()
            .filter_map(|g| self.catalog.recipient(g))
            .map(|r| r.label.as_str())
            .collect();
        self.summary = Some(RoundSummary {
            final_score: self.session.score,
            sounds_text: format_sounds(&self.session.selected_sounds),
            recipients_text: format_recipients(&labels),
        });
        info!("round over, score {}", self.session.score);
    }

    // ── playing ─────────────────────────────────────────────────────

    /// Trade listening time for points. Only while the listening countdown
    /// is still running; non-finite or zero deltas do nothing.
    pub fn adjust_time(&mut self, delta: f64) -> AdjustOutcome {
        if self.session.phase != Phase::Playing {
            return AdjustOutcome::Ignored;
        }
        let Some(timer) = self.timer.as_mut() else {
            return AdjustOutcome::Ignored;
        };
        if timer.is_done() {
            return AdjustOutcome::Ignored;
        }
        if !delta.is_finite() {
            debug!("{}", QuizError::InvalidInput(format!("time delta {delta}")));
            return AdjustOutcome::Ignored;
        }
        let delta_secs = delta.round() as i64;
        if delta_secs == 0 {
            return AdjustOutcome::Ignored;
        }

        let before = self.session.score;
        let trade = trade_time(
            timer.remaining(),
            before,
            self.session.points_multiplier,
            delta_secs,
            self.rules.min_seconds,
            self.rules.max_seconds,
        );
        timer.set_remaining(trade.time);
        self.session.time_remaining = trade.time;
        self.session.score = trade.score;
        self.session.points_multiplier = trade.multiplier;

        let score_delta = trade.score - before;
        debug!(
            "time {:+}s -> {}s, score {:+}, x{:.2}",
            delta_secs, trade.time, score_delta, trade.multiplier
        );
        self.feedback = format!("{}s ({:+})", trade.time, score_delta);
        AdjustOutcome::Adjusted {
            time: trade.time,
            score_delta,
        }
    }

    // ── guessing ────────────────────────────────────────────────────

    /// Score one guess immediately. Valid while Playing or Guessing.
    pub fn make_guess(&mut self, id: Option<&str>) -> GuessOutcome {
        if !matches!(self.session.phase, Phase::Playing | Phase::Guessing) {
            return GuessOutcome::Ignored;
        }
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return GuessOutcome::Ignored;
        };
        let Some(sound) = self.catalog.sound(id) else {
            debug!("{}", QuizError::InvalidInput(format!("unknown sound '{id}'")));
            return GuessOutcome::Ignored;
        };
        if !sound.is_guessable() {
            return GuessOutcome::NotGuessable;
        }

        let name = sound.display_name();
        let outcome = if self.session.active_sounds.contains(id) {
            if self.session.guessed_correctly.contains(id) {
                GuessOutcome::AlreadyCredited
            } else {
                let floor = sound.amplitude_floor();
                if floor.is_none() {
                    debug!("no amplitude floor for '{id}', minimum award");
                }
                let points = scaled_points(base_points(floor), self.session.points_multiplier);
                self.session.score += points;
                self.session.guessed_correctly.insert(id.to_string());
                GuessOutcome::Correct { points }
            }
        } else {
            self.session.score -= WRONG_GUESS_PENALTY;
            GuessOutcome::Wrong {
                penalty: WRONG_GUESS_PENALTY,
            }
        };

        debug!("guess '{id}': {:?}", outcome);
        self.feedback = match outcome {
            GuessOutcome::Correct { points } => format!("{name}: +{points}"),
            GuessOutcome::AlreadyCredited => format!("{name}: already got it"),
            GuessOutcome::Wrong { penalty } => format!("{name}: -{penalty}"),
            GuessOutcome::NotGuessable | GuessOutcome::Ignored => String::new(),
        };
        outcome
    }

    /// Mark/unmark an answer to be scored when the guesses are applied.
    pub fn toggle_pending_guess(&mut self, id: &str) -> bool {
        if self.session.phase != Phase::Guessing {
            return false;
        }
        if !self.catalog.sound(id).is_some_and(SoundDescriptor::is_guessable) {
            return false;
        }
        let pending = &mut self.session.pending_guesses;
        if let Some(pos) = pending.iter().position(|p| p == id) {
            pending.remove(pos);
        } else {
            pending.push(id.to_string());
        }
        true
    }

    /// Guessing -> Ended right now, scoring whatever is pending.
    pub fn apply_guesses(&mut self) -> bool {
        if self.session.phase != Phase::Guessing {
            return false;
        }
        self.end_round();
        true
    }

    // ── reset ───────────────────────────────────────────────────────

    /// Back to Idle with a clean session, from any phase.
    pub fn reset(&mut self) {
        self.timer = None;
        for id in &self.session.selected_sounds {
            self.playback.stop(id);
        }
        self.playback.stop_all();
        self.session = GameSession::fresh(&self.rules);
        self.modifiers = RoundModifiers::default();
        self.summary = None;
        self.feedback.clear();
        info!("reset");
    }

    // ── input + display ─────────────────────────────────────────────

    // returns false when the app should quit
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Quit => {
                self.reset();
                return false;
            }
            InputEvent::StartRound => {
                self.start_round();
            }
            InputEvent::AdjustTime(delta) => {
                self.adjust_time(delta);
            }
            InputEvent::ApplyGuesses => {
                self.apply_guesses();
            }
            InputEvent::Reset => self.reset(),
            InputEvent::Pick(n) => self.pick(n as usize),
        }
        true
    }

    // number keys mean different things depending on the phase
    fn pick(&mut self, n: usize) {
        match self.session.phase {
            Phase::Idle => {
                if let Some(group) = self.catalog.recipients.get(n).map(|r| r.group.clone()) {
                    self.toggle_recipient(&group);
                }
            }
            Phase::Playing => {
                let id = self.guessable_sounds().get(n).map(|s| s.id.clone());
                self.make_guess(id.as_deref());
            }
            Phase::Guessing => {
                if let Some(id) = self.guessable_sounds().get(n).map(|s| s.id.clone()) {
                    self.toggle_pending_guess(&id);
                }
            }
            Phase::Ended => {}
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let s = &self.session;
        let guessable = self
            .guessable_sounds()
            .into_iter()
            .map(|sound| GuessOption {
                id: sound.id.clone(),
                label: sound.display_name(),
                pending: s.pending_guesses.contains(&sound.id),
                credited: s.guessed_correctly.contains(&sound.id),
            })
            .collect();
        let recipients = self
            .catalog
            .recipients
            .iter()
            .map(|r| RecipientOption {
                group: r.group.clone(),
                label: r.label.clone(),
                selected: s.selected_recipients.contains(&r.group),
            })
            .collect();
        DisplayState {
            phase: s.phase,
            time_remaining: s.time_remaining,
            guess_time_remaining: s.guess_time_remaining,
            score: s.score,
            multiplier: s.points_multiplier,
            playing_count: if s.phase == Phase::Playing {
                s.active_sounds.len()
            } else {
                0
            },
            guessable,
            recipients,
            feedback: self.feedback.clone(),
            summary: self.summary.clone(),
        }
    }
}

// spread n sounds evenly across the stereo field
fn spread_pan(i: usize, n: usize) -> f32 {
    if n < 2 {
        return 0.0;
    }
    -PAN_SPREAD + 2.0 * PAN_SPREAD * (i as f32 / (n - 1) as f32)
}
