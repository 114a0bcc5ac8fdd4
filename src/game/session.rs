use std::collections::HashSet;

use crate::config::Rules;
use crate::shared::Phase;

/// Everything that belongs to one round. Owned by the controller and rebuilt
/// from scratch on reset.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub score: i64, // can go negative on wrong guesses
    pub phase: Phase,
    pub time_remaining: u32,
    pub guess_time_remaining: u32,
    pub active_sounds: HashSet<String>,
    pub selected_sounds: Vec<String>, // drawn once per round, in draw order
    pub guessed_correctly: HashSet<String>,
    pub points_multiplier: f64,
    pub selected_recipients: Vec<String>, // recipient groups
    pub pending_guesses: Vec<String>, // picked during Guessing, scored on apply
}

impl GameSession {
    pub fn fresh(rules: &Rules) -> Self {
        Self {
            score: 0,
            phase: Phase::Idle,
            time_remaining: rules.round_seconds,
            guess_time_remaining: rules.guess_seconds,
            active_sounds: HashSet::new(),
            selected_sounds: Vec::new(),
            guessed_correctly: HashSet::new(),
            points_multiplier: 1.0,
            selected_recipients: Vec::new(),
            pending_guesses: Vec::new(),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_sounds.iter().any(|s| s == id)
    }

    // guessed ⊆ selected, active ⊆ selected
    pub fn invariants_hold(&self) -> bool {
        self.guessed_correctly.iter().all(|id| self.is_selected(id))
            && self.active_sounds.iter().all(|id| self.is_selected(id))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::fresh(&Rules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{GUESS_SECONDS, ROUND_SECONDS};

    #[test]
    fn fresh_session_defaults() {
        let s = GameSession::default();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.time_remaining, ROUND_SECONDS);
        assert_eq!(s.guess_time_remaining, GUESS_SECONDS);
        assert_eq!(s.points_multiplier, 1.0);
        assert!(s.invariants_hold());
    }

    #[test]
    fn stray_credit_breaks_invariant() {
        let mut s = GameSession::default();
        s.guessed_correctly.insert("dog".into());
        assert!(!s.invariants_hold());
        s.selected_sounds.push("dog".into());
        assert!(s.invariants_hold());
    }
}
