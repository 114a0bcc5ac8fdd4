// Scoring rules. Pure functions, the controller does the bookkeeping.

pub const BASE_POINTS: i64 = 100;
pub const MIN_POINTS: i64 = 10;
pub const WRONG_GUESS_PENALTY: i64 = 20;

pub const SHORTEN_BONUS: i64 = 50;
pub const EXTEND_COST: i64 = 25;
pub const SHORTEN_FACTOR: f64 = 1.5;
pub const EXTEND_FACTOR: f64 = 0.75;

// Quieter sounds are harder to pick out, so they're worth more.
// No parseable floor means the minimum award.
pub fn base_points(amplitude_floor: Option<u32>) -> i64 {
    match amplitude_floor {
        Some(floor) => (BASE_POINTS - floor as i64).max(MIN_POINTS),
        None => MIN_POINTS,
    }
}

pub fn scaled_points(base: i64, multiplier: f64) -> i64 {
    (base as f64 * multiplier).round() as i64
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeTrade {
    pub time: u32,
    pub score: i64,
    pub multiplier: f64,
}

/// Trade listening time for points. The score/multiplier effect applies even
/// when the new time saturates at a bound.
pub fn trade_time(
    time: u32,
    score: i64,
    multiplier: f64,
    delta_secs: i64,
    min_secs: u32,
    max_secs: u32,
) -> TimeTrade {
    let time = (time as i64)
        .saturating_add(delta_secs)
        .clamp(min_secs as i64, max_secs as i64) as u32;
    let (score, multiplier) = match delta_secs.signum() {
        -1 => (score + SHORTEN_BONUS, multiplier * SHORTEN_FACTOR),
        1 => (score - EXTEND_COST, multiplier * EXTEND_FACTOR),
        _ => (score, multiplier),
    };
    TimeTrade {
        time,
        score: score.max(0),
        multiplier,
    }
}
