mod common;

use common::*;
use noisequiz::catalog::SoundDescriptor;
use noisequiz::{AdjustOutcome, Controller, Phase};

// a Playing round at 30s with the given score (earned from a 0 dB sound)
fn playing_with_score_100() -> Controller<RecordingPlayback> {
    let mut c = single(SoundDescriptor::new("hum", "0-10 dB"));
    c.start_round();
    c.make_guess(Some("hum"));
    assert_eq!(c.session().score, 100);
    c
}

#[test]
fn shortening_pays_fifty() {
    let mut c = playing_with_score_100();
    assert_eq!(c.adjust_time(-10.0), AdjustOutcome::Adjusted { time: 20, score_delta: 50 });
    assert_eq!(c.session().time_remaining, 20);
    assert_eq!(c.session().score, 150);
    assert_eq!(c.session().points_multiplier, 1.5);
}

#[test]
fn extending_costs_twenty_five() {
    let mut c = playing_with_score_100();
    assert_eq!(c.adjust_time(10.0), AdjustOutcome::Adjusted { time: 40, score_delta: -25 });
    assert_eq!(c.session().score, 75);
    assert_eq!(c.session().points_multiplier, 0.75);
}

#[test]
fn clamped_shortening_still_pays() {
    let mut c = single(SoundDescriptor::new("hum", "0-10 dB"));
    c.start_round();
    run_seconds(&mut c, 15);
    assert_eq!(c.session().time_remaining, 15);
    c.adjust_time(-10.0);
    assert_eq!(c.session().time_remaining, 10);
    assert_eq!(c.session().score, 50);
    c.adjust_time(-10.0);
    assert_eq!(c.session().time_remaining, 10);
    assert_eq!(c.session().score, 100);
    assert_eq!(c.session().points_multiplier, 2.25);
}

#[test]
fn clamped_extension_still_costs() {
    let mut c = playing_with_score_100();
    for _ in 0..3 {
        c.adjust_time(10.0);
    }
    assert_eq!(c.session().time_remaining, 60);
    c.adjust_time(10.0);
    assert_eq!(c.session().time_remaining, 60);
    assert_eq!(c.session().score, 0);
    assert!((c.session().points_multiplier - 0.75f64.powi(4)).abs() < 1e-12);
}

#[test]
fn score_never_negative_from_trading() {
    let mut c = single(SoundDescriptor::new("hum", "0-10 dB"));
    c.start_round();
    for _ in 0..6 {
        c.adjust_time(10.0);
        assert!(c.session().score >= 0);
    }
    for _ in 0..6 {
        c.adjust_time(-10.0);
        assert!(c.session().score >= 0);
    }
}

#[test]
fn trading_pulls_wrong_guess_debt_back_to_zero() {
    let sounds = vec![
        SoundDescriptor::new("hum", "0-10 dB"),
        SoundDescriptor::new("birds", "30-45 dB"),
    ];
    let mut c = controller_with(sounds, RecordingPlayback::failing(&["birds"]), 1);
    c.start_round();
    for _ in 0..5 {
        c.make_guess(Some("birds"));
    }
    assert_eq!(c.session().score, -100);
    c.adjust_time(-10.0);
    assert_eq!(c.session().score, 0);
}

#[test]
fn bad_deltas_are_no_ops() {
    let mut c = playing_with_score_100();
    for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, 0.4] {
        assert_eq!(c.adjust_time(delta), AdjustOutcome::Ignored, "{delta}");
    }
    assert_eq!(c.session().score, 100);
    assert_eq!(c.session().time_remaining, 30);
    assert_eq!(c.session().points_multiplier, 1.0);
}

#[test]
fn huge_deltas_clamp_to_the_bounds() {
    let mut c = playing_with_score_100();
    assert_eq!(c.adjust_time(1e300), AdjustOutcome::Adjusted { time: 60, score_delta: -25 });
    assert_eq!(c.session().score, 75);
    assert_eq!(c.session().points_multiplier, 0.75);

    assert_eq!(c.adjust_time(-1e300), AdjustOutcome::Adjusted { time: 10, score_delta: 50 });
    assert_eq!(c.session().time_remaining, 10);
    assert_eq!(c.session().score, 125);
    assert_eq!(c.session().points_multiplier, 1.125);
}

#[test]
fn only_while_listening() {
    let mut c = single(SoundDescriptor::new("hum", "0-10 dB"));
    assert_eq!(c.adjust_time(-10.0), AdjustOutcome::Ignored);
    c.start_round();
    run_seconds(&mut c, 30);
    assert_eq!(c.phase(), Phase::Guessing);
    assert_eq!(c.adjust_time(-10.0), AdjustOutcome::Ignored);
    assert_eq!(c.session().score, 0);
}

#[test]
fn trade_moves_the_live_countdown() {
    let mut c = single(SoundDescriptor::new("hum", "0-10 dB"));
    c.start_round();
    c.adjust_time(-20.0);
    assert_eq!(c.session().time_remaining, 10);
    run_seconds(&mut c, 10);
    assert_eq!(c.phase(), Phase::Guessing);
}
