mod common;

use std::collections::HashSet;

use common::*;
use noisequiz::catalog::SoundDescriptor;
use noisequiz::config::Rules;
use noisequiz::game::format::format_sounds;
use noisequiz::{GameSession, Phase, StartOutcome};

#[test]
fn full_round_idle_to_idle() {
    let mut c = controller(42);

    let StartOutcome::Started { sounds } = c.start_round() else {
        panic!("round should start");
    };
    assert!((1..=5).contains(&sounds));
    assert_eq!(c.phase(), Phase::Playing);
    assert_eq!(c.session().time_remaining, 30);
    let selected: HashSet<String> = c.session().selected_sounds.iter().cloned().collect();
    assert_eq!(c.playback().looping, selected);
    assert!(c.playback().plays().iter().all(|(_, o)| o.looped));

    run_seconds(&mut c, 29);
    assert_eq!(c.phase(), Phase::Playing);
    assert_eq!(c.session().time_remaining, 1);
    run_seconds(&mut c, 1);
    assert_eq!(c.phase(), Phase::Guessing);
    assert_eq!(c.session().guess_time_remaining, 10);
    assert!(c.playback().looping.is_empty(), "audio paused while guessing");

    run_seconds(&mut c, 10);
    assert_eq!(c.phase(), Phase::Ended);
    assert!(c.timer_id().is_none());
    let summary = c.summary().expect("summary after the round");
    assert_eq!(summary.final_score, c.session().score);
    assert_eq!(summary.sounds_text, format_sounds(&c.session().selected_sounds));
    assert!(c.session().active_sounds.is_empty());

    c.reset();
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(*c.session(), GameSession::fresh(&Rules::default()));
    assert!(c.summary().is_none());
    assert!(c.timer_id().is_none());
}

#[test]
fn selection_is_one_to_five_distinct_sounds() {
    for seed in 0..64 {
        let mut c = controller(seed);
        c.start_round();
        let selected = &c.session().selected_sounds;
        assert!((1..=5).contains(&selected.len()), "seed {seed}: {selected:?}");
        let distinct: HashSet<&String> = selected.iter().collect();
        assert_eq!(distinct.len(), selected.len());
        assert!(c.session().invariants_hold());
    }
}

#[test]
fn starting_again_while_playing_replays_the_same_sounds() {
    let mut c = controller(3);
    c.start_round();
    let first = c.session().selected_sounds.clone();
    let old_timer = c.timer_id().unwrap();
    run_seconds(&mut c, 5);

    assert_eq!(c.start_round(), StartOutcome::Replayed);
    assert_eq!(c.session().selected_sounds, first);
    assert_ne!(c.timer_id(), Some(old_timer));
    assert_eq!(c.session().time_remaining, 25);
    assert_eq!(c.playback().plays().len(), first.len() * 2);

    // the cancelled countdown can't move the clock anymore
    c.on_second(old_timer);
    assert_eq!(c.session().time_remaining, 25);
}

#[test]
fn start_waits_for_reset_after_listening() {
    let mut c = controller(5);
    c.start_round();
    run_seconds(&mut c, 30);
    assert_eq!(c.start_round(), StartOutcome::Ignored);
    run_seconds(&mut c, 10);
    assert_eq!(c.start_round(), StartOutcome::Ignored);
    c.reset();
    assert!(matches!(c.start_round(), StartOutcome::Started { .. }));
}

#[test]
fn reset_mid_round_silences_everything() {
    let mut c = controller(8);
    c.start_round();
    let timer = c.timer_id().unwrap();
    c.reset();
    assert!(c.playback().looping.is_empty());

    c.on_second(timer);
    c.tick(100.0);
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.session().time_remaining, 30);
}

#[test]
fn frame_ticks_accumulate_into_seconds() {
    let mut c = controller(9);
    c.start_round();
    c.tick(0.5);
    assert_eq!(c.session().time_remaining, 30);
    c.tick(0.5);
    assert_eq!(c.session().time_remaining, 29);
    c.tick(f64::NAN);
    assert_eq!(c.session().time_remaining, 29);

    // a long stall rolls straight into the guessing countdown
    c.tick(30.0);
    assert_eq!(c.phase(), Phase::Guessing);
    assert_eq!(c.session().guess_time_remaining, 9);
}

#[test]
fn empty_catalog_never_starts() {
    let mut c = controller_with(vec![], RecordingPlayback::default(), 1);
    assert_eq!(c.start_round(), StartOutcome::Ignored);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.playback().calls.is_empty());
}

#[test]
fn failed_preloads_drop_out_of_the_round() {
    let playback = RecordingPlayback::failing(&["birds", "car_horn"]);
    let mut c = controller_with(five_sounds(), playback, 0);
    assert_eq!(c.guessable_sounds().len(), 3);
    assert!(!c.is_playable("birds"));

    for seed in 0..32 {
        let mut c = controller_with(five_sounds(), RecordingPlayback::failing(&["birds", "car_horn"]), seed);
        c.start_round();
        let selected = &c.session().selected_sounds;
        assert!(!selected.contains(&"birds".to_string()));
        assert!(!selected.contains(&"car_horn".to_string()));
        assert!(selected.len() <= 3);
    }

    // everything broken is the same as an empty catalog
    let all = ["car_horn", "train_whistle", "ambulance_siren", "birds", "lawn_mower"];
    c = controller_with(five_sounds(), RecordingPlayback::failing(&all), 0);
    assert_eq!(c.start_round(), StartOutcome::Ignored);
}

#[test]
fn ambient_sounds_are_never_drawn_on_their_own() {
    for seed in 0..32 {
        let mut sounds = five_sounds();
        sounds.push(tone());
        let mut c = controller_with(sounds, RecordingPlayback::default(), seed);
        c.start_round();
        assert!(!c.session().is_selected("tinnitus"));
    }
}

#[test]
fn tinnitus_recipient_adds_the_ambient_track() {
    let mut sounds = vec![SoundDescriptor::new("hum", "0-10 dB")];
    sounds.push(tone());
    let mut c = controller_with(sounds, RecordingPlayback::default(), 1);
    assert!(c.toggle_recipient("kids"));
    c.start_round();

    assert_eq!(c.session().selected_sounds, vec!["hum", "tinnitus"]);
    assert!(c.playback().looping.contains("tinnitus"));
    let ds = c.display_state();
    assert!(ds.guessable.iter().all(|g| g.id != "tinnitus"));
    assert!(c.session().invariants_hold());
}

#[test]
fn sensitivity_recipient_boosts_loud_sounds_only() {
    let sounds = vec![
        SoundDescriptor::new("car_horn", "90-110 dB"),
        SoundDescriptor::new("birds", "30-45 dB"),
        SoundDescriptor::new("odd", "quite loud"),
    ];
    // across many draws, whichever sounds get played
    for seed in 0..64 {
        let mut c = controller_with(sounds.clone(), RecordingPlayback::default(), seed);
        c.toggle_recipient("pets");
        c.start_round();
        for (id, opts) in c.playback().plays() {
            let expected = if id == "car_horn" { Some(3.0) } else { None };
            assert_eq!(opts.gain_adjust_db, expected, "{id}");
        }
    }
}

#[test]
fn stress_recipient_shortens_listening() {
    let mut c = controller(2);
    c.toggle_recipient("nurses");
    c.start_round();
    assert_eq!(c.session().time_remaining, 20);
    run_seconds(&mut c, 20);
    assert_eq!(c.phase(), Phase::Guessing);
}

#[test]
fn unknown_risk_function_changes_nothing() {
    let mut c = controller(2);
    c.toggle_recipient("plants");
    c.start_round();
    assert_eq!(c.session().time_remaining, 30);
    assert!(c.playback().plays().iter().all(|(_, o)| o.gain_adjust_db.is_none()));
}

#[test]
fn recipients_only_toggle_in_idle_and_clear_on_reset() {
    let mut c = controller(4);
    assert!(c.toggle_recipient("kids"));
    assert!(c.toggle_recipient("pets"));
    assert!(c.toggle_recipient("kids"));
    assert_eq!(c.session().selected_recipients, vec!["pets"]);
    assert!(!c.toggle_recipient("nobody"));

    c.start_round();
    assert!(!c.toggle_recipient("kids"));
    run_seconds(&mut c, 40);
    assert_eq!(c.summary().unwrap().recipients_text, "ljubimci");

    c.reset();
    assert!(c.session().selected_recipients.is_empty());
}
