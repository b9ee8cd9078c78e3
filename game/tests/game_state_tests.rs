use std::time::Duration;

use engine::surface::SurfaceSize;
use game::confetti::CONFETTI_COUNT;
use game::gender::GenderChoice;
use game::reveal::RevealPhase;
use game::settings::Settings;
use game::stage::Stage;
use game::state::{GameEffect, GameInput, GameState, SELECT_GRACE_DELAY, SHAKE_DURATION};

const BOUNDS: SurfaceSize = SurfaceSize::new(960, 720);

fn new_state() -> GameState {
    GameState::new(17, BOUNDS, Settings::default())
}

fn advance_to_puzzle(state: &mut GameState, choice: GenderChoice) {
    state.handle_input(GameInput::SelectGender(choice));
    state.update(SELECT_GRACE_DELAY);
    assert_eq!(state.stage, Stage::Puzzle);
}

fn solve_puzzle(state: &mut GameState) -> Vec<GameEffect> {
    let drops: Vec<_> = state
        .puzzle
        .tiles()
        .iter()
        .map(|t| (t.id, t.correct_slot))
        .collect();
    let mut effects = Vec::new();
    for (tile, slot) in drops {
        state.handle_input(GameInput::BeginTileDrag(tile));
        effects.extend(state.handle_input(GameInput::DropTile { tile, slot }));
    }
    effects
}

fn tone_count(effects: &[GameEffect], freq_hz: f32) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, GameEffect::PlayTone { tone, .. } if tone.freq_hz == freq_hz))
        .count()
}

#[test]
fn gender_selection_advances_after_the_grace_delay() {
    let mut state = new_state();
    let effects = state.handle_input(GameInput::SelectGender(GenderChoice::Female));
    assert_eq!(tone_count(&effects, 400.0), 1);

    // Still on stage 1 until the grace delay runs out.
    state.update(SELECT_GRACE_DELAY / 2);
    assert_eq!(state.stage, Stage::GenderSelect);

    state.update(SELECT_GRACE_DELAY);
    assert_eq!(state.stage, Stage::Puzzle);
    assert!(state.puzzle.is_initialized());
    assert_eq!(state.gender(), Some(GenderChoice::Female));
}

#[test]
fn second_card_press_during_the_grace_delay_is_ignored() {
    let mut state = new_state();
    state.handle_input(GameInput::SelectGender(GenderChoice::Male));
    let effects = state.handle_input(GameInput::SelectGender(GenderChoice::Female));
    assert!(effects.is_empty());

    state.update(SELECT_GRACE_DELAY);
    assert_eq!(state.gender(), Some(GenderChoice::Male));
}

#[test]
fn solving_the_board_plays_snaps_and_the_completion_melody() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);

    let effects = solve_puzzle(&mut state);
    assert_eq!(tone_count(&effects, 300.0), 9);
    let melodies = effects
        .iter()
        .filter(|e| matches!(e, GameEffect::PlayMelody { melody, .. } if melody.notes.len() == 3))
        .count();
    assert_eq!(melodies, 1);
    assert!(state.puzzle.is_complete());
}

#[test]
fn rejected_drop_starts_a_shake_that_decays() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);

    let tile = state.puzzle.tiles()[0];
    let wrong = (tile.correct_slot + 1) % 9;
    state.handle_input(GameInput::BeginTileDrag(tile.id));
    state.handle_input(GameInput::DropTile {
        tile: tile.id,
        slot: wrong,
    });
    assert_eq!(state.shaking_tile(), Some(tile.id));

    state.update(SHAKE_DURATION);
    assert_eq!(state.shaking_tile(), None);
}

#[test]
fn continue_is_ignored_until_the_board_is_complete() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);

    assert!(state.handle_input(GameInput::ContinuePressed).is_empty());
    assert_eq!(state.stage, Stage::Puzzle);

    solve_puzzle(&mut state);
    let effects = state.handle_input(GameInput::ContinuePressed);
    assert_eq!(state.stage, Stage::Reveal);
    // Success tone plus the first countdown blip (digit 3 -> 700 Hz).
    assert_eq!(tone_count(&effects, 400.0), 1);
    assert_eq!(tone_count(&effects, 700.0), 1);
    assert_eq!(state.reveal_phase(), Some(RevealPhase::Countdown { current: 3 }));
}

#[test]
fn countdown_then_everything_starts_at_once() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Female);
    solve_puzzle(&mut state);
    state.handle_input(GameInput::ContinuePressed);

    // Four seconds cross the remaining ticks (2, 1, 0) and the held zero.
    let effects = state.update(Duration::from_secs(4));
    assert_eq!(tone_count(&effects, 600.0), 1);
    assert_eq!(tone_count(&effects, 500.0), 1);
    assert_eq!(tone_count(&effects, 400.0), 1);
    let fanfares = effects
        .iter()
        .filter(|e| matches!(e, GameEffect::PlayMelody { melody, .. } if melody.notes.len() == 4))
        .count();
    assert_eq!(fanfares, 1);

    assert_eq!(state.reveal_phase(), Some(RevealPhase::Celebrate));
    assert!(state.fireworks().is_some());
    assert!(state.confetti().is_some());
    assert!(state.fireworks_visible());
    assert_eq!(state.reveal_text().greeting, "Raasathi!");
}

#[test]
fn overlays_only_age_by_the_time_past_the_countdown() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);
    solve_puzzle(&mut state);
    state.handle_input(GameInput::ContinuePressed);

    // One oversized frame crosses the whole 4 s countdown. The confetti and
    // fireworks it spawns have only lived through the second past the
    // boundary, so both must still be running.
    state.update(Duration::from_secs(5));

    let confetti = state.confetti().unwrap();
    assert!(confetti.live_count() > 0);
    assert!(confetti.spawned_count() < CONFETTI_COUNT);
    assert!(!state.fireworks().unwrap().is_finished());
}

#[test]
fn fireworks_canvas_hides_exactly_once_when_the_session_ends() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);
    solve_puzzle(&mut state);
    state.handle_input(GameInput::ContinuePressed);
    state.update(Duration::from_secs(4));

    let mut hides = 0usize;
    for _ in 0..3 {
        let effects = state.update(Duration::from_secs(31));
        hides += effects
            .iter()
            .filter(|e| matches!(e, GameEffect::HideFireworksCanvas))
            .count();
    }
    assert_eq!(hides, 1);
    assert!(!state.fireworks_visible());
    assert_eq!(state.reveal_phase(), Some(RevealPhase::Done));
}

#[test]
fn cancel_fireworks_is_idempotent() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);
    solve_puzzle(&mut state);
    state.handle_input(GameInput::ContinuePressed);
    state.update(Duration::from_secs(4));

    let first = state.cancel_fireworks();
    assert_eq!(
        first
            .iter()
            .filter(|e| matches!(e, GameEffect::HideFireworksCanvas))
            .count(),
        1
    );
    assert!(state.cancel_fireworks().is_empty());
    assert!(!state.fireworks_visible());
}

#[test]
fn muted_settings_silence_every_effect() {
    let settings = Settings {
        sound_enabled: false,
    };
    let mut state = GameState::new(17, BOUNDS, settings);

    assert!(state
        .handle_input(GameInput::SelectGender(GenderChoice::Male))
        .is_empty());
    state.update(SELECT_GRACE_DELAY);
    let effects = solve_puzzle(&mut state);
    assert!(effects
        .iter()
        .all(|e| !matches!(e, GameEffect::PlayTone { .. } | GameEffect::PlayMelody { .. })));
}

#[test]
fn toggling_sound_flips_the_setting_and_clicks_when_enabling() {
    let mut state = GameState::new(
        17,
        BOUNDS,
        Settings {
            sound_enabled: false,
        },
    );

    let effects = state.handle_input(GameInput::ToggleSound);
    assert!(state.settings.sound_enabled);
    assert_eq!(tone_count(&effects, 200.0), 1);

    let effects = state.handle_input(GameInput::ToggleSound);
    assert!(!state.settings.sound_enabled);
    assert!(effects.is_empty());
}

#[test]
fn resize_retargets_future_firework_spawns() {
    let mut state = new_state();
    advance_to_puzzle(&mut state, GenderChoice::Male);
    solve_puzzle(&mut state);
    state.handle_input(GameInput::ContinuePressed);
    state.update(Duration::from_secs(4));

    let small = SurfaceSize::new(320, 240);
    state.resize(small);
    assert_eq!(state.bounds(), small);
    assert_eq!(state.fireworks().map(|f| f.bounds()), Some(small));
}
