use std::time::Duration;

use engine::audio::{Melody, Tone};
use engine::surface::SurfaceSize;
use serde::{Deserialize, Serialize};

use crate::confetti::ConfettiField;
use crate::fireworks::{FireworksSession, SESSION_DURATION};
use crate::gender::{reveal_text, GenderChoice, RevealText};
use crate::puzzle_core::{PuzzleCore, PuzzleEvent, TileId};
use crate::reveal::{RevealCue, RevealPhase, RevealSequence};
use crate::rng::Rng;
use crate::settings::Settings;
use crate::sfx;
use crate::stage::{Stage, StageEffect, StageEvent};

/// Grace delay between picking a gender card and leaving stage 1.
pub const SELECT_GRACE_DELAY: Duration = Duration::from_millis(500);
/// How long a rejected tile shakes. Render-only; no puzzle state changes.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Things the shell must do that the state cannot (audio, canvas chrome).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEffect {
    PlayTone { tone: Tone, volume: f32 },
    PlayMelody { melody: Melody, volume: f32 },
    HideFireworksCanvas,
}

/// Every way the player can poke the game, already resolved from raw
/// pointer/touch events by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameInput {
    SelectGender(GenderChoice),
    BeginTileDrag(TileId),
    DropTile { tile: TileId, slot: usize },
    CancelDrag,
    ContinuePressed,
    ToggleSound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ShakeState {
    tile: TileId,
    #[serde(with = "crate::serde_duration")]
    remaining: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PendingAdvance {
    #[serde(with = "crate::serde_duration")]
    remaining: Duration,
}

/// The whole session: stage machine plus the engines the current stage
/// needs. Each engine owns its collections exclusively; everything external
/// goes through `handle_input` and `update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub stage: Stage,
    pub puzzle: PuzzleCore,
    pub settings: Settings,
    reveal: Option<RevealSequence>,
    fireworks: Option<FireworksSession>,
    confetti: Option<ConfettiField>,
    gender: Option<GenderChoice>,
    shake: Option<ShakeState>,
    pending_advance: Option<PendingAdvance>,
    fireworks_hidden: bool,
    bounds: SurfaceSize,
    fx_rng: Rng,
    fx_seed: u64,
}

impl GameState {
    pub fn new(seed: u64, bounds: SurfaceSize, settings: Settings) -> Self {
        Self {
            stage: Stage::default(),
            puzzle: PuzzleCore::new(seed),
            settings,
            reveal: None,
            fireworks: None,
            confetti: None,
            gender: None,
            shake: None,
            pending_advance: None,
            fireworks_hidden: false,
            bounds,
            fx_rng: Rng::new(seed ^ 0xF1BE_F1BE),
            fx_seed: seed,
        }
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    pub fn gender(&self) -> Option<GenderChoice> {
        self.gender
    }

    /// The session token is read exactly here, once per frame of the reveal
    /// screen; the puzzle and fireworks engines never see it.
    pub fn reveal_text(&self) -> RevealText {
        reveal_text(self.gender)
    }

    pub fn reveal_phase(&self) -> Option<RevealPhase> {
        self.reveal.map(|r| r.phase())
    }

    pub fn fireworks(&self) -> Option<&FireworksSession> {
        self.fireworks.as_ref()
    }

    pub fn confetti(&self) -> Option<&ConfettiField> {
        self.confetti.as_ref()
    }

    /// Tile currently shaking off a rejected drop, if any.
    pub fn shaking_tile(&self) -> Option<TileId> {
        self.shake.map(|s| s.tile)
    }

    /// Shaking tile plus time left on the shake, for render wobble.
    pub fn shake(&self) -> Option<(TileId, Duration)> {
        self.shake.map(|s| (s.tile, s.remaining))
    }

    pub fn fireworks_visible(&self) -> bool {
        !self.fireworks_hidden
            && self
                .fireworks
                .as_ref()
                .map(|f| !f.is_finished())
                .unwrap_or(false)
    }

    pub fn resize(&mut self, bounds: SurfaceSize) {
        self.bounds = bounds;
        if let Some(fw) = self.fireworks.as_mut() {
            fw.resize(bounds);
        }
    }

    pub fn handle_input(&mut self, input: GameInput) -> Vec<GameEffect> {
        let mut effects = Vec::new();
        match input {
            GameInput::SelectGender(choice) => {
                if self.stage == Stage::GenderSelect && self.pending_advance.is_none() {
                    self.gender = Some(choice);
                    self.pending_advance = Some(PendingAdvance {
                        remaining: SELECT_GRACE_DELAY,
                    });
                    self.push_tone(&mut effects, sfx::success_tone(), sfx::UI_SFX_VOLUME);
                }
            }
            GameInput::BeginTileDrag(tile) => {
                if self.stage == Stage::Puzzle {
                    self.puzzle.begin_drag(tile);
                }
            }
            GameInput::DropTile { tile, slot } => {
                if self.stage == Stage::Puzzle {
                    for event in self.puzzle.attempt_drop(tile, slot) {
                        self.apply_puzzle_event(event, &mut effects);
                    }
                }
            }
            GameInput::CancelDrag => {
                self.puzzle.cancel_drag();
            }
            GameInput::ContinuePressed => {
                if self.stage == Stage::Puzzle && self.puzzle.is_complete() {
                    self.push_tone(&mut effects, sfx::success_tone(), sfx::UI_SFX_VOLUME);
                    self.dispatch_stage(StageEvent::ContinuePressed, &mut effects);
                }
            }
            GameInput::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                self.push_tone(&mut effects, sfx::click_tone(), sfx::UI_SFX_VOLUME);
            }
        }
        effects
    }

    pub fn update(&mut self, dt: Duration) -> Vec<GameEffect> {
        let mut effects = Vec::new();

        if let Some(pending) = self.pending_advance.as_mut() {
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                self.pending_advance = None;
                self.push_tone(&mut effects, sfx::success_tone(), sfx::UI_SFX_VOLUME);
                self.dispatch_stage(StageEvent::GenderChosen, &mut effects);
            }
        }

        if let Some(shake) = self.shake.as_mut() {
            shake.remaining = shake.remaining.saturating_sub(dt);
            if shake.remaining.is_zero() {
                self.shake = None;
            }
        }

        // Confetti and fireworks created by a cue inside this very update
        // have only lived since the phase boundary, not the whole frame.
        let mut overlay_dt = dt;
        if let Some(mut seq) = self.reveal {
            let cues = seq.tick(dt);
            if cues.contains(&RevealCue::StartFireworks) {
                overlay_dt = seq.phase_elapsed();
            }
            self.reveal = Some(seq);
            for cue in cues {
                self.apply_reveal_cue(cue, &mut effects);
            }
        }

        if let Some(confetti) = self.confetti.as_mut() {
            confetti.tick(overlay_dt);
            if confetti.is_done() {
                self.confetti = None;
            }
        }

        if let Some(fw) = self.fireworks.as_mut() {
            fw.advance_frame(overlay_dt, &mut self.fx_rng);
        }

        effects
    }

    /// Early, explicit fireworks teardown. Safe to call repeatedly.
    pub fn cancel_fireworks(&mut self) -> Vec<GameEffect> {
        let mut effects = Vec::new();
        if let Some(fw) = self.fireworks.as_mut() {
            fw.cancel();
        }
        self.hide_fireworks(&mut effects);
        effects
    }

    fn hide_fireworks(&mut self, effects: &mut Vec<GameEffect>) {
        if !self.fireworks_hidden {
            self.fireworks_hidden = true;
            effects.push(GameEffect::HideFireworksCanvas);
        }
    }

    fn dispatch_stage(&mut self, event: StageEvent, effects: &mut Vec<GameEffect>) {
        let (next, effect) = self.stage.handle(event);
        self.stage = next;
        match effect {
            StageEffect::None => {}
            StageEffect::InitPuzzle => {
                // Full teardown: prior tiles, slots and any in-flight drag
                // are discarded together.
                self.puzzle.initialize();
                self.shake = None;
            }
            StageEffect::StartReveal => {
                let seq = RevealSequence::new();
                for cue in seq.begin() {
                    self.apply_reveal_cue(cue, effects);
                }
                self.reveal = Some(seq);
            }
        }
    }

    fn apply_puzzle_event(&mut self, event: PuzzleEvent, effects: &mut Vec<GameEffect>) {
        match event {
            PuzzleEvent::TileSnapped(_) => {
                self.push_tone(effects, sfx::snap_tone(), sfx::SNAP_SFX_VOLUME);
            }
            PuzzleEvent::PlacementRejected(tile) => {
                self.shake = Some(ShakeState {
                    tile,
                    remaining: SHAKE_DURATION,
                });
            }
            PuzzleEvent::PuzzleCompleted => {
                self.push_melody(effects, sfx::complete_melody(), sfx::MELODY_SFX_VOLUME);
            }
        }
    }

    fn apply_reveal_cue(&mut self, cue: RevealCue, effects: &mut Vec<GameEffect>) {
        match cue {
            RevealCue::CountdownTick(digit) => {
                self.push_tone(effects, sfx::countdown_tone(digit), sfx::COUNTDOWN_SFX_VOLUME);
            }
            RevealCue::ShowMessage => {}
            RevealCue::SpawnConfetti => {
                self.confetti = Some(ConfettiField::new(self.bounds, self.fx_seed ^ 0xC0FE));
            }
            RevealCue::PlayRevealMelody => {
                self.push_melody(effects, sfx::reveal_melody(), sfx::MELODY_SFX_VOLUME);
            }
            RevealCue::StartFireworks => {
                self.fireworks_hidden = false;
                self.fireworks = Some(FireworksSession::new(SESSION_DURATION, self.bounds));
            }
            RevealCue::FireworksEnded => {
                if let Some(fw) = self.fireworks.as_mut() {
                    fw.cancel();
                }
                self.hide_fireworks(effects);
            }
        }
    }

    fn push_tone(&self, effects: &mut Vec<GameEffect>, tone: Tone, volume: f32) {
        if self.settings.sound_enabled {
            effects.push(GameEffect::PlayTone { tone, volume });
        }
    }

    fn push_melody(&self, effects: &mut Vec<GameEffect>, melody: Melody, volume: f32) {
        if self.settings.sound_enabled {
            effects.push(GameEffect::PlayMelody { melody, volume });
        }
    }
}
