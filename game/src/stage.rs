use serde::{Deserialize, Serialize};

pub const STAGE_COUNT: u32 = 3;

/// The three screens of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    GenderSelect,
    Puzzle,
    Reveal,
}

impl Default for Stage {
    fn default() -> Self {
        Self::GenderSelect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEvent {
    /// The selection grace delay has elapsed; move on to the puzzle.
    GenderChosen,
    /// The continue affordance was used after the puzzle completed.
    ContinuePressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEffect {
    None,
    /// Tear down and rebuild the puzzle before showing it.
    InitPuzzle,
    /// Enter the countdown/reveal sequence.
    StartReveal,
}

impl Stage {
    /// Pure transition function for the stage machine.
    ///
    /// Side-effects (rebuilding the puzzle, starting the reveal sequence)
    /// are reported as `StageEffect` so callers stay deterministic and easy
    /// to test.
    pub fn handle(self, event: StageEvent) -> (Stage, StageEffect) {
        match (self, event) {
            (Stage::GenderSelect, StageEvent::GenderChosen) => {
                (Stage::Puzzle, StageEffect::InitPuzzle)
            }
            (Stage::Puzzle, StageEvent::ContinuePressed) => {
                (Stage::Reveal, StageEffect::StartReveal)
            }
            // Ignore irrelevant events in the current stage.
            (stage, _) => (stage, StageEffect::None),
        }
    }

    /// Progress-bar fraction, stage N of 3.
    pub fn progress(self) -> f32 {
        let n = match self {
            Stage::GenderSelect => 1,
            Stage::Puzzle => 2,
            Stage::Reveal => 3,
        };
        n as f32 / STAGE_COUNT as f32
    }
}
