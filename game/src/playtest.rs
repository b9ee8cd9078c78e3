use engine::GameLogic;

use crate::puzzle_core::{PuzzleCore, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Noop,
    BeginDrag(TileId),
    Drop { tile: TileId, slot: usize },
    CancelDrag,
}

/// Headless driver for the puzzle board, for scripted playtests.
#[derive(Debug, Clone)]
pub struct PuzzleLogic {
    seed: u64,
}

impl PuzzleLogic {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GameLogic for PuzzleLogic {
    type State = PuzzleCore;
    type Input = InputAction;

    fn initial_state(&self) -> Self::State {
        let mut core = PuzzleCore::new(self.seed);
        core.initialize();
        core
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        match input {
            InputAction::Noop => {}
            InputAction::BeginDrag(tile) => {
                next.begin_drag(tile);
            }
            InputAction::Drop { tile, slot } => {
                next.attempt_drop(tile, slot);
            }
            InputAction::CancelDrag => {
                next.cancel_drag();
            }
        }
        next
    }
}

/// Script that solves the board: drag each tile to its correct slot.
pub fn solve_script(core: &PuzzleCore) -> Vec<InputAction> {
    let mut script = Vec::new();
    for tile in core.tiles() {
        if tile.placed {
            continue;
        }
        script.push(InputAction::BeginDrag(tile.id));
        script.push(InputAction::Drop {
            tile: tile.id,
            slot: tile.correct_slot,
        });
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::HeadlessRunner;

    #[test]
    fn solve_script_completes_the_board() {
        let logic = PuzzleLogic::new(77);
        let mut runner = HeadlessRunner::new(logic);
        let script = solve_script(runner.state());
        let steps = script.len();
        runner.run(script);
        assert!(runner.state().is_complete());
        assert_eq!(runner.frame(), steps);
    }

    #[test]
    fn noop_heavy_script_leaves_board_untouched() {
        let logic = PuzzleLogic::new(77);
        let mut runner = HeadlessRunner::new(logic);
        runner.run([InputAction::Noop, InputAction::CancelDrag, InputAction::Noop]);
        assert_eq!(runner.state().filled_count(), 0);
        assert!(!runner.state().is_complete());
    }
}
