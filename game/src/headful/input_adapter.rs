//! Turns per-frame pointer input into game inputs.
//!
//! Mouse and touch already arrive unified as `InputFrame`; this layer adds
//! the drag gesture on top: press on a tray tile starts a drag, release
//! over a grid slot drops it, release anywhere else cancels.

use engine::app::InputFrame;

use crate::puzzle_core::TileId;
use crate::stage::Stage;
use crate::state::{GameInput, GameState};
use crate::ui::Layout;

#[derive(Debug, Clone, Copy, Default)]
pub struct DragGesture {
    dragging: Option<TileId>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<TileId> {
        self.dragging
    }

    /// Resolves one frame of pointer input against the current layout and
    /// stage. At most one press-triggered input fires per frame.
    pub fn apply(
        &mut self,
        input: &InputFrame,
        layout: &Layout,
        state: &GameState,
    ) -> Vec<GameInput> {
        let mut out = Vec::new();

        let pos = match input.pointer_pos {
            Some(pos) => pos,
            None => {
                // Pointer left the window mid-drag.
                if input.released && self.dragging.take().is_some() {
                    out.push(GameInput::CancelDrag);
                }
                return out;
            }
        };
        let (x, y) = pos;

        if input.pressed {
            if layout.hit_sound_toggle(x, y) {
                out.push(GameInput::ToggleSound);
                return out;
            }
            match state.stage {
                Stage::GenderSelect => {
                    if let Some(choice) = layout.hit_gender_card(x, y) {
                        out.push(GameInput::SelectGender(choice));
                    }
                }
                Stage::Puzzle => {
                    if state.puzzle.is_complete() && layout.hit_continue(x, y) {
                        out.push(GameInput::ContinuePressed);
                    } else if let Some(tile) = layout.hit_tray_tile(x, y) {
                        let free = state
                            .puzzle
                            .tile(tile)
                            .map(|t| !t.placed)
                            .unwrap_or(false);
                        if free {
                            self.dragging = Some(tile);
                            out.push(GameInput::BeginTileDrag(tile));
                        }
                    }
                }
                Stage::Reveal => {}
            }
        }

        if input.released {
            if let Some(tile) = self.dragging.take() {
                match layout.hit_slot(x, y) {
                    Some(slot) => out.push(GameInput::DropTile { tile, slot }),
                    None => out.push(GameInput::CancelDrag),
                }
            }
        }

        out
    }
}
