use serde::{Deserialize, Serialize};

use crate::rng::Rng;

pub const GRID_SIDE: usize = 3;
pub const TILE_COUNT: usize = GRID_SIDE * GRID_SIDE;

pub type TileId = usize;

/// A draggable piece. `correct_slot` is its fixed semantic identity;
/// `placed` only ever transitions false -> true within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub correct_slot: usize,
    pub placed: bool,
}

/// A fixed drop target in the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub position: usize,
    pub filled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleEvent {
    TileSnapped(TileId),
    PlacementRejected(TileId),
    PuzzleCompleted,
}

/// The 3x3 drag-and-drop puzzle state machine.
///
/// Owns tiles and slots exclusively; callers mutate only through
/// `begin_drag` / `attempt_drop` / `cancel_drag`, which are shared by
/// pointer and touch input paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleCore {
    tiles: Vec<Tile>,
    slots: Vec<Slot>,
    active_drag: Option<TileId>,
    complete: bool,
    rng: Rng,
}

impl PuzzleCore {
    pub fn new(seed: u64) -> Self {
        Self {
            tiles: Vec::new(),
            slots: Vec::new(),
            active_drag: None,
            complete: false,
            rng: Rng::new(seed),
        }
    }

    /// Rebuilds slots and tiles from scratch. `correct_slot` values are a
    /// uniform permutation of 0..9; a tile whose shuffled assignment equals
    /// its display index is fine (no derangement guarantee, by design).
    ///
    /// Always permitted mid-session; all prior progress is discarded.
    pub fn initialize(&mut self) {
        self.slots = (0..TILE_COUNT)
            .map(|position| Slot {
                position,
                filled: false,
            })
            .collect();

        let mut assignment: Vec<usize> = (0..TILE_COUNT).collect();
        self.rng.shuffle(&mut assignment);
        self.tiles = assignment
            .into_iter()
            .enumerate()
            .map(|(id, correct_slot)| Tile {
                id,
                correct_slot,
                placed: false,
            })
            .collect();

        self.active_drag = None;
        self.complete = false;
    }

    pub fn is_initialized(&self) -> bool {
        !self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn active_drag(&self) -> Option<TileId> {
        self.active_drag
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.filled).count()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Marks `tile` as the active drag subject. Silent no-op for unknown or
    /// already-placed tiles.
    pub fn begin_drag(&mut self, tile: TileId) -> bool {
        match self.tiles.get(tile) {
            Some(t) if !t.placed => {
                self.active_drag = Some(tile);
                true
            }
            _ => false,
        }
    }

    /// Clears the active drag subject (pointer released outside any slot).
    pub fn cancel_drag(&mut self) {
        self.active_drag = None;
    }

    /// Resolves a drop of `tile` onto `target_slot`.
    ///
    /// No-op without an active drag subject. A correct, unfilled target
    /// places the tile and emits `TileSnapped` (plus `PuzzleCompleted` once,
    /// on the ninth placement); anything else emits `PlacementRejected` and
    /// changes no state. The active drag subject is cleared either way.
    pub fn attempt_drop(&mut self, tile: TileId, target_slot: usize) -> Vec<PuzzleEvent> {
        let Some(active) = self.active_drag.take() else {
            return Vec::new();
        };
        if active != tile {
            // Stale gesture from a previous drag; drop it on the floor.
            return Vec::new();
        }
        let Some(&t) = self.tiles.get(tile) else {
            return Vec::new();
        };
        let Some(&slot) = self.slots.get(target_slot) else {
            return vec![PuzzleEvent::PlacementRejected(tile)];
        };

        // Slot occupancy is the collision invariant: a filled slot rejects
        // the drop even when the position matches.
        if t.placed || slot.filled || t.correct_slot != target_slot {
            return vec![PuzzleEvent::PlacementRejected(tile)];
        }

        self.tiles[tile].placed = true;
        self.slots[target_slot].filled = true;

        let mut events = vec![PuzzleEvent::TileSnapped(tile)];
        if self.check_completion() {
            events.push(PuzzleEvent::PuzzleCompleted);
        }
        events
    }

    /// Sets the complete flag when all slots are filled. Idempotent: returns
    /// true only on the transition, so the completion event fires once per
    /// initialization.
    fn check_completion(&mut self) -> bool {
        if self.complete {
            return false;
        }
        if self.filled_count() == TILE_COUNT {
            self.complete = true;
            return true;
        }
        false
    }
}
