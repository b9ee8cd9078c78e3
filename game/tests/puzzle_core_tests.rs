use game::puzzle_core::{PuzzleCore, PuzzleEvent, TILE_COUNT};

fn solve(core: &mut PuzzleCore) -> Vec<PuzzleEvent> {
    let drops: Vec<_> = core.tiles().iter().map(|t| (t.id, t.correct_slot)).collect();
    let mut events = Vec::new();
    for (tile, slot) in drops {
        core.begin_drag(tile);
        events.extend(core.attempt_drop(tile, slot));
    }
    events
}

#[test]
fn shuffled_assignment_is_a_permutation_for_many_seeds() {
    for seed in 0..32u64 {
        let mut core = PuzzleCore::new(seed);
        core.initialize();

        let mut slots: Vec<_> = core.tiles().iter().map(|t| t.correct_slot).collect();
        slots.sort_unstable();
        let expected: Vec<_> = (0..TILE_COUNT).collect();
        assert_eq!(slots, expected, "seed {seed} produced a non-permutation");
    }
}

#[test]
fn same_seed_reproduces_the_same_board() {
    let mut a = PuzzleCore::new(42);
    let mut b = PuzzleCore::new(42);
    a.initialize();
    b.initialize();
    assert_eq!(a.tiles(), b.tiles());
}

#[test]
fn solving_fires_nine_snaps_and_one_completion() {
    let mut core = PuzzleCore::new(3);
    core.initialize();

    let events = solve(&mut core);
    let snaps = events
        .iter()
        .filter(|e| matches!(e, PuzzleEvent::TileSnapped(_)))
        .count();
    let completions = events
        .iter()
        .filter(|e| matches!(e, PuzzleEvent::PuzzleCompleted))
        .count();

    assert_eq!(snaps, TILE_COUNT);
    assert_eq!(completions, 1);
    assert!(core.is_complete());
    assert_eq!(core.filled_count(), TILE_COUNT);
}

#[test]
fn wrong_slot_is_rejected_and_changes_nothing() {
    let mut core = PuzzleCore::new(7);
    core.initialize();

    let tile = core.tiles()[0];
    let wrong = (tile.correct_slot + 1) % TILE_COUNT;
    core.begin_drag(tile.id);
    let events = core.attempt_drop(tile.id, wrong);

    assert_eq!(events, vec![PuzzleEvent::PlacementRejected(tile.id)]);
    assert_eq!(core.filled_count(), 0);
    assert!(!core.tile(tile.id).unwrap().placed);
    assert_eq!(core.active_drag(), None);
}

#[test]
fn repeating_the_same_invalid_drop_rejects_identically() {
    let mut core = PuzzleCore::new(21);
    core.initialize();

    let tile = core.tiles()[0];
    let wrong = (tile.correct_slot + 1) % TILE_COUNT;

    core.begin_drag(tile.id);
    let first = core.attempt_drop(tile.id, wrong);
    assert_eq!(first, vec![PuzzleEvent::PlacementRejected(tile.id)]);

    let tiles = core.tiles().to_vec();
    let slots = core.slots().to_vec();

    // The exact same drop again: the same rejection, nothing accumulated.
    core.begin_drag(tile.id);
    let second = core.attempt_drop(tile.id, wrong);
    assert_eq!(second, first);
    assert_eq!(core.tiles(), tiles.as_slice());
    assert_eq!(core.slots(), slots.as_slice());
    assert_eq!(core.filled_count(), 0);
}

#[test]
fn occupied_slot_rejects_even_a_second_drop() {
    let mut core = PuzzleCore::new(9);
    core.initialize();

    let first = core.tiles()[0];
    core.begin_drag(first.id);
    core.attempt_drop(first.id, first.correct_slot);
    assert_eq!(core.filled_count(), 1);

    // A different tile aimed at the occupied slot bounces off.
    let other = core.tiles().iter().find(|t| !t.placed).copied().unwrap();
    core.begin_drag(other.id);
    let events = core.attempt_drop(other.id, first.correct_slot);
    assert_eq!(events, vec![PuzzleEvent::PlacementRejected(other.id)]);
    assert_eq!(core.filled_count(), 1);
}

#[test]
fn out_of_range_slot_is_rejected_without_panic() {
    let mut core = PuzzleCore::new(11);
    core.initialize();

    core.begin_drag(0);
    let events = core.attempt_drop(0, 999);
    assert_eq!(events, vec![PuzzleEvent::PlacementRejected(0)]);
    assert_eq!(core.filled_count(), 0);
}

#[test]
fn reinitialize_discards_all_progress() {
    let mut core = PuzzleCore::new(13);
    core.initialize();
    solve(&mut core);
    assert!(core.is_complete());

    core.initialize();
    assert!(!core.is_complete());
    assert_eq!(core.filled_count(), 0);
    assert!(core.tiles().iter().all(|t| !t.placed));

    // The puzzle is solvable again after the reset, and the completion
    // event fires again.
    let events = solve(&mut core);
    assert!(events.contains(&PuzzleEvent::PuzzleCompleted));
}
