//! Board tests - placement, large footprints and the covered-cell table.

use flotilla::core::{Board, UnitKind};
use flotilla::types::{cell_center, Team, GRID_SIZE};

#[test]
fn test_board_starts_empty() {
    let board = Board::new();
    for y in 0..GRID_SIZE as i16 {
        for x in 0..GRID_SIZE as i16 {
            assert!(board.at(x, y).is_none(), "cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_out_of_bounds_lookups() {
    let board = Board::new();
    assert!(board.at(-1, 0).is_none());
    assert!(board.at(0, -1).is_none());
    assert!(board.at(GRID_SIZE as i16, 0).is_none());
    assert!(board.at(0, GRID_SIZE as i16).is_none());
}

#[test]
fn test_single_cell_placement() {
    let mut board = Board::new();
    let id = board.place(UnitKind::Submarine, Some(Team::One), 3, 11);
    let occupant = board.at(3, 11).expect("occupant should resolve");
    assert_eq!(occupant.id, id);
    assert_eq!(occupant.kind, UnitKind::Submarine);
    assert_eq!(occupant.team, Some(Team::One));
    assert_eq!(occupant.health, Some(100));
    assert_eq!(occupant.transform.position, cell_center(3, 11));
}

#[test]
fn test_large_placement_covers_four_cells() {
    let mut board = Board::new();
    let id = board.place(UnitKind::Base, Some(Team::Two), 10, 4);
    for (x, y) in [(10, 4), (11, 4), (10, 5), (11, 5)] {
        assert_eq!(board.at(x, y).map(|o| o.id), Some(id), "cell ({}, {})", x, y);
    }
    for (x, y) in [(9, 4), (12, 4), (10, 3), (10, 6)] {
        assert!(board.at(x, y).is_none(), "cell ({}, {}) should stay empty", x, y);
    }
}

#[test]
fn test_large_anchor_snaps_to_even() {
    let mut board = Board::new();
    let id = board.place(UnitKind::Island, None, 15, 9);
    let occupant = board.occupant(id).unwrap();
    assert_eq!(occupant.anchor, (14, 8));
    // The snapped footprint never leaves the grid.
    assert!(board.at(15, 9).is_some());
    assert_eq!(occupant.transform.position, cell_center(14, 8));
}

#[test]
fn test_large_placement_clears_footprint_first() {
    let mut board = Board::new();
    let sub_a = board.place(UnitKind::Submarine, Some(Team::One), 6, 6);
    let sub_b = board.place(UnitKind::Submarine, Some(Team::One), 7, 7);
    let island = board.place(UnitKind::Island, None, 6, 6);
    assert!(board.occupant(sub_a).is_none());
    assert!(board.occupant(sub_b).is_none());
    assert_eq!(board.at(7, 7).map(|o| o.id), Some(island));
}

#[test]
fn test_destroy_clears_covered_cells() {
    let mut board = Board::new();
    let id = board.place(UnitKind::Base, Some(Team::One), 0, 0);
    board.destroy(id);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(board.at(x, y).is_none());
    }
    // The freed footprint accepts new placements.
    let sub = board.place(UnitKind::Submarine, Some(Team::Two), 1, 1);
    assert_eq!(board.at(1, 1).map(|o| o.id), Some(sub));
}

#[test]
fn test_destroy_at_any_covered_cell_removes_the_whole_occupant() {
    let mut board = Board::new();
    board.place(UnitKind::Island, None, 8, 8);
    let removed = board.destroy_at(9, 9).expect("covered cell should resolve");
    assert_eq!(removed.kind, UnitKind::Island);
    assert!(board.at(8, 8).is_none());
}

#[test]
fn test_move_at_is_purely_logical() {
    let mut board = Board::new();
    let id = board.place(UnitKind::AircraftCarrier, Some(Team::Two), 12, 1);
    let before = board.occupant(id).unwrap().transform.position;
    board.move_at((12, 1), (12, 4));
    assert!(board.at(12, 1).is_none());
    assert_eq!(board.at(12, 4).map(|o| o.id), Some(id));
    // The world transform is the mover's job, not the board's.
    assert_eq!(board.occupant(id).unwrap().transform.position, before);
}
