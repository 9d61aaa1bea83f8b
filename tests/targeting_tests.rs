//! Target-set geometry on realistically crowded boards.

use flotilla::core::{compute_targets, Board, Selection, Shape, TargetFilter, UnitKind};
use flotilla::types::Team;

fn movement(radius: u8) -> Selection {
    Selection { shape: Shape::Cross, radius, blockable: true, filter: TargetFilter::Empty }
}

fn bombardment(radius: u8) -> Selection {
    Selection { shape: Shape::Area, radius, blockable: true, filter: TargetFilter::Enemy }
}

#[test]
fn test_single_blocker_cross_scenario() {
    let mut board = Board::new();
    board.place(UnitKind::Submarine, Some(Team::Two), 9, 8);
    let set = compute_targets(&board, (8, 8), movement(3), Team::One);

    // East ray dies at the blocker; the other three run the full radius.
    assert_eq!(set.len(), 9);
    assert!(!set.contains(9, 8));
    assert!(!set.contains(10, 8));
    assert!(!set.contains(11, 8));
    assert!(set.contains(5, 8));
    assert!(set.contains(8, 11));
    assert!(set.contains(8, 5));
}

#[test]
fn test_targets_never_include_origin_or_leave_the_diamond() {
    let mut board = Board::new();
    board.place(UnitKind::Island, None, 6, 6);
    board.place(UnitKind::Submarine, Some(Team::Two), 10, 8);
    board.place(UnitKind::AircraftCarrier, Some(Team::One), 8, 5);

    for radius in [2u8, 4, 6] {
        for shape in [Shape::Cross, Shape::Area] {
            let selection = Selection {
                shape,
                radius,
                blockable: true,
                filter: TargetFilter::Empty,
            };
            let set = compute_targets(&board, (8, 8), selection, Team::One);
            assert!(!set.contains(8, 8));
            for (x, y) in set.iter() {
                let d = (x as i16 - 8).abs().max((y as i16 - 8).abs());
                assert!(d <= radius as i16, "({x}, {y}) outside radius {radius}");
                assert!(!board.is_occupied(x as i16, y as i16));
                if shape == Shape::Cross {
                    assert!(x == 8 || y == 8, "({x}, {y}) off the cross");
                }
            }
        }
    }
}

#[test]
fn test_blocking_never_grows_the_target_set() {
    let mut board = Board::new();
    let empty_counts: Vec<usize> = (1..=6u8)
        .map(|r| compute_targets(&board, (8, 8), movement(r), Team::One).len())
        .collect();

    board.place(UnitKind::Island, None, 10, 8);
    board.place(UnitKind::Submarine, Some(Team::Two), 8, 10);
    for (radius, &baseline) in (1..=6u8).zip(&empty_counts) {
        let blocked = compute_targets(&board, (8, 8), movement(radius), Team::One);
        assert!(blocked.len() <= baseline, "radius {radius} grew under blockers");
    }
}

#[test]
fn test_bombardment_reaches_a_front_line_enemy_only() {
    let mut board = Board::new();
    // Screen of friendly units with one enemy peeking past it.
    board.place(UnitKind::Submarine, Some(Team::One), 9, 7);
    board.place(UnitKind::Submarine, Some(Team::One), 9, 8);
    board.place(UnitKind::Submarine, Some(Team::One), 9, 9);
    board.place(UnitKind::Submarine, Some(Team::Two), 10, 8);
    board.place(UnitKind::Submarine, Some(Team::Two), 8, 11);

    let set = compute_targets(&board, (8, 8), bombardment(4), Team::One);
    // (10, 8) hides behind the screen; (8, 11) is on an open ray.
    let cells: Vec<_> = set.iter().collect();
    assert_eq!(cells, vec![(8, 11)]);
}

#[test]
fn test_shadow_cone_behind_a_large_occupant() {
    let mut board = Board::new();
    board.place(UnitKind::Island, None, 10, 10);
    let selection = Selection {
        shape: Shape::Area,
        radius: 5,
        blockable: true,
        filter: TargetFilter::Empty,
    };
    let set = compute_targets(&board, (8, 8), selection, Team::One);

    // All four island cells sit in the (+, +) quadrant and occlude their
    // shared row and column offsets outward.
    assert!(set.contains(9, 9));
    assert!(!set.contains(12, 10));
    assert!(!set.contains(10, 12));
    assert!(!set.contains(12, 11));
    // Offsets past the island on both axes stay visible.
    assert!(set.contains(12, 12));
}

#[test]
fn test_corner_origin_clips_cleanly() {
    let board = Board::new();
    let set = compute_targets(&board, (15, 15), movement(6), Team::Two);
    assert_eq!(set.len(), 12);
    assert!(set.contains(9, 15));
    assert!(set.contains(15, 9));
    assert!(!set.contains(15, 15));
}
