//! Target selection: which cells a pending select-square action may legally
//! complete onto.
//!
//! Geometry is computed fresh from board occupancy on every call; nothing is
//! cached. Blockable selections model line of sight: each ray stops at the
//! first occupied cell, and the diagonal fill of area selections tracks a
//! two-axis shadow bitmask per diagonal direction so occupied cells occlude a
//! cone behind them instead of a single cell.

use crate::core::action::{Selection, Shape, TargetFilter};
use crate::core::board::Board;
use crate::types::{cell_index, index_to_cell, Team, CELL_COUNT};

/// Set of board cells, one bit per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSet([u64; 4]);

impl CellSet {
    pub fn new() -> Self {
        Self([0; 4])
    }

    pub fn insert(&mut self, x: u8, y: u8) {
        if let Some(index) = cell_index(x as i16, y as i16) {
            self.0[index / 64] |= 1 << (index % 64);
        }
    }

    pub fn contains(&self, x: u8, y: u8) -> bool {
        match cell_index(x as i16, y as i16) {
            Some(index) => self.0[index / 64] >> (index % 64) & 1 == 1,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    pub fn clear(&mut self) {
        self.0 = [0; 4];
    }

    /// Iterates set cells in linear-index order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let words = self.0;
        (0..CELL_COUNT)
            .filter(move |&i| words[i / 64] >> (i % 64) & 1 == 1)
            .map(index_to_cell)
    }
}

/// Computes the legal target set for `selection` out of `origin`.
///
/// The origin itself is never included and out-of-bounds cells are clipped.
/// `team` is the acting side, used by the enemy filter.
pub fn compute_targets(board: &Board, origin: (u8, u8), selection: Selection, team: Team) -> CellSet {
    let mut set = CellSet::new();
    // Enemy-targeting actions may target the occupied cell that stops a ray;
    // everything behind it stays occluded.
    let include_blockers = selection.filter == TargetFilter::Enemy;

    cross_rays(board, origin, &selection, include_blockers, &mut set);
    if selection.shape == Shape::Area {
        diagonal_fill(board, origin, &selection, include_blockers, &mut set);
    }

    if selection.filter == TargetFilter::Enemy {
        set = retain_enemies(board, team, &set);
    }
    set
}

fn cross_rays(
    board: &Board,
    origin: (u8, u8),
    selection: &Selection,
    include_blockers: bool,
    set: &mut CellSet,
) {
    for (dx, dy) in [(1i16, 0i16), (-1, 0), (0, 1), (0, -1)] {
        for step in 1..=selection.radius as i16 {
            let x = origin.0 as i16 + dx * step;
            let y = origin.1 as i16 + dy * step;
            if cell_index(x, y).is_none() {
                break;
            }
            if board.is_occupied(x, y) {
                if include_blockers {
                    set.insert(x as u8, y as u8);
                }
                if selection.blockable {
                    break;
                }
                continue;
            }
            set.insert(x as u8, y as u8);
        }
    }
}

/// Fills the four diagonal quadrants of the selection diamond.
///
/// Each quadrant keeps two shadow masks: bit `i` of `row_shadow` marks
/// horizontal offset `i` as occluded, bit `j` of `col_shadow` marks vertical
/// offset `j`. A candidate is dropped when either of its offsets is already
/// shadowed by an occupied cell on a nearer ring; occupied cells found on the
/// current ring only start shadowing from the next ring out.
fn diagonal_fill(
    board: &Board,
    origin: (u8, u8),
    selection: &Selection,
    include_blockers: bool,
    set: &mut CellSet,
) {
    debug_assert!(selection.radius < 32, "shadow masks hold 32 offsets");
    for (sx, sy) in [(1i16, 1i16), (1, -1), (-1, 1), (-1, -1)] {
        let mut row_shadow: u32 = 0;
        let mut col_shadow: u32 = 0;
        for d in 1..=selection.radius as i16 {
            let mut ring_row: u32 = 0;
            let mut ring_col: u32 = 0;
            let mut visit = |i: i16, j: i16, ring_row: &mut u32, ring_col: &mut u32, set: &mut CellSet| {
                let x = origin.0 as i16 + sx * i;
                let y = origin.1 as i16 + sy * j;
                if cell_index(x, y).is_none() {
                    return;
                }
                let shadowed = selection.blockable
                    && (row_shadow >> i & 1 == 1 || col_shadow >> j & 1 == 1);
                if board.is_occupied(x, y) {
                    if selection.blockable {
                        *ring_row |= 1 << i;
                        *ring_col |= 1 << j;
                    }
                    if include_blockers && !shadowed {
                        set.insert(x as u8, y as u8);
                    }
                    return;
                }
                if !shadowed {
                    set.insert(x as u8, y as u8);
                }
            };
            // Ring `d` off the cross: the diagonal cell plus the sweeps back
            // toward the row and column of the origin.
            for i in 1..=d {
                visit(i, d, &mut ring_row, &mut ring_col, set);
            }
            for j in 1..d {
                visit(d, j, &mut ring_row, &mut ring_col, set);
            }
            row_shadow |= ring_row;
            col_shadow |= ring_col;
        }
    }
}

fn retain_enemies(board: &Board, team: Team, set: &CellSet) -> CellSet {
    let mut out = CellSet::new();
    for (x, y) in set.iter() {
        if let Some(occupant) = board.at(x as i16, y as i16) {
            if occupant.team == Some(team.opponent()) {
                out.insert(x, y);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::occupant::UnitKind;

    fn cross(radius: u8, blockable: bool) -> Selection {
        Selection { shape: Shape::Cross, radius, blockable, filter: TargetFilter::Empty }
    }

    fn area(radius: u8, blockable: bool) -> Selection {
        Selection { shape: Shape::Area, radius, blockable, filter: TargetFilter::Empty }
    }

    #[test]
    fn cell_set_basics() {
        let mut set = CellSet::new();
        assert!(set.is_empty());
        set.insert(0, 0);
        set.insert(15, 15);
        set.insert(15, 15);
        assert_eq!(set.len(), 2);
        assert!(set.contains(0, 0));
        assert!(!set.contains(1, 0));
        let cells: Vec<_> = set.iter().collect();
        assert_eq!(cells, vec![(0, 0), (15, 15)]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn unobstructed_cross_reaches_full_radius() {
        let board = Board::new();
        let set = compute_targets(&board, (8, 8), cross(3, true), Team::One);
        assert_eq!(set.len(), 12);
        for step in 1..=3u8 {
            assert!(set.contains(8 + step, 8));
            assert!(set.contains(8 - step, 8));
            assert!(set.contains(8, 8 + step));
            assert!(set.contains(8, 8 - step));
        }
        assert!(!set.contains(8, 8));
        assert!(!set.contains(9, 9));
    }

    #[test]
    fn blockable_cross_stops_at_first_occupied_cell() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::Two), 9, 8);
        let set = compute_targets(&board, (8, 8), cross(3, true), Team::One);

        // West, north and south rays are untouched.
        for (x, y) in [(7, 8), (6, 8), (5, 8), (8, 9), (8, 10), (8, 11), (8, 7), (8, 6), (8, 5)] {
            assert!(set.contains(x, y), "expected ({x}, {y})");
        }
        // The blocker and everything behind it are out.
        assert!(!set.contains(9, 8));
        assert!(!set.contains(10, 8));
        assert!(!set.contains(11, 8));
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn non_blockable_cross_skips_only_the_occupied_cell() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::Two), 9, 8);
        let set = compute_targets(&board, (8, 8), cross(3, false), Team::One);
        assert!(!set.contains(9, 8));
        assert!(set.contains(10, 8));
        assert!(set.contains(11, 8));
        assert_eq!(set.len(), 11);
    }

    #[test]
    fn rays_truncate_at_the_board_edge() {
        let board = Board::new();
        let set = compute_targets(&board, (0, 0), cross(3, true), Team::One);
        assert_eq!(set.len(), 6);
        assert!(set.contains(3, 0));
        assert!(set.contains(0, 3));
    }

    #[test]
    fn empty_board_area_is_the_full_chebyshev_diamond() {
        let board = Board::new();
        let set = compute_targets(&board, (8, 8), area(3, true), Team::One);
        // 7x7 block minus the origin.
        assert_eq!(set.len(), 48);
        for dy in -3i16..=3 {
            for dx in -3i16..=3 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                assert!(set.contains((8 + dx) as u8, (8 + dy) as u8), "offset ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn empty_board_area_is_rotation_symmetric() {
        let board = Board::new();
        let set = compute_targets(&board, (8, 8), area(4, true), Team::One);
        for (x, y) in set.iter() {
            let (dx, dy) = (x as i16 - 8, y as i16 - 8);
            // 90-degree rotation about the origin.
            let (rx, ry) = (8 - dy, 8 + dx);
            assert!(set.contains(rx as u8, ry as u8), "rotation of ({x}, {y})");
        }
    }

    #[test]
    fn diagonal_blocker_shadows_its_row_and_column_offsets() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::Two), 9, 9);
        let set = compute_targets(&board, (8, 8), area(3, true), Team::One);

        // The occupied cell itself is never a movement target.
        assert!(!set.contains(9, 9));
        // Cells sharing one of the blocker's axis offsets on farther rings
        // fall inside its shadow cone.
        assert!(!set.contains(10, 9));
        assert!(!set.contains(11, 9));
        assert!(!set.contains(9, 10));
        assert!(!set.contains(9, 11));
        // The deeper diagonal keeps distinct offsets on both axes, so it
        // stays visible past the blocker.
        assert!(set.contains(10, 10));
        assert!(set.contains(11, 11));
        // Other quadrants are unaffected.
        assert!(set.contains(7, 7));
        assert!(set.contains(10, 7));
    }

    #[test]
    fn same_ring_cells_do_not_shadow_each_other() {
        let mut board = Board::new();
        // Blocker at offset (2, 2) of the (+, +) quadrant.
        board.place(UnitKind::Submarine, Some(Team::Two), 10, 10);
        let set = compute_targets(&board, (8, 8), area(2, true), Team::One);
        // (10, 9) and (9, 10) share an axis offset with the blocker but sit
        // on the same ring, so they are not occluded by it.
        assert!(set.contains(10, 9));
        assert!(set.contains(9, 10));
        assert!(set.contains(9, 9));
        assert!(!set.contains(10, 10));
    }

    #[test]
    fn non_blockable_area_only_excludes_occupied_cells() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::Two), 9, 9);
        let set = compute_targets(&board, (8, 8), area(3, false), Team::One);
        assert!(!set.contains(9, 9));
        assert!(set.contains(10, 9));
        assert!(set.contains(9, 10));
        assert_eq!(set.len(), 47);
    }

    #[test]
    fn enemy_filter_keeps_only_opposing_units() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::Two), 10, 8);
        board.place(UnitKind::Submarine, Some(Team::One), 8, 10);
        board.place(UnitKind::Island, None, 4, 8);
        let selection = Selection {
            shape: Shape::Area,
            radius: 4,
            blockable: true,
            filter: TargetFilter::Enemy,
        };
        let set = compute_targets(&board, (8, 8), selection, Team::One);
        let cells: Vec<_> = set.iter().collect();
        assert_eq!(cells, vec![(10, 8)]);
    }

    #[test]
    fn enemy_behind_a_blocker_is_not_targetable() {
        let mut board = Board::new();
        board.place(UnitKind::Submarine, Some(Team::One), 9, 8);
        board.place(UnitKind::Submarine, Some(Team::Two), 11, 8);
        let selection = Selection {
            shape: Shape::Cross,
            radius: 4,
            blockable: true,
            filter: TargetFilter::Enemy,
        };
        let set = compute_targets(&board, (8, 8), selection, Team::One);
        // The friendly blocker is the ray's candidate, but the filter drops
        // it, and the enemy behind it never enters the set.
        assert!(set.is_empty());
    }

    #[test]
    fn large_occupant_blocks_from_every_covered_cell() {
        let mut board = Board::new();
        board.place(UnitKind::Island, None, 10, 8);
        let set = compute_targets(&board, (8, 8), cross(4, true), Team::One);
        assert!(set.contains(9, 8));
        assert!(!set.contains(10, 8));
        assert!(!set.contains(11, 8));
        assert!(!set.contains(12, 8));
    }
}
