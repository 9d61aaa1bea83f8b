//! Board module - the square grid of occupiable cells.
//!
//! Storage is a flat array of owning occupant slots addressed by
//! `x + y * GRID_SIZE`. Large occupants own their anchor slot; the other three
//! covered cells are registered in a side table mapping covered index to
//! owning index, so `at` resolves to the same occupant from any of the four.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::core::occupant::{Occupant, OccupantId, UnitKind};
use crate::types::{cell_center, cell_index, Team, CELL_COUNT};

#[derive(Debug, Clone)]
pub struct Board {
    /// Owning slot per cell. For large occupants only the anchor is set here.
    cells: Vec<Option<OccupantId>>,
    /// Covered index -> owning (anchor) index, for the three non-anchor cells
    /// of each large occupant.
    covered: Vec<Option<usize>>,
    occupants: HashMap<OccupantId, Occupant>,
    next_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
            covered: vec![None; CELL_COUNT],
            occupants: HashMap::new(),
            next_id: 0,
        }
    }

    /// Occupant covering the cell, resolving through the covered-cell table.
    pub fn at(&self, x: i16, y: i16) -> Option<&Occupant> {
        let index = cell_index(x, y)?;
        let owner = match self.cells[index] {
            Some(id) => id,
            None => self.cells[self.covered[index]?]?,
        };
        self.occupants.get(&owner)
    }

    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        self.at(x, y).is_some()
    }

    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    pub fn occupant_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        self.occupants.get_mut(&id)
    }

    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.values()
    }

    /// Places a new occupant and returns its handle.
    ///
    /// Large occupants snap an odd anchor down to the nearest even coordinate
    /// and atomically clear their whole 2x2 footprint of any prior occupants.
    /// Placing a normal occupant on an occupied cell is a caller contract
    /// violation.
    pub fn place(&mut self, kind: UnitKind, team: Option<Team>, x: u8, y: u8) -> OccupantId {
        debug_assert!(cell_index(x as i16, y as i16).is_some());
        let id = OccupantId(self.next_id);
        self.next_id += 1;

        let anchor = if kind.is_large() {
            let anchor = (snap_even(x), snap_even(y));
            for (cx, cy) in footprint(anchor, true) {
                debug_assert!(
                    !self.at(cx as i16, cy as i16).map_or(false, Occupant::is_large),
                    "large footprints must not overlap"
                );
                self.destroy_at(cx as i16, cy as i16);
            }
            let anchor_index = match cell_index(anchor.0 as i16, anchor.1 as i16) {
                Some(i) => i,
                None => unreachable!(),
            };
            self.cells[anchor_index] = Some(id);
            for (cx, cy) in footprint(anchor, true) {
                if let Some(index) = cell_index(cx as i16, cy as i16) {
                    if index != anchor_index {
                        self.covered[index] = Some(anchor_index);
                    }
                }
            }
            anchor
        } else {
            debug_assert!(!self.is_occupied(x as i16, y as i16), "cell already occupied");
            if let Some(index) = cell_index(x as i16, y as i16) {
                self.cells[index] = Some(id);
            }
            (x, y)
        };

        let mut occupant = Occupant::new(id, kind, team, anchor);
        occupant.transform.position = cell_center(anchor.0, anchor.1);
        self.occupants.insert(id, occupant);
        id
    }

    /// Removes an occupant, clearing its owning slot and any covered-cell
    /// registrations. Returns the removed occupant.
    pub fn destroy(&mut self, id: OccupantId) -> Option<Occupant> {
        let occupant = self.occupants.remove(&id)?;
        let anchor_index = cell_index(occupant.anchor.0 as i16, occupant.anchor.1 as i16)?;
        self.cells[anchor_index] = None;
        if occupant.is_large() {
            for (cx, cy) in footprint(occupant.anchor, true) {
                if let Some(index) = cell_index(cx as i16, cy as i16) {
                    if self.covered[index] == Some(anchor_index) {
                        self.covered[index] = None;
                    }
                }
            }
        }
        Some(occupant)
    }

    pub fn destroy_at(&mut self, x: i16, y: i16) -> Option<Occupant> {
        let id = self.at(x, y)?.id;
        self.destroy(id)
    }

    /// Relocates an occupant's logical slot. This is the real effect of a
    /// completed move; the Mover animates the world transform separately.
    pub fn move_at(&mut self, from: (u8, u8), to: (u8, u8)) {
        let from_index = match cell_index(from.0 as i16, from.1 as i16) {
            Some(i) => i,
            None => return,
        };
        let to_index = match cell_index(to.0 as i16, to.1 as i16) {
            Some(i) => i,
            None => return,
        };
        debug_assert!(self.cells[from_index].is_some(), "no occupant at source cell");
        debug_assert!(
            self.cells[to_index].is_none() && self.covered[to_index].is_none(),
            "destination cell occupied"
        );
        let id = match self.cells[from_index].take() {
            Some(id) => id,
            None => return,
        };
        debug_assert!(
            self.occupants.get(&id).map_or(false, |o| !o.is_large()),
            "large occupants do not move"
        );
        self.cells[to_index] = Some(id);
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.anchor = to;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Snaps an odd coordinate to the even coordinate below it. Even side lengths
/// guarantee the resulting 2x2 footprint stays on the grid.
#[inline]
pub fn snap_even(v: u8) -> u8 {
    v & !1
}

/// Footprint cells for an anchor; a single cell for normal occupants.
pub fn footprint(anchor: (u8, u8), large: bool) -> ArrayVec<(u8, u8), 4> {
    let mut cells = ArrayVec::new();
    cells.push(anchor);
    if large {
        cells.push((anchor.0 + 1, anchor.1));
        cells.push((anchor.0, anchor.1 + 1));
        cells.push((anchor.0 + 1, anchor.1 + 1));
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{cell_center, GRID_SIZE};

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        for y in 0..GRID_SIZE as i16 {
            for x in 0..GRID_SIZE as i16 {
                assert!(!board.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn at_out_of_bounds_is_none() {
        let board = Board::new();
        assert!(board.at(-1, 0).is_none());
        assert!(board.at(0, -1).is_none());
        assert!(board.at(GRID_SIZE as i16, 0).is_none());
    }

    #[test]
    fn place_and_resolve_single_cell() {
        let mut board = Board::new();
        let id = board.place(UnitKind::Submarine, Some(Team::One), 5, 10);
        assert_eq!(board.at(5, 10).unwrap().id, id);
        assert!(board.at(6, 10).is_none());
        let occupant = board.occupant(id).unwrap();
        assert_eq!(occupant.anchor, (5, 10));
        assert_eq!(occupant.transform.position, cell_center(5, 10));
    }

    #[test]
    fn large_occupant_resolves_from_all_four_cells() {
        let mut board = Board::new();
        let id = board.place(UnitKind::Base, Some(Team::One), 4, 6);
        for (x, y) in [(4, 6), (5, 6), (4, 7), (5, 7)] {
            assert_eq!(board.at(x, y).unwrap().id, id, "cell ({x}, {y})");
        }
        assert!(board.at(6, 6).is_none());
        assert!(board.at(3, 6).is_none());
    }

    #[test]
    fn odd_anchor_snaps_down_to_even() {
        let mut board = Board::new();
        let id = board.place(UnitKind::Island, None, 7, 3);
        let occupant = board.occupant(id).unwrap();
        assert_eq!(occupant.anchor, (6, 2));
        assert_eq!(board.at(6, 2).unwrap().id, id);
        assert_eq!(board.at(7, 3).unwrap().id, id);
    }

    #[test]
    fn large_placement_clears_prior_occupants() {
        let mut board = Board::new();
        let sub = board.place(UnitKind::Submarine, Some(Team::Two), 8, 8);
        let base = board.place(UnitKind::Base, Some(Team::One), 8, 8);
        assert!(board.occupant(sub).is_none());
        assert_eq!(board.at(8, 8).unwrap().id, base);
        assert_eq!(board.at(9, 9).unwrap().id, base);
    }

    #[test]
    fn destroy_clears_all_covered_cells() {
        let mut board = Board::new();
        let id = board.place(UnitKind::Base, Some(Team::Two), 12, 12);
        assert!(board.destroy(id).is_some());
        for (x, y) in [(12, 12), (13, 12), (12, 13), (13, 13)] {
            assert!(!board.is_occupied(x, y));
        }
        // Double destroy is a no-op.
        assert!(board.destroy(id).is_none());
    }

    #[test]
    fn move_at_relocates_slot_and_anchor() {
        let mut board = Board::new();
        let id = board.place(UnitKind::Submarine, Some(Team::One), 2, 2);
        board.move_at((2, 2), (2, 5));
        assert!(!board.is_occupied(2, 2));
        assert_eq!(board.at(2, 5).unwrap().id, id);
        assert_eq!(board.occupant(id).unwrap().anchor, (2, 5));
    }

    #[test]
    fn footprint_shapes() {
        assert_eq!(footprint((3, 3), false).as_slice(), &[(3, 3)]);
        assert_eq!(
            footprint((4, 6), true).as_slice(),
            &[(4, 6), (5, 6), (4, 7), (5, 7)]
        );
    }
}
