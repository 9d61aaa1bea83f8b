//! Frame-driven animation of unit moves.
//!
//! Board occupancy changes when the move starts; the mover only drags the
//! occupant's world transform along the path, one simulation tick at a time.
//! Moves for occupants that disappear mid-flight (destroyed, sold) are
//! silently dropped.

use crate::core::board::Board;
use crate::core::occupant::OccupantId;
use crate::core::path::Path;
use crate::types::{cell_center, Vec3, CELL_WORLD_SIZE, MOVE_SPEED};

#[derive(Debug, Clone)]
struct InFlightMove {
    id: OccupantId,
    /// Remaining waypoints in world space, front first.
    waypoints: Vec<Vec3>,
    /// Index of the next waypoint to reach.
    next: usize,
    /// Whether to restore the canonical facing once the path is exhausted.
    reset_rotation: bool,
}

/// Registry of in-flight moves, advanced once per tick.
#[derive(Debug, Clone, Default)]
pub struct Mover {
    moves: Vec<InFlightMove>,
}

impl Mover {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    pub fn is_moving(&self, id: OccupantId) -> bool {
        self.moves.iter().any(|m| m.id == id)
    }

    pub fn in_flight(&self) -> usize {
        self.moves.len()
    }

    /// Registers an animated move along `path` and returns the number of
    /// cells it covers, for move-cost accounting. At most one in-flight move
    /// per occupant is the caller's contract.
    pub fn start(&mut self, board: &Board, id: OccupantId, path: Path, reset_rotation: bool) -> usize {
        debug_assert!(!self.is_moving(id), "occupant already has an in-flight move");
        let steps = path.len();
        if steps == 0 || board.occupant(id).is_none() {
            return steps;
        }
        let waypoints = path.iter().map(|&(x, y)| cell_center(x, y)).collect();
        self.moves.push(InFlightMove { id, waypoints, next: 0, reset_rotation });
        steps
    }

    /// Drops the in-flight move for `id`, if any. The transform stays
    /// wherever the animation last put it.
    pub fn cancel(&mut self, id: OccupantId) {
        self.moves.retain(|m| m.id != id);
    }

    /// Advances every in-flight move by `elapsed_ms`, updating occupant
    /// transforms and removing moves whose path is exhausted.
    pub fn advance(&mut self, board: &mut Board, elapsed_ms: u32) {
        let travel = MOVE_SPEED * CELL_WORLD_SIZE * elapsed_ms as f32 / 1000.0;

        self.moves.retain_mut(|m| {
            let occupant = match board.occupant_mut(m.id) {
                Some(occupant) => occupant,
                // Destroyed mid-move: drop the entry.
                None => return false,
            };

            let mut remaining = travel;
            let mut position = occupant.transform.position;
            while m.next < m.waypoints.len() {
                let target = m.waypoints[m.next];
                let segment = position.distance(target);
                if segment > f32::EPSILON {
                    occupant.transform.rotation_y =
                        (target.x - position.x).atan2(target.z - position.z);
                }
                if remaining < segment {
                    position = position.lerp(target, remaining / segment);
                    occupant.transform.position = position;
                    return true;
                }
                remaining -= segment;
                position = target;
                m.next += 1;
            }

            // Path exhausted: land exactly on the final cell center.
            occupant.transform.position = position;
            if m.reset_rotation {
                occupant.transform.rotation_y = 0.0;
            }
            false
        });
    }
}
