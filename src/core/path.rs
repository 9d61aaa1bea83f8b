//! Breadth-first shortest paths on the 4-connected grid.

use std::collections::VecDeque;

use crate::core::board::Board;
use crate::types::{cell_index, index_to_cell, CELL_COUNT};

/// Ordered cells from start to goal, exclusive of start, inclusive of goal.
/// Empty means "no route" or "already there".
pub type Path = Vec<(u8, u8)>;

/// Finds a shortest path between two cells, stepping only to
/// Manhattan-adjacent cells. Occupied cells are impassable while
/// `avoid_obstacles` is set; any shortest path is acceptable, the search
/// order decides ties.
pub fn find_path(board: &Board, start: (u8, u8), goal: (u8, u8), avoid_obstacles: bool) -> Path {
    let start_index = match cell_index(start.0 as i16, start.1 as i16) {
        Some(i) => i,
        None => return Vec::new(),
    };
    let goal_index = match cell_index(goal.0 as i16, goal.1 as i16) {
        Some(i) => i,
        None => return Vec::new(),
    };
    if start_index == goal_index {
        return Vec::new();
    }
    if avoid_obstacles && board.is_occupied(goal.0 as i16, goal.1 as i16) {
        return Vec::new();
    }

    // Flat predecessor table doubles as the visited set.
    let mut came_from: Vec<Option<u16>> = vec![None; CELL_COUNT];
    came_from[start_index] = Some(start_index as u16);
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(start_index);

    while let Some(current) = queue.pop_front() {
        if current == goal_index {
            break;
        }
        let (cx, cy) = index_to_cell(current);
        for (dx, dy) in [(1i16, 0i16), (-1, 0), (0, 1), (0, -1)] {
            let nx = cx as i16 + dx;
            let ny = cy as i16 + dy;
            let next = match cell_index(nx, ny) {
                Some(i) => i,
                None => continue,
            };
            if came_from[next].is_some() {
                continue;
            }
            if avoid_obstacles && board.is_occupied(nx, ny) {
                continue;
            }
            came_from[next] = Some(current as u16);
            queue.push_back(next);
        }
    }

    if came_from[goal_index].is_none() {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = goal_index;
    while current != start_index {
        path.push(index_to_cell(current));
        current = match came_from[current] {
            Some(prev) => prev as usize,
            None => return Vec::new(),
        };
    }
    path.reverse();
    path
}
