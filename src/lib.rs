//! Flotilla: a turn-based naval strategy game on a 16x16 grid.
//!
//! `core` holds the whole simulation (board, targeting, pathfinding, move
//! animation, match state); `term` renders it with crossterm; `input` maps
//! keys to commands. The frame loop in the binary owns all three.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
