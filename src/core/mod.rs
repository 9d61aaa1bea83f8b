//! Core game logic: the grid battlefield engine.
//!
//! Everything here is pure simulation state, owned and mutated by the single
//! frame loop. The terminal layer only reads transforms and highlight sets
//! produced here.

pub mod action;
pub mod board;
pub mod game;
pub mod mover;
pub mod occupant;
pub mod path;
pub mod targeting;

pub use action::{Action, ActionKind, Selection, Shape, TargetFilter};
pub use board::Board;
pub use game::{ActionError, Game, Phase};
pub use mover::Mover;
pub use occupant::{Occupant, OccupantId, UnitKind};
pub use path::find_path;
pub use targeting::{compute_targets, CellSet};
