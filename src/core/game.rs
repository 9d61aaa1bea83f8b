//! Match state machine - turn ownership, wallets, selection bookkeeping and
//! win detection.
//!
//! The machine cycles through awaiting-selection, unit-selected and
//! action-pending states, driven by two input events: "cell picked" and
//! "action index chosen". Money and the per-turn move allowance only change
//! through [`Game::add_money`] and [`Game::take_move`] so there is a single
//! accounting path.

use log::{debug, info};

use crate::core::action::{Action, ActionKind};
use crate::core::board::Board;
use crate::core::mover::Mover;
use crate::core::occupant::{OccupantId, UnitKind};
use crate::core::path::find_path;
use crate::core::targeting::{compute_targets, CellSet};
use crate::types::{Team, BASE_INCOME, BASE_MOVES_CAP, STARTING_MONEY};

/// Policy rejection: the attempted operation simply does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    InsufficientFunds,
    NoMovesLeft,
    NoPath,
    InvalidTarget,
    NothingSelected,
    NoSuchAction,
    UnitBusy,
    MatchOver,
}

impl ActionError {
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::InsufficientFunds => "insufficient_funds",
            ActionError::NoMovesLeft => "no_moves_left",
            ActionError::NoPath => "no_path",
            ActionError::InvalidTarget => "invalid_target",
            ActionError::NothingSelected => "nothing_selected",
            ActionError::NoSuchAction => "no_such_action",
            ActionError::UnitBusy => "unit_busy",
            ActionError::MatchOver => "match_over",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ActionError::InsufficientFunds => "not enough money",
            ActionError::NoMovesLeft => "no moves left this turn",
            ActionError::NoPath => "no route to that cell",
            ActionError::InvalidTarget => "cell is not a legal target",
            ActionError::NothingSelected => "no unit selected",
            ActionError::NoSuchAction => "unit has no such action",
            ActionError::UnitBusy => "unit is still moving",
            ActionError::MatchOver => "the match is over",
        }
    }
}

/// Coarse state for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    UnitSelected,
    ActionPending,
    GameOver,
}

#[derive(Debug, Clone)]
struct PlayerState {
    money: i32,
    moves_left: u32,
    moves_cap: u32,
    income: i32,
}

impl PlayerState {
    fn new() -> Self {
        Self {
            money: STARTING_MONEY,
            moves_left: BASE_MOVES_CAP,
            moves_cap: BASE_MOVES_CAP,
            income: BASE_INCOME,
        }
    }
}

/// Complete match state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mover: Mover,
    players: [PlayerState; 2],
    active: Team,
    turn: u32,
    selected: Option<(u8, u8)>,
    /// Index into the selected unit's action list while a select-square
    /// action awaits its follow-up cell pick.
    pending: Option<usize>,
    highlights: CellSet,
    winner: Option<Team>,
}

impl Game {
    /// Creates a match with the standard setup: one base, one submarine and
    /// one carrier per side, and a few neutral islands in between.
    pub fn new() -> Self {
        let mut game = Self::empty();
        game.board.place(UnitKind::Base, Some(Team::One), 0, 6);
        game.board.place(UnitKind::Base, Some(Team::Two), 14, 6);
        game.board.place(UnitKind::Island, None, 6, 2);
        game.board.place(UnitKind::Island, None, 8, 8);
        game.board.place(UnitKind::Island, None, 4, 12);
        game.board.place(UnitKind::Submarine, Some(Team::One), 2, 5);
        game.board.place(UnitKind::AircraftCarrier, Some(Team::One), 2, 9);
        game.board.place(UnitKind::Submarine, Some(Team::Two), 13, 5);
        game.board.place(UnitKind::AircraftCarrier, Some(Team::Two), 13, 9);
        game
    }

    /// Creates a match with an empty board. Used by tests and setup code
    /// that places its own occupants.
    pub fn empty() -> Self {
        Self {
            board: Board::new(),
            mover: Mover::new(),
            players: [PlayerState::new(), PlayerState::new()],
            active: Team::One,
            turn: 0,
            selected: None,
            pending: None,
            highlights: CellSet::new(),
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active_player(&self) -> Team {
        self.active
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn money(&self, team: Team) -> i32 {
        self.players[team.ix()].money
    }

    pub fn moves_left(&self, team: Team) -> u32 {
        self.players[team.ix()].moves_left
    }

    pub fn moves_cap(&self, team: Team) -> u32 {
        self.players[team.ix()].moves_cap
    }

    pub fn income(&self, team: Team) -> i32 {
        self.players[team.ix()].income
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn highlights(&self) -> &CellSet {
        &self.highlights
    }

    pub fn selected_cell(&self) -> Option<(u8, u8)> {
        self.selected
    }

    pub fn selected_occupant(&self) -> Option<&crate::core::occupant::Occupant> {
        let (x, y) = self.selected?;
        self.board.at(x as i16, y as i16)
    }

    /// Action list of the selected unit, for the action menu.
    pub fn action_menu(&self) -> &'static [Action] {
        self.selected_occupant()
            .map(|o| o.kind.actions())
            .unwrap_or(&[])
    }

    pub fn pending_action(&self) -> Option<Action> {
        let index = self.pending?;
        self.action_menu().get(index).copied()
    }

    pub fn phase(&self) -> Phase {
        if self.winner.is_some() {
            Phase::GameOver
        } else if self.pending.is_some() {
            Phase::ActionPending
        } else if self.selected.is_some() {
            Phase::UnitSelected
        } else {
            Phase::AwaitingSelection
        }
    }

    /// Advances in-flight move animations by one frame delta.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.mover.advance(&mut self.board, elapsed_ms);
    }

    pub fn is_animating(&self) -> bool {
        self.mover.in_flight() > 0
    }

    /// Input event: cell (x, y) was picked.
    ///
    /// While an action is pending this completes (or rejects) it; otherwise
    /// it selects an active-player unit, and picking anything else is a
    /// no-op.
    pub fn pick_cell(&mut self, x: u8, y: u8) -> Result<(), ActionError> {
        if self.winner.is_some() {
            return Err(ActionError::MatchOver);
        }
        if self.pending.is_some() {
            return self.complete_pending(x, y);
        }
        if let Some(occupant) = self.board.at(x as i16, y as i16) {
            if occupant.team == Some(self.active) {
                self.selected = Some((x, y));
                self.highlights.clear();
            }
        }
        Ok(())
    }

    /// Input event: action index N was chosen for the selected unit.
    ///
    /// Immediate actions resolve synchronously; select-square actions leave
    /// the machine awaiting a follow-up cell pick. Choosing a new
    /// select-square action replaces any pending one.
    pub fn choose_action(&mut self, index: usize) -> Result<(), ActionError> {
        if self.winner.is_some() {
            return Err(ActionError::MatchOver);
        }
        let cell = self.selected.ok_or(ActionError::NothingSelected)?;
        let occupant = self
            .board
            .at(cell.0 as i16, cell.1 as i16)
            .ok_or(ActionError::NothingSelected)?;
        let id = occupant.id;
        let action = *occupant
            .kind
            .actions()
            .get(index)
            .ok_or(ActionError::NoSuchAction)?;

        if action.price() > self.players[self.active.ix()].money {
            return Err(ActionError::InsufficientFunds);
        }

        match action.kind() {
            ActionKind::Immediate => {
                self.pending = None;
                self.highlights.clear();
                self.apply_immediate(id, action);
                self.selected = None;
                Ok(())
            }
            ActionKind::SelectSquare => {
                if matches!(action, Action::Move { .. }) {
                    if self.players[self.active.ix()].moves_left == 0 {
                        return Err(ActionError::NoMovesLeft);
                    }
                    // One in-flight move per occupant: the animation must
                    // land before the unit can set off again.
                    if self.mover.is_moving(id) {
                        return Err(ActionError::UnitBusy);
                    }
                }
                let selection = match action.selection() {
                    Some(selection) => selection,
                    None => unreachable!("select-square actions carry a selection"),
                };
                self.highlights = compute_targets(&self.board, cell, selection, self.active);
                self.pending = Some(index);
                debug!(
                    "action pending: {} from ({}, {}), {} legal targets",
                    action.name(),
                    cell.0,
                    cell.1,
                    self.highlights.len()
                );
                Ok(())
            }
        }
    }

    /// Back navigation: clears a pending action without cost, or drops the
    /// unit selection when no action is pending.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.highlights.clear();
        } else {
            self.selected = None;
        }
    }

    /// Swaps the active player, restores their move allowance, pays their
    /// per-turn income and bumps the turn number.
    pub fn end_turn(&mut self) {
        if self.winner.is_some() {
            return;
        }
        self.selected = None;
        self.pending = None;
        self.highlights.clear();

        self.active = self.active.opponent();
        self.turn += 1;
        let player = &mut self.players[self.active.ix()];
        player.moves_left = player.moves_cap;
        let income = player.income;
        self.add_money(self.active, income);
        debug!(
            "turn {}: {} to play, {}$ in the bank",
            self.turn,
            self.active.as_str(),
            self.money(self.active)
        );
    }

    fn complete_pending(&mut self, x: u8, y: u8) -> Result<(), ActionError> {
        let index = match self.pending.take() {
            Some(index) => index,
            None => unreachable!("complete_pending requires a pending action"),
        };
        let targets = std::mem::take(&mut self.highlights);
        let cell = self.selected.take().ok_or(ActionError::NothingSelected)?;
        if !targets.contains(x, y) {
            return Err(ActionError::InvalidTarget);
        }
        let occupant = self
            .board
            .at(cell.0 as i16, cell.1 as i16)
            .ok_or(ActionError::NothingSelected)?;
        let id = occupant.id;
        let action = occupant.kind.actions()[index];

        match action {
            Action::Move { .. } => {
                let path = find_path(&self.board, cell, (x, y), true);
                if path.is_empty() {
                    return Err(ActionError::NoPath);
                }
                // Occupancy transfers at animation start; the mover only
                // drags the transform after this point.
                self.board.move_at(cell, (x, y));
                let steps = self.mover.start(&self.board, id, path, true);
                debug!("move: ({}, {}) -> ({}, {}), {} cells", cell.0, cell.1, x, y, steps);
                self.take_move(self.active);
                Ok(())
            }
            Action::Attack { damage, price, .. } => {
                let target = self
                    .board
                    .at(x as i16, y as i16)
                    .ok_or(ActionError::InvalidTarget)?
                    .id;
                self.add_money(self.active, -price);
                debug!("attack: ({}, {}) for {} damage", x, y, damage);
                self.apply_damage(target, damage);
                Ok(())
            }
            Action::Buy { unit, price, .. } => {
                self.add_money(self.active, -price);
                self.board.place(unit, Some(self.active), x, y);
                debug!("bought {} at ({}, {})", unit.name(), x, y);
                Ok(())
            }
            _ => unreachable!("immediate actions never pend"),
        }
    }

    fn apply_immediate(&mut self, id: OccupantId, action: Action) {
        self.add_money(self.active, -action.price());
        match action {
            Action::Sell { .. } => {
                debug!("sold unit for {}$", -action.price());
                self.destroy_occupant(id);
            }
            Action::Upgrade { into, .. } | Action::BaseUpgrade { into, .. } => {
                // Replace in place: not a combat destruction, so the win
                // check does not run.
                let (team, anchor) = match self.board.destroy(id) {
                    Some(occupant) => (occupant.team, occupant.anchor),
                    None => return,
                };
                let team = match team {
                    Some(team) => team,
                    None => unreachable!("only owned units upgrade"),
                };
                self.mover.cancel(id);
                self.board.place(into, Some(team), anchor.0, anchor.1);
                if let Action::BaseUpgrade { moves_cap, income, .. } = action {
                    let player = &mut self.players[team.ix()];
                    player.moves_cap = moves_cap;
                    player.income = income;
                }
                debug!("upgraded to {}", into.name());
            }
            _ => unreachable!("select-square actions are not immediate"),
        }
    }

    fn apply_damage(&mut self, id: OccupantId, damage: i32) {
        let destroyed = match self.board.occupant_mut(id) {
            Some(occupant) => occupant.apply_health(-damage),
            None => false,
        };
        if destroyed {
            self.destroy_occupant(id);
        }
    }

    fn destroy_occupant(&mut self, id: OccupantId) {
        self.mover.cancel(id);
        if let Some(occupant) = self.board.destroy(id) {
            if occupant.kind.is_base() {
                if let Some(team) = occupant.team {
                    let winner = team.opponent();
                    self.winner = Some(winner);
                    info!("{} base destroyed: {} wins", team.as_str(), winner.as_str());
                }
            }
        }
    }

    /// The single mutation point for wallets.
    fn add_money(&mut self, team: Team, delta: i32) {
        let player = &mut self.players[team.ix()];
        player.money += delta;
        debug_assert!(player.money >= 0, "wallet went negative");
    }

    /// The single mutation point for the move allowance.
    fn take_move(&mut self, team: Team) {
        let player = &mut self.players[team.ix()];
        debug_assert!(player.moves_left > 0, "move allowance exhausted");
        player.moves_left = player.moves_left.saturating_sub(1);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
