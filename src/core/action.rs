//! The closed set of unit actions.
//!
//! Actions are plain data: each variant carries its full configuration
//! (radius, price, target unit kind) so a unit's capability list is just a
//! static slice of these values. Immediate actions resolve as soon as they
//! are chosen; select-square actions wait for a follow-up cell pick and
//! describe their legal targets through [`Selection`].

use crate::core::occupant::UnitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Relocate along a found path. Costs one move from the turn allowance.
    Move { radius: u8 },
    /// Strike an enemy unit in line of sight. Costs money, not a move.
    Attack { damage: i32, radius: u8, price: i32 },
    /// Place a newly purchased unit on a free cell near the base.
    Buy { unit: UnitKind, price: i32, radius: u8 },
    /// Replace this unit with its upgraded variant at the same cell.
    Upgrade { into: UnitKind, price: i32 },
    /// Replace the base with its upgraded variant; also raises the owner's
    /// move cap and per-turn income.
    BaseUpgrade { into: UnitKind, price: i32, moves_cap: u32, income: i32 },
    /// Remove this unit and refund part of its price.
    Sell { refund: i32 },
}

/// How an action resolves once chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Immediate,
    SelectSquare,
}

/// Target-selection geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Four orthogonal rays out of the origin.
    Cross,
    /// Cross plus diagonal fill: every cell within Chebyshev distance.
    Area,
}

/// Post-geometry filter on the legal target set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    /// Only unoccupied cells (movement, unit placement).
    Empty,
    /// Only cells holding an opposing-team unit. The occupied cell that stops
    /// a ray is itself a legal candidate here.
    Enemy,
}

/// Full target-selection configuration for a select-square action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub shape: Shape,
    pub radius: u8,
    /// When set, occupied cells cast shadows that occlude cells behind them.
    pub blockable: bool,
    pub filter: TargetFilter,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move { .. } | Action::Attack { .. } | Action::Buy { .. } => {
                ActionKind::SelectSquare
            }
            Action::Upgrade { .. } | Action::BaseUpgrade { .. } | Action::Sell { .. } => {
                ActionKind::Immediate
            }
        }
    }

    /// Selection geometry, for select-square actions only.
    pub fn selection(&self) -> Option<Selection> {
        match *self {
            Action::Move { radius } => Some(Selection {
                shape: Shape::Cross,
                radius,
                blockable: true,
                filter: TargetFilter::Empty,
            }),
            Action::Attack { radius, .. } => Some(Selection {
                shape: Shape::Area,
                radius,
                blockable: true,
                filter: TargetFilter::Enemy,
            }),
            Action::Buy { radius, .. } => Some(Selection {
                shape: Shape::Area,
                radius,
                blockable: false,
                filter: TargetFilter::Empty,
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "MOVE",
            Action::Attack { .. } => "ATTACK",
            Action::Buy { unit: UnitKind::Submarine, .. } => "BUY SUBMARINE",
            Action::Buy { unit: UnitKind::AircraftCarrier, .. } => "BUY CARRIER",
            Action::Buy { .. } => "BUY UNIT",
            Action::Upgrade { .. } | Action::BaseUpgrade { .. } => "UPGRADE",
            Action::Sell { .. } => "SELL",
        }
    }

    /// Money this action takes from (positive) or returns to (negative) the
    /// wallet when it applies.
    pub fn price(&self) -> i32 {
        match *self {
            Action::Move { .. } => 0,
            Action::Attack { price, .. } => price,
            Action::Buy { price, .. } => price,
            Action::Upgrade { price, .. } => price,
            Action::BaseUpgrade { price, .. } => price,
            Action::Sell { refund } => -refund,
        }
    }

    /// Short line for the action menu, e.g. `-250$`.
    pub fn info_text(&self) -> String {
        let price = self.price();
        if price > 0 {
            format!("-{}$", price)
        } else if price < 0 {
            format!("+{}$", -price)
        } else {
            String::new()
        }
    }
}
