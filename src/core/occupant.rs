//! Occupants: everything that can sit on a board cell.
//!
//! A unit's static configuration (health, footprint, action list) hangs off its
//! [`UnitKind`]; per-instance state (team, current health, anchor, world
//! transform) lives in [`Occupant`].

use crate::core::action::Action;
use crate::types::{Team, Transform};

/// Stable handle for an occupant, valid until it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccupantId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Base,
    BaseUpgrade1,
    BaseUpgrade2,
    Submarine,
    AircraftCarrier,
    AircraftCarrierUpgrade1,
    Island,
}

const BASE_HEALTH: i32 = 1000;
const SUBMARINE_HEALTH: i32 = 100;
const AIRCRAFT_CARRIER_HEALTH: i32 = 200;

const BUY_UNIT_RADIUS: u8 = 5;
const SUBMARINE_MOVE_RADIUS: u8 = 6;
const AIRCRAFT_CARRIER_MOVE_RADIUS: u8 = 2;

const BASE_ACTIONS: &[Action] = &[
    Action::Buy { unit: UnitKind::Submarine, price: 250, radius: BUY_UNIT_RADIUS },
    Action::Buy { unit: UnitKind::AircraftCarrier, price: 400, radius: BUY_UNIT_RADIUS },
    Action::BaseUpgrade { into: UnitKind::BaseUpgrade1, price: 900, moves_cap: 3, income: 300 },
];
const BASE_UPGRADE_1_ACTIONS: &[Action] = &[
    Action::Buy { unit: UnitKind::Submarine, price: 250, radius: BUY_UNIT_RADIUS },
    Action::Buy { unit: UnitKind::AircraftCarrier, price: 400, radius: BUY_UNIT_RADIUS },
    Action::BaseUpgrade { into: UnitKind::BaseUpgrade2, price: 1800, moves_cap: 4, income: 500 },
];
const BASE_UPGRADE_2_ACTIONS: &[Action] = &[
    Action::Buy { unit: UnitKind::Submarine, price: 250, radius: BUY_UNIT_RADIUS },
    Action::Buy { unit: UnitKind::AircraftCarrier, price: 400, radius: BUY_UNIT_RADIUS },
];
const SUBMARINE_ACTIONS: &[Action] = &[
    Action::Move { radius: SUBMARINE_MOVE_RADIUS },
    Action::Attack { damage: 40, radius: 3, price: 75 },
    Action::Sell { refund: 50 },
];
const AIRCRAFT_CARRIER_ACTIONS: &[Action] = &[
    Action::Move { radius: AIRCRAFT_CARRIER_MOVE_RADIUS },
    Action::Attack { damage: 75, radius: 6, price: 150 },
    Action::Upgrade { into: UnitKind::AircraftCarrierUpgrade1, price: 600 },
    Action::Sell { refund: 75 },
];
const AIRCRAFT_CARRIER_UPGRADE_1_ACTIONS: &[Action] = &[
    Action::Move { radius: AIRCRAFT_CARRIER_MOVE_RADIUS + 1 },
    Action::Attack { damage: 75, radius: 7, price: 250 },
    Action::Sell { refund: 100 },
];

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Base => "BASE",
            UnitKind::BaseUpgrade1 => "BASE MK2",
            UnitKind::BaseUpgrade2 => "BASE MK3",
            UnitKind::Submarine => "SUBMARINE",
            UnitKind::AircraftCarrier => "AIRCRAFT CARRIER",
            UnitKind::AircraftCarrierUpgrade1 => "AIRCRAFT CARRIER MK2",
            UnitKind::Island => "ISLAND",
        }
    }

    /// Large occupants cover a 2x2 footprint anchored at an even coordinate.
    pub fn is_large(&self) -> bool {
        matches!(
            self,
            UnitKind::Base | UnitKind::BaseUpgrade1 | UnitKind::BaseUpgrade2 | UnitKind::Island
        )
    }

    /// Bases are the win condition: lose yours and the match ends.
    pub fn is_base(&self) -> bool {
        matches!(
            self,
            UnitKind::Base | UnitKind::BaseUpgrade1 | UnitKind::BaseUpgrade2
        )
    }

    /// Neutral decorations carry no health bar.
    pub fn max_health(&self) -> Option<i32> {
        match self {
            UnitKind::Base | UnitKind::BaseUpgrade1 | UnitKind::BaseUpgrade2 => Some(BASE_HEALTH),
            UnitKind::Submarine => Some(SUBMARINE_HEALTH),
            UnitKind::AircraftCarrier | UnitKind::AircraftCarrierUpgrade1 => {
                Some(AIRCRAFT_CARRIER_HEALTH)
            }
            UnitKind::Island => None,
        }
    }

    pub fn actions(&self) -> &'static [Action] {
        match self {
            UnitKind::Base => BASE_ACTIONS,
            UnitKind::BaseUpgrade1 => BASE_UPGRADE_1_ACTIONS,
            UnitKind::BaseUpgrade2 => BASE_UPGRADE_2_ACTIONS,
            UnitKind::Submarine => SUBMARINE_ACTIONS,
            UnitKind::AircraftCarrier => AIRCRAFT_CARRIER_ACTIONS,
            UnitKind::AircraftCarrierUpgrade1 => AIRCRAFT_CARRIER_UPGRADE_1_ACTIONS,
            UnitKind::Island => &[],
        }
    }
}

/// One occupant instance on the board.
#[derive(Debug, Clone)]
pub struct Occupant {
    pub id: OccupantId,
    pub kind: UnitKind,
    /// `None` for neutral occupants (islands).
    pub team: Option<Team>,
    /// Current health; `None` for occupants without a health bar.
    pub health: Option<i32>,
    /// Anchor cell: the single cell for normal occupants, the even-aligned
    /// top-left cell of the footprint for large ones.
    pub anchor: (u8, u8),
    pub transform: Transform,
}

impl Occupant {
    pub fn new(id: OccupantId, kind: UnitKind, team: Option<Team>, anchor: (u8, u8)) -> Self {
        Self {
            id,
            kind,
            team,
            health: kind.max_health(),
            anchor,
            transform: Transform::default(),
        }
    }

    pub fn is_large(&self) -> bool {
        self.kind.is_large()
    }

    /// Applies a health delta (negative for damage), clamping heals to the
    /// unit's maximum. Returns true when the occupant drops to zero health.
    pub fn apply_health(&mut self, delta: i32) -> bool {
        let max = match self.kind.max_health() {
            Some(max) => max,
            None => return false,
        };
        let hp = self.health.get_or_insert(max);
        *hp = (*hp + delta).min(max);
        *hp <= 0
    }

    /// (current, max) health for display, if the unit has a health bar.
    pub fn health_display(&self) -> Option<(i32, i32)> {
        Some((self.health?, self.kind.max_health()?))
    }
}
