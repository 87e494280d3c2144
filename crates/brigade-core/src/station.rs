//! Stations: fixed holders with role-specific behavior.
//!
//! A station is a tagged variant over roles rather than a class hierarchy.
//! Each role carries only its own state; interaction dispatch and the
//! per-tick timer updates match on the tag in [`crate::kitchen`].

use crate::fixed::Seconds;
use crate::holder::Holder;
use crate::id::{ItemId, ItemTypeId};
use crate::registry::{CookRecipe, CutRecipe};
use serde::{Deserialize, Serialize};

/// The stove lifecycle. `Idle` whenever the stove is empty; the other
/// phases exist only while an item sits on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookPhase {
    #[default]
    Idle,
    Cooking,
    Cooked,
    Burned,
}

/// Role tag plus per-role state. Shared holding state lives on [`Station`].
#[derive(Debug, Clone, PartialEq)]
pub enum StationRole {
    /// Passthrough surface: place, pick up, or combine with a plate.
    Counter,

    /// Hands out one item of a fixed type to an empty-handed actor.
    Dispenser { item_type: ItemTypeId },

    /// Stocks plates on a cadence while the match is playing; an
    /// empty-handed actor takes one per interaction.
    PlateDispenser {
        plate_type: ItemTypeId,
        spawn_timer: Seconds,
        stock: u32,
    },

    /// Transforms items with a cut recipe after enough chop interactions.
    CuttingBoard {
        progress: u32,
        active: Option<CutRecipe>,
    },

    /// Timed cook-then-burn state machine.
    Stove {
        phase: CookPhase,
        cook_elapsed: Seconds,
        burn_elapsed: Seconds,
        active_cook: Option<CookRecipe>,
        active_burn: Option<CookRecipe>,
    },

    /// Destroys whatever the actor is holding.
    TrashBin,

    /// Forwards delivered plates to the order book.
    ServiceWindow,
}

/// Role discriminant for snapshots and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKind {
    Counter,
    Dispenser,
    PlateDispenser,
    CuttingBoard,
    Stove,
    TrashBin,
    ServiceWindow,
}

/// A fixed-position holder with role-specific behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub role: StationRole,
    held: Option<ItemId>,
}

impl Station {
    pub fn counter() -> Self {
        Self::with_role(StationRole::Counter)
    }

    pub fn dispenser(item_type: ItemTypeId) -> Self {
        Self::with_role(StationRole::Dispenser { item_type })
    }

    pub fn plate_dispenser(plate_type: ItemTypeId) -> Self {
        Self::with_role(StationRole::PlateDispenser {
            plate_type,
            spawn_timer: Seconds::ZERO,
            stock: 0,
        })
    }

    pub fn cutting_board() -> Self {
        Self::with_role(StationRole::CuttingBoard {
            progress: 0,
            active: None,
        })
    }

    pub fn stove() -> Self {
        Self::with_role(StationRole::Stove {
            phase: CookPhase::Idle,
            cook_elapsed: Seconds::ZERO,
            burn_elapsed: Seconds::ZERO,
            active_cook: None,
            active_burn: None,
        })
    }

    pub fn trash_bin() -> Self {
        Self::with_role(StationRole::TrashBin)
    }

    pub fn service_window() -> Self {
        Self::with_role(StationRole::ServiceWindow)
    }

    fn with_role(role: StationRole) -> Self {
        Self { role, held: None }
    }

    pub fn kind(&self) -> RoleKind {
        match &self.role {
            StationRole::Counter => RoleKind::Counter,
            StationRole::Dispenser { .. } => RoleKind::Dispenser,
            StationRole::PlateDispenser { .. } => RoleKind::PlateDispenser,
            StationRole::CuttingBoard { .. } => RoleKind::CuttingBoard,
            StationRole::Stove { .. } => RoleKind::Stove,
            StationRole::TrashBin => RoleKind::TrashBin,
            StationRole::ServiceWindow => RoleKind::ServiceWindow,
        }
    }

    /// Current stove phase; `None` for non-stove roles.
    pub fn cook_phase(&self) -> Option<CookPhase> {
        match &self.role {
            StationRole::Stove { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Currently stocked plates; `None` for non-plate-dispenser roles.
    pub fn plate_stock(&self) -> Option<u32> {
        match &self.role {
            StationRole::PlateDispenser { stock, .. } => Some(*stock),
            _ => None,
        }
    }
}

impl Holder for Station {
    fn held_item(&self) -> Option<ItemId> {
        self.held
    }

    fn set_held_item(&mut self, item: Option<ItemId>) {
        self.held = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_start_empty() {
        for station in [
            Station::counter(),
            Station::dispenser(ItemTypeId(0)),
            Station::plate_dispenser(ItemTypeId(1)),
            Station::cutting_board(),
            Station::stove(),
            Station::trash_bin(),
            Station::service_window(),
        ] {
            assert!(!station.has_item());
        }
    }

    #[test]
    fn stove_starts_idle_with_zeroed_timers() {
        let stove = Station::stove();
        assert_eq!(stove.cook_phase(), Some(CookPhase::Idle));
        match stove.role {
            StationRole::Stove {
                cook_elapsed,
                burn_elapsed,
                active_cook,
                active_burn,
                ..
            } => {
                assert_eq!(cook_elapsed, Seconds::ZERO);
                assert_eq!(burn_elapsed, Seconds::ZERO);
                assert!(active_cook.is_none());
                assert!(active_burn.is_none());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn kind_matches_role() {
        assert_eq!(Station::counter().kind(), RoleKind::Counter);
        assert_eq!(Station::stove().kind(), RoleKind::Stove);
        assert_eq!(Station::cutting_board().kind(), RoleKind::CuttingBoard);
        assert_eq!(
            Station::plate_dispenser(ItemTypeId(0)).kind(),
            RoleKind::PlateDispenser
        );
    }

    #[test]
    fn cook_phase_none_for_non_stove() {
        assert!(Station::counter().cook_phase().is_none());
        assert!(Station::trash_bin().cook_phase().is_none());
    }

    #[test]
    fn plate_dispenser_starts_unstocked() {
        let pd = Station::plate_dispenser(ItemTypeId(2));
        assert_eq!(pd.plate_stock(), Some(0));
        assert!(Station::counter().plate_stock().is_none());
    }
}
