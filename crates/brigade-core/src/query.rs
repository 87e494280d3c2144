//! Read-only query API for inspecting simulation state.
//!
//! Provides snapshot types that aggregate kitchen state into convenient
//! views for rendering, UI, and FFI consumers. All types are owned copies --
//! no references into internal kitchen storage.

use crate::clock::MatchPhase;
use crate::fixed::{Fixed64, Seconds};
use crate::id::{ItemTypeId, OrderId, StationId};
use crate::kitchen::Kitchen;
use crate::station::{CookPhase, RoleKind, StationRole};
use crate::vec2::Vec2;

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// An aggregated, read-only view of a single station.
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    pub id: StationId,
    pub kind: RoleKind,
    /// Type of the item currently on the station, if any.
    pub held: Option<ItemTypeId>,
    /// Progress as a 0..1 fraction: chop progress for cutting boards, the
    /// active cook/burn timer for stoves, 0 elsewhere. May exceed 1 by the
    /// final tick's overshoot.
    pub progress: Fixed64,
    /// Stove phase; `None` for other roles.
    pub cook_phase: Option<CookPhase>,
    /// Stocked plates; `None` for other roles.
    pub plate_stock: Option<u32>,
}

/// A read-only view of the actor.
#[derive(Debug, Clone)]
pub struct ActorSnapshot {
    pub position: Vec2,
    /// Smoothed display facing (cosmetic).
    pub facing: Vec2,
    /// Targeting direction (last non-zero movement input).
    pub aim: Vec2,
    /// Whether movement input was non-zero last tick (walk animation).
    pub moving: bool,
    pub held: Option<ItemTypeId>,
    pub selected: Option<StationId>,
}

/// A read-only view of the match clock.
#[derive(Debug, Clone)]
pub struct ClockSnapshot {
    pub phase: MatchPhase,
    pub paused: bool,
    pub countdown_remaining: Seconds,
    pub play_elapsed_normalized: Fixed64,
}

/// A read-only view of one outstanding order.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub order: OrderId,
    pub name: String,
    pub ingredients: Vec<ItemTypeId>,
}

// ---------------------------------------------------------------------------
// Snapshot constructors
// ---------------------------------------------------------------------------

impl Kitchen {
    /// Snapshot a station. `None` for a stale id.
    pub fn station_snapshot(&self, id: StationId) -> Option<StationSnapshot> {
        use crate::holder::Holder;

        let station = self.station(id)?;
        let held = station
            .held_item()
            .and_then(|item| self.item(item))
            .map(|item| item.item_type);

        let progress = match &station.role {
            StationRole::CuttingBoard { progress, active } => active
                .map(|recipe| {
                    Fixed64::from_num(*progress) / Fixed64::from_num(recipe.chops_required)
                })
                .unwrap_or(Fixed64::ZERO),
            StationRole::Stove {
                phase,
                cook_elapsed,
                burn_elapsed,
                active_cook,
                active_burn,
            } => match phase {
                CookPhase::Cooking => active_cook
                    .map(|recipe| *cook_elapsed / recipe.seconds)
                    .unwrap_or(Fixed64::ZERO),
                CookPhase::Cooked => active_burn
                    .map(|recipe| *burn_elapsed / recipe.seconds)
                    .unwrap_or(Fixed64::ZERO),
                CookPhase::Idle | CookPhase::Burned => Fixed64::ZERO,
            },
            _ => Fixed64::ZERO,
        };

        Some(StationSnapshot {
            id,
            kind: station.kind(),
            held,
            progress,
            cook_phase: station.cook_phase(),
            plate_stock: station.plate_stock(),
        })
    }

    pub fn actor_snapshot(&self) -> ActorSnapshot {
        use crate::holder::Holder;

        let actor = self.actor();
        ActorSnapshot {
            position: actor.position(),
            facing: actor.facing(),
            aim: actor.aim(),
            moving: actor.is_moving(),
            held: actor
                .held_item()
                .and_then(|item| self.item(item))
                .map(|item| item.item_type),
            selected: actor.selected(),
        }
    }

    pub fn clock_snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            phase: self.clock().phase(),
            paused: self.is_paused(),
            countdown_remaining: self.clock().countdown_remaining(),
            play_elapsed_normalized: self.clock().play_elapsed_normalized(),
        }
    }

    /// Outstanding orders in spawn order, resolved against the registry.
    pub fn waiting_orders(&self) -> Vec<OrderSnapshot> {
        self.orders()
            .waiting()
            .iter()
            .filter_map(|&order| {
                self.registry().order(order).map(|def| OrderSnapshot {
                    order,
                    name: def.name.clone(),
                    ingredients: def.ingredients.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Seconds;
    use crate::item::HolderId;
    use crate::test_utils::*;

    #[test]
    fn station_snapshot_reports_held_type() {
        let (mut kitchen, s) = test_kitchen();
        kitchen
            .spawn_item(tomato(), HolderId::Station(s.counter))
            .unwrap();

        let snap = kitchen.station_snapshot(s.counter).unwrap();
        assert_eq!(snap.kind, RoleKind::Counter);
        assert_eq!(snap.held, Some(tomato()));
        assert_eq!(snap.progress, Fixed64::ZERO);
        assert!(snap.cook_phase.is_none());
    }

    #[test]
    fn cutting_board_snapshot_progress() {
        let (mut kitchen, s) = test_kitchen();
        kitchen.spawn_item(tomato(), HolderId::Actor).unwrap();
        kitchen.interact(s.board);
        kitchen.interact_alternate(s.board);

        let snap = kitchen.station_snapshot(s.board).unwrap();
        assert_eq!(
            snap.progress,
            Fixed64::ONE / Fixed64::from_num(CHOPS_REQUIRED)
        );
    }

    #[test]
    fn stove_snapshot_progress_tracks_cook_timer() {
        let (mut kitchen, s) = test_kitchen();
        kitchen.spawn_item(patty(), HolderId::Actor).unwrap();
        kitchen.interact(s.stove);
        kitchen.advance(secs(2.0));

        let snap = kitchen.station_snapshot(s.stove).unwrap();
        assert_eq!(snap.cook_phase, Some(crate::station::CookPhase::Cooking));
        assert_eq!(snap.progress, secs(2.0) / secs(COOK_SECONDS));
    }

    #[test]
    fn actor_snapshot_reports_held_and_motion() {
        let (mut kitchen, _s) = test_kitchen();
        kitchen.spawn_item(bread(), HolderId::Actor).unwrap();
        kitchen.set_move_axis(crate::vec2::Vec2::from_f64(1.0, 0.0));
        kitchen.advance(secs(0.5));

        let snap = kitchen.actor_snapshot();
        assert_eq!(snap.held, Some(bread()));
        assert!(snap.moving);
        assert!(snap.position.x > Fixed64::ZERO);
    }

    #[test]
    fn clock_snapshot_reflects_phase_and_pause() {
        let (mut kitchen, _s) = test_kitchen();
        let snap = kitchen.clock_snapshot();
        assert_eq!(snap.phase, MatchPhase::WaitingToStart);
        assert!(!snap.paused);
        assert_eq!(snap.countdown_remaining, Seconds::from_num(3));

        kitchen.pause();
        assert!(kitchen.clock_snapshot().paused);
    }

    #[test]
    fn waiting_orders_resolve_names() {
        let (mut kitchen, _s) = test_kitchen();
        kitchen.orders_mut().enqueue(salad_order());
        kitchen.orders_mut().enqueue(burger_order());

        let orders = kitchen.waiting_orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].name, "tomato_salad");
        assert_eq!(orders[1].name, "burger");
        assert_eq!(orders[1].ingredients, vec![bread(), seared_patty()]);
    }

    #[test]
    fn snapshot_stale_station_is_none() {
        let (kitchen, _s) = test_kitchen();
        let stale = {
            let mut sm = slotmap::SlotMap::<StationId, ()>::with_key();
            sm.insert(())
        };
        assert!(kitchen.station_snapshot(stale).is_none());
    }
}
