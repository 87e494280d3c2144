//! The simulation engine: owns every arena and orchestrates the tick pipeline.
//!
//! # Architecture
//!
//! The `Kitchen` owns:
//! - The item arena (`SlotMap<ItemId, Item>`) and station arena
//!   (`SlotMap<StationId, Station>`)
//! - The [`Actor`], [`MatchClock`], and [`OrderBook`]
//! - An [`EventBus`] for typed simulation events
//! - A [`CommandQueue`] of discrete player actions
//! - The injected [`CollisionWorld`] physics seam
//!
//! # Ownership Protocol
//!
//! [`Kitchen::transfer`], [`Kitchen::spawn_item`], and
//! [`Kitchen::destroy_item`] are the only code that writes holder slots and
//! item back-references. Interaction handlers check the destination slot
//! first, so a transfer failure is a protocol bug surfaced by the returned
//! error (and a debug assertion), never silently corrected.

use crate::actor::{Actor, CollisionWorld};
use crate::clock::{MatchClock, MatchPhase};
use crate::event::{Event, EventBus};
use crate::fixed::{Fixed64, Seconds};
use crate::hash::StateHash;
use crate::holder::{Holder, TransferError};
use crate::id::{ItemId, ItemTypeId, StationId};
use crate::input::{Command, CommandQueue};
use crate::item::{HolderId, Item, PlateContents};
use crate::orders::OrderBook;
use crate::registry::Registry;
use crate::station::{CookPhase, RoleKind, Station, StationRole};
use crate::vec2::Vec2;
use slotmap::{Key, SlotMap};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Match-level tuning. Defaults match the reference kitchen.
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Pre-match countdown length.
    pub countdown_seconds: Seconds,
    /// Play-phase duration.
    pub match_seconds: Seconds,
    /// Order spawn cadence.
    pub order_spawn_period: Seconds,
    /// Outstanding-order cap.
    pub max_waiting_orders: usize,
    /// Plate dispenser stocking cadence.
    pub plate_spawn_period: Seconds,
    /// Plate dispenser stock cap.
    pub max_stocked_plates: u32,
    /// Actor movement/targeting tuning.
    pub actor: crate::actor::ActorTuning,
    /// Seed for the order-selection RNG.
    pub rng_seed: u64,
    /// Command history retained for debugging. 0 = none.
    pub command_history: usize,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: Fixed64::from_num(3),
            match_seconds: Fixed64::from_num(100),
            order_spawn_period: Fixed64::from_num(4),
            max_waiting_orders: 4,
            plate_spawn_period: Fixed64::from_num(4),
            max_stocked_plates: 4,
            actor: crate::actor::ActorTuning::default(),
            rng_seed: 0,
            command_history: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Kitchen
// ---------------------------------------------------------------------------

/// The core simulation. Single-threaded; every interaction call and every
/// `advance` runs to completion before the next is observed.
pub struct Kitchen {
    registry: Registry,
    items: SlotMap<ItemId, Item>,
    stations: SlotMap<StationId, Station>,
    actor: Actor,
    clock: MatchClock,
    orders: OrderBook,
    /// Typed event bus for simulation events.
    pub event_bus: EventBus,
    commands: CommandQueue,
    world: Box<dyn CollisionWorld>,
    /// While set, no timer in the simulation advances.
    paused: bool,
    tick: u64,
    last_state_hash: u64,
    config: KitchenConfig,
}

impl std::fmt::Debug for Kitchen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kitchen")
            .field("tick", &self.tick)
            .field("paused", &self.paused)
            .field("clock", &self.clock)
            .field("items", &self.items.len())
            .field("stations", &self.stations.len())
            .finish_non_exhaustive()
    }
}

impl Kitchen {
    /// Create a new kitchen. The registry is frozen; the collision world is
    /// the host's physics seam (constructor injection, no globals).
    pub fn new(registry: Registry, config: KitchenConfig, world: Box<dyn CollisionWorld>) -> Self {
        Self {
            registry,
            items: SlotMap::with_key(),
            stations: SlotMap::with_key(),
            actor: Actor::new(config.actor),
            clock: MatchClock::new(config.countdown_seconds, config.match_seconds),
            orders: OrderBook::new(
                config.order_spawn_period,
                config.max_waiting_orders,
                config.rng_seed,
            ),
            event_bus: EventBus::default(),
            commands: CommandQueue::with_max_history(config.command_history),
            world,
            paused: false,
            tick: 0,
            last_state_hash: 0,
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Setup & accessors
    // -----------------------------------------------------------------------

    pub fn add_station(&mut self, station: Station) -> StationId {
        self.stations.insert(station)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations.iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut OrderBook {
        &mut self.orders
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The hash computed at the end of the last completed tick.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Place the actor (spawn point). Setup only; gameplay movement goes
    /// through the input axis.
    pub fn place_actor(&mut self, position: Vec2) {
        self.actor.set_position(position);
    }

    /// Sample the raw movement axis for the next tick.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.actor.set_move_axis(axis);
    }

    /// Queue a discrete player action for the next tick.
    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn command_history(&self) -> &[(u64, Command)] {
        self.commands.history()
    }

    /// The item a holder currently owns.
    pub fn held_by(&self, holder: HolderId) -> Option<ItemId> {
        match holder {
            HolderId::Actor => self.actor.held_item(),
            HolderId::Station(id) => self.stations.get(id).and_then(|s| s.held_item()),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Pause the simulation. While paused, no timer advances; queued
    /// commands still execute.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            let tick = self.tick;
            self.event_bus.emit(Event::Paused { tick });
        }
    }

    /// Resume the simulation.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            let tick = self.tick;
            self.event_bus.emit(Event::Unpaused { tick });
        }
    }

    // -----------------------------------------------------------------------
    // Ownership protocol
    // -----------------------------------------------------------------------

    fn set_holder_slot(&mut self, holder: HolderId, item: Option<ItemId>) {
        match holder {
            HolderId::Actor => self.actor.set_held_item(item),
            HolderId::Station(id) => {
                if let Some(station) = self.stations.get_mut(id) {
                    station.set_held_item(item);
                }
            }
        }
    }

    fn emit_arrival(&mut self, to: HolderId, item_type: ItemTypeId) {
        let tick = self.tick;
        match to {
            HolderId::Station(station) => self.event_bus.emit(Event::ItemPlaced {
                station,
                item_type,
                tick,
            }),
            HolderId::Actor => self.event_bus.emit(Event::ItemPickedUp { item_type, tick }),
        }
    }

    /// Move an item to a new holder.
    ///
    /// The handover is atomic from the caller's perspective: the source
    /// slot, destination slot, and back-reference all change before any
    /// event is emitted, so no observer sees two holders (or none)
    /// referencing the item.
    pub fn transfer(&mut self, item: ItemId, to: HolderId) -> Result<(), TransferError> {
        let Some(entry) = self.items.get(item) else {
            return Err(TransferError::UnknownItem { item });
        };
        if self.held_by(to).is_some() {
            return Err(TransferError::DestinationOccupied { to });
        }
        let from = entry.owner;
        let item_type = entry.item_type;

        self.set_holder_slot(from, None);
        self.set_holder_slot(to, Some(item));
        self.items[item].owner = to;

        self.emit_arrival(to, item_type);
        Ok(())
    }

    /// Create an item of the given type directly on a holder. Plate types
    /// get their contents initialized from the registry's allowed set.
    pub fn spawn_item(&mut self, item_type: ItemTypeId, to: HolderId) -> Result<ItemId, TransferError> {
        if self.held_by(to).is_some() {
            return Err(TransferError::DestinationOccupied { to });
        }
        let plate = self
            .registry
            .plate_spec(item_type)
            .map(|spec| PlateContents::new(spec.allowed.clone()));
        let id = self.items.insert(Item {
            item_type,
            owner: to,
            plate,
        });
        self.set_holder_slot(to, Some(id));
        self.emit_arrival(to, item_type);
        Ok(id)
    }

    /// Remove an item from play, clearing its holder's slot. Returns the
    /// removed entry, or `None` for a stale id.
    pub fn destroy_item(&mut self, item: ItemId) -> Option<Item> {
        let entry = self.items.remove(item)?;
        self.set_holder_slot(entry.owner, None);
        Some(entry)
    }

    /// Transfer where the caller has already verified the destination is
    /// empty. A failure here is a protocol bug; keep it loud in development.
    fn move_item_checked(&mut self, item: ItemId, to: HolderId) {
        let _result = self.transfer(item, to);
        debug_assert!(_result.is_ok(), "transfer failed: {_result:?}");
    }

    /// Spawn where the caller has just cleared the destination.
    fn spawn_item_checked(&mut self, item_type: ItemTypeId, to: HolderId) {
        let _result = self.spawn_item(item_type, to);
        debug_assert!(_result.is_ok(), "spawn failed: {_result:?}");
    }

    // -----------------------------------------------------------------------
    // Primary interaction dispatch
    // -----------------------------------------------------------------------

    /// Primary interaction with a station. Public so hosts and tests can
    /// drive stations directly; the match-phase gate lives in command
    /// processing, matching how input reaches stations in a real match.
    pub fn interact(&mut self, station: StationId) {
        let Some(entry) = self.stations.get(station) else {
            return;
        };
        match entry.kind() {
            RoleKind::Counter => self.interact_counter(station),
            RoleKind::Dispenser => self.interact_dispenser(station),
            RoleKind::PlateDispenser => self.interact_plate_dispenser(station),
            RoleKind::CuttingBoard => self.interact_cutting_board(station),
            RoleKind::Stove => self.interact_stove(station),
            RoleKind::TrashBin => self.interact_trash(station),
            RoleKind::ServiceWindow => self.interact_service_window(station),
        }
    }

    fn interact_counter(&mut self, station: StationId) {
        match (self.stations[station].held_item(), self.actor.held_item()) {
            (None, Some(in_hand)) => {
                self.move_item_checked(in_hand, HolderId::Station(station));
            }
            (Some(on_counter), None) => {
                self.move_item_checked(on_counter, HolderId::Actor);
            }
            (Some(on_counter), Some(in_hand)) => {
                self.merge_via_plate(on_counter, in_hand);
            }
            (None, None) => {}
        }
    }

    /// The plate-merge half of the counter dispatch: a plate in hand absorbs
    /// the counter's item, or a plate on the counter absorbs the held item.
    /// Anything else (two plain items, two plates) is a no-op.
    fn merge_via_plate(&mut self, on_station: ItemId, in_hand: ItemId) {
        if self.items.get(in_hand).is_some_and(Item::is_plate) {
            self.absorb_into_plate(in_hand, on_station);
        } else if self.items.get(on_station).is_some_and(Item::is_plate) {
            self.absorb_into_plate(on_station, in_hand);
        }
    }

    /// Add `ingredient_item`'s type to the plate; on success the source item
    /// is consumed. Returns whether the add happened.
    fn absorb_into_plate(&mut self, plate_item: ItemId, ingredient_item: ItemId) -> bool {
        let Some(ingredient) = self.items.get(ingredient_item).map(|i| i.item_type) else {
            return false;
        };
        let added = self
            .items
            .get_mut(plate_item)
            .and_then(Item::as_plate_mut)
            .is_some_and(|plate| plate.try_add(ingredient));
        if added {
            let tick = self.tick;
            self.event_bus.emit(Event::IngredientAdded { ingredient, tick });
            self.destroy_item(ingredient_item);
        }
        added
    }

    fn interact_dispenser(&mut self, station: StationId) {
        if self.actor.has_item() {
            return;
        }
        let StationRole::Dispenser { item_type } = self.stations[station].role else {
            return;
        };
        self.spawn_item_checked(item_type, HolderId::Actor);
        let tick = self.tick;
        self.event_bus.emit(Event::ItemGranted {
            station,
            item_type,
            tick,
        });
    }

    fn interact_plate_dispenser(&mut self, station: StationId) {
        if self.actor.has_item() {
            return;
        }
        let plate_type = match &mut self.stations[station].role {
            StationRole::PlateDispenser {
                plate_type, stock, ..
            } => {
                if *stock == 0 {
                    return;
                }
                *stock -= 1;
                *plate_type
            }
            _ => return,
        };
        self.spawn_item_checked(plate_type, HolderId::Actor);
        let tick = self.tick;
        self.event_bus.emit(Event::PlateTaken { station, tick });
    }

    fn interact_cutting_board(&mut self, station: StationId) {
        match (self.stations[station].held_item(), self.actor.held_item()) {
            (None, Some(in_hand)) => {
                // Only items with a cut recipe are accepted.
                let item_type = self.items[in_hand].item_type;
                let Some(recipe) = self.registry.cut_recipe_for(item_type).copied() else {
                    return;
                };
                self.move_item_checked(in_hand, HolderId::Station(station));
                if let StationRole::CuttingBoard { progress, active } =
                    &mut self.stations[station].role
                {
                    *progress = 0;
                    *active = Some(recipe);
                }
                let tick = self.tick;
                self.event_bus.emit(Event::CutProgress {
                    station,
                    progress: Fixed64::ZERO,
                    tick,
                });
            }
            (Some(on_board), None) => {
                self.move_item_checked(on_board, HolderId::Actor);
                self.reset_cutting_board(station);
            }
            (Some(on_board), Some(in_hand)) => {
                self.merge_via_plate(on_board, in_hand);
                if !self.stations[station].has_item() {
                    self.reset_cutting_board(station);
                }
            }
            (None, None) => {}
        }
    }

    fn reset_cutting_board(&mut self, station: StationId) {
        if let StationRole::CuttingBoard { progress, active } = &mut self.stations[station].role {
            *progress = 0;
            *active = None;
        }
    }

    fn interact_stove(&mut self, station: StationId) {
        match (self.stations[station].held_item(), self.actor.held_item()) {
            (None, Some(in_hand)) => {
                // Only items with a cook recipe are accepted.
                let item_type = self.items[in_hand].item_type;
                let Some(recipe) = self.registry.cook_recipe_for(item_type).copied() else {
                    return;
                };
                self.move_item_checked(in_hand, HolderId::Station(station));
                if let StationRole::Stove {
                    phase,
                    cook_elapsed,
                    active_cook,
                    ..
                } = &mut self.stations[station].role
                {
                    *phase = CookPhase::Cooking;
                    *cook_elapsed = Seconds::ZERO;
                    *active_cook = Some(recipe);
                }
                let tick = self.tick;
                self.event_bus.emit(Event::CookStateChanged {
                    station,
                    phase: CookPhase::Cooking,
                    tick,
                });
                self.event_bus.emit(Event::CookProgress {
                    station,
                    progress: Fixed64::ZERO,
                    tick,
                });
            }
            (Some(on_stove), None) => {
                self.move_item_checked(on_stove, HolderId::Actor);
                self.reset_stove(station);
            }
            (Some(on_stove), Some(in_hand)) => {
                // Only a plate in hand can take from an occupied stove.
                if self.items.get(in_hand).is_some_and(Item::is_plate)
                    && self.absorb_into_plate(in_hand, on_stove)
                {
                    self.reset_stove(station);
                }
            }
            (None, None) => {}
        }
    }

    /// Removing the stove's item forces `Idle` and zeroes both timers.
    fn reset_stove(&mut self, station: StationId) {
        if let StationRole::Stove {
            phase,
            cook_elapsed,
            burn_elapsed,
            active_cook,
            active_burn,
        } = &mut self.stations[station].role
        {
            *phase = CookPhase::Idle;
            *cook_elapsed = Seconds::ZERO;
            *burn_elapsed = Seconds::ZERO;
            *active_cook = None;
            *active_burn = None;
        }
        let tick = self.tick;
        self.event_bus.emit(Event::CookStateChanged {
            station,
            phase: CookPhase::Idle,
            tick,
        });
        self.event_bus.emit(Event::CookProgress {
            station,
            progress: Fixed64::ZERO,
            tick,
        });
    }

    fn interact_trash(&mut self, station: StationId) {
        let Some(in_hand) = self.actor.held_item() else {
            return;
        };
        let Some(entry) = self.destroy_item(in_hand) else {
            return;
        };
        let tick = self.tick;
        self.event_bus.emit(Event::ItemTrashed {
            station,
            item_type: entry.item_type,
            tick,
        });
    }

    fn interact_service_window(&mut self, _station: StationId) {
        let Some(in_hand) = self.actor.held_item() else {
            return;
        };
        // Only plates can be delivered.
        let Some(contents) = self
            .items
            .get(in_hand)
            .and_then(Item::as_plate)
            .map(|p| p.contents().to_vec())
        else {
            return;
        };
        let tick = self.tick;
        self.orders
            .deliver(&contents, &self.registry, &mut self.event_bus, tick);
        // The plate is consumed whether or not an order matched.
        self.destroy_item(in_hand);
    }

    // -----------------------------------------------------------------------
    // Secondary interaction (chop)
    // -----------------------------------------------------------------------

    /// Secondary interaction with a station. Only the cutting board reacts:
    /// each call advances chop progress by one; reaching the threshold
    /// (`>=`) replaces the item with the recipe output.
    pub fn interact_alternate(&mut self, station: StationId) {
        let Some(entry) = self.stations.get(station) else {
            return;
        };
        let Some(on_board) = entry.held_item() else {
            return;
        };
        let StationRole::CuttingBoard { progress, active } = &entry.role else {
            return;
        };
        let Some(recipe) = *active else {
            return;
        };
        let progress = progress + 1;
        if let StationRole::CuttingBoard { progress: p, .. } = &mut self.stations[station].role {
            *p = progress;
        }

        let tick = self.tick;
        self.event_bus.emit(Event::CutPerformed { station, tick });
        self.event_bus.emit(Event::CutProgress {
            station,
            progress: Fixed64::from_num(progress) / Fixed64::from_num(recipe.chops_required),
            tick,
        });

        if progress >= recipe.chops_required {
            self.destroy_item(on_board);
            self.spawn_item_checked(recipe.output, HolderId::Station(station));
            // Re-resolve for the output; progress starts over.
            let next = self.registry.cut_recipe_for(recipe.output).copied();
            if let StationRole::CuttingBoard { progress, active } = &mut self.stations[station].role
            {
                *progress = 0;
                *active = next;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Advance
    // -----------------------------------------------------------------------

    /// Advance the simulation by `dt`. While paused, commands still run but
    /// no timer advances and the tick counter does not move.
    pub fn advance(&mut self, dt: Seconds) {
        self.process_commands();
        if self.paused {
            // Time is frozen; deliver whatever the commands produced.
            self.event_bus.deliver();
            return;
        }

        self.phase_clock(dt);
        self.phase_actor(dt);
        self.phase_stations(dt);
        self.phase_orders(dt);
        self.event_bus.deliver();

        self.tick += 1;
        self.last_state_hash = self.compute_state_hash();
    }

    fn process_commands(&mut self) {
        for command in self.commands.drain(self.tick) {
            match command {
                Command::TogglePause => {
                    if self.paused {
                        self.resume();
                    } else {
                        self.pause();
                    }
                }
                Command::Interact => {
                    if self.clock.phase() == MatchPhase::WaitingToStart {
                        if let Some(phase) = self.clock.mark_ready() {
                            let tick = self.tick;
                            self.event_bus.emit(Event::PhaseChanged { phase, tick });
                        }
                    } else if self.clock.is_playing()
                        && let Some(selected) = self.actor.selected()
                    {
                        self.interact(selected);
                    }
                }
                Command::InteractAlternate => {
                    if self.clock.is_playing()
                        && let Some(selected) = self.actor.selected()
                    {
                        self.interact_alternate(selected);
                    }
                }
            }
        }
    }

    fn phase_clock(&mut self, dt: Seconds) {
        if let Some(phase) = self.clock.advance(dt) {
            let tick = self.tick;
            self.event_bus.emit(Event::PhaseChanged { phase, tick });
        }
    }

    fn phase_actor(&mut self, dt: Seconds) {
        self.actor.advance_movement(dt, &*self.world);
        let target = self.actor.acquire_target(&*self.world);
        if target != self.actor.selected() {
            let previous = self.actor.selected();
            self.actor.set_selected(target);
            let tick = self.tick;
            self.event_bus.emit(Event::SelectionChanged {
                previous,
                current: target,
                tick,
            });
        }
    }

    fn phase_stations(&mut self, dt: Seconds) {
        let playing = self.clock.is_playing();
        // Station updates are independent of each other; iteration order is
        // not observable.
        let ids: Vec<StationId> = self.stations.keys().collect();
        for id in ids {
            match self.stations[id].kind() {
                RoleKind::Stove => self.advance_stove(id, dt),
                RoleKind::PlateDispenser => self.advance_plate_dispenser(id, dt, playing),
                _ => {}
            }
        }
    }

    fn advance_stove(&mut self, station: StationId, dt: Seconds) {
        let Some(on_stove) = self.stations[station].held_item() else {
            return;
        };
        let StationRole::Stove {
            phase,
            cook_elapsed,
            burn_elapsed,
            active_cook,
            active_burn,
        } = self.stations[station].role.clone()
        else {
            return;
        };
        let tick = self.tick;

        match phase {
            CookPhase::Idle | CookPhase::Burned => {}
            CookPhase::Cooking => {
                let Some(recipe) = active_cook else {
                    return;
                };
                let elapsed = cook_elapsed + dt;
                if let StationRole::Stove { cook_elapsed, .. } = &mut self.stations[station].role {
                    *cook_elapsed = elapsed;
                }
                self.event_bus.emit(Event::CookProgress {
                    station,
                    progress: elapsed / recipe.seconds,
                    tick,
                });
                // Strictly greater: landing exactly on the threshold does
                // not transform.
                if elapsed > recipe.seconds {
                    self.destroy_item(on_stove);
                    self.spawn_item_checked(recipe.output, HolderId::Station(station));
                    let burn = self.registry.burn_recipe_for(recipe.output).copied();
                    if let StationRole::Stove {
                        phase,
                        burn_elapsed,
                        active_burn,
                        ..
                    } = &mut self.stations[station].role
                    {
                        *phase = CookPhase::Cooked;
                        *burn_elapsed = Seconds::ZERO;
                        *active_burn = burn;
                    }
                    self.event_bus.emit(Event::CookStateChanged {
                        station,
                        phase: CookPhase::Cooked,
                        tick,
                    });
                }
            }
            CookPhase::Cooked => {
                // No burn recipe for this item type: hold at Cooked forever.
                let Some(recipe) = active_burn else {
                    return;
                };
                let elapsed = burn_elapsed + dt;
                if let StationRole::Stove { burn_elapsed, .. } = &mut self.stations[station].role {
                    *burn_elapsed = elapsed;
                }
                self.event_bus.emit(Event::CookProgress {
                    station,
                    progress: elapsed / recipe.seconds,
                    tick,
                });
                if elapsed > recipe.seconds {
                    self.destroy_item(on_stove);
                    self.spawn_item_checked(recipe.output, HolderId::Station(station));
                    if let StationRole::Stove { phase, .. } = &mut self.stations[station].role {
                        *phase = CookPhase::Burned;
                    }
                    self.event_bus.emit(Event::CookStateChanged {
                        station,
                        phase: CookPhase::Burned,
                        tick,
                    });
                    self.event_bus.emit(Event::CookProgress {
                        station,
                        progress: Fixed64::ZERO,
                        tick,
                    });
                }
            }
        }
    }

    fn advance_plate_dispenser(&mut self, station: StationId, dt: Seconds, playing: bool) {
        let period = self.config.plate_spawn_period;
        let max_stock = self.config.max_stocked_plates;
        let stocked = {
            let StationRole::PlateDispenser {
                spawn_timer, stock, ..
            } = &mut self.stations[station].role
            else {
                return;
            };
            *spawn_timer += dt;
            if *spawn_timer > period {
                // Timer resets whether or not a plate was stocked.
                *spawn_timer = Seconds::ZERO;
                if playing && *stock < max_stock {
                    *stock += 1;
                    true
                } else {
                    false
                }
            } else {
                false
            }
        };
        if stocked {
            let tick = self.tick;
            self.event_bus.emit(Event::PlateStocked { station, tick });
        }
    }

    fn phase_orders(&mut self, dt: Seconds) {
        let playing = self.clock.is_playing();
        let tick = self.tick;
        self.orders
            .advance(dt, playing, &self.registry, &mut self.event_bus, tick);
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    fn compute_state_hash(&self) -> u64 {
        let mut h = StateHash::new();
        h.write_u64(self.tick);
        h.write_u32(self.paused as u32);
        h.write_u32(self.clock.phase() as u32);
        h.write_fixed64(self.clock.countdown_remaining());
        h.write_fixed64(self.clock.play_elapsed_normalized());

        for (id, item) in &self.items {
            h.write_u64(id.data().as_ffi());
            h.write_u32(item.item_type.0);
            match item.owner {
                HolderId::Actor => h.write_u32(0),
                HolderId::Station(s) => {
                    h.write_u32(1);
                    h.write_u64(s.data().as_ffi());
                }
            }
            if let Some(plate) = item.as_plate() {
                h.write_u32(plate.len() as u32);
                for t in plate.contents() {
                    h.write_u32(t.0);
                }
            }
        }

        for (id, station) in &self.stations {
            h.write_u64(id.data().as_ffi());
            h.write_u64(station.held_item().map_or(0, |i| i.data().as_ffi()));
            match &station.role {
                StationRole::Stove {
                    phase,
                    cook_elapsed,
                    burn_elapsed,
                    ..
                } => {
                    h.write_u32(*phase as u32);
                    h.write_fixed64(*cook_elapsed);
                    h.write_fixed64(*burn_elapsed);
                }
                StationRole::CuttingBoard { progress, .. } => h.write_u32(*progress),
                StationRole::PlateDispenser {
                    spawn_timer, stock, ..
                } => {
                    h.write_fixed64(*spawn_timer);
                    h.write_u32(*stock);
                }
                _ => {}
            }
        }

        h.write_fixed64(self.actor.position().x);
        h.write_fixed64(self.actor.position().z);
        h.write_fixed64(self.orders.spawn_timer());
        h.write_u32(self.orders.delivered_count());
        for order in self.orders.waiting() {
            h.write_u32(order.0);
        }
        h.write_u64(self.orders.rng_state());
        h.finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================


#[cfg(test)]
impl Kitchen {
    /// Test-only access for composing plate contents directly.
    fn item_plate_mut_for_test(&mut self, item: ItemId) -> Option<&mut PlateContents> {
        self.items.get_mut(item).and_then(Item::as_plate_mut)
    }
}
