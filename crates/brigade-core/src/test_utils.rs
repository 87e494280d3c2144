//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::actor::{CollisionWorld, RayTarget};
use crate::fixed::{Fixed64, Seconds};
use crate::id::{ItemTypeId, OrderId, StationId};
use crate::kitchen::{Kitchen, KitchenConfig};
use crate::registry::{Registry, RegistryBuilder};
use crate::station::Station;
use crate::vec2::Vec2;
use std::cell::Cell;
use std::rc::Rc;

// ===========================================================================
// Fixed-point helpers
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

pub fn secs(v: f64) -> Seconds {
    Fixed64::from_num(v)
}

// ===========================================================================
// Canonical item types
//
// Indices match the registration order in `test_registry`.
// ===========================================================================

pub fn tomato() -> ItemTypeId {
    ItemTypeId(0)
}
pub fn sliced_tomato() -> ItemTypeId {
    ItemTypeId(1)
}
pub fn patty() -> ItemTypeId {
    ItemTypeId(2)
}
pub fn seared_patty() -> ItemTypeId {
    ItemTypeId(3)
}
pub fn charred_patty() -> ItemTypeId {
    ItemTypeId(4)
}
pub fn bread() -> ItemTypeId {
    ItemTypeId(5)
}
pub fn plate() -> ItemTypeId {
    ItemTypeId(6)
}
pub fn egg() -> ItemTypeId {
    ItemTypeId(7)
}
pub fn fried_egg() -> ItemTypeId {
    ItemTypeId(8)
}

pub fn burger_order() -> OrderId {
    OrderId(0)
}
pub fn salad_order() -> OrderId {
    OrderId(1)
}

pub const CHOPS_REQUIRED: u32 = 3;
pub const COOK_SECONDS: f64 = 5.0;
pub const BURN_SECONDS: f64 = 4.0;

/// The canonical test catalog: one cut chain, one cook+burn chain, one cook
/// chain whose output has no burn recipe (the stove's hold-at-Cooked edge
/// case), a plate, and two orders.
pub fn test_registry() -> Registry {
    let mut b = RegistryBuilder::new();
    let tomato = b.register_item("tomato");
    let sliced = b.register_item("sliced_tomato");
    let patty = b.register_item("patty");
    let seared = b.register_item("seared_patty");
    let charred = b.register_item("charred_patty");
    let bread = b.register_item("bread");
    b.register_plate("plate", vec![sliced, seared, bread]);
    let egg = b.register_item("egg");
    let fried = b.register_item("fried_egg");

    b.register_cut_recipe(tomato, sliced, CHOPS_REQUIRED);
    b.register_cook_recipe(patty, seared, secs(COOK_SECONDS));
    b.register_burn_recipe(seared, charred, secs(BURN_SECONDS));
    // Deliberately no burn recipe for fried_egg.
    b.register_cook_recipe(egg, fried, secs(COOK_SECONDS));

    b.register_order("burger", vec![bread, seared]);
    b.register_order("tomato_salad", vec![sliced]);
    b.build().expect("test registry must build")
}

// ===========================================================================
// Collision worlds
// ===========================================================================

/// A world with nothing in it: moves always succeed, rays never hit.
pub struct OpenFloor;

impl CollisionWorld for OpenFloor {
    fn sweep_blocked(&self, _from: Vec2, _dir: Vec2, _distance: Fixed64) -> bool {
        false
    }
    fn raycast(&self, _from: Vec2, _dir: Vec2, _max_distance: Fixed64) -> Option<RayTarget> {
        None
    }
}

/// A world whose raycast result is scripted from outside the kitchen.
/// Movement is never blocked.
pub struct ScriptedRay {
    target: Rc<Cell<Option<StationId>>>,
}

impl ScriptedRay {
    /// Returns the world and a handle for changing its raycast target
    /// between ticks.
    pub fn new() -> (Self, Rc<Cell<Option<StationId>>>) {
        let target = Rc::new(Cell::new(None));
        (
            Self {
                target: Rc::clone(&target),
            },
            target,
        )
    }
}

impl CollisionWorld for ScriptedRay {
    fn sweep_blocked(&self, _from: Vec2, _dir: Vec2, _distance: Fixed64) -> bool {
        false
    }
    fn raycast(&self, _from: Vec2, _dir: Vec2, _max_distance: Fixed64) -> Option<RayTarget> {
        self.target.get().map(RayTarget::Station)
    }
}

// ===========================================================================
// Kitchen fixtures
// ===========================================================================

/// One station of every role, built against `test_registry`.
pub struct TestStations {
    pub counter: StationId,
    pub board: StationId,
    pub stove: StationId,
    pub tomato_dispenser: StationId,
    pub patty_dispenser: StationId,
    pub bread_dispenser: StationId,
    pub egg_dispenser: StationId,
    pub plate_dispenser: StationId,
    pub trash: StationId,
    pub window: StationId,
}

pub fn test_kitchen() -> (Kitchen, TestStations) {
    test_kitchen_with_world(Box::new(OpenFloor))
}

pub fn test_kitchen_with_world(world: Box<dyn CollisionWorld>) -> (Kitchen, TestStations) {
    let mut kitchen = Kitchen::new(test_registry(), KitchenConfig::default(), world);
    let stations = TestStations {
        counter: kitchen.add_station(Station::counter()),
        board: kitchen.add_station(Station::cutting_board()),
        stove: kitchen.add_station(Station::stove()),
        tomato_dispenser: kitchen.add_station(Station::dispenser(tomato())),
        patty_dispenser: kitchen.add_station(Station::dispenser(patty())),
        bread_dispenser: kitchen.add_station(Station::dispenser(bread())),
        egg_dispenser: kitchen.add_station(Station::dispenser(egg())),
        plate_dispenser: kitchen.add_station(Station::plate_dispenser(plate())),
        trash: kitchen.add_station(Station::trash_bin()),
        window: kitchen.add_station(Station::service_window()),
    };
    (kitchen, stations)
}

/// Drive a fresh kitchen into the Playing phase: ready-up, then run the
/// countdown past zero.
pub fn start_match(kitchen: &mut Kitchen) {
    kitchen.push_command(crate::input::Command::Interact);
    kitchen.advance(secs(0.0));
    kitchen.advance(secs(3.5));
    assert!(kitchen.clock().is_playing(), "match should be playing");
}
