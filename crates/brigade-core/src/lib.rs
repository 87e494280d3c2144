//! Brigade Core -- the gameplay simulation core of a cooperative kitchen game.
//!
//! This crate owns the rules with actual correctness risk: exclusive
//! held-item ownership, the transfer protocol between holders, the
//! multi-stage cut/cook/burn station state machines, and the order-matching
//! delivery validator. Rendering, audio, input devices, cameras, and UI are
//! external consumers of the event stream -- none of them live here.
//!
//! # Tick Pipeline
//!
//! Each call to [`kitchen::Kitchen::advance`] runs the following phases:
//!
//! 1. **Commands** -- drain queued input commands (pause toggles apply
//!    immediately; interactions dispatch per match-clock gating).
//! 2. **Clock** -- advance the match clock (skipped entirely while paused,
//!    as is every later time-driven phase).
//! 3. **Actor** -- normalize the movement axis, move with axis-isolated
//!    collision fallback, update facing, re-acquire the interaction target.
//! 4. **Stations** -- advance stove cook/burn timers and the plate
//!    dispenser cadence.
//! 5. **Orders** -- advance the order spawn cadence.
//! 6. **Post-tick** -- deliver buffered events to subscribers.
//! 7. **Bookkeeping** -- increment the tick counter and recompute the
//!    state hash.
//!
//! # Ownership Protocol
//!
//! An item is owned by at most one holder (the actor or a station) at any
//! instant, and the item's back-reference always agrees with the holder's
//! forward reference. [`kitchen::Kitchen::transfer`] is the sole mutator of
//! that relation; placing onto an occupied holder is an error, never a
//! silent overwrite.
//!
//! # Key Types
//!
//! - [`kitchen::Kitchen`] -- the simulation engine and pipeline orchestrator.
//! - [`station::Station`] -- a holder with a role tag (counter, dispenser,
//!   plate dispenser, cutting board, stove, trash, service window).
//! - [`registry::Registry`] -- immutable catalog of item types, cut/cook/
//!   burn recipes, and orders (frozen at startup).
//! - [`orders::OrderBook`] -- outstanding orders, spawn cadence, matching.
//! - [`clock::MatchClock`] -- waiting/countdown/playing/over lifecycle.
//! - [`event::EventBus`] -- per-kind ring buffers with batched delivery.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point for deterministic time math.

pub mod actor;
pub mod clock;
pub mod event;
pub mod fixed;
pub mod hash;
pub mod holder;
pub mod id;
pub mod input;
pub mod item;
pub mod kitchen;
pub mod orders;
pub mod query;
pub mod registry;
pub mod rng;
pub mod station;
pub mod validation;
pub mod vec2;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
