//! Invariant audit for the ownership model.
//!
//! The transfer protocol is supposed to make these violations impossible;
//! the audit exists so tests (and debug builds) can prove it after
//! arbitrary interaction sequences instead of trusting the protocol.

use crate::holder::Holder;
use crate::id::{ItemId, ItemTypeId, StationId};
use crate::item::HolderId;
use crate::kitchen::Kitchen;
use crate::station::CookPhase;
use std::collections::HashSet;

/// A broken invariant found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// An item's owner does not reference it back.
    ItemOwnerMismatch { item: ItemId, owner: HolderId },
    /// A holder slot references an item that no longer exists.
    SlotDangling { holder: HolderId, item: ItemId },
    /// A holder slot references an item owned by someone else.
    SlotOwnerMismatch { holder: HolderId, item: ItemId },
    /// A plate carries an ingredient outside its allowed set.
    PlateDisallowedIngredient { item: ItemId, ingredient: ItemTypeId },
    /// A plate carries the same ingredient type twice.
    PlateDuplicateIngredient { item: ItemId, ingredient: ItemTypeId },
    /// A stove reports a non-idle phase with nothing on it.
    StovePhaseWithoutItem { station: StationId },
}

/// Check every ownership and plate invariant. Returns all violations found;
/// an empty vec means the kitchen state is consistent.
pub fn audit(kitchen: &Kitchen) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Forward direction: every item's owner must hold exactly that item.
    for (id, item) in kitchen.items() {
        if kitchen.held_by(item.owner) != Some(id) {
            violations.push(Violation::ItemOwnerMismatch {
                item: id,
                owner: item.owner,
            });
        }

        if let Some(plate) = item.as_plate() {
            let mut seen = HashSet::new();
            for &ingredient in plate.contents() {
                if !plate.allowed().contains(&ingredient) {
                    violations.push(Violation::PlateDisallowedIngredient {
                        item: id,
                        ingredient,
                    });
                }
                if !seen.insert(ingredient) {
                    violations.push(Violation::PlateDuplicateIngredient {
                        item: id,
                        ingredient,
                    });
                }
            }
        }
    }

    // Reverse direction: every non-empty slot must point at a live item
    // that points back.
    let holders = std::iter::once(HolderId::Actor)
        .chain(kitchen.stations().map(|(id, _)| HolderId::Station(id)));
    for holder in holders {
        if let Some(item) = kitchen.held_by(holder) {
            match kitchen.item(item) {
                None => violations.push(Violation::SlotDangling { holder, item }),
                Some(entry) if entry.owner != holder => {
                    violations.push(Violation::SlotOwnerMismatch { holder, item });
                }
                Some(_) => {}
            }
        }
    }

    // Stove phase exists only while an item is present.
    for (id, station) in kitchen.stations() {
        if let Some(phase) = station.cook_phase()
            && phase != CookPhase::Idle
            && !station.has_item()
        {
            violations.push(Violation::StovePhaseWithoutItem { station: id });
        }
    }

    violations
}
