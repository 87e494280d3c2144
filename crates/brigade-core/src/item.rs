//! Item instances and plate contents.
//!
//! Unlike fungible-stack inventories, every kitchen item is a unique
//! ownable entity: it lives in the kitchen's arena and carries a
//! back-reference to the single holder that owns it. The back-reference is
//! maintained exclusively by the kitchen transfer protocol; nothing else
//! writes it.

use crate::id::{ItemTypeId, StationId};
use serde::{Deserialize, Serialize};

/// The entity that owns an item: the player-controlled actor or a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolderId {
    Actor,
    Station(StationId),
}

/// A live kitchen item: an ingredient, a transformed ingredient, or a plate.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub item_type: ItemTypeId,
    /// Back-reference to the owning holder. Always agrees with the holder's
    /// forward reference; the transfer protocol is the sole writer.
    pub owner: HolderId,
    /// Present iff this item is a plate.
    pub plate: Option<PlateContents>,
}

impl Item {
    pub fn is_plate(&self) -> bool {
        self.plate.is_some()
    }

    pub fn as_plate(&self) -> Option<&PlateContents> {
        self.plate.as_ref()
    }

    pub fn as_plate_mut(&mut self) -> Option<&mut PlateContents> {
        self.plate.as_mut()
    }
}

/// The ingredient identities accumulated on a plate.
///
/// Contents are a set of item types: a type either is or is not on the
/// plate, never twice. The allowed set is fixed at plate creation and
/// contents only grow until the plate is delivered or trashed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateContents {
    allowed: Vec<ItemTypeId>,
    contents: Vec<ItemTypeId>,
}

impl PlateContents {
    pub fn new(allowed: Vec<ItemTypeId>) -> Self {
        Self {
            allowed,
            contents: Vec::new(),
        }
    }

    /// Attempt to add an ingredient type. Fails (returning false) when the
    /// type is not in the allowed set or is already on the plate.
    #[must_use = "a false result means the source item must not be destroyed"]
    pub fn try_add(&mut self, ingredient: ItemTypeId) -> bool {
        if !self.allowed.contains(&ingredient) {
            return false;
        }
        if self.contents.contains(&ingredient) {
            return false;
        }
        self.contents.push(ingredient);
        true
    }

    /// Ingredient types currently on the plate, in add order.
    pub fn contents(&self) -> &[ItemTypeId] {
        &self.contents
    }

    /// The fixed allowed-ingredient set.
    pub fn allowed(&self) -> &[ItemTypeId] {
        &self.allowed
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bun() -> ItemTypeId {
        ItemTypeId(0)
    }
    fn patty() -> ItemTypeId {
        ItemTypeId(1)
    }
    fn rock() -> ItemTypeId {
        ItemTypeId(99)
    }

    #[test]
    fn try_add_accepts_allowed() {
        let mut plate = PlateContents::new(vec![bun(), patty()]);
        assert!(plate.try_add(bun()));
        assert_eq!(plate.contents(), &[bun()]);
    }

    #[test]
    fn try_add_rejects_disallowed() {
        let mut plate = PlateContents::new(vec![bun()]);
        assert!(!plate.try_add(rock()));
        assert!(plate.is_empty());
    }

    #[test]
    fn try_add_rejects_duplicate() {
        let mut plate = PlateContents::new(vec![bun(), patty()]);
        assert!(plate.try_add(bun()));
        assert!(!plate.try_add(bun()));
        assert_eq!(plate.len(), 1);
    }

    #[test]
    fn try_add_grows_by_exactly_one() {
        let mut plate = PlateContents::new(vec![bun(), patty()]);
        let before = plate.len();
        assert!(plate.try_add(patty()));
        assert_eq!(plate.len(), before + 1);
        let before = plate.len();
        assert!(!plate.try_add(patty()));
        assert_eq!(plate.len(), before);
    }

    #[test]
    fn contents_always_subset_of_allowed() {
        let mut plate = PlateContents::new(vec![bun(), patty()]);
        let _ = plate.try_add(bun());
        let _ = plate.try_add(rock());
        let _ = plate.try_add(patty());
        for t in plate.contents() {
            assert!(plate.allowed().contains(t));
        }
    }

    #[test]
    fn item_plate_accessors() {
        let plain = Item {
            item_type: bun(),
            owner: HolderId::Actor,
            plate: None,
        };
        assert!(!plain.is_plate());
        assert!(plain.as_plate().is_none());

        let mut plate = Item {
            item_type: ItemTypeId(5),
            owner: HolderId::Actor,
            plate: Some(PlateContents::new(vec![bun()])),
        };
        assert!(plate.is_plate());
        assert!(plate.as_plate_mut().unwrap().try_add(bun()));
    }
}
