//! The holder capability and the transfer-protocol error taxonomy.

use crate::id::ItemId;
use crate::item::HolderId;

/// Capability: can exclusively own at most one item.
///
/// Implemented by the actor and every station. Holding is a pure
/// forward-reference slot; the paired item back-reference and both sides
/// of every mutation go through the kitchen transfer protocol, never
/// through direct slot writes from gameplay code.
pub trait Holder {
    fn held_item(&self) -> Option<ItemId>;

    /// Raw slot write. Only the kitchen transfer/spawn/destroy primitives
    /// call this.
    fn set_held_item(&mut self, item: Option<ItemId>);

    fn has_item(&self) -> bool {
        self.held_item().is_some()
    }
}

/// Violations of the transfer protocol. These indicate a bug in the caller,
/// not an expected gameplay outcome: interaction code always checks the
/// destination before transferring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The destination already holds an item. Never silently overwritten.
    #[error("destination holder {to:?} already holds an item")]
    DestinationOccupied { to: HolderId },

    /// The item id does not resolve to a live item (stale or foreign id).
    #[error("unknown item {item:?}")]
    UnknownItem { item: ItemId },
}
