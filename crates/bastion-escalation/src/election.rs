//! Coordinator election rule.

use bastion_core::types::NodeId;

/// Lowest id among `me` and the siblings registered for the same site.
pub fn lowest_id(me: NodeId, siblings: impl IntoIterator<Item = NodeId>) -> NodeId {
    siblings.into_iter().fold(me, NodeId::min)
}

/// Compare-and-set on a site's leader slot.
///
/// An empty slot takes `candidate`; an occupied slot is authoritative.
/// Returns the slot's holder after the operation.
pub fn claim_slot(slot: &mut Option<NodeId>, candidate: NodeId) -> NodeId {
    *slot.get_or_insert(candidate)
}
