//! Registry of defensive nodes and the per-site leader slots.
//!
//! Owned by the engine and handed to the systems that need it; there is no
//! global instance.

use std::collections::{BTreeMap, HashMap};

use hecs::Entity;

use bastion_core::types::NodeId;
use bastion_escalation::election;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredNode {
    pub entity: Entity,
    /// Site entity, once the node knows it.
    pub site: Option<Entity>,
}

#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeId, RegisteredNode>,
    leaders: HashMap<Entity, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Returns false if the id is already taken.
    pub fn register(&mut self, id: NodeId, entity: Entity) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, RegisteredNode { entity, site: None });
        true
    }

    pub fn set_site(&mut self, id: NodeId, site: Entity) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.site = Some(site);
        }
    }

    /// Remove a node, releasing any leader slot it holds.
    pub fn unregister(&mut self, id: NodeId) -> Option<RegisteredNode> {
        let removed = self.nodes.remove(&id)?;
        if let Some(site) = removed.site {
            if self.leaders.get(&site) == Some(&id) {
                self.leaders.remove(&site);
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: NodeId) -> Option<RegisteredNode> {
        self.nodes.get(&id).copied()
    }

    pub fn entity_of(&self, id: NodeId) -> Option<Entity> {
        self.nodes.get(&id).map(|n| n.entity)
    }

    /// Ids of every registered node guarding `site`, ascending.
    pub fn guards_of(&self, site: Entity) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, n)| n.site == Some(site))
            .map(|(id, _)| *id)
    }

    /// Compare-and-set the site's leader slot with `candidate`.
    /// Returns the slot holder afterwards.
    pub fn claim_leader(&mut self, site: Entity, candidate: NodeId) -> NodeId {
        let mut slot = self.leaders.get(&site).copied();
        let holder = election::claim_slot(&mut slot, candidate);
        self.leaders.insert(site, holder);
        holder
    }

    pub fn leader(&self, site: Entity) -> Option<NodeId> {
        self.leaders.get(&site).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
