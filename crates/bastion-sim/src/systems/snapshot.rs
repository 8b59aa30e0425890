//! Snapshot system: queries the ECS world and builds a `CoordinatorSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use bastion_core::components::{DefensiveNode, Site};
use bastion_core::events::{CoordinatorEvent, Notification};
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};

use crate::registry::NodeRegistry;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    registry: &NodeRegistry,
    time: &SimTime,
    notifications: Vec<Notification>,
    events: Vec<CoordinatorEvent>,
) -> CoordinatorSnapshot {
    CoordinatorSnapshot {
        time: *time,
        sites: build_sites(world, registry),
        nodes: build_nodes(world),
        notifications,
        events,
    }
}

/// Sites sorted by id.
fn build_sites(world: &World, registry: &NodeRegistry) -> Vec<SiteView> {
    let mut sites: Vec<SiteView> = world
        .query::<(&Site, &Position)>()
        .iter()
        .map(|(entity, (site, pos))| SiteView {
            id: site.id,
            name: site.name.clone(),
            position: *pos,
            faction: site.faction,
            coordinator: registry.leader(entity),
            guard_count: registry.guards_of(entity).count() as u32,
        })
        .collect();
    sites.sort_by_key(|s| s.id);
    sites
}

/// Nodes sorted by id.
fn build_nodes(world: &World) -> Vec<NodeView> {
    let mut nodes: Vec<NodeView> = world
        .query::<&DefensiveNode>()
        .iter()
        .map(|(_, node)| NodeView {
            id: node.id,
            site: node
                .site
                .and_then(|site| world.get::<&Site>(site).ok().map(|s| s.id)),
            coordinator: node.coordinator,
            tracking: node.tracking,
            tracked_assets: node.assets.len() as u32,
            presence: node.presence.state,
            garrison_groups: node.garrison.groups.len() as u32,
            wave_config_selected: node.garrison.active_wave.is_some(),
        })
        .collect();
    nodes.sort_by_key(|n| n.id);
    nodes
}
