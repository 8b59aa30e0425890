//! Lifecycle reaper: drops dead or empty reinforcement assets from tracking.
//!
//! Reaping never destroys anything; removed entries are left to decay
//! naturally. Only an explicit `CombatEndPolicy::Despawn` destroys assets.

use hecs::{Entity, World};

use bastion_core::components::{AerialAsset, DefensiveNode, ReinforcementAsset, UnitGroup};
use bastion_core::enums::{AssetKind, CombatEndPolicy};

use crate::world_setup;

/// Whether a tracked asset still exists and has at least one live member.
pub fn asset_alive(world: &World, asset: &ReinforcementAsset) -> bool {
    match asset.kind {
        AssetKind::UnitGroup => group_alive(world, asset.entity),
        AssetKind::Aerial => world
            .get::<&AerialAsset>(asset.entity)
            .map(|aerial| aerial.crew.iter().any(|m| world.contains(*m)))
            .unwrap_or(false),
    }
}

/// Whether a unit group exists and has at least one live member.
pub fn group_alive(world: &World, group: Entity) -> bool {
    world
        .get::<&UnitGroup>(group)
        .map(|g| g.members.iter().any(|m| world.contains(*m)))
        .unwrap_or(false)
}

/// Prune the node's tracked assets. Returns how many entries were dropped.
pub fn run(world: &mut World, node: Entity) -> usize {
    let Ok(tracked) = world.get::<&DefensiveNode>(node).map(|n| n.assets.clone()) else {
        return 0;
    };
    let alive: Vec<ReinforcementAsset> = tracked
        .iter()
        .filter(|asset| asset_alive(world, asset))
        .copied()
        .collect();
    let removed = tracked.len() - alive.len();

    if removed > 0 {
        if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
            tracing::debug!(
                target: "bastion::reaper",
                node = n.id.0,
                removed,
                remaining = alive.len(),
                "reaped dead reinforcement assets"
            );
            n.assets = alive;
        }
    }
    removed
}

/// Clear every tracked asset of a node on combat end.
/// Returns how many entries were cleared.
pub fn clear_all(
    world: &mut World,
    node: Entity,
    policy: CombatEndPolicy,
    despawn_buffer: &mut Vec<Entity>,
) -> usize {
    despawn_buffer.clear();

    let cleared = match world.get::<&mut DefensiveNode>(node) {
        Ok(mut n) => {
            let assets = std::mem::take(&mut n.assets);
            if policy == CombatEndPolicy::Despawn {
                despawn_buffer.extend(assets.iter().map(|a| a.entity));
            }
            assets.len()
        }
        Err(_) => return 0,
    };

    for entity in despawn_buffer.drain(..) {
        world_setup::despawn_asset(world, entity);
    }
    cleared
}

/// Drop dead garrison groups. Returns how many remain.
pub fn prune_groups(world: &World, groups: &mut Vec<Entity>) -> usize {
    groups.retain(|g| group_alive(world, *g));
    groups.len()
}
