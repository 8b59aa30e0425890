//! Garrison upkeep: spawn and respawn a node's normal defenders.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{DefensiveNode, SpawnConfig};
use bastion_core::config::ReinforcementConfig;
use bastion_core::enums::PresenceState;
use bastion_core::types::{FactionId, Timestamp};
use bastion_escalation::profiles::{get_profile, population_band};

use crate::systems::{combat_sensor, reaper, reinforcement};
use crate::terrain::TerrainQuery;
use crate::world_setup;

/// Run garrison upkeep for every node bound to a site its faction owns.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    terrain: &dyn TerrainQuery,
    config: &ReinforcementConfig,
    now: Timestamp,
) {
    let nodes: Vec<Entity> = world
        .query::<&DefensiveNode>()
        .iter()
        .filter(|(_, n)| n.site.is_some() && n.presence.state != PresenceState::Inactive)
        .map(|(entity, _)| entity)
        .collect();

    for node in nodes {
        upkeep(world, rng, terrain, config, now, node);
    }
}

fn upkeep(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    terrain: &dyn TerrainQuery,
    config: &ReinforcementConfig,
    now: Timestamp,
    node: Entity,
) {
    let Ok((faction, site, mut groups, spawned, deadline)) =
        world.get::<&DefensiveNode>(node).map(|n| {
            (
                n.faction,
                n.site,
                n.garrison.groups.clone(),
                n.garrison.spawned,
                n.garrison.respawn_deadline,
            )
        })
    else {
        return;
    };
    let Some(site) = site else {
        return;
    };
    let Some((Some(owner), site_pos)) = combat_sensor::site_owner(world, site) else {
        return;
    };
    if owner != faction {
        return;
    }

    reaper::prune_groups(world, &mut groups);

    let Ok(mut n) = world.get::<&mut DefensiveNode>(node) else {
        return;
    };
    n.garrison.groups = groups;

    if spawned {
        if n.garrison.groups.is_empty() {
            n.garrison.spawned = false;
            n.garrison.respawn_deadline = Some(now.after(n.garrison.normal.respawn_secs));
            tracing::debug!(
                target: "bastion::garrison",
                node = n.id.0,
                respawn_secs = n.garrison.normal.respawn_secs,
                "garrison wiped out, respawn scheduled"
            );
        }
        return;
    }
    if deadline.is_some_and(|d| now < d) {
        return;
    }

    let spawn = *n.garrison.current_config();
    let node_id = n.id;
    drop(n);

    let spawned_groups = spawn_groups(world, rng, terrain, config, &spawn, faction, site, site_pos);
    if spawned_groups.is_empty() {
        // Nothing could be fielded; try again after a normal respawn delay.
        if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
            n.garrison.respawn_deadline = Some(now.after(n.garrison.normal.respawn_secs));
        }
        return;
    }

    if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
        tracing::debug!(
            target: "bastion::garrison",
            node = node_id.0,
            groups = spawned_groups.len(),
            archetype = ?spawn.archetype,
            "garrison spawned"
        );
        n.garrison.groups = spawned_groups;
        n.garrison.spawned = true;
        n.garrison.respawn_deadline = None;
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_groups(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    terrain: &dyn TerrainQuery,
    config: &ReinforcementConfig,
    spawn: &SpawnConfig,
    faction: FactionId,
    site: Entity,
    site_pos: bastion_core::types::Position,
) -> Vec<Entity> {
    let Some(template) = config.template(spawn.archetype) else {
        tracing::warn!(
            target: "bastion::garrison",
            archetype = ?spawn.archetype,
            "no group template for garrison archetype"
        );
        return Vec::new();
    };
    let headcount = combat_sensor::combatant_count(world);
    let profile = get_profile(population_band(headcount, &config.skill_bands), &config.skill_bands);

    (0..spawn.group_count)
        .map(|_| {
            let anchor = terrain
                .find_safe_position(site_pos, 0.0, spawn.dispersion_radius, rng)
                .unwrap_or(site_pos);
            let group = world_setup::spawn_group(
                world,
                rng,
                spawn.archetype,
                faction,
                anchor,
                template.members,
                profile,
            );
            if let Err(err) = reinforcement::assign_defend_directive(world, group, site, site_pos) {
                tracing::warn!(
                    target: "bastion::garrison",
                    error = %err,
                    "garrison group spawned without a defend directive"
                );
            }
            group
        })
        .collect()
}
