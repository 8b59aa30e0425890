//! Presence decay: per-node frontline evaluation.
//!
//! A node whose site sits behind the lines with no contest nearby decays to
//! INACTIVE after the grace period and its garrison is despawned.

use hecs::{Entity, World};

use bastion_core::components::DefensiveNode;
use bastion_core::config::ReinforcementConfig;
use bastion_core::events::CoordinatorEvent;
use bastion_core::types::Timestamp;

use bastion_escalation::decay::{evaluate, PresenceContext};

use crate::systems::combat_sensor;
use crate::world_setup;

/// Update presence for every node bound to a site.
pub fn run(
    world: &mut World,
    config: &ReinforcementConfig,
    now: Timestamp,
    events: &mut Vec<CoordinatorEvent>,
) {
    let nodes: Vec<(Entity, Entity)> = world
        .query::<&DefensiveNode>()
        .iter()
        .filter_map(|(entity, n)| n.site.map(|site| (entity, site)))
        .collect();

    for (node, site) in nodes {
        update_node(world, config, now, node, site, events);
    }
}

fn update_node(
    world: &mut World,
    config: &ReinforcementConfig,
    now: Timestamp,
    node: Entity,
    site: Entity,
    events: &mut Vec<CoordinatorEvent>,
) {
    let Some((owner, site_pos)) = combat_sensor::site_owner(world, site) else {
        return;
    };
    let (site_friendly, on_frontline) = match owner {
        Some(faction) => (
            combat_sensor::faction_has_combatants(world, faction),
            combat_sensor::hostile_site_within(
                world,
                site,
                &site_pos,
                faction,
                config.frontline_range,
            ),
        ),
        None => (false, false),
    };

    let Ok(mut n) = world.get::<&mut DefensiveNode>(node) else {
        return;
    };
    let update = evaluate(&PresenceContext {
        timer: n.presence,
        site_friendly,
        on_frontline,
        now,
        grace_period_secs: config.grace_period_secs,
    });
    n.presence = update.timer;

    if update.state_changed {
        tracing::info!(
            target: "bastion::presence",
            node = n.id.0,
            state = ?update.timer.state,
            on_frontline,
            "presence state changed"
        );
        events.push(CoordinatorEvent::PresenceChanged {
            node: n.id,
            state: update.timer.state,
        });
    }

    if update.keep_active || !n.garrison.spawned {
        return;
    }
    let groups = std::mem::take(&mut n.garrison.groups);
    n.garrison.spawned = false;
    n.garrison.respawn_deadline = None;
    let node_id = n.id;
    drop(n);

    for group in &groups {
        world_setup::despawn_asset(world, *group);
    }
    tracing::debug!(
        target: "bastion::presence",
        node = node_id.0,
        groups = groups.len(),
        "garrison despawned behind the lines"
    );
}
