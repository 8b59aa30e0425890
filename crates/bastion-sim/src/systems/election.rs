//! Coordinator election.
//!
//! Each node schedules one deferred election after it learns its site. The
//! election picks the lowest registered id for the site and settles it in the
//! site's leader slot; only the slot holder starts the sensing tick.

use hecs::{Entity, World};

use bastion_core::components::{DefensiveNode, Site};
use bastion_core::config::ReinforcementConfig;
use bastion_core::events::CoordinatorEvent;
use bastion_core::types::NodeId;
use bastion_escalation::election::lowest_id;

use crate::registry::NodeRegistry;
use crate::scheduler::{ScheduledTask, Scheduler};

/// Schedule the node's election if its site is known and it has not been
/// scheduled before. Returns true if an election was scheduled.
pub fn schedule(
    world: &mut World,
    scheduler: &mut dyn Scheduler,
    config: &ReinforcementConfig,
    node: Entity,
) -> bool {
    let Ok(mut n) = world.get::<&mut DefensiveNode>(node) else {
        return false;
    };
    if n.site.is_none() || n.coordinator_initialized {
        return false;
    }
    n.coordinator_initialized = true;
    let handle = scheduler.schedule_once(
        config.election_delay_secs,
        ScheduledTask::ElectCoordinator { node: n.id },
    );
    n.handles.push(handle);

    tracing::debug!(
        target: "bastion::election",
        node = n.id.0,
        delay_secs = config.election_delay_secs,
        "scheduled coordinator election"
    );
    true
}

/// Run the election for one node.
pub fn run(
    world: &mut World,
    registry: &mut NodeRegistry,
    scheduler: &mut dyn Scheduler,
    config: &ReinforcementConfig,
    node_id: NodeId,
    events: &mut Vec<CoordinatorEvent>,
) {
    let Some(node) = registry.entity_of(node_id) else {
        return;
    };
    let Some(site) = world.get::<&DefensiveNode>(node).ok().and_then(|n| n.site) else {
        return;
    };
    let Some((site_id, site_name)) = world
        .get::<&Site>(site)
        .ok()
        .map(|s| (s.id, s.name.clone()))
    else {
        tracing::warn!(
            target: "bastion::election",
            node = node_id.0,
            "election skipped, site no longer exists"
        );
        return;
    };

    // Only the elected node writes the slot; a node that yields leaves it
    // for the lower id to claim in its own election.
    let candidate = lowest_id(node_id, registry.guards_of(site));
    let coordinator = candidate == node_id && registry.claim_leader(site, node_id) == node_id;

    let Ok(mut n) = world.get::<&mut DefensiveNode>(node) else {
        return;
    };
    n.coordinator = coordinator;

    if coordinator {
        let handle = scheduler.schedule_repeating(
            config.sense_interval_secs,
            ScheduledTask::SenseCombat { node: node_id },
        );
        n.handles.push(handle);
        tracing::info!(
            target: "bastion::election",
            node = node_id.0,
            site = %site_name,
            period_secs = config.sense_interval_secs,
            "node is COORDINATOR for site"
        );
    } else {
        tracing::info!(
            target: "bastion::election",
            node = node_id.0,
            site = %site_name,
            candidate = candidate.0,
            leader = ?registry.leader(site),
            "node is NON-COORDINATOR for site (no periodic checks)"
        );
    }

    events.push(CoordinatorEvent::ElectionResolved {
        node: node_id,
        site: site_id,
        coordinator,
    });
}
