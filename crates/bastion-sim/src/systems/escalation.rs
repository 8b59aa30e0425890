//! Coordinator sensing tick.
//!
//! Runs the combat sensor, feeds the result through the escalation FSM from
//! bastion-escalation, then applies the outcome: start/end bookkeeping, wave
//! spawns, and asset reaping.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{DefensiveNode, Site};
use bastion_core::config::ReinforcementConfig;
use bastion_core::events::CoordinatorEvent;
use bastion_core::types::Timestamp;

use bastion_escalation::fsm::{evaluate, EscalationContext, Transition};

use crate::scheduler::Scheduler;
use crate::systems::{combat_sensor, reaper, reinforcement};
use crate::terrain::TerrainQuery;

/// One sensing tick for a coordinator node. Non-coordinators and nodes
/// without a site do nothing.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    scheduler: &mut dyn Scheduler,
    rng: &mut ChaCha8Rng,
    terrain: &dyn TerrainQuery,
    config: &ReinforcementConfig,
    node: Entity,
    now: Timestamp,
    events: &mut Vec<CoordinatorEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let Ok((node_id, faction, site, coordinator, tracking)) = world
        .get::<&DefensiveNode>(node)
        .map(|n| (n.id, n.faction, n.site, n.coordinator, n.tracking))
    else {
        return;
    };
    let Some(site) = site.filter(|_| coordinator) else {
        return;
    };
    let Some((site_id, site_name)) = world
        .get::<&Site>(site)
        .ok()
        .map(|s| (s.id, s.name.clone()))
    else {
        return;
    };

    let combat_detected =
        combat_sensor::detect_combat(world, site, faction, config.detection_radius);
    let update = evaluate(&EscalationContext {
        tracking,
        combat_detected,
        now,
        cooldown_secs: config.wave_cooldown_secs,
        waves: &config.waves,
    });

    if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
        n.tracking = update.tracking;
    }

    match update.transition {
        Transition::Started => {
            tracing::info!(
                target: "bastion::escalation",
                node = node_id.0,
                site = %site_name,
                "combat detected, tracking started"
            );
            events.push(CoordinatorEvent::CombatStarted {
                node: node_id,
                site: site_id,
            });
        }
        Transition::Ended => {
            let cleared = reaper::clear_all(world, node, config.combat_end_policy, despawn_buffer);
            if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
                n.garrison.active_wave = None;
                n.garrison.confirm_attempts = 0;
            }
            tracing::info!(
                target: "bastion::escalation",
                node = node_id.0,
                site = %site_name,
                cleared,
                policy = ?config.combat_end_policy,
                "combat ended, tracking reset"
            );
            events.push(CoordinatorEvent::CombatEnded {
                node: node_id,
                site: site_id,
            });
        }
        Transition::None => {}
    }

    if update.cooling_down {
        tracing::trace!(
            target: "bastion::escalation",
            node = node_id.0,
            "wave suppressed by cooldown"
        );
    }

    if let Some(tier) = update.fire {
        match reinforcement::fire_wave(world, scheduler, rng, terrain, config, node, tier) {
            Ok(report) => {
                events.push(CoordinatorEvent::WaveFired {
                    node: node_id,
                    site: site_id,
                    tier,
                    spawned: report.total(),
                });
            }
            Err(err) => {
                // A wave that never spawned must not count as fired.
                let (current_wave, last_wave) = if update.transition == Transition::Started {
                    (0, None)
                } else {
                    (tracking.current_wave, tracking.last_wave)
                };
                if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
                    n.tracking.current_wave = current_wave;
                    n.tracking.last_wave = last_wave;
                }
                tracing::warn!(
                    target: "bastion::escalation",
                    node = node_id.0,
                    tier,
                    error = %err,
                    "reinforcement wave aborted"
                );
            }
        }
    }

    let removed = reaper::run(world, node);
    if removed > 0 {
        events.push(CoordinatorEvent::AssetsReaped {
            node: node_id,
            removed,
        });
    }
}
