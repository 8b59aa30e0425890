//! Reinforcement spawner: materializes one wave tier at a site.
//!
//! Preconditions are checked before anything is created, so a failed
//! validation leaves no partial wave behind. Once spawning starts, a group
//! whose directive cannot be issued still counts as spawned (partial).

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::config::{ReinforcementConfig, WaveSpec};
use bastion_core::enums::AssetKind;
use bastion_core::error::{DirectiveError, SpawnError};
use bastion_core::events::CoordinatorEvent;
use bastion_core::types::{NodeId, Position};
use bastion_escalation::profiles::{get_profile, population_band};

use crate::scheduler::{ScheduledTask, Scheduler};
use crate::systems::{combat_sensor, reaper};
use crate::terrain::TerrainQuery;
use crate::world_setup;

/// Outcome of one wave spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveReport {
    /// Elements spawned with a defend directive in place.
    pub spawned: u32,
    /// Elements spawned whose directive failed.
    pub partial: u32,
}

impl WaveReport {
    pub fn total(&self) -> u32 {
        self.spawned + self.partial
    }
}

/// Everything validated up front, before any entity is created.
struct WavePlan<'a> {
    node_id: NodeId,
    faction: bastion_core::types::FactionId,
    site: Entity,
    site_name: String,
    site_pos: Position,
    wave: &'a WaveSpec,
}

/// Spawn wave `tier` for `node`, register the assets, select the wave spawn
/// config, and schedule the alert broadcast and the spawn confirmation.
#[allow(clippy::too_many_arguments)]
pub fn fire_wave(
    world: &mut World,
    scheduler: &mut dyn Scheduler,
    rng: &mut ChaCha8Rng,
    terrain: &dyn TerrainQuery,
    config: &ReinforcementConfig,
    node: Entity,
    tier: u8,
) -> Result<WaveReport, SpawnError> {
    let plan = validate(world, config, node, tier)?;

    let headcount = combat_sensor::combatant_count(world);
    let profile = get_profile(population_band(headcount, &config.skill_bands), &config.skill_bands);

    let mut report = WaveReport::default();
    let mut assets = Vec::new();

    for group in &plan.wave.groups {
        // Template presence was checked in `validate`.
        let members = config.template(group.archetype).map(|t| t.members).unwrap_or(0);
        for _ in 0..group.count {
            let anchor = terrain
                .find_safe_position(
                    plan.site_pos,
                    config.min_spawn_distance,
                    config.min_spawn_distance + plan.wave.dispersion_radius,
                    rng,
                )
                .unwrap_or_else(|| {
                    tracing::debug!(
                        target: "bastion::spawner",
                        node = plan.node_id.0,
                        "no safe spawn position, falling back to site origin"
                    );
                    plan.site_pos
                });
            let entity = world_setup::spawn_group(
                world,
                rng,
                group.archetype,
                plan.faction,
                anchor,
                members,
                profile,
            );
            record_directive(world, &plan, entity, &mut report);
            assets.push(ReinforcementAsset {
                entity,
                kind: AssetKind::UnitGroup,
                tier,
            });
        }
    }

    if let Some(aerial) = plan.wave.aerial {
        let entity = world_setup::spawn_aerial(
            world,
            rng,
            plan.faction,
            plan.site_pos,
            config.aerial_standoff_distance,
            config.aerial_altitude,
            aerial.crew,
            profile,
        );
        record_directive(world, &plan, entity, &mut report);
        assets.push(ReinforcementAsset {
            entity,
            kind: AssetKind::Aerial,
            tier,
        });
    }

    let wave_config = SpawnConfig {
        group_count: plan.wave.groups.iter().map(|g| g.count).sum(),
        dispersion_radius: plan.wave.dispersion_radius,
        archetype: plan.wave.groups.first().map(|g| g.archetype).unwrap_or_default(),
        respawn_secs: config.normal_spawn.respawn_secs,
    };

    let broadcast = scheduler.schedule_once(
        config.notification_delay_secs,
        ScheduledTask::BroadcastWave {
            node: plan.node_id,
            site_name: plan.site_name.clone(),
            tier,
        },
    );
    let confirm = scheduler.schedule_once(
        config.spawn_confirm_delay_secs,
        ScheduledTask::ConfirmWaveSpawn {
            node: plan.node_id,
            tier,
        },
    );

    if let Ok(mut n) = world.get::<&mut DefensiveNode>(node) {
        n.assets.extend(assets);
        n.garrison.active_wave = Some(PendingWave {
            tier,
            config: wave_config,
        });
        n.garrison.confirm_attempts = 0;
        n.handles.push(broadcast);
        n.handles.push(confirm);
    }

    tracing::info!(
        target: "bastion::spawner",
        node = plan.node_id.0,
        site = %plan.site_name,
        tier,
        spawned = report.spawned,
        partial = report.partial,
        headcount,
        perception = profile.perception,
        "reinforcement wave spawned"
    );
    if report.partial > 0 {
        tracing::warn!(
            target: "bastion::spawner",
            node = plan.node_id.0,
            tier,
            partial = report.partial,
            "some reinforcement elements spawned without a defend directive"
        );
    }

    Ok(report)
}

/// Check that wave `tier` materialized and release the wave spawn config.
/// A failed first check is retried exactly once. Checks for a tier that a
/// later wave has superseded are ignored.
pub fn confirm_wave_spawn(
    world: &mut World,
    scheduler: &mut dyn Scheduler,
    config: &ReinforcementConfig,
    node: Entity,
    tier: u8,
    events: &mut Vec<CoordinatorEvent>,
) {
    let Ok(tracked) = world.get::<&DefensiveNode>(node).map(|n| {
        (
            n.id,
            n.garrison.active_wave.map(|wave| wave.tier),
            n.garrison.confirm_attempts,
            n.assets.clone(),
        )
    }) else {
        return;
    };
    let (node_id, pending, attempts, assets) = tracked;

    match pending {
        Some(pending_tier) if pending_tier == tier => {}
        Some(pending_tier) => {
            tracing::debug!(
                target: "bastion::spawner",
                node = node_id.0,
                tier,
                pending_tier,
                "confirmation superseded by a later wave"
            );
            return;
        }
        None => {
            tracing::trace!(
                target: "bastion::spawner",
                node = node_id.0,
                "no pending wave config to release"
            );
            return;
        }
    }

    let confirmed = assets
        .iter()
        .filter(|a| a.tier == tier)
        .any(|a| reaper::asset_alive(world, a));

    let Ok(mut n) = world.get::<&mut DefensiveNode>(node) else {
        return;
    };

    if !confirmed && attempts == 0 {
        n.garrison.confirm_attempts = 1;
        let handle = scheduler.schedule_once(
            config.spawn_retry_delay_secs,
            ScheduledTask::ConfirmWaveSpawn { node: node_id, tier },
        );
        n.handles.push(handle);
        tracing::warn!(
            target: "bastion::spawner",
            node = node_id.0,
            tier,
            retry_secs = config.spawn_retry_delay_secs,
            "reinforcement spawn not confirmed, re-checking once"
        );
        return;
    }

    n.garrison.active_wave = None;
    n.garrison.confirm_attempts = 0;
    if confirmed {
        tracing::info!(
            target: "bastion::spawner",
            node = node_id.0,
            tier,
            "reinforcement spawn confirmed, normal spawn parameters restored"
        );
    } else {
        tracing::warn!(
            target: "bastion::spawner",
            node = node_id.0,
            tier,
            "reinforcement spawn never confirmed, restoring normal parameters"
        );
    }
    events.push(CoordinatorEvent::WaveSettled {
        node: node_id,
        tier,
        confirmed,
    });
}

/// Issue a "defend this position" directive, replacing any prior one.
pub fn assign_defend_directive(
    world: &mut World,
    asset: Entity,
    site: Entity,
    target: Position,
) -> Result<(), DirectiveError> {
    if !world.contains(asset) {
        return Err(DirectiveError::NoSuchEntity(asset));
    }
    let has_members = reaper::group_alive(world, asset)
        || world
            .get::<&AerialAsset>(asset)
            .map(|a| a.crew.iter().any(|m| world.contains(*m)))
            .unwrap_or(false);
    if !has_members {
        return Err(DirectiveError::EmptyGroup(asset));
    }
    world
        .insert_one(asset, DefendDirective { site, target })
        .map_err(|_| DirectiveError::NoSuchEntity(asset))
}

fn record_directive(world: &mut World, plan: &WavePlan, entity: Entity, report: &mut WaveReport) {
    match assign_defend_directive(world, entity, plan.site, plan.site_pos) {
        Ok(()) => report.spawned += 1,
        Err(err) => {
            tracing::warn!(
                target: "bastion::spawner",
                node = plan.node_id.0,
                error = %err,
                "defend directive failed"
            );
            report.partial += 1;
        }
    }
}

fn validate<'a>(
    world: &World,
    config: &'a ReinforcementConfig,
    node: Entity,
    tier: u8,
) -> Result<WavePlan<'a>, SpawnError> {
    let (node_id, faction, site) = world
        .get::<&DefensiveNode>(node)
        .map(|n| (n.id, n.faction, n.site))
        .map_err(|_| SpawnError::MissingSite)?;
    let site = site.ok_or(SpawnError::MissingSite)?;

    let (owner, site_pos) =
        combat_sensor::site_owner(world, site).ok_or(SpawnError::SiteUnavailable(site))?;
    if owner.is_none() {
        return Err(SpawnError::SiteUnowned(site));
    }
    let site_name = world
        .get::<&Site>(site)
        .map(|s| s.name.clone())
        .map_err(|_| SpawnError::SiteUnavailable(site))?;

    let wave = config.wave(tier).ok_or(SpawnError::NoMembers(tier))?;
    for group in &wave.groups {
        if config.template(group.archetype).is_none() {
            return Err(SpawnError::MissingTemplate(group.archetype));
        }
    }
    let elements: u32 = wave.groups.iter().map(|g| g.count).sum::<u32>()
        + u32::from(wave.aerial.is_some());
    if elements == 0 {
        return Err(SpawnError::NoMembers(tier));
    }

    Ok(WavePlan {
        node_id,
        faction,
        site,
        site_name,
        site_pos,
        wave,
    })
}
