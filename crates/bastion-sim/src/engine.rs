//! Reinforcement engine: the coordinator runtime.
//!
//! `ReinforcementEngine` owns the hecs ECS world that models the surrounding
//! game, the call-queue scheduler, and the node registry. It processes world
//! commands, dispatches due callbacks, runs the presence and garrison systems,
//! and produces `CoordinatorSnapshot`s. Headless and single-threaded, enabling
//! deterministic testing.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::WorldCommand;
use bastion_core::components::{Combatant, DefensiveNode, Site};
use bastion_core::config::{ReinforcementConfig, CONFIG_ENV_VAR};
use bastion_core::constants::TICK_RATE;
use bastion_core::events::{CoordinatorEvent, Notification};
use bastion_core::state::CoordinatorSnapshot;
use bastion_core::types::{CombatantId, NodeId, Position, SimTime, SiteId, Timestamp};

use crate::registry::NodeRegistry;
use crate::scheduler::{CallQueue, DueTask, ScheduledTask, Scheduler};
use crate::systems;
use crate::terrain::{OpenTerrain, TerrainQuery};
use crate::world_setup;

/// Configuration for starting a new engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same spawn layout.
    pub seed: u64,
    pub reinforcement: ReinforcementConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reinforcement: ReinforcementConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default seed with the reinforcement config loaded from
    /// `BASTION_REINFORCEMENT_CONFIG`, or the builtin one.
    pub fn from_env() -> Self {
        let (reinforcement, _path) = ReinforcementConfig::load_with_env_override(CONFIG_ENV_VAR);
        Self {
            reinforcement,
            ..Self::default()
        }
    }
}

/// The coordinator engine. Owns the ECS world and all coordinator state.
pub struct ReinforcementEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    config: ReinforcementConfig,
    scheduler: CallQueue,
    registry: NodeRegistry,
    terrain: Box<dyn TerrainQuery>,
    command_queue: VecDeque<WorldCommand>,
    sites: HashMap<SiteId, Entity>,
    combatants: HashMap<CombatantId, Entity>,
    /// Notifications delivered this tick.
    tick_notifications: Vec<Notification>,
    /// Notifications delivered since the last drain.
    delivered: Vec<Notification>,
    events: Vec<CoordinatorEvent>,
    despawn_buffer: Vec<Entity>,
}

impl ReinforcementEngine {
    /// Create a new engine with open terrain.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.reinforcement,
            scheduler: CallQueue::new(),
            registry: NodeRegistry::new(),
            terrain: Box::new(OpenTerrain::new()),
            command_queue: VecDeque::new(),
            sites: HashMap::new(),
            combatants: HashMap::new(),
            tick_notifications: Vec::new(),
            delivered: Vec::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Replace the terrain used for spawn placement.
    pub fn with_terrain(mut self, terrain: impl TerrainQuery + 'static) -> Self {
        self.terrain = Box::new(terrain);
        self
    }

    /// Queue a world command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: WorldCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = WorldCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the engine by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> CoordinatorSnapshot {
        self.process_commands();

        self.time.advance();
        let now = self.time.now();
        self.scheduler.advance_to(now);
        while let Some(due) = self.scheduler.pop_due() {
            self.dispatch(due, now);
        }

        systems::presence::run(&mut self.world, &self.config, now, &mut self.events);
        systems::garrison::run(
            &mut self.world,
            &mut self.rng,
            self.terrain.as_ref(),
            &self.config,
            now,
        );

        let notifications = std::mem::take(&mut self.tick_notifications);
        self.delivered.extend(notifications.iter().cloned());
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.registry,
            &self.time,
            notifications,
            events,
        )
    }

    /// Run ticks covering `secs` of server time. The returned snapshot holds
    /// the final state plus every event and notification from the whole span.
    pub fn advance_secs(&mut self, secs: f64) -> CoordinatorSnapshot {
        let ticks = (secs * TICK_RATE as f64).round().max(0.0) as u64;
        let mut events = Vec::new();
        let mut notifications = Vec::new();
        let mut last = None;
        for _ in 0..ticks {
            let mut snapshot = self.tick();
            events.append(&mut snapshot.events);
            notifications.append(&mut snapshot.notifications);
            last = Some(snapshot);
        }
        let mut snapshot = last.unwrap_or_default();
        snapshot.events = events;
        snapshot.notifications = notifications;
        snapshot
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn now(&self) -> Timestamp {
        self.time.now()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &ReinforcementConfig {
        &self.config
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &CallQueue {
        &self.scheduler
    }

    /// Read a node's component.
    pub fn node(&self, id: NodeId) -> Option<hecs::Ref<'_, DefensiveNode>> {
        let entity = self.registry.entity_of(id)?;
        self.world.get::<&DefensiveNode>(entity).ok()
    }

    pub fn site_entity(&self, id: SiteId) -> Option<Entity> {
        self.sites.get(&id).copied()
    }

    /// Notifications delivered since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.delivered)
    }

    /// Destroy an entity outright, as the surrounding game would when a
    /// spawned member dies. Returns false if it did not exist.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single world command.
    fn handle_command(&mut self, command: WorldCommand) {
        match command {
            WorldCommand::AddSite {
                id,
                name,
                position,
                faction,
            } => {
                if self.sites.contains_key(&id) {
                    tracing::warn!(target: "bastion::engine", site = id.0, "duplicate site id ignored");
                    return;
                }
                let entity = world_setup::spawn_site(&mut self.world, id, name, position, faction);
                self.sites.insert(id, entity);
            }
            WorldCommand::SetSiteFaction { site, faction } => {
                let Some(entity) = self.sites.get(&site).copied() else {
                    tracing::warn!(target: "bastion::engine", site = site.0, "unknown site");
                    return;
                };
                if let Ok(mut s) = self.world.get::<&mut Site>(entity) {
                    tracing::info!(
                        target: "bastion::engine",
                        site = %s.name,
                        from = ?s.faction.map(|f| f.0),
                        to = ?faction.map(|f| f.0),
                        "site ownership changed"
                    );
                    s.faction = faction;
                }
            }
            WorldCommand::AddNode { id, faction, site } => {
                if self.registry.entity_of(id).is_some() {
                    tracing::warn!(target: "bastion::engine", node = id.0, "duplicate node id ignored");
                    return;
                }
                let node = DefensiveNode::new(id, faction, self.config.normal_spawn);
                let entity = world_setup::spawn_node(&mut self.world, node);
                self.registry.register(id, entity);
                if let Some(site) = site {
                    self.assign_site(id, site);
                }
            }
            WorldCommand::AssignNodeSite { node, site } => self.assign_site(node, site),
            WorldCommand::RemoveNode { id } => self.remove_node(id),
            WorldCommand::AddCombatant {
                id,
                faction,
                position,
            } => {
                if self.combatants.contains_key(&id) {
                    tracing::warn!(
                        target: "bastion::engine",
                        combatant = id.0,
                        "duplicate combatant id ignored"
                    );
                    return;
                }
                let entity = world_setup::spawn_combatant(&mut self.world, id, faction, position);
                self.combatants.insert(id, entity);
            }
            WorldCommand::MoveCombatant { id, position } => {
                if let Some(entity) = self.combatants.get(&id) {
                    if let Ok(mut pos) = self.world.get::<&mut Position>(*entity) {
                        *pos = position;
                    }
                }
            }
            WorldCommand::KillCombatant { id } => {
                if let Some(entity) = self.combatants.get(&id) {
                    if let Ok(mut combatant) = self.world.get::<&mut Combatant>(*entity) {
                        combatant.alive = false;
                    }
                }
            }
            WorldCommand::RemoveCombatant { id } => {
                if let Some(entity) = self.combatants.remove(&id) {
                    let _ = self.world.despawn(entity);
                }
            }
        }
    }

    /// Bind a node to its site and schedule its one deferred election.
    fn assign_site(&mut self, id: NodeId, site: SiteId) {
        let Some(node) = self.registry.entity_of(id) else {
            tracing::warn!(target: "bastion::engine", node = id.0, "unknown node");
            return;
        };
        let Some(site_entity) = self.sites.get(&site).copied() else {
            tracing::warn!(target: "bastion::engine", node = id.0, site = site.0, "unknown site");
            return;
        };
        {
            let Ok(mut n) = self.world.get::<&mut DefensiveNode>(node) else {
                return;
            };
            if n.site.is_some() {
                tracing::warn!(
                    target: "bastion::engine",
                    node = id.0,
                    "node already bound to a site, reassignment ignored"
                );
                return;
            }
            n.site = Some(site_entity);
        }
        self.registry.set_site(id, site_entity);
        systems::election::schedule(&mut self.world, &mut self.scheduler, &self.config, node);
    }

    /// Unregister a node, cancel its callbacks, and despawn its garrison.
    /// Tracked reinforcements are left to decay.
    fn remove_node(&mut self, id: NodeId) {
        let election_pending = self.election_pending(id);
        let Some(registered) = self.registry.unregister(id) else {
            return;
        };
        let (handles, garrison) = match self.world.get::<&mut DefensiveNode>(registered.entity) {
            Ok(mut n) => (
                std::mem::take(&mut n.handles),
                std::mem::take(&mut n.garrison.groups),
            ),
            Err(_) => (Vec::new(), Vec::new()),
        };
        let cancelled = handles
            .into_iter()
            .filter(|h| self.scheduler.cancel(*h))
            .count();
        for group in garrison {
            world_setup::despawn_asset(&mut self.world, group);
        }
        let _ = self.world.despawn(registered.entity);

        tracing::info!(
            target: "bastion::engine",
            node = id.0,
            cancelled,
            "node removed"
        );

        if election_pending {
            if let Some(site) = registered.site {
                self.reopen_election(site);
            }
        }
    }

    fn election_pending(&self, id: NodeId) -> bool {
        self.scheduler
            .pending()
            .any(|task| *task == ScheduledTask::ElectCoordinator { node: id })
    }

    /// Re-run the election for siblings that yielded to a node removed before
    /// its own election. No-op once the site has a leader.
    fn reopen_election(&mut self, site: Entity) {
        if self.registry.leader(site).is_some() {
            return;
        }
        let guards: Vec<(NodeId, Entity)> = self
            .registry
            .guards_of(site)
            .filter_map(|id| self.registry.entity_of(id).map(|entity| (id, entity)))
            .collect();
        for (id, node) in guards {
            if self.election_pending(id) {
                continue;
            }
            if let Ok(mut n) = self.world.get::<&mut DefensiveNode>(node) {
                n.coordinator_initialized = false;
            }
            if systems::election::schedule(&mut self.world, &mut self.scheduler, &self.config, node) {
                tracing::info!(
                    target: "bastion::engine",
                    node = id.0,
                    "election reopened, yielded-to sibling was removed"
                );
            }
        }
    }

    /// Run one due callback.
    fn dispatch(&mut self, due: DueTask, now: Timestamp) {
        let node_id = due.task.node();
        let Some(node) = self.registry.entity_of(node_id) else {
            if due.repeating {
                self.scheduler.cancel(due.handle);
            }
            tracing::debug!(
                target: "bastion::engine",
                node = node_id.0,
                "dropped task for removed node"
            );
            return;
        };
        if !due.repeating {
            if let Ok(mut n) = self.world.get::<&mut DefensiveNode>(node) {
                n.handles.retain(|h| *h != due.handle);
            }
        }

        match due.task {
            ScheduledTask::ElectCoordinator { .. } => systems::election::run(
                &mut self.world,
                &mut self.registry,
                &mut self.scheduler,
                &self.config,
                node_id,
                &mut self.events,
            ),
            ScheduledTask::SenseCombat { .. } => systems::escalation::run(
                &mut self.world,
                &mut self.scheduler,
                &mut self.rng,
                self.terrain.as_ref(),
                &self.config,
                node,
                now,
                &mut self.events,
                &mut self.despawn_buffer,
            ),
            ScheduledTask::ConfirmWaveSpawn { tier, .. } => {
                systems::reinforcement::confirm_wave_spawn(
                    &mut self.world,
                    &mut self.scheduler,
                    &self.config,
                    node,
                    tier,
                    &mut self.events,
                )
            }
            ScheduledTask::BroadcastWave {
                site_name, tier, ..
            } => {
                systems::notifications::deliver_wave_alert(
                    &self.world,
                    &self.config,
                    &site_name,
                    tier,
                    &mut self.tick_notifications,
                );
            }
        }
    }
}
