//! ECS components for hecs entities.
//!
//! Components are plain data structs. Coordination logic lives in the
//! escalation crate (pure state machines) and in the engine's systems.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CombatantId, FactionId, NodeId, SiteId, TaskHandle, Timestamp};

/// A defended location. Paired with a `Position` on the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    /// Owning faction, `None` while neutral/contested.
    pub faction: Option<FactionId>,
}

/// A player-controlled combatant. Paired with a `Position`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub faction: FactionId,
    pub alive: bool,
}

/// A spawned infantry group. Paired with a `Position` (group anchor).
#[derive(Debug, Clone)]
pub struct UnitGroup {
    pub archetype: GroupArchetype,
    pub faction: FactionId,
    /// Member entities. Members that no longer exist are dead.
    pub members: Vec<Entity>,
}

/// A crewed aerial asset. Paired with a `Position`.
#[derive(Debug, Clone)]
pub struct AerialAsset {
    pub faction: FactionId,
    /// Heading in radians (0 = North, clockwise), pointed at the defended site.
    pub heading: f64,
    pub crew: Vec<Entity>,
}

/// One spawned AI member (infantry or aircrew). Paired with a `Position`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Member {
    pub faction: FactionId,
    pub skill: SkillLevel,
    pub perception: f64,
}

/// "Defend this position" order attached to a group or aerial asset.
#[derive(Debug, Clone, Copy)]
pub struct DefendDirective {
    pub site: Entity,
    pub target: crate::types::Position,
}

/// Parameters a node spawns a group cycle with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub group_count: u32,
    pub dispersion_radius: f64,
    pub archetype: GroupArchetype,
    pub respawn_secs: f64,
}

/// Sustained-combat bookkeeping owned by one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatTracking {
    /// Whether sustained hostile presence is currently being tracked.
    pub active: bool,
    pub combat_start: Option<Timestamp>,
    /// 0 = no wave fired this episode.
    pub current_wave: u8,
    pub last_wave: Option<Timestamp>,
}

/// Frontline presence bookkeeping owned by one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceTimer {
    pub state: PresenceState,
    /// When the site entered the rear area; `None` while on the frontline.
    pub rear_since: Option<Timestamp>,
}

/// A reinforcement asset spawned and tracked by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReinforcementAsset {
    pub entity: Entity,
    pub kind: AssetKind,
    pub tier: u8,
}

/// Wave spawn parameters selected by a fired tier until it is confirmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingWave {
    pub tier: u8,
    pub config: SpawnConfig,
}

/// Normal defender presence of a node.
#[derive(Debug, Clone)]
pub struct Garrison {
    pub normal: SpawnConfig,
    /// Wave parameters selected while a fired wave awaits confirmation.
    pub active_wave: Option<PendingWave>,
    pub spawned: bool,
    pub respawn_deadline: Option<Timestamp>,
    pub groups: Vec<Entity>,
    /// Confirmation attempts made for the pending wave.
    pub confirm_attempts: u8,
}

impl Garrison {
    pub fn new(normal: SpawnConfig) -> Self {
        Self {
            normal,
            active_wave: None,
            spawned: false,
            respawn_deadline: None,
            groups: Vec::new(),
            confirm_attempts: 0,
        }
    }

    /// The spawn parameters currently in force.
    pub fn current_config(&self) -> &SpawnConfig {
        self.active_wave
            .as_ref()
            .map(|wave| &wave.config)
            .unwrap_or(&self.normal)
    }
}

/// One guard post for a site.
#[derive(Debug, Clone)]
pub struct DefensiveNode {
    pub id: NodeId,
    pub faction: FactionId,
    /// The guarded site, once known.
    pub site: Option<Entity>,
    pub coordinator: bool,
    pub coordinator_initialized: bool,
    pub tracking: CombatTracking,
    pub assets: Vec<ReinforcementAsset>,
    pub garrison: Garrison,
    pub presence: PresenceTimer,
    /// Every scheduled callback this node still owns.
    pub handles: Vec<TaskHandle>,
}

impl DefensiveNode {
    pub fn new(id: NodeId, faction: FactionId, normal: SpawnConfig) -> Self {
        Self {
            id,
            faction,
            site: None,
            coordinator: false,
            coordinator_initialized: false,
            tracking: CombatTracking::default(),
            assets: Vec::new(),
            garrison: Garrison::new(normal),
            presence: PresenceTimer::default(),
            handles: Vec::new(),
        }
    }
}
