//! Enumeration types used throughout the coordinator.

use serde::{Deserialize, Serialize};

/// Group composition template a node can spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupArchetype {
    /// Small four-man team. Used by the normal garrison and the first wave.
    #[default]
    Fireteam,
    /// Full rifle squad.
    SquadRifle,
    /// Squad built around a support weapon.
    SquadMachineGun,
}

/// Kind of reinforcement asset tracked by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// Infantry unit group.
    UnitGroup,
    /// Crewed aerial asset (top tier only).
    Aerial,
}

/// AI skill level applied to spawned members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    Novice,
    #[default]
    Regular,
    Veteran,
    Expert,
}

/// Combatant population band used for difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PopulationBand {
    Low,
    Medium,
    High,
}

/// Presence decay state of a node's defenders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceState {
    /// Defenders stay materialized.
    #[default]
    Active,
    /// Rear-area site; counting down to despawn.
    GracePeriod,
    /// Grace period expired; defenders should be despawned.
    Inactive,
}

/// What happens to tracked reinforcements when combat ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEndPolicy {
    /// Drop them from tracking and let them decay naturally.
    #[default]
    ReleaseToDecay,
    /// Destroy every tracked asset, then drop tracking.
    Despawn,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Warning,
    Critical,
}
