//! Events and notifications emitted by the coordinator.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CombatantId, FactionId, NodeId, SiteId};

/// Popup delivered to one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: CombatantId,
    /// Faction of the recipient at delivery time.
    pub faction: FactionId,
    pub level: AlertLevel,
    pub title: String,
    pub body: String,
    pub duration_secs: f64,
}

/// Coordinator state changes, collected per tick for the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoordinatorEvent {
    /// Election finished for a node.
    ElectionResolved {
        node: NodeId,
        site: SiteId,
        coordinator: bool,
    },
    /// Sustained hostile presence detected at a site.
    CombatStarted { node: NodeId, site: SiteId },
    /// Hostile presence gone (or site lost); tracking reset.
    CombatEnded { node: NodeId, site: SiteId },
    /// A reinforcement tier fired.
    WaveFired {
        node: NodeId,
        site: SiteId,
        tier: u8,
        spawned: u32,
    },
    /// Wave parameters released after the spawn check.
    WaveSettled {
        node: NodeId,
        tier: u8,
        confirmed: bool,
    },
    /// Dead or empty assets dropped from tracking.
    AssetsReaped { node: NodeId, removed: usize },
    /// Presence decay state transition.
    PresenceChanged { node: NodeId, state: PresenceState },
}
