//! World commands fed to the engine by the surrounding game.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{CombatantId, FactionId, NodeId, Position, SiteId};

/// All world mutations the coordinator observes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorldCommand {
    // --- Sites ---
    /// Register a defended site.
    AddSite {
        id: SiteId,
        name: String,
        position: Position,
        faction: Option<FactionId>,
    },
    /// Change (or clear) a site's owner.
    SetSiteFaction {
        site: SiteId,
        faction: Option<FactionId>,
    },

    // --- Nodes ---
    /// Create a defensive node, optionally already bound to its site.
    AddNode {
        id: NodeId,
        faction: FactionId,
        site: Option<SiteId>,
    },
    /// Bind a node to the site it guards. Triggers the deferred election once.
    AssignNodeSite { node: NodeId, site: SiteId },
    /// Tear down a node and cancel its callbacks.
    RemoveNode { id: NodeId },

    // --- Combatants ---
    AddCombatant {
        id: CombatantId,
        faction: FactionId,
        position: Position,
    },
    MoveCombatant { id: CombatantId, position: Position },
    KillCombatant { id: CombatantId },
    RemoveCombatant { id: CombatantId },
}
