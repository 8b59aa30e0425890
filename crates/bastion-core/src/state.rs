//! Coordinator snapshot: the observable state after each tick.

use serde::{Deserialize, Serialize};

use crate::components::CombatTracking;
use crate::enums::PresenceState;
use crate::events::{CoordinatorEvent, Notification};
use crate::types::{FactionId, NodeId, Position, SimTime, SiteId};

/// Complete coordinator state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorSnapshot {
    pub time: SimTime,
    pub sites: Vec<SiteView>,
    pub nodes: Vec<NodeView>,
    /// Notifications delivered during this tick.
    pub notifications: Vec<Notification>,
    /// State changes that happened during this tick.
    pub events: Vec<CoordinatorEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteView {
    pub id: SiteId,
    pub name: String,
    pub position: Position,
    pub faction: Option<FactionId>,
    /// Holder of the site's leader slot.
    pub coordinator: Option<NodeId>,
    pub guard_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub site: Option<SiteId>,
    pub coordinator: bool,
    pub tracking: CombatTracking,
    pub tracked_assets: u32,
    pub presence: PresenceState,
    pub garrison_groups: u32,
    /// Whether wave spawn parameters are currently selected.
    pub wave_config_selected: bool,
}
