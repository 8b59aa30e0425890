//! Scenario presets: hardcoded world layouts as command lists.
//!
//! Each scenario is a batch of `WorldCommand`s that sets up sites, nodes, and
//! combatants; feed it to `ReinforcementEngine::queue_commands`.

use bastion_core::commands::WorldCommand;
use bastion_core::types::{CombatantId, FactionId, NodeId, Position, SiteId};

pub const BLUFOR: FactionId = FactionId(1);
pub const OPFOR: FactionId = FactionId(2);

pub const OUTPOST: SiteId = SiteId(1);
pub const FORWARD_BASE: SiteId = SiteId(2);
pub const REAR_DEPOT: SiteId = SiteId(3);

/// "Contested Outpost"
/// An OPFOR outpost guarded by three nodes (ids 30, 12, 21, lowest wins the
/// election), a BLUFOR forward base 1.2 km away (frontline), and an OPFOR
/// depot far behind the lines. Two BLUFOR players start outside sensor range.
pub fn contested_outpost() -> Vec<WorldCommand> {
    let mut commands = vec![
        WorldCommand::AddSite {
            id: OUTPOST,
            name: "Outpost Kilo".to_string(),
            position: Position::new(0.0, 0.0, 0.0),
            faction: Some(OPFOR),
        },
        WorldCommand::AddSite {
            id: FORWARD_BASE,
            name: "FOB Anvil".to_string(),
            position: Position::new(0.0, 1200.0, 0.0),
            faction: Some(BLUFOR),
        },
        WorldCommand::AddSite {
            id: REAR_DEPOT,
            name: "Depot Tango".to_string(),
            position: Position::new(-6000.0, -6000.0, 0.0),
            faction: Some(OPFOR),
        },
    ];
    for id in [30, 12, 21] {
        commands.push(WorldCommand::AddNode {
            id: NodeId(id),
            faction: OPFOR,
            site: Some(OUTPOST),
        });
    }
    commands.push(WorldCommand::AddNode {
        id: NodeId(40),
        faction: OPFOR,
        site: Some(REAR_DEPOT),
    });
    commands.push(WorldCommand::AddCombatant {
        id: CombatantId(1),
        faction: BLUFOR,
        position: Position::new(0.0, 1100.0, 0.0),
    });
    commands.push(WorldCommand::AddCombatant {
        id: CombatantId(2),
        faction: BLUFOR,
        position: Position::new(50.0, 1150.0, 0.0),
    });
    commands.push(WorldCommand::AddCombatant {
        id: CombatantId(3),
        faction: OPFOR,
        position: Position::new(0.0, -50.0, 0.0),
    });
    commands
}

/// "Assault": move both BLUFOR players inside the outpost's sensor radius.
pub fn assault_outpost() -> Vec<WorldCommand> {
    vec![
        WorldCommand::MoveCombatant {
            id: CombatantId(1),
            position: Position::new(0.0, 150.0, 0.0),
        },
        WorldCommand::MoveCombatant {
            id: CombatantId(2),
            position: Position::new(80.0, 200.0, 0.0),
        },
    ]
}

/// "Withdraw": pull both BLUFOR players back out of sensor range.
pub fn withdraw_from_outpost() -> Vec<WorldCommand> {
    vec![
        WorldCommand::MoveCombatant {
            id: CombatantId(1),
            position: Position::new(0.0, 1100.0, 0.0),
        },
        WorldCommand::MoveCombatant {
            id: CombatantId(2),
            position: Position::new(50.0, 1150.0, 0.0),
        },
    ]
}
