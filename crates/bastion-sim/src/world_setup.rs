//! Entity spawn factories for the coordinator world.
//!
//! Creates sites, nodes, combatants, unit groups, and aerial assets with
//! the appropriate component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::config::SkillProfile;
use bastion_core::enums::GroupArchetype;
use bastion_core::types::{CombatantId, FactionId, Position, SiteId};

/// Spread of members around their group anchor (meters).
const MEMBER_SPREAD: f64 = 5.0;

pub fn spawn_site(
    world: &mut World,
    id: SiteId,
    name: String,
    position: Position,
    faction: Option<FactionId>,
) -> Entity {
    world.spawn((Site { id, name, faction }, position))
}

pub fn spawn_node(world: &mut World, node: DefensiveNode) -> Entity {
    world.spawn((node,))
}

pub fn spawn_combatant(
    world: &mut World,
    id: CombatantId,
    faction: FactionId,
    position: Position,
) -> Entity {
    world.spawn((
        Combatant {
            id,
            faction,
            alive: true,
        },
        position,
    ))
}

/// Spawn a unit group anchored at `anchor` with `members` members.
pub fn spawn_group(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: GroupArchetype,
    faction: FactionId,
    anchor: Position,
    members: u32,
    profile: SkillProfile,
) -> Entity {
    let member_entities = spawn_members(world, rng, faction, anchor, members, profile);
    world.spawn((
        UnitGroup {
            archetype,
            faction,
            members: member_entities,
        },
        anchor,
    ))
}

/// Spawn an aerial asset `standoff` meters out from `site` at `altitude`,
/// nose pointed at the site.
#[allow(clippy::too_many_arguments)]
pub fn spawn_aerial(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    faction: FactionId,
    site: Position,
    standoff: f64,
    altitude: f64,
    crew: u32,
    profile: SkillProfile,
) -> Entity {
    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let offset = DVec2::new(bearing.sin(), bearing.cos()) * standoff;
    let position = Position::new(site.x + offset.x, site.y + offset.y, site.z + altitude);
    let heading = position.bearing_to(&site);

    let crew = spawn_members(world, rng, faction, position, crew, profile);
    world.spawn((
        AerialAsset {
            faction,
            heading,
            crew,
        },
        position,
    ))
}

/// Despawn a group or aerial asset together with its members.
pub fn despawn_asset(world: &mut World, entity: Entity) {
    let members: Vec<Entity> = if let Ok(group) = world.get::<&UnitGroup>(entity) {
        group.members.clone()
    } else if let Ok(aerial) = world.get::<&AerialAsset>(entity) {
        aerial.crew.clone()
    } else {
        Vec::new()
    };
    for member in members {
        let _ = world.despawn(member);
    }
    let _ = world.despawn(entity);
}

fn spawn_members(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    faction: FactionId,
    anchor: Position,
    count: u32,
    profile: SkillProfile,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let dx: f64 = rng.gen_range(-MEMBER_SPREAD..MEMBER_SPREAD);
            let dy: f64 = rng.gen_range(-MEMBER_SPREAD..MEMBER_SPREAD);
            world.spawn((
                Member {
                    faction,
                    skill: profile.skill,
                    perception: profile.perception,
                },
                Position::new(anchor.x + dx, anchor.y + dy, anchor.z),
            ))
        })
        .collect()
}
