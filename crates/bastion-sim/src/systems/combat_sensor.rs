//! Combat sensor: read-only world queries about hostile pressure and ownership.
//!
//! Nothing here mutates the world.

use hecs::{Entity, World};

use bastion_core::components::{Combatant, Site};
use bastion_core::types::{FactionId, Position};

/// Whether a living hostile combatant is within `radius` of `site` while the
/// site is still owned by `defending`. A lost or missing site reads as no
/// combat, which ends tracking.
pub fn detect_combat(world: &World, site: Entity, defending: FactionId, radius: f64) -> bool {
    let Some((owner, site_pos)) = site_owner(world, site) else {
        return false;
    };
    if owner != Some(defending) {
        return false;
    }

    let radius_sq = radius * radius;
    world
        .query::<(&Combatant, &Position)>()
        .iter()
        .any(|(_, (combatant, pos))| {
            combatant.alive
                && combatant.faction != defending
                && pos.range_sq_to(&site_pos) < radius_sq
        })
}

/// Current owner and position of a site entity.
pub fn site_owner(world: &World, site: Entity) -> Option<(Option<FactionId>, Position)> {
    let mut query = world.query_one::<(&Site, &Position)>(site).ok()?;
    let (site, pos) = query.get()?;
    Some((site.faction, *pos))
}

/// Total combatants currently in the world.
pub fn combatant_count(world: &World) -> u32 {
    world.query::<&Combatant>().iter().count() as u32
}

/// Whether `faction` has at least one current combatant.
pub fn faction_has_combatants(world: &World, faction: FactionId) -> bool {
    world
        .query::<&Combatant>()
        .iter()
        .any(|(_, c)| c.faction == faction)
}

/// Whether any site owned by a faction other than `friendly` lies within
/// `range` of `site_pos`.
pub fn hostile_site_within(
    world: &World,
    site: Entity,
    site_pos: &Position,
    friendly: FactionId,
    range: f64,
) -> bool {
    world
        .query::<(&Site, &Position)>()
        .iter()
        .any(|(entity, (other, pos))| {
            entity != site
                && other.faction.is_some_and(|f| f != friendly)
                && site_pos.horizontal_range_to(pos) <= range
        })
}
