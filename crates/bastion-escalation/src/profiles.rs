//! Population-driven difficulty profiles.
//!
//! Reinforcements get sharper as more combatants are in the world.

use bastion_core::config::{SkillBands, SkillProfile};
use bastion_core::enums::PopulationBand;

/// Band for the current combatant headcount.
pub fn population_band(headcount: u32, bands: &SkillBands) -> PopulationBand {
    if headcount <= bands.low_max {
        PopulationBand::Low
    } else if headcount <= bands.medium_max {
        PopulationBand::Medium
    } else {
        PopulationBand::High
    }
}

/// Skill and perception applied to members spawned in a band.
pub fn get_profile(band: PopulationBand, bands: &SkillBands) -> SkillProfile {
    match band {
        PopulationBand::Low => bands.low,
        PopulationBand::Medium => bands.medium,
        PopulationBand::High => bands.high,
    }
}
