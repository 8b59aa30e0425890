//! Reinforcement configuration: tunables, group templates, and the wave table.
//!
//! The builtin JSON document is the default. A deployment can point an
//! environment variable at a replacement file.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::components::SpawnConfig;
use crate::constants::*;
use crate::enums::{CombatEndPolicy, GroupArchetype, SkillLevel};
use crate::error::ConfigError;

pub const BUILTIN_REINFORCEMENT_CONFIG: &str = include_str!("data/reinforcement.json");

/// Environment variable naming an override config file.
pub const CONFIG_ENV_VAR: &str = "BASTION_REINFORCEMENT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementConfig {
    pub detection_radius: f64,
    pub sense_interval_secs: f64,
    pub election_delay_secs: f64,
    pub wave_cooldown_secs: f64,
    pub notification_delay_secs: f64,
    pub notification_duration_secs: f64,
    pub spawn_confirm_delay_secs: f64,
    pub spawn_retry_delay_secs: f64,
    pub normal_spawn: SpawnConfig,
    pub min_spawn_distance: f64,
    pub frontline_range: f64,
    pub grace_period_secs: f64,
    pub aerial_standoff_distance: f64,
    pub aerial_altitude: f64,
    pub skill_bands: SkillBands,
    pub combat_end_policy: CombatEndPolicy,
    pub templates: Vec<GroupTemplate>,
    pub waves: Vec<WaveSpec>,
}

/// Member count for one group archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTemplate {
    pub archetype: GroupArchetype,
    pub members: u32,
}

/// One reinforcement tier. Tiers are numbered 1..N with ascending thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub tier: u8,
    /// Elapsed combat time at which this tier becomes eligible (seconds).
    pub threshold_secs: f64,
    pub groups: Vec<WaveGroup>,
    pub dispersion_radius: f64,
    /// Aerial asset, allowed on the top tier only.
    #[serde(default)]
    pub aerial: Option<AerialSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveGroup {
    pub archetype: GroupArchetype,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerialSpec {
    pub crew: u32,
}

/// Skill applied to a band of the combatant population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub skill: SkillLevel,
    pub perception: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillBands {
    /// Highest headcount in the low band.
    pub low_max: u32,
    /// Highest headcount in the medium band.
    pub medium_max: u32,
    pub low: SkillProfile,
    pub medium: SkillProfile,
    pub high: SkillProfile,
}

impl Default for SkillBands {
    fn default() -> Self {
        Self {
            low_max: POPULATION_LOW_MAX,
            medium_max: POPULATION_MEDIUM_MAX,
            low: SkillProfile {
                skill: SkillLevel::Expert,
                perception: PERCEPTION_LOW,
            },
            medium: SkillProfile {
                skill: SkillLevel::Expert,
                perception: PERCEPTION_MEDIUM,
            },
            high: SkillProfile {
                skill: SkillLevel::Expert,
                perception: PERCEPTION_HIGH,
            },
        }
    }
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            detection_radius: COMBAT_DETECTION_RADIUS,
            sense_interval_secs: SENSE_INTERVAL_SECS,
            election_delay_secs: ELECTION_DELAY_SECS,
            wave_cooldown_secs: WAVE_COOLDOWN_SECS,
            notification_delay_secs: NOTIFICATION_DELAY_SECS,
            notification_duration_secs: NOTIFICATION_DURATION_SECS,
            spawn_confirm_delay_secs: SPAWN_CONFIRM_DELAY_SECS,
            spawn_retry_delay_secs: SPAWN_RETRY_DELAY_SECS,
            normal_spawn: SpawnConfig {
                group_count: NORMAL_GROUP_COUNT,
                dispersion_radius: NORMAL_SPAWN_RADIUS,
                archetype: GroupArchetype::Fireteam,
                respawn_secs: NORMAL_RESPAWN_SECS,
            },
            min_spawn_distance: REINFORCEMENT_MIN_SPAWN_DISTANCE,
            frontline_range: FRONTLINE_RANGE,
            grace_period_secs: PRESENCE_GRACE_PERIOD_SECS,
            aerial_standoff_distance: AERIAL_STANDOFF_DISTANCE,
            aerial_altitude: AERIAL_ALTITUDE,
            skill_bands: SkillBands::default(),
            combat_end_policy: CombatEndPolicy::default(),
            templates: vec![
                GroupTemplate {
                    archetype: GroupArchetype::Fireteam,
                    members: 4,
                },
                GroupTemplate {
                    archetype: GroupArchetype::SquadRifle,
                    members: 8,
                },
                GroupTemplate {
                    archetype: GroupArchetype::SquadMachineGun,
                    members: 6,
                },
            ],
            waves: vec![
                WaveSpec {
                    tier: 1,
                    threshold_secs: WAVE1_THRESHOLD_SECS,
                    groups: vec![WaveGroup {
                        archetype: GroupArchetype::Fireteam,
                        count: REINFORCEMENT_GROUP_COUNT,
                    }],
                    dispersion_radius: REINFORCEMENT_SPAWN_RADIUS,
                    aerial: None,
                },
                WaveSpec {
                    tier: 2,
                    threshold_secs: WAVE2_THRESHOLD_SECS,
                    groups: vec![WaveGroup {
                        archetype: GroupArchetype::SquadRifle,
                        count: REINFORCEMENT_GROUP_COUNT,
                    }],
                    dispersion_radius: REINFORCEMENT_SPAWN_RADIUS,
                    aerial: None,
                },
                WaveSpec {
                    tier: 3,
                    threshold_secs: WAVE3_THRESHOLD_SECS,
                    groups: vec![
                        WaveGroup {
                            archetype: GroupArchetype::SquadRifle,
                            count: REINFORCEMENT_GROUP_COUNT,
                        },
                        WaveGroup {
                            archetype: GroupArchetype::SquadMachineGun,
                            count: 1,
                        },
                    ],
                    dispersion_radius: REINFORCEMENT_SPAWN_RADIUS,
                    aerial: Some(AerialSpec { crew: AERIAL_CREW }),
                },
            ],
        }
    }
}

impl ReinforcementConfig {
    /// The builtin configuration shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_REINFORCEMENT_CONFIG)
            .expect("builtin reinforcement config should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ReinforcementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load from the file named by `env_var`, falling back to the builtin.
    /// Returns the path actually loaded, if any.
    pub fn load_with_env_override(env_var: &str) -> (Self, Option<PathBuf>) {
        if let Some(path) = env::var(env_var).ok().map(PathBuf::from) {
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!(
                        target: "bastion::config",
                        path = %path.display(),
                        "reinforcement_config.loaded=file"
                    );
                    return (config, Some(path));
                }
                Err(err) => {
                    tracing::warn!(
                        target: "bastion::config",
                        path = %path.display(),
                        error = %err,
                        "reinforcement_config.load_failed"
                    );
                }
            }
        }
        tracing::info!(target: "bastion::config", "reinforcement_config.loaded=builtin");
        (Self::builtin(), None)
    }

    /// Member count of an archetype's template, if one is configured.
    pub fn template(&self, archetype: GroupArchetype) -> Option<&GroupTemplate> {
        self.templates.iter().find(|t| t.archetype == archetype)
    }

    /// Highest configured tier (0 if the table is empty).
    pub fn max_tier(&self) -> u8 {
        self.waves.last().map(|w| w.tier).unwrap_or(0)
    }

    pub fn wave(&self, tier: u8) -> Option<&WaveSpec> {
        self.waves.iter().find(|w| w.tier == tier)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("detection_radius", self.detection_radius),
            ("sense_interval_secs", self.sense_interval_secs),
            ("election_delay_secs", self.election_delay_secs),
            ("spawn_confirm_delay_secs", self.spawn_confirm_delay_secs),
            ("spawn_retry_delay_secs", self.spawn_retry_delay_secs),
            ("frontline_range", self.frontline_range),
            ("grace_period_secs", self.grace_period_secs),
            ("normal_spawn.respawn_secs", self.normal_spawn.respawn_secs),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.wave_cooldown_secs < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "wave_cooldown_secs",
            });
        }

        if self.waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }
        let top = self.waves.len();
        let mut previous_threshold = f64::NEG_INFINITY;
        for (index, wave) in self.waves.iter().enumerate() {
            let expected = (index + 1) as u8;
            if wave.tier != expected {
                return Err(ConfigError::TierOutOfOrder {
                    expected,
                    found: wave.tier,
                });
            }
            if wave.threshold_secs <= previous_threshold {
                return Err(ConfigError::ThresholdNotAscending { tier: wave.tier });
            }
            if wave.aerial.is_some() && index + 1 != top {
                return Err(ConfigError::AerialNotTopTier { tier: wave.tier });
            }
            previous_threshold = wave.threshold_secs;
        }
        Ok(())
    }
}
