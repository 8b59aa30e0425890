//! Error types. Failures stay inside the component that detects them;
//! callers log and fall back instead of propagating.

use std::io;
use std::path::PathBuf;

use hecs::Entity;
use thiserror::Error;

use crate::enums::GroupArchetype;

/// Precondition failures that abort a reinforcement spawn before any side effect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no group template for archetype {0:?}")]
    MissingTemplate(GroupArchetype),
    #[error("site entity {0:?} has no owning faction")]
    SiteUnowned(Entity),
    #[error("spawning node has no site reference")]
    MissingSite,
    #[error("site entity {0:?} is not reachable")]
    SiteUnavailable(Entity),
    #[error("wave tier {0} defines nothing to spawn")]
    NoMembers(u8),
}

/// Failures issuing a "defend this position" directive to a spawned asset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("asset entity {0:?} does not exist")]
    NoSuchEntity(Entity),
    #[error("asset entity {0:?} has no live members to order")]
    EmptyGroup(Entity),
}

/// Failures loading or validating `ReinforcementConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse reinforcement config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read reinforcement config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("wave table is empty")]
    EmptyWaveTable,
    #[error("wave tier out of order: expected {expected}, found {found}")]
    TierOutOfOrder { expected: u8, found: u8 },
    #[error("wave tier {tier} threshold is not above the previous tier")]
    ThresholdNotAscending { tier: u8 },
    #[error("wave tier {tier} carries an aerial asset but is not the top tier")]
    AerialNotTopTier { tier: u8 },
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
}
