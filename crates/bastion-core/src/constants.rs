//! Coordinator constants and tuning defaults.
//!
//! `ReinforcementConfig::default()` is built from these values; the builtin
//! JSON configuration carries the same numbers.

/// Engine tick rate (Hz).
pub const TICK_RATE: u32 = 10;

// --- Combat sensing ---

/// Radius around a site inside which a living hostile combatant counts as pressure (meters).
pub const COMBAT_DETECTION_RADIUS: f64 = 300.0;

/// Period of the coordinator's sensing tick (seconds).
pub const SENSE_INTERVAL_SECS: f64 = 30.0;

// --- Election ---

/// Delay between a node learning its site and running the coordinator election (seconds).
pub const ELECTION_DELAY_SECS: f64 = 5.0;

// --- Escalation ---

/// Minimum time between two consecutive waves at one site (seconds).
pub const WAVE_COOLDOWN_SECS: f64 = 10.0;

/// Elapsed combat time for the first wave (seconds).
pub const WAVE1_THRESHOLD_SECS: f64 = 300.0;

/// Elapsed combat time for the second wave (seconds).
pub const WAVE2_THRESHOLD_SECS: f64 = 600.0;

/// Elapsed combat time for the third wave (seconds).
pub const WAVE3_THRESHOLD_SECS: f64 = 900.0;

/// Groups spawned per reinforcement tier.
pub const REINFORCEMENT_GROUP_COUNT: u32 = 2;

/// Reinforcement dispersion radius around the site (meters).
pub const REINFORCEMENT_SPAWN_RADIUS: f64 = 200.0;

/// Minimum distance from the site for reinforcement spawns (meters).
pub const REINFORCEMENT_MIN_SPAWN_DISTANCE: f64 = 100.0;

// --- Aerial asset ---

/// Horizontal stand-off distance of the aerial asset from the site (meters).
pub const AERIAL_STANDOFF_DISTANCE: f64 = 800.0;

/// Altitude of the aerial asset at spawn (meters).
pub const AERIAL_ALTITUDE: f64 = 150.0;

/// Crew members aboard the aerial asset.
pub const AERIAL_CREW: u32 = 3;

// --- Spawn confirmation ---

/// Delay before checking that a fired wave actually materialized (seconds).
pub const SPAWN_CONFIRM_DELAY_SECS: f64 = 15.0;

/// Delay of the single re-check when the first confirmation fails (seconds).
pub const SPAWN_RETRY_DELAY_SECS: f64 = 5.0;

// --- Notifications ---

/// Delay between firing a wave and broadcasting it (seconds).
pub const NOTIFICATION_DELAY_SECS: f64 = 0.1;

/// How long a notification stays on screen (seconds).
pub const NOTIFICATION_DURATION_SECS: f64 = 8.0;

pub const NOTIFICATION_TITLE: &str = "Enemy Reinforcements Detected";

// --- Normal garrison ---

/// Groups spawned per normal garrison cycle.
pub const NORMAL_GROUP_COUNT: u32 = 2;

/// Normal garrison dispersion radius (meters).
pub const NORMAL_SPAWN_RADIUS: f64 = 50.0;

/// Normal garrison respawn period (seconds).
pub const NORMAL_RESPAWN_SECS: f64 = 180.0;

// --- Presence decay ---

/// Range inside which a hostile-owned site puts a friendly site on the frontline (meters).
pub const FRONTLINE_RANGE: f64 = 1_500.0;

/// Rear-area grace period before defenders despawn (seconds).
pub const PRESENCE_GRACE_PERIOD_SECS: f64 = 600.0;

// --- Difficulty scaling ---

/// Highest combatant headcount still considered low population.
pub const POPULATION_LOW_MAX: u32 = 1;

/// Highest combatant headcount still considered medium population.
pub const POPULATION_MEDIUM_MAX: u32 = 5;

/// Perception factor for a solo combatant.
pub const PERCEPTION_LOW: f64 = 1.0;

pub const PERCEPTION_MEDIUM: f64 = 1.25;

pub const PERCEPTION_HIGH: f64 = 1.5;
