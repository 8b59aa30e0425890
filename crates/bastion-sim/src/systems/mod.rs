//! ECS systems that operate on the coordinator world.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components, the registry, or the
//! scheduler handed to them.

pub mod combat_sensor;
pub mod election;
pub mod escalation;
pub mod garrison;
pub mod notifications;
pub mod presence;
pub mod reaper;
pub mod reinforcement;
pub mod snapshot;
