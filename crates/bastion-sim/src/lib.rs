//! Coordinator engine for BASTION.
//!
//! Owns the hecs ECS world, the call-queue scheduler, and the node registry;
//! runs elections, sensing ticks, wave spawns, and presence decay at a fixed
//! tick rate, and produces `CoordinatorSnapshot`s.

pub mod engine;
pub mod registry;
pub mod scenario;
pub mod scheduler;
pub mod systems;
pub mod terrain;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{EngineConfig, ReinforcementEngine};
