//! Escalation logic for Bastion.
//!
//! Pure state machines for wave escalation, presence decay, coordinator
//! election, and population-driven skill scaling. No ECS dependency.

pub mod decay;
pub mod election;
pub mod fsm;
pub mod profiles;

pub use bastion_core as core;
