//! Presence decay state machine.
//!
//! Decides whether a node's defenders stay materialized, from site ownership
//! and frontline proximity alone. Independent of wave escalation.

use bastion_core::components::PresenceTimer;
use bastion_core::enums::PresenceState;
use bastion_core::types::Timestamp;

/// Input to the decay FSM for one node update.
pub struct PresenceContext {
    pub timer: PresenceTimer,
    /// Site owned by a faction that has at least one current combatant.
    pub site_friendly: bool,
    /// A hostile-owned site lies within frontline range.
    pub on_frontline: bool,
    pub now: Timestamp,
    pub grace_period_secs: f64,
}

/// Output from the decay FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceUpdate {
    pub timer: PresenceTimer,
    pub keep_active: bool,
    pub state_changed: bool,
}

pub fn evaluate(ctx: &PresenceContext) -> PresenceUpdate {
    // Unprotected sites and frontline sites never decay.
    if !ctx.site_friendly || ctx.on_frontline {
        return finish(ctx.timer, PresenceState::Active, None);
    }

    let rear_since = ctx.timer.rear_since.unwrap_or(ctx.now);
    let state = if ctx.now.secs_since(rear_since) >= ctx.grace_period_secs {
        PresenceState::Inactive
    } else {
        PresenceState::GracePeriod
    };
    finish(ctx.timer, state, Some(rear_since))
}

fn finish(
    previous: PresenceTimer,
    state: PresenceState,
    rear_since: Option<Timestamp>,
) -> PresenceUpdate {
    PresenceUpdate {
        timer: PresenceTimer { state, rear_since },
        keep_active: state != PresenceState::Inactive,
        state_changed: previous.state != state,
    }
}
