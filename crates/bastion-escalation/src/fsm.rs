//! Wave escalation finite state machine.
//!
//! Pure functions that advance a node's `CombatTracking` given one sensing
//! result. No ECS dependency, operates on plain data.

use bastion_core::components::CombatTracking;
use bastion_core::config::WaveSpec;
use bastion_core::types::Timestamp;

/// Input to the escalation FSM for one coordinator tick.
pub struct EscalationContext<'a> {
    pub tracking: CombatTracking,
    pub combat_detected: bool,
    pub now: Timestamp,
    pub cooldown_secs: f64,
    /// Wave table, ordered by ascending tier.
    pub waves: &'a [WaveSpec],
}

/// Tracking-level transition produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Hostile presence newly detected.
    Started,
    /// Hostile presence gone; tracking reset to wave 0.
    Ended,
}

/// Output from the escalation FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationUpdate {
    pub tracking: CombatTracking,
    pub transition: Transition,
    /// Tier to fire this tick, already recorded in `tracking`.
    pub fire: Option<u8>,
    /// A wave was suppressed by the cooldown window.
    pub cooling_down: bool,
}

/// Evaluate one sensing result against the tracking state.
pub fn evaluate(ctx: &EscalationContext) -> EscalationUpdate {
    let mut tracking = ctx.tracking;
    let mut transition = Transition::None;

    if ctx.combat_detected && !tracking.active {
        tracking = CombatTracking {
            active: true,
            combat_start: Some(ctx.now),
            current_wave: 0,
            last_wave: None,
        };
        transition = Transition::Started;
    }

    if !ctx.combat_detected {
        if tracking.active {
            return EscalationUpdate {
                tracking: CombatTracking::default(),
                transition: Transition::Ended,
                fire: None,
                cooling_down: false,
            };
        }
        return EscalationUpdate {
            tracking,
            transition,
            fire: None,
            cooling_down: false,
        };
    }

    if in_cooldown(&tracking, ctx.now, ctx.cooldown_secs) {
        return EscalationUpdate {
            tracking,
            transition,
            fire: None,
            cooling_down: true,
        };
    }

    let elapsed = tracking
        .combat_start
        .map(|start| ctx.now.secs_since(start))
        .unwrap_or(0.0);

    let fire = select_tier(tracking.current_wave, elapsed, ctx.waves);
    if let Some(tier) = fire {
        tracking.current_wave = tier;
        tracking.last_wave = Some(ctx.now);
    }

    EscalationUpdate {
        tracking,
        transition,
        fire,
        cooling_down: false,
    }
}

/// Whether the last wave fired less than `cooldown_secs` ago.
pub fn in_cooldown(tracking: &CombatTracking, now: Timestamp, cooldown_secs: f64) -> bool {
    tracking
        .last_wave
        .is_some_and(|last| now.secs_since(last) < cooldown_secs)
}

/// Highest tier above `current_wave` whose threshold `elapsed` has reached.
///
/// Scans from the top tier down so a long sensing gap fires only the single
/// highest eligible tier instead of every skipped one.
pub fn select_tier(current_wave: u8, elapsed_secs: f64, waves: &[WaveSpec]) -> Option<u8> {
    waves
        .iter()
        .rev()
        .find(|wave| current_wave < wave.tier && elapsed_secs >= wave.threshold_secs)
        .map(|wave| wave.tier)
}
