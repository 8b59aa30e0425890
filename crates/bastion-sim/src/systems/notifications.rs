//! Wave alert delivery.

use hecs::World;

use bastion_core::components::Combatant;
use bastion_core::config::ReinforcementConfig;
use bastion_core::constants::NOTIFICATION_TITLE;
use bastion_core::enums::AlertLevel;
use bastion_core::events::Notification;

/// Build one wave alert per combatant currently in the world.
pub fn deliver_wave_alert(
    world: &World,
    config: &ReinforcementConfig,
    site_name: &str,
    tier: u8,
    outbox: &mut Vec<Notification>,
) -> usize {
    let body = format!("AO: {site_name} (wave {tier})");
    let level = if tier >= config.max_tier() {
        AlertLevel::Critical
    } else {
        AlertLevel::Warning
    };

    let before = outbox.len();
    for (_entity, combatant) in world.query::<&Combatant>().iter() {
        outbox.push(Notification {
            recipient: combatant.id,
            faction: combatant.faction,
            level,
            title: NOTIFICATION_TITLE.to_string(),
            body: body.clone(),
            duration_secs: config.notification_duration_secs,
        });
    }
    let sent = outbox.len() - before;

    tracing::info!(
        target: "bastion::notify",
        site = site_name,
        tier,
        recipients = sent,
        "sent reinforcement alert"
    );
    sent
}
