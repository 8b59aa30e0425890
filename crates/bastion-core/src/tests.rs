#[cfg(test)]
mod tests {
    use crate::commands::WorldCommand;
    use crate::components::{Garrison, PendingWave, SpawnConfig};
    use crate::config::{AerialSpec, ReinforcementConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::types::{CombatantId, FactionId, NodeId, Position, SimTime, SiteId, Timestamp};

    #[test]
    fn test_builtin_config_matches_defaults() {
        let builtin = ReinforcementConfig::builtin();
        let defaults = ReinforcementConfig::default();
        assert_eq!(
            serde_json::to_value(&builtin).unwrap(),
            serde_json::to_value(&defaults).unwrap(),
            "builtin JSON and constants drifted apart"
        );
        assert!(defaults.validate().is_ok());
        assert_eq!(builtin.max_tier(), 3);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = ReinforcementConfig::from_json_str(r#"{ "grace_period_secs": 120.0 }"#)
            .expect("partial config should parse");
        assert_eq!(config.grace_period_secs, 120.0);
        assert_eq!(config.sense_interval_secs, 30.0);
        assert_eq!(config.waves.len(), 3);
    }

    #[test]
    fn test_config_rejects_aerial_below_top_tier() {
        let mut config = ReinforcementConfig::default();
        config.waves[0].aerial = Some(AerialSpec { crew: 2 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AerialNotTopTier { tier: 1 })
        ));
    }

    #[test]
    fn test_config_rejects_descending_thresholds() {
        let mut config = ReinforcementConfig::default();
        config.waves[2].threshold_secs = config.waves[1].threshold_secs;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdNotAscending { tier: 3 })
        ));
    }

    #[test]
    fn test_config_rejects_tier_gap() {
        let mut config = ReinforcementConfig::default();
        config.waves.remove(1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TierOutOfOrder {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_config_rejects_empty_table_and_zero_period() {
        let mut config = ReinforcementConfig::default();
        config.waves.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyWaveTable)));

        let mut config = ReinforcementConfig::default();
        config.sense_interval_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "sense_interval_secs"
            })
        ));
    }

    #[test]
    fn test_config_parse_error() {
        let err = ReinforcementConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_template_lookup() {
        let config = ReinforcementConfig::default();
        assert_eq!(config.template(GroupArchetype::SquadRifle).unwrap().members, 8);
        let mut config = config;
        config.templates.clear();
        assert!(config.template(GroupArchetype::Fireteam).is_none());
    }

    #[test]
    fn test_garrison_selects_wave_config_only_while_set() {
        let normal = SpawnConfig {
            group_count: 2,
            dispersion_radius: 50.0,
            archetype: GroupArchetype::Fireteam,
            respawn_secs: 180.0,
        };
        let wave = SpawnConfig {
            group_count: 2,
            dispersion_radius: 200.0,
            archetype: GroupArchetype::SquadRifle,
            respawn_secs: 180.0,
        };
        let mut garrison = Garrison::new(normal);
        assert_eq!(*garrison.current_config(), normal);
        garrison.active_wave = Some(PendingWave { tier: 2, config: wave });
        assert_eq!(*garrison.current_config(), wave);
        garrison.active_wave = None;
        assert_eq!(*garrison.current_config(), normal);
    }

    #[test]
    fn test_position_ranges() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(300.0, 400.0, 0.0);
        assert!((a.range_to(&b) - 500.0).abs() < 1e-9);
        assert!((a.range_sq_to(&b) - 250_000.0).abs() < 1e-6);
        let c = Position::new(0.0, 100.0, 50.0);
        assert!((a.horizontal_range_to(&c) - 100.0).abs() < 1e-9);
        assert!(a.bearing_to(&c).abs() < 1e-9, "due north is bearing 0");
    }

    #[test]
    fn test_sim_time_and_timestamps() {
        let mut time = SimTime::default();
        for _ in 0..crate::constants::TICK_RATE {
            time.advance();
        }
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
        let now = time.now();
        assert!((now.secs_since(Timestamp(0.25)) - 0.75).abs() < 1e-9);
        assert_eq!(Timestamp(10.0).after(5.0), Timestamp(15.0));

        for _ in 0..9000 {
            time.advance();
        }
        assert_eq!(time.now(), Timestamp(901.0), "whole seconds must not drift");
    }

    #[test]
    fn test_world_command_serde() {
        let commands = vec![
            WorldCommand::AddSite {
                id: SiteId(1),
                name: "Lamentin".into(),
                position: Position::new(10.0, 20.0, 0.0),
                faction: Some(FactionId(2)),
            },
            WorldCommand::AddNode {
                id: NodeId(7),
                faction: FactionId(2),
                site: None,
            },
            WorldCommand::AssignNodeSite {
                node: NodeId(7),
                site: SiteId(1),
            },
            WorldCommand::KillCombatant { id: CombatantId(3) },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: WorldCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }
}
