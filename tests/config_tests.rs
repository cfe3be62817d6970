//! Конфиг симуляции: значения по умолчанию, JSON, проверка.

use std::fs;

use holdem_engine::config::{ConfigError, SimulationConfig};
use holdem_engine::domain::chips::Chips;

#[test]
fn default_config_is_valid() {
    let config = SimulationConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.big_blind, Chips(100));
    assert_eq!(config.table_config().stakes.small_blind, Chips(50));
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{ "tables": 3, "starting_stack": 2500 }"#).unwrap();
    assert_eq!(config.tables, 3);
    assert_eq!(config.starting_stack, Chips(2500));
    assert_eq!(config.players_per_table, SimulationConfig::default().players_per_table);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        SimulationConfig { tables: 0, ..Default::default() },
        SimulationConfig { players_per_table: 1, ..Default::default() },
        SimulationConfig { players_per_table: 10, max_seats: 9, ..Default::default() },
        SimulationConfig { max_seats: 11, ..Default::default() },
        SimulationConfig { passive_players: 7, ..Default::default() },
        SimulationConfig { big_blind: Chips::ZERO, small_blind: Chips::ZERO, ..Default::default() },
        SimulationConfig { small_blind: Chips(200), ..Default::default() },
        SimulationConfig { starting_stack: Chips::ZERO, ..Default::default() },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(ConfigError::Invalid(_))),
            "конфиг должен быть отклонён: {config:?}"
        );
    }
}

#[test]
fn from_json_file_reads_and_validates() {
    let dir = std::env::temp_dir().join(format!("holdem_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.json");
    fs::write(&good, r#"{ "tables": 2, "hands_per_table": 10, "seed": 9 }"#).unwrap();
    let config = SimulationConfig::from_json_file(&good).unwrap();
    assert_eq!(config.tables, 2);
    assert_eq!(config.seed, 9);

    let bad = dir.join("bad.json");
    fs::write(&bad, r#"{ "tables": 0 }"#).unwrap();
    assert!(matches!(
        SimulationConfig::from_json_file(&bad),
        Err(ConfigError::Invalid(_))
    ));

    let broken = dir.join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        SimulationConfig::from_json_file(&broken),
        Err(ConfigError::Json(_))
    ));

    assert!(matches!(
        SimulationConfig::from_json_file(dir.join("missing.json")),
        Err(ConfigError::Io(_))
    ));

    fs::remove_dir_all(&dir).unwrap();
}
