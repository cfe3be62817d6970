//! Конфигурация симуляции: JSON-файл + значения по умолчанию.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::table::{TableConfig, TableStakes, MAX_SEATS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("некорректный конфиг: {0}")]
    Invalid(String),
}

/// Параметры self-play симуляции.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Сколько независимых столов гонять.
    pub tables: u32,
    /// Максимум раздач на стол (стол останавливается раньше, если играть некому).
    pub hands_per_table: u32,
    pub players_per_table: u8,
    pub max_seats: u8,
    pub starting_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Базовый seed: из него выводятся seed'ы столов.
    pub seed: u64,
    /// Сколько игроков за каждым столом играют пассивно (check/call);
    /// остальные – случайный бот.
    pub passive_players: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tables: 8,
            hands_per_table: 200,
            players_per_table: 6,
            max_seats: 9,
            starting_stack: Chips(10_000),
            small_blind: Chips(50),
            big_blind: Chips(100),
            seed: 42,
            passive_players: 0,
        }
    }
}

impl SimulationConfig {
    /// Прочитать конфиг из JSON-файла и проверить его.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.tables == 0 {
            return invalid("нужен хотя бы один стол");
        }
        if self.max_seats < 2 || self.max_seats > MAX_SEATS {
            return invalid("max_seats должен быть от 2 до 10");
        }
        if self.players_per_table < 2 || self.players_per_table > self.max_seats {
            return invalid("players_per_table должен быть от 2 до max_seats");
        }
        if self.passive_players > self.players_per_table {
            return invalid("passive_players больше, чем игроков за столом");
        }
        if self.big_blind.is_zero() || self.small_blind > self.big_blind {
            return invalid("нужно 0 <= small_blind <= big_blind и big_blind > 0");
        }
        if self.starting_stack.is_zero() {
            return invalid("starting_stack должен быть больше нуля");
        }
        Ok(())
    }

    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            max_seats: self.max_seats,
            stakes: TableStakes::new(self.small_blind, self.big_blind),
        }
    }
}
