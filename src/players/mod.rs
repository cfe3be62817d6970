//! Источники решений игроков.
//!
//! Движку всё равно, кто принимает решение: человек в консоли, скрипт
//! или бот. Он видит только `ActionSource` и обязан проверить его ответ.

pub mod console;
pub mod policy;
pub mod scripted;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::{ActionType, PlayerActionKind};
use crate::engine::game_loop::HandEngine;
use crate::engine::validation::min_raise_to;

pub use console::{parse_command, CommandError, ConsoleSource};
pub use policy::{PassiveSource, RandomPolicy};
pub use scripted::ScriptedSource;

/// Источник решения для одного места.
pub trait ActionSource {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind;
}

/// Что видно соседу по столу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpponentView {
    pub seat: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
}

/// Видимое состояние стола для принятия решения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub street: Street,
    pub board: Vec<Card>,
    pub hole_cards: Vec<Card>,
    pub stack: Chips,
    /// Своя ставка на этой улице.
    pub current_bet: Chips,
    /// Сколько доплатить до колла (без учёта стека).
    pub call_amount: Chips,
    /// Наибольшая ставка улицы.
    pub highest_bet: Chips,
    pub min_raise: Chips,
    /// Минимальная итоговая ставка для raise.
    pub min_raise_to: Chips,
    pub pot: Chips,
    pub valid_actions: Vec<ActionType>,
    pub opponents: Vec<OpponentView>,
}

impl TableView {
    /// Снять видимое состояние для места `seat`.
    pub fn capture(table: &Table, engine: &HandEngine, seat: SeatIndex) -> Option<Self> {
        let player = table.player(seat)?;

        let opponents = table
            .seats
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != seat as usize)
            .filter_map(|(idx, slot)| {
                slot.as_ref().map(|p| OpponentView {
                    seat: idx as SeatIndex,
                    name: p.name.clone(),
                    stack: p.stack,
                    current_bet: p.current_bet,
                    status: p.status,
                })
            })
            .collect();

        Some(Self {
            table_id: table.id,
            hand_id: engine.hand_id,
            seat,
            player_id: player.player_id,
            name: player.name.clone(),
            street: engine.street,
            board: table.board.clone(),
            hole_cards: player.hole_cards.clone(),
            stack: player.stack,
            current_bet: player.current_bet,
            call_amount: engine.call_amount(table, seat),
            highest_bet: engine.betting.current_bet,
            min_raise: engine.betting.min_raise,
            min_raise_to: min_raise_to(&engine.betting),
            pot: engine.pot_total(),
            valid_actions: engine.valid_actions(table, seat),
            opponents,
        })
    }

    pub fn can(&self, action: ActionType) -> bool {
        self.valid_actions.contains(&action)
    }

    /// Максимальная итоговая ставка, которую игрок может поставить.
    pub fn max_bet_to(&self) -> Chips {
        self.current_bet + self.stack
    }

    /// Безопасный ход: check, если можно, иначе fold.
    pub fn passive_fallback(&self) -> PlayerActionKind {
        if self.can(ActionType::Check) {
            PlayerActionKind::Check
        } else {
            PlayerActionKind::Fold
        }
    }
}
