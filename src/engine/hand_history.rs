use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, Street};
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;

/// Какой блайнд поставлен.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    Small,
    Big,
}

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
        button: SeatIndex,
    },

    /// Блайнд поставлен. Короткий стек ставит что есть и уходит в олл-ин.
    BlindPosted {
        seat: SeatIndex,
        kind: BlindKind,
        amount: Chips,
        all_in: bool,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты (только новые карты этой улицы).
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    /// Переход на новую улицу.
    PhaseChanged {
        from: Street,
        to: Street,
    },

    /// Действие игрока принято и применено.
    ActionApplied {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        /// Сколько фишек ушло из стека в банк этим действием.
        chips_moved: Chips,
        stack_after: Chips,
        bet_after: Chips,
        pot_after: Chips,
        /// Переоткрыл ли ход торговлю для остальных (полный bet/raise).
        reopened: bool,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank: HandRank,
    },

    /// Выплата из пота.
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
        table_id: TableId,
        winners: Vec<SeatIndex>,
        by_showdown: bool,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Только переходы улиц (from, to) – удобно для проверок.
    pub fn phase_changes(&self) -> Vec<(Street, Street)> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                HandEventKind::PhaseChanged { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    /// Все принятые действия (seat, action) по порядку.
    pub fn actions(&self) -> Vec<(SeatIndex, PlayerActionKind)> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                HandEventKind::ActionApplied { seat, action, .. } => Some((seat, action)),
                _ => None,
            })
            .collect()
    }
}
