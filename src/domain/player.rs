use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока именно в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче и ещё может ставить.
    Active,
    /// Игрок сфолдил: его фишки остаются в банке, но выиграть он уже ничего не может.
    Folded,
    /// Игрок в олл-ине – стек 0, ставить больше не может, но банк выиграть может.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (sit out).
    SittingOut,
    /// Игрок вылетел (нулевой стек после раздачи).
    Busted,
}

/// Состояние игрока за конкретным столом.
///
/// Движок не копирует это состояние, а работает прямо с местом за столом:
/// стек, ставка улицы и вклад в раздачу меняются только через [`PlayerAtTable::commit`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Сколько поставлено на текущей улице (обнуляется каждую улицу).
    pub current_bet: Chips,
    /// Сколько поставлено за всю раздачу (обнуляется только в начале раздачи).
    pub total_contribution: Chips,
    pub status: PlayerStatus,
    /// Карманные карты (0 или 2 для холдема).
    pub hole_cards: Vec<Card>,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self::named(player_id, format!("Player{player_id}"), stack)
    }

    pub fn named(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            total_contribution: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    /// Участвует в борьбе за банк (не сфолдил, не sit out / busted).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может делать ходы (в раздаче и не в олл-ине).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Может ли игрок получить карты в новой раздаче.
    pub fn can_be_dealt_in(&self) -> bool {
        self.status != PlayerStatus::SittingOut && !self.stack.is_zero()
    }

    /// Сброс перед новой раздачей.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.total_contribution = Chips::ZERO;
        self.hole_cards.clear();
        if self.status == PlayerStatus::SittingOut {
            return;
        }
        self.status = if self.stack.is_zero() {
            PlayerStatus::Busted
        } else {
            PlayerStatus::Active
        };
    }

    /// Переложить фишки из стека в ставку (не больше, чем есть в стеке).
    ///
    /// Возвращает реально внесённую сумму. Если стек обнулился – игрок в олл-ине.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_contribution += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }
}
