use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Тип действия без размера – то, что входит в набор допустимых действий.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// Действие игрока вместе с размером.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки. Сумма = сколько фишек кладём.
    Bet(Chips),
    /// Raise существующей ставки. Сумма = итоговая ставка игрока на улице ("raise to").
    Raise(Chips),
    /// All-in – поставить весь оставшийся стек.
    AllIn,
}

impl PlayerActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            PlayerActionKind::Fold => ActionType::Fold,
            PlayerActionKind::Check => ActionType::Check,
            PlayerActionKind::Call => ActionType::Call,
            PlayerActionKind::Bet(_) => ActionType::Bet,
            PlayerActionKind::Raise(_) => ActionType::Raise,
            PlayerActionKind::AllIn => ActionType::AllIn,
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => write!(f, "fold"),
            PlayerActionKind::Check => write!(f, "check"),
            PlayerActionKind::Call => write!(f, "call"),
            PlayerActionKind::Bet(amount) => write!(f, "bet {amount}"),
            PlayerActionKind::Raise(to) => write!(f, "raise to {to}"),
            PlayerActionKind::AllIn => write!(f, "all-in"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит (0..max_seats-1).
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self {
            player_id,
            seat,
            kind,
        }
    }
}
