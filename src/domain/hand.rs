use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};

/// Улица (фаза) раздачи. Порядок строгий, назад не ходим.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица; после Showdown переходов нет.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Сколько общих карт открывается при переходе на эту улицу.
    pub fn community_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Сила руки: чем больше, тем сильнее. Заполняется оценщиком рук.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Выплата из одного пота одному месту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    /// 0 = main pot, дальше side pots по возрастанию порога.
    pub pot_index: usize,
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    /// Итоговый ранг руки (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько всего внёс в банк за раздачу.
    pub contributed: Chips,
    /// Сколько забрал из банка(ов).
    pub won: Chips,
    /// Является ли игрок победителем (включая сплит).
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    /// true – банк разыгран на шоудауне, false – все, кроме одного, сфолдили.
    pub went_to_showdown: bool,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub awards: Vec<PotAward>,
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn winners(&self) -> Vec<SeatIndex> {
        self.results
            .iter()
            .filter(|r| r.is_winner)
            .map(|r| r.seat)
            .collect()
    }

    pub fn won_by(&self, seat: SeatIndex) -> Chips {
        self.awards
            .iter()
            .filter(|a| a.seat == seat)
            .map(|a| a.amount)
            .sum()
    }
}
