use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::domain::{HandId, PlayerId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Больше мест колода не прокормит: 2 карты на игрока + 5 на борд + 3 в сброс.
pub const MAX_SEATS: u8 = 10;

/// Конфиг стола: сколько мест и какие блайнды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (обычно 2–9).
    pub max_seats: u8,
    pub stakes: TableStakes,
}

impl TableConfig {
    /// Проверить число мест и блайнды.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.max_seats < 2 || self.max_seats > MAX_SEATS {
            return Err(TableError::InvalidConfig("мест должно быть от 2 до 10"));
        }
        self.stakes.validate()
    }
}

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }

    /// BB > 0 и SB <= BB, иначе минимальный рейз вырождается в ноль.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.big_blind.is_zero() || self.small_blind > self.big_blind {
            return Err(TableError::InvalidConfig(
                "нужно 0 <= small_blind <= big_blind и big_blind > 0",
            ));
        }
        Ok(())
    }
}

/// Ошибки рассадки.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("место {0} уже занято")]
    SeatTaken(SeatIndex),

    #[error("игрок {0} уже сидит за столом")]
    AlreadySeated(PlayerId),

    #[error("нельзя менять рассадку во время раздачи")]
    HandInProgress,

    #[error("некорректный конфиг стола: {0}")]
    InvalidConfig(&'static str),
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,

    /// Индекс дилерской кнопки или None, если раздача ещё не начиналась.
    pub dealer_button: Option<SeatIndex>,

    /// ID текущей (или последней) раздачи.
    pub current_hand_id: Option<HandId>,

    /// Идёт ли сейчас раздача.
    pub hand_in_progress: bool,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let seats = vec![None; config.max_seats as usize];
        Ok(Self {
            id,
            name,
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            current_hand_id: None,
            hand_in_progress: false,
        })
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn stakes(&self) -> &TableStakes {
        &self.config.stakes
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Сколько игроков можно посадить в следующую раздачу.
    pub fn players_with_chips(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|p| p.can_be_dealt_in())
            .count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    /// Посадить игрока на конкретное место.
    pub fn seat_player(&mut self, seat: SeatIndex, player: PlayerAtTable) -> Result<(), TableError> {
        if self.hand_in_progress {
            return Err(TableError::HandInProgress);
        }
        if self.seats.iter().flatten().any(|p| p.player_id == player.player_id) {
            return Err(TableError::AlreadySeated(player.player_id));
        }
        let slot = self
            .seats
            .get_mut(seat as usize)
            .ok_or(TableError::InvalidSeat(seat))?;
        if slot.is_some() {
            return Err(TableError::SeatTaken(seat));
        }
        *slot = Some(player);
        Ok(())
    }

    /// Убрать игрока с места (между раздачами).
    pub fn remove_player(&mut self, seat: SeatIndex) -> Result<PlayerAtTable, TableError> {
        if self.hand_in_progress {
            return Err(TableError::HandInProgress);
        }
        self.seats
            .get_mut(seat as usize)
            .ok_or(TableError::InvalidSeat(seat))?
            .take()
            .ok_or(TableError::InvalidSeat(seat))
    }

    /// Сумма стеков всех сидящих игроков.
    pub fn total_stacks(&self) -> Chips {
        self.seats.iter().flatten().map(|p| p.stack).sum()
    }
}
