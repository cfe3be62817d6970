use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
///
/// Создаётся заново на каждой улице. Кто должен ходить, считается из двух вещей:
/// - `to_act` – места, которые ещё должны принять решение с полным правом рейза;
/// - ставка игрока меньше `current_bet` – такой игрок обязан уравнять или сфолдить,
///   даже если неполный all-in не переоткрыл для него торговлю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая наибольшая ставка улицы (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (полный bet/raise).
    pub last_aggressor: Option<SeatIndex>,
    /// Кто ходил первым на этой улице.
    pub first_actor: Option<SeatIndex>,
    /// Место, после которого начинается поиск следующего ходящего.
    pub cursor: SeatIndex,
    /// Очередь ходящих с правом рейза, в порядке хода.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(
        street: Street,
        current_bet: Chips,
        min_raise: Chips,
        cursor: SeatIndex,
        to_act: Vec<SeatIndex>,
    ) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            first_actor: to_act.first().copied(),
            cursor,
            to_act,
        }
    }

    /// Пустой раунд: ставить больше некому (шоудаун, раздача закончена).
    pub fn closed(street: Street, cursor: SeatIndex) -> Self {
        Self::new(street, Chips::ZERO, Chips::ZERO, cursor, Vec::new())
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Есть ли у места право рейза (торговля для него открыта).
    pub fn is_open_for(&self, seat: SeatIndex) -> bool {
        self.to_act.contains(&seat)
    }

    /// Полный bet/raise:
    /// - новая current_bet и min_raise;
    /// - агрессор запоминается;
    /// - очередь перезапускается: все остальные живые игроки ходят снова.
    pub fn on_full_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        raise_size: Chips,
        new_to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }

    /// Неполный all-in выше текущей ставки: цена колла растёт,
    /// но min_raise, агрессор и очередь не меняются.
    pub fn on_incomplete_raise(&mut self, seat: SeatIndex, new_bet: Chips) {
        self.current_bet = new_bet;
        self.mark_acted(seat);
    }

    /// Очередь пуста – все, у кого было право хода, высказались.
    pub fn is_queue_empty(&self) -> bool {
        self.to_act.is_empty()
    }
}
