use crate::domain::player::PlayerAtTable;
use crate::domain::{SeatIndex, Table};

/// Найти следующее место по кругу, где сидит игрок, подходящий под `pred`.
///
/// Поиск начинается со `start` (если `include_start`) или со следующего за ним.
pub fn next_seat_where<F>(
    table: &Table,
    start: SeatIndex,
    include_start: bool,
    pred: F,
) -> Option<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if let Some(p) = table.seats[idx].as_ref() {
            if pred(p) {
                return Some(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Все места, подходящие под `pred`, по кругу начиная со следующего за `start`
/// (сам `start` – последним).
pub fn seats_after_where<F>(table: &Table, start: SeatIndex, pred: F) -> Vec<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    let max = table.seats.len();
    (1..=max)
        .map(|offset| (start as usize + offset) % max)
        .filter(|&idx| table.seats[idx].as_ref().map(&pred).unwrap_or(false))
        .map(|idx| idx as SeatIndex)
        .collect()
}

/// Следующее занятое место по кругу.
pub fn next_occupied_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    next_seat_where(table, start, include_start, |_| true)
}

/// Предложить следующую позицию дилера:
/// - если есть текущая кнопка – следующее место с игроком, которого можно раздать;
/// - если нет – первое такое место с нуля.
///
/// Вылетевшие и sit out пропускаются.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_seat_where(table, button, false, PlayerAtTable::can_be_dealt_in),
        None => next_seat_where(table, 0, true, PlayerAtTable::can_be_dealt_in),
    }
}

/// Позиции блайндов и первого ходящего на префлопе.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlindPositions {
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    /// Кто открывает торговлю на префлопе.
    pub first_to_act: SeatIndex,
}

/// Блайнды относительно кнопки среди раздаваемых игроков.
///
/// Heads-up: кнопка ставит SB и ходит первой на префлопе.
/// Иначе SB – слева от кнопки, BB – следующий, первым ходит игрок после BB.
pub fn blind_positions(table: &Table, button: SeatIndex) -> Option<BlindPositions> {
    let dealt = seats_after_where(table, button, PlayerAtTable::can_be_dealt_in);
    match dealt.len() {
        0 | 1 => None,
        2 => {
            // Порядок: [не-кнопка, кнопка].
            let other = dealt[0];
            Some(BlindPositions {
                small_blind: button,
                big_blind: other,
                first_to_act: button,
            })
        }
        n => Some(BlindPositions {
            small_blind: dealt[0],
            big_blind: dealt[1],
            first_to_act: dealt[2 % n],
        }),
    }
}

/// Порядок мест (индексы 0..len) начиная слева от кнопки, кнопка последней.
/// Используется для раздачи нечётных фишек.
pub fn order_left_of(len: usize, button: SeatIndex) -> Vec<SeatIndex> {
    (1..=len)
        .map(|offset| ((button as usize + offset) % len) as SeatIndex)
        .collect()
}
