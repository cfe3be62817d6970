use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Вклад одного места в банк за раздачу.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    /// Сколько всего фишек внесено (только растёт в течение раздачи).
    pub amount: Chips,
    /// Сфолдил ли игрок: фишки остаются в банке, права на выигрыш нет.
    pub folded: bool,
}

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Уровень вклада, до которого собран этот пот (верхняя граница полосы).
    pub cap: Chips,
    /// Кто может выиграть пот – несфолдившие, внёсшие не меньше `cap`.
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Вход: вклад каждого места за всю раздачу (включая сфолдивших).
/// Выход: поты от младшего (main pot) к старшему.
///
/// Уровни – различные вклады несфолдивших игроков. Полоса (L(i-1), Li]
/// наполняется из вкладов ВСЕХ игроков (сфолдившие тоже платят), а выиграть её
/// могут только несфолдившие с вкладом >= Li. Фишки сфолдивших выше верхнего
/// уровня уходят в последний пот, так что сумма потов всегда равна сумме вкладов.
pub fn compute_side_pots(contributions: &BTreeMap<SeatIndex, Contribution>) -> Vec<SidePot> {
    let total: Chips = contributions.values().map(|c| c.amount).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut levels: Vec<Chips> = contributions
        .values()
        .filter(|c| !c.folded && !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    levels.sort();
    levels.dedup();

    if levels.is_empty() {
        // Все вложившиеся сфолдили – банк целиком достаётся оставшимся.
        let eligible_seats = contributions
            .iter()
            .filter(|(_, c)| !c.folded)
            .map(|(seat, _)| *seat)
            .collect();
        return vec![SidePot {
            amount: total,
            cap: Chips::ZERO,
            eligible_seats,
        }];
    }

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        let amount: Chips = contributions
            .values()
            .map(|c| c.amount.min(level) - c.amount.min(prev_level))
            .sum();

        let eligible_seats: Vec<SeatIndex> = contributions
            .iter()
            .filter(|(_, c)| !c.folded && c.amount >= level)
            .map(|(seat, _)| *seat)
            .collect();

        pots.push(SidePot {
            amount,
            cap: level,
            eligible_seats,
        });
        prev_level = level;
    }

    // Хвост сфолдивших выше последнего уровня.
    let overflow: Chips = contributions
        .values()
        .map(|c| c.amount.saturating_sub(prev_level))
        .sum();
    if let Some(last) = pots.last_mut() {
        last.amount += overflow;
    }

    pots
}
