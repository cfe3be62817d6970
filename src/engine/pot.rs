use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::PotAward;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::side_pots::{compute_side_pots, Contribution, SidePot};

/// Учёт банка одной раздачи.
///
/// Хранит только вклады мест; сайд-поты не хранятся, а каждый раз
/// пересчитываются из вкладов (`resolve_side_pots`).
///
/// Инвариант: `pot_total() == total_contributed() - уже выплачено`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotLedger {
    contributions: BTreeMap<SeatIndex, Contribution>,
    awarded: Chips,
    settled: bool,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать место в раздаче с нулевым вкладом.
    ///
    /// Игрок без вклада (например, вне блайндов и с одними чеками) всё равно
    /// остаётся претендентом на банк.
    pub fn enroll(&mut self, seat: SeatIndex) {
        self.contributions.entry(seat).or_default();
    }

    /// Увеличить вклад места. Вклад никогда не уменьшается до `reset`.
    pub fn add_contribution(&mut self, seat: SeatIndex, amount: Chips) {
        self.contributions.entry(seat).or_default().amount += amount;
    }

    /// Игрок сфолдил: фишки остаются, права на банк больше нет.
    pub fn mark_folded(&mut self, seat: SeatIndex) {
        self.contributions.entry(seat).or_default().folded = true;
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions
            .get(&seat)
            .map(|c| c.amount)
            .unwrap_or(Chips::ZERO)
    }

    pub fn contributions(&self) -> &BTreeMap<SeatIndex, Contribution> {
        &self.contributions
    }

    /// Сколько всего внесено за раздачу (включая уже выплаченное).
    pub fn total_contributed(&self) -> Chips {
        self.contributions.values().map(|c| c.amount).sum()
    }

    /// Сколько фишек сейчас лежит в банке.
    pub fn pot_total(&self) -> Chips {
        self.total_contributed() - self.awarded
    }

    /// Главный пот и сайд-поты от младшего к старшему.
    /// Чистая функция от вкладов: повторный вызов даёт тот же результат.
    pub fn resolve_side_pots(&self) -> Vec<SidePot> {
        compute_side_pots(&self.contributions)
    }

    /// Выплатить поты.
    ///
    /// `winners_per_pot[i]` – победители пота `i` из `resolve_side_pots()`.
    /// Каждый получает `amount / n`, остаток раздаётся по одной фишке
    /// в порядке `odd_chip_order` (места слева от кнопки по кругу).
    ///
    /// Все проверки делаются до выплаты: при ошибке леджер не меняется.
    pub fn award_to(
        &mut self,
        winners_per_pot: &[Vec<SeatIndex>],
        odd_chip_order: &[SeatIndex],
    ) -> Result<Vec<PotAward>, EngineError> {
        if self.settled {
            return Err(EngineError::PotAlreadyAwarded);
        }

        let pots = self.resolve_side_pots();

        for (pot_index, pot) in pots.iter().enumerate() {
            if pot.amount.is_zero() {
                continue;
            }
            let winners = winners_per_pot
                .get(pot_index)
                .filter(|w| !w.is_empty())
                .ok_or(EngineError::PotWithoutWinner(pot_index))?;
            if let Some(&seat) = winners.iter().find(|s| !pot.eligible_seats.contains(s)) {
                return Err(EngineError::InvalidWinner { pot_index, seat });
            }
        }
        // Лишние записи (для потов, которых нет) – тоже ошибка вызывающего кода.
        if let Some((pot_index, &seat)) = winners_per_pot
            .iter()
            .enumerate()
            .skip(pots.len())
            .find_map(|(i, w)| w.first().map(|s| (i, s)))
        {
            return Err(EngineError::InvalidWinner { pot_index, seat });
        }

        let mut awards = Vec::new();
        for (pot_index, pot) in pots.iter().enumerate() {
            if pot.amount.is_zero() {
                continue;
            }
            let mut winners = winners_per_pot[pot_index].clone();
            winners.sort();
            winners.dedup();
            winners.sort_by_key(|seat| {
                odd_chip_order
                    .iter()
                    .position(|s| s == seat)
                    .unwrap_or(usize::MAX)
            });

            let (share, remainder) = pot.amount.split(winners.len());
            for (i, &seat) in winners.iter().enumerate() {
                let extra = if (i as u64) < remainder.0 {
                    Chips(1)
                } else {
                    Chips::ZERO
                };
                awards.push(PotAward {
                    pot_index,
                    seat,
                    amount: share + extra,
                });
            }
            self.awarded += pot.amount;
        }

        self.settled = true;
        Ok(awards)
    }

    /// Банк уже выплачен.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Полный сброс перед новой раздачей.
    pub fn reset(&mut self) {
        self.contributions.clear();
        self.awarded = Chips::ZERO;
        self.settled = false;
    }
}
