use std::collections::BTreeMap;

use tracing::info;

use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, HandSummary, PlayerHandResult, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::HandEngine;
use crate::engine::hand_history::HandEventKind;
use crate::engine::HandEvaluator;

impl HandEngine {
    /// Шоудаун: вскрытие, выбор победителей по каждому поту, выплата.
    ///
    /// С одним претендентом оценщик не вызывается – он забирает всё.
    pub fn showdown<E>(&mut self, table: &mut Table, evaluator: &E) -> Result<HandSummary, EngineError>
    where
        E: HandEvaluator + ?Sized,
    {
        if self.finished {
            return Err(EngineError::NoActiveHand);
        }
        if self.street != Street::Showdown {
            return Err(EngineError::IllegalTransition { from: self.street });
        }

        let contenders = self.contenders(table);
        if contenders.len() <= 1 {
            return self.finish_without_showdown(table);
        }

        let mut ranks: BTreeMap<SeatIndex, HandRank> = BTreeMap::new();
        for &seat in &contenders {
            let Some(p) = table.player(seat) else {
                continue;
            };
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&table.board);
            let rank = evaluator.rank(&cards);
            ranks.insert(seat, rank);
            self.history.push(HandEventKind::ShowdownReveal {
                seat,
                player_id: p.player_id,
                hole_cards: p.hole_cards.clone(),
                rank,
            });
        }

        let pots = self.ledger.resolve_side_pots();
        let winners_per_pot: Vec<Vec<SeatIndex>> = pots
            .iter()
            .map(|pot| {
                let best = pot
                    .eligible_seats
                    .iter()
                    .filter_map(|seat| ranks.get(seat))
                    .max()
                    .copied();
                pot.eligible_seats
                    .iter()
                    .copied()
                    .filter(|seat| best.is_some() && ranks.get(seat).copied() == best)
                    .collect()
            })
            .collect();

        self.pots = pots;
        self.settle(table, &winners_per_pot, &ranks, true)
    }

    /// Все, кроме одного, сфолдили: он забирает все поты без вскрытия.
    pub(crate) fn finish_without_showdown(&mut self, table: &mut Table) -> Result<HandSummary, EngineError> {
        let winner = self
            .contenders(table)
            .first()
            .copied()
            .ok_or(EngineError::Internal("нет ни одного претендента на банк"))?;

        let pots = self.ledger.resolve_side_pots();
        let winners_per_pot: Vec<Vec<SeatIndex>> = pots.iter().map(|_| vec![winner]).collect();

        self.pots = pots;
        self.current_actor = None;
        self.settle(table, &winners_per_pot, &BTreeMap::new(), false)
    }

    /// Выплата через леджер, зачисление стеков и закрытие раздачи.
    fn settle(
        &mut self,
        table: &mut Table,
        winners_per_pot: &[Vec<SeatIndex>],
        ranks: &BTreeMap<SeatIndex, HandRank>,
        by_showdown: bool,
    ) -> Result<HandSummary, EngineError> {
        let awards = self.ledger.award_to(winners_per_pot, &self.odd_chip_order)?;

        let mut won: BTreeMap<SeatIndex, Chips> = BTreeMap::new();
        // Победитель – тот, кто выиграл хотя бы один спорный пот
        // (возврат неуравненного излишка победой не считается).
        let mut winners: Vec<SeatIndex> = Vec::new();
        for award in &awards {
            let contested = self
                .pots
                .get(award.pot_index)
                .map(|pot| pot.eligible_seats.len() >= 2)
                .unwrap_or(false);
            if (contested || !by_showdown) && !winners.contains(&award.seat) {
                winners.push(award.seat);
            }
            if let Some(p) = table.player_mut(award.seat) {
                p.stack += award.amount;
                self.history.push(HandEventKind::PotAwarded {
                    pot_index: award.pot_index,
                    seat: award.seat,
                    player_id: p.player_id,
                    amount: award.amount,
                });
            }
            *won.entry(award.seat).or_default() += award.amount;
        }

        let results: Vec<PlayerHandResult> = self
            .ledger
            .contributions()
            .iter()
            .filter_map(|(&seat, contribution)| {
                let p = table.player(seat)?;
                let amount = won.get(&seat).copied().unwrap_or_default();
                Some(PlayerHandResult {
                    player_id: p.player_id,
                    seat,
                    rank: ranks.get(&seat).copied(),
                    contributed: contribution.amount,
                    won: amount,
                    is_winner: winners.contains(&seat),
                })
            })
            .collect();

        // Вылетевшие: нулевой стек после выплат.
        for p in table.seats.iter_mut().flatten() {
            if p.stack.is_zero() && p.status != PlayerStatus::SittingOut {
                p.status = PlayerStatus::Busted;
            }
        }
        table.hand_in_progress = false;

        let summary = HandSummary {
            hand_id: self.hand_id,
            table_id: self.table_id,
            street_reached: self.street,
            went_to_showdown: by_showdown,
            board: table.board.clone(),
            total_pot: self.ledger.total_contributed(),
            awards,
            results,
        };

        self.history.push(HandEventKind::HandFinished {
            hand_id: self.hand_id,
            table_id: self.table_id,
            winners: summary.winners(),
            by_showdown,
        });
        info!(
            hand_id = self.hand_id,
            table_id = self.table_id,
            pot = summary.total_pot.0,
            by_showdown,
            winners = ?summary.winners(),
            "раздача завершена"
        );

        self.finished = true;
        self.current_actor = None;
        self.summary = Some(summary.clone());
        Ok(summary)
    }
}
