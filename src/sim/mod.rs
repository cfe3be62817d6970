//! Драйвер раздачи и self-play столов.
//!
//! Ожидание решения игрока живёт здесь, а не в движке: драйвер спрашивает
//! `ActionSource`, отдаёт ответ движку и при недопустимом ответе
//! подставляет безопасный ход (check/fold).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::domain::chips::Chips;
use crate::domain::hand::HandSummary;
use crate::domain::player::PlayerAtTable;
use crate::domain::table::{Table, TableError};
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::dealer::{Dealer, DeckDealer};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{advance_if_needed, apply_action, start_hand, HandStatus};
use crate::engine::hand_history::HandHistory;
use crate::engine::HandEvaluator;
use crate::eval::StandardEvaluator;
use crate::infra::RngSeed;
use crate::players::{ActionSource, PassiveSource, RandomPolicy, TableView};

/// Источники решений по местам.
pub type SeatSources<'a> = BTreeMap<SeatIndex, Box<dyn ActionSource + 'a>>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("для места {0} нет источника решений")]
    MissingSource(SeatIndex),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("нарушено сохранение фишек: было {before}, стало {after}")]
    ChipsNotConserved { before: Chips, after: Chips },
}

/// Сыгранная раздача.
#[derive(Clone, Debug)]
pub struct PlayedHand {
    pub summary: HandSummary,
    pub history: HandHistory,
    /// Сколько ответов источников пришлось заменить на check/fold.
    pub rejected_actions: u32,
}

/// Сыграть одну раздачу до конца.
pub fn play_hand<D, E>(
    table: &mut Table,
    dealer: &mut D,
    evaluator: &E,
    sources: &mut SeatSources<'_>,
    hand_id: HandId,
) -> Result<PlayedHand, SimError>
where
    D: Dealer,
    E: HandEvaluator + ?Sized,
{
    let before = table.total_stacks();
    let mut engine = start_hand(table, dealer, hand_id)?;
    let mut status = advance_if_needed(table, &mut engine, dealer, evaluator)?;
    let mut rejected_actions = 0;

    let summary = loop {
        if let HandStatus::Finished(summary) = status {
            break summary;
        }

        let seat = engine
            .current_actor
            .ok_or(EngineError::Internal("раздача идёт, но ходить некому"))?;
        let view = TableView::capture(table, &engine, seat).ok_or(EngineError::EmptySeat)?;
        let source = sources
            .get_mut(&seat)
            .ok_or(SimError::MissingSource(seat))?;

        let kind = source.decide_action(&view);
        let action = PlayerAction::new(view.player_id, seat, kind);

        status = match apply_action(table, &mut engine, dealer, evaluator, action) {
            Ok(status) => status,
            Err(err @ (EngineError::IllegalAction { .. } | EngineError::InsufficientChips { .. })) => {
                rejected_actions += 1;
                let fallback = view.passive_fallback();
                warn!(seat, %kind, %fallback, error = %err, "недопустимое действие, замена");
                apply_action(
                    table,
                    &mut engine,
                    dealer,
                    evaluator,
                    PlayerAction::new(view.player_id, seat, fallback),
                )?
            }
            Err(err) => return Err(err.into()),
        };
    };

    let after = table.total_stacks();
    if after != before {
        return Err(SimError::ChipsNotConserved { before, after });
    }

    debug!(hand_id, pot = summary.total_pot.0, "раздача сыграна");
    Ok(PlayedHand {
        summary,
        history: engine.history,
        rejected_actions,
    })
}

/// Итоги одного стола в self-play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableReport {
    pub table_id: TableId,
    pub hands_played: u32,
    pub showdowns: u32,
    pub total_pot: u64,
    pub biggest_pot: Chips,
    pub rejected_actions: u32,
    /// (seat, стек) в конце.
    pub final_stacks: Vec<(SeatIndex, Chips)>,
    pub last_history: Option<HandHistory>,
}

/// Посадить игроков и раздать источники решений для стола.
///
/// Seed'ы выводятся из базового: поток 0 – колода, поток 1+seat – бот на месте.
pub fn setup_table(config: &SimulationConfig, table_id: TableId) -> Result<(Table, SeatSources<'static>), SimError> {
    let mut table = Table::new(table_id, format!("Self-play #{table_id}"), config.table_config())?;
    let base = RngSeed::from_u64(config.seed);
    let mut sources: SeatSources<'static> = BTreeMap::new();

    for seat in 0..config.players_per_table {
        let player_id = table_id * 100 + seat as u64;
        table.seat_player(
            seat,
            PlayerAtTable::named(player_id, format!("Bot{seat}"), config.starting_stack),
        )?;
        let source: Box<dyn ActionSource> = if seat < config.passive_players {
            Box::new(PassiveSource)
        } else {
            Box::new(RandomPolicy::new(base.derive(table_id, 1 + seat as u64, 0).to_rng()))
        };
        sources.insert(seat, source);
    }

    Ok((table, sources))
}

/// Прогнать один стол: раздачи, пока не кончится лимит или игроки.
pub fn run_table(config: &SimulationConfig, table_id: TableId) -> Result<TableReport, SimError> {
    let (mut table, mut sources) = setup_table(config, table_id)?;
    let mut dealer = DeckDealer::new(RngSeed::from_u64(config.seed).derive(table_id, 0, 0).to_rng());
    let evaluator = StandardEvaluator;

    let mut report = TableReport {
        table_id,
        hands_played: 0,
        showdowns: 0,
        total_pot: 0,
        biggest_pot: Chips::ZERO,
        rejected_actions: 0,
        final_stacks: Vec::new(),
        last_history: None,
    };

    for hand_no in 0..config.hands_per_table {
        if table.players_with_chips() < 2 {
            break;
        }
        let hand_id = (table_id << 32) | hand_no as u64;
        let played = play_hand(&mut table, &mut dealer, &evaluator, &mut sources, hand_id)?;

        report.hands_played += 1;
        report.showdowns += played.summary.went_to_showdown as u32;
        report.total_pot += played.summary.total_pot.0;
        report.biggest_pot = report.biggest_pot.max(played.summary.total_pot);
        report.rejected_actions += played.rejected_actions;
        report.last_history = Some(played.history);
    }

    report.final_stacks = table
        .seats
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| slot.as_ref().map(|p| (idx as SeatIndex, p.stack)))
        .collect();

    Ok(report)
}
