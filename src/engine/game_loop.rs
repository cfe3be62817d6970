use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::PlayerAtTable;
use crate::domain::table::{Table, TableError};
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::{ActionType, PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::dealer::Dealer;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{BlindKind, HandEventKind, HandHistory};
use crate::engine::positions::{blind_positions, order_left_of, seats_after_where};
use crate::engine::pot::PotLedger;
use crate::engine::side_pots::SidePot;
use crate::engine::validation::{self, RaiseKind};
use crate::engine::HandEvaluator;

const DECK_SIZE: usize = 52;
/// Борд (5) и сжигаемые карты (3).
const DECK_RESERVE: usize = 8;

/// Статус раздачи после действия.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Торговля на улице продолжается.
    Ongoing,
    /// Раунд ставок на улице завершён – можно звать `advance_phase`.
    RoundComplete,
    /// Раздача завершена, банк выплачен.
    Finished(HandSummary),
}

/// Состояние одной раздачи.
///
/// Стол (`Table`) движку не принадлежит: методы получают его по ссылке,
/// а движок хранит только то, что живёт ровно одну раздачу.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub button: SeatIndex,
    pub street: Street,
    pub betting: BettingState,
    pub ledger: PotLedger,
    /// Поты, посчитанные при переходе на шоудаун (или при выплате).
    pub pots: Vec<SidePot>,
    /// Чей сейчас ход (seat).
    pub current_actor: Option<SeatIndex>,
    /// Порядок раздачи нечётных фишек: места слева от кнопки.
    pub odd_chip_order: Vec<SeatIndex>,
    pub finished: bool,
    pub summary: Option<HandSummary>,
    pub history: HandHistory,
}

/// Старт новой раздачи:
/// - двигает кнопку и перемешивает колоду;
/// - ставит блайнды (короткий стек ставит что есть и уходит в олл-ин);
/// - раздаёт карманные карты;
/// - настраивает раунд ставок префлопа и первого ходящего.
pub fn start_hand<D: Dealer>(
    table: &mut Table,
    dealer: &mut D,
    hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }
    let players = table.players_with_chips();
    if players < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }
    table.config.validate()?;
    if players * 2 + DECK_RESERVE > DECK_SIZE {
        return Err(TableError::InvalidConfig("колоды не хватит на всех игроков").into());
    }

    for p in table.seats.iter_mut().flatten() {
        p.reset_for_hand();
    }
    table.board.clear();

    let button = dealer
        .rotate_button(table)
        .ok_or(EngineError::NotEnoughPlayers)?;
    let blinds = blind_positions(table, button).ok_or(EngineError::NotEnoughPlayers)?;
    dealer.shuffle_up();

    table.current_hand_id = Some(hand_id);
    table.hand_in_progress = true;

    let big_blind = table.stakes().big_blind;
    let mut engine = HandEngine {
        table_id: table.id,
        hand_id,
        button,
        street: Street::Preflop,
        betting: BettingState::closed(Street::Preflop, blinds.big_blind),
        ledger: PotLedger::new(),
        pots: Vec::new(),
        current_actor: None,
        odd_chip_order: order_left_of(table.seats.len(), button),
        finished: false,
        summary: None,
        history: HandHistory::new(),
    };

    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id,
        button,
    });

    let dealt = seats_after_where(table, button, PlayerAtTable::is_in_hand);
    for &seat in &dealt {
        engine.ledger.enroll(seat);
    }

    let small_blind = table.stakes().small_blind;
    engine.post_blind(table, blinds.small_blind, BlindKind::Small, small_blind)?;
    engine.post_blind(table, blinds.big_blind, BlindKind::Big, big_blind)?;

    dealer.deal_hole_cards(table, &dealt)?;
    for &seat in &dealt {
        if let Some(p) = table.player(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: p.hole_cards.clone(),
            });
        }
    }

    // Префлоп: ставка = номинальный BB, даже если BB поставлен не полностью.
    let mut to_act = seats_after_where(table, blinds.big_blind, PlayerAtTable::can_act);
    if to_act.len() < 2 {
        to_act.clear();
    }
    let mut betting = BettingState::new(
        Street::Preflop,
        big_blind,
        big_blind,
        blinds.big_blind,
        to_act,
    );
    betting.last_aggressor = Some(blinds.big_blind);
    engine.betting = betting;
    engine.current_actor = engine.next_to_act(table);

    info!(
        table_id = table.id,
        hand_id,
        button,
        players = dealt.len(),
        "раздача началась"
    );

    Ok(engine)
}

impl HandEngine {
    /// Сколько игроков ещё претендуют на банк (не сфолдили).
    pub fn contenders(&self, table: &Table) -> Vec<SeatIndex> {
        self.ledger
            .contributions()
            .keys()
            .copied()
            .filter(|&seat| table.player(seat).map(|p| p.is_in_hand()).unwrap_or(false))
            .collect()
    }

    /// Сколько игроков ещё могут ходить (не в олл-ине).
    fn active_count(&self, table: &Table) -> usize {
        self.ledger
            .contributions()
            .keys()
            .filter(|&&seat| table.player(seat).map(|p| p.can_act()).unwrap_or(false))
            .count()
    }

    /// Должно ли место ещё ходить на этой улице.
    ///
    /// Да, если игрок может ходить и либо не уравнял текущую ставку,
    /// либо ещё не высказался после последнего полного рейза
    /// (и есть кому ему ответить).
    pub fn needs_to_act(&self, table: &Table, seat: SeatIndex) -> bool {
        let Some(p) = table.player(seat) else {
            return false;
        };
        if !p.can_act() {
            return false;
        }
        if p.current_bet < self.betting.current_bet {
            return true;
        }
        self.betting.is_open_for(seat) && self.active_count(table) >= 2
    }

    /// Раунд ставок завершён:
    /// - остался не больше чем один претендент, или
    /// - никому больше не нужно ходить (все уравняли, очередь после
    ///   последнего агрессора пройдена).
    pub fn round_complete(&self, table: &Table) -> bool {
        if self.finished || self.street == Street::Showdown {
            return true;
        }
        if self.contenders(table).len() <= 1 {
            return true;
        }
        !self
            .ledger
            .contributions()
            .keys()
            .any(|&seat| self.needs_to_act(table, seat))
    }

    /// Следующий ходящий: первый по кругу после `cursor`, кому нужно ходить.
    /// `None`, если раунд завершён.
    pub fn next_to_act(&self, table: &Table) -> Option<SeatIndex> {
        if self.round_complete(table) {
            return None;
        }
        let max = table.seats.len();
        (1..=max)
            .map(|offset| ((self.betting.cursor as usize + offset) % max) as SeatIndex)
            .find(|&seat| self.needs_to_act(table, seat))
    }

    /// Сколько нужно доплатить месту до колла (без учёта стека).
    pub fn call_amount(&self, table: &Table, seat: SeatIndex) -> Chips {
        table
            .player(seat)
            .map(|p| validation::call_amount(p, &self.betting))
            .unwrap_or(Chips::ZERO)
    }

    /// Допустимые действия для места. Пусто, если место сейчас не должно ходить.
    pub fn valid_actions(&self, table: &Table, seat: SeatIndex) -> Vec<ActionType> {
        if self.finished || !self.needs_to_act(table, seat) {
            return Vec::new();
        }
        match table.player(seat) {
            Some(p) => validation::valid_actions(p, seat, &self.betting),
            None => Vec::new(),
        }
    }

    /// Фишки в банке прямо сейчас.
    pub fn pot_total(&self) -> Chips {
        self.ledger.pot_total()
    }

    /// Применить действие игрока.
    ///
    /// Сначала все проверки, потом изменения: при `Err` стол, движок
    /// и банк остаются нетронутыми.
    pub fn execute_action(
        &mut self,
        table: &mut Table,
        action: PlayerAction,
    ) -> Result<HandStatus, EngineError> {
        if self.finished || !table.hand_in_progress {
            return Err(EngineError::NoActiveHand);
        }

        let seat = action.seat;
        let player = table.player(seat).ok_or(EngineError::InvalidActor(seat))?;
        if player.player_id != action.player_id
            || self.current_actor != Some(seat)
            || !player.can_act()
        {
            return Err(EngineError::InvalidActor(seat));
        }

        let plan = validation::validate_action(player, seat, &action.kind, &self.betting)?;

        // Дальше – только изменения.
        match action.kind {
            PlayerActionKind::Fold => {
                if let Some(p) = table.player_mut(seat) {
                    p.fold();
                }
                self.ledger.mark_folded(seat);
                self.betting.mark_acted(seat);
            }
            PlayerActionKind::Check => {
                self.betting.mark_acted(seat);
            }
            _ => {
                self.commit(table, seat, plan.chips)?;
                match plan.raise {
                    RaiseKind::None => self.betting.mark_acted(seat),
                    RaiseKind::Full { size } => {
                        let to_act = seats_after_where(table, seat, PlayerAtTable::can_act)
                            .into_iter()
                            .filter(|&s| s != seat)
                            .collect();
                        self.betting.on_full_raise(seat, plan.new_bet, size, to_act);
                    }
                    RaiseKind::Incomplete => self.betting.on_incomplete_raise(seat, plan.new_bet),
                }
            }
        }
        self.betting.cursor = seat;

        let (stack_after, bet_after) = table
            .player(seat)
            .map(|p| (p.stack, p.current_bet))
            .unwrap_or_default();
        let reopened = matches!(plan.raise, RaiseKind::Full { .. });
        self.history.push(HandEventKind::ActionApplied {
            player_id: action.player_id,
            seat,
            action: action.kind,
            chips_moved: plan.chips,
            stack_after,
            bet_after,
            pot_after: self.ledger.pot_total(),
            reopened,
        });
        debug!(
            hand_id = self.hand_id,
            seat,
            action = %action.kind,
            chips = plan.chips.0,
            pot = self.ledger.pot_total().0,
            reopened,
            "действие применено"
        );

        // Остался один претендент – раздача заканчивается сразу.
        if self.contenders(table).len() <= 1 {
            let summary = self.finish_without_showdown(table)?;
            return Ok(HandStatus::Finished(summary));
        }

        self.current_actor = self.next_to_act(table);
        Ok(match self.current_actor {
            Some(_) => HandStatus::Ongoing,
            None => HandStatus::RoundComplete,
        })
    }

    /// Переход на следующую улицу.
    ///
    /// Только когда раунд ставок завершён. Ставки улицы обнуляются
    /// (в общий вклад они уже учтены), дилер открывает карты улицы.
    /// River → Showdown считает поты.
    pub fn advance_phase<D: Dealer>(
        &mut self,
        table: &mut Table,
        dealer: &mut D,
    ) -> Result<Street, EngineError> {
        let from = self.street;
        if self.finished || from == Street::Showdown || !self.round_complete(table) {
            return Err(EngineError::IllegalTransition { from });
        }
        let to = from.next().ok_or(EngineError::IllegalTransition { from })?;

        if to != Street::Showdown {
            let cards = dealer.deal_community(table, to)?;
            self.history.push(HandEventKind::BoardDealt { street: to, cards });
        }

        for p in table.seats.iter_mut().flatten() {
            p.current_bet = Chips::ZERO;
        }

        if to == Street::Showdown {
            self.pots = self.ledger.resolve_side_pots();
            self.betting = BettingState::closed(to, self.button);
        } else {
            let mut to_act = seats_after_where(table, self.button, PlayerAtTable::can_act);
            if to_act.len() < 2 {
                to_act.clear();
            }
            self.betting = BettingState::new(
                to,
                Chips::ZERO,
                table.stakes().big_blind,
                self.button,
                to_act,
            );
        }

        self.street = to;
        self.history.push(HandEventKind::PhaseChanged { from, to });
        self.current_actor = self.next_to_act(table);

        info!(
            hand_id = self.hand_id,
            ?from,
            ?to,
            pot = self.ledger.pot_total().0,
            "переход улицы"
        );

        Ok(to)
    }

    /// Поставить блайнд. Короткий стек ставит всё, что есть.
    fn post_blind(
        &mut self,
        table: &mut Table,
        seat: SeatIndex,
        kind: BlindKind,
        amount: Chips,
    ) -> Result<(), EngineError> {
        let paid = self.commit(table, seat, amount)?;
        let all_in = table.player(seat).map(|p| p.stack.is_zero()).unwrap_or(false);
        self.history.push(HandEventKind::BlindPosted {
            seat,
            kind,
            amount: paid,
            all_in,
        });
        debug!(hand_id = self.hand_id, seat, ?kind, amount = paid.0, all_in, "блайнд");
        Ok(())
    }

    /// Переложить фишки из стека в банк: игрок и леджер меняются вместе.
    fn commit(&mut self, table: &mut Table, seat: SeatIndex, amount: Chips) -> Result<Chips, EngineError> {
        let player = table.player_mut(seat).ok_or(EngineError::EmptySeat)?;
        let paid = player.commit(amount);
        self.ledger.add_contribution(seat, paid);
        Ok(paid)
    }
}

/// Применить действие и, если раунд завершён, сразу двигать раздачу дальше
/// (улицы, добор борда при олл-инах, шоудаун).
pub fn apply_action<D, E>(
    table: &mut Table,
    engine: &mut HandEngine,
    dealer: &mut D,
    evaluator: &E,
    action: PlayerAction,
) -> Result<HandStatus, EngineError>
where
    D: Dealer,
    E: HandEvaluator + ?Sized,
{
    match engine.execute_action(table, action)? {
        HandStatus::RoundComplete => advance_if_needed(table, engine, dealer, evaluator),
        status => Ok(status),
    }
}

/// Переход улиц / шоудаун / завершение раздачи.
///
/// Двигает раздачу, пока кому-то не понадобится ходить или пока она не закончится.
pub fn advance_if_needed<D, E>(
    table: &mut Table,
    engine: &mut HandEngine,
    dealer: &mut D,
    evaluator: &E,
) -> Result<HandStatus, EngineError>
where
    D: Dealer,
    E: HandEvaluator + ?Sized,
{
    loop {
        if let Some(summary) = &engine.summary {
            return Ok(HandStatus::Finished(summary.clone()));
        }
        if !engine.round_complete(table) {
            return Ok(HandStatus::Ongoing);
        }
        if engine.street == Street::Showdown {
            let summary = engine.showdown(table, evaluator)?;
            return Ok(HandStatus::Finished(summary));
        }
        engine.advance_phase(table, dealer)?;
    }
}
