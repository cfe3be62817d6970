//! Раунды ставок: очередь хода, завершение раунда, рейзы и неполные олл-ины.
//!
//! Все сценарии на блайндах 5/10 и колоде без перемешивания.

use holdem_engine::domain::{
    chips::Chips,
    hand::Street,
    player::{PlayerAtTable, PlayerStatus},
    table::{SeatIndex, Table, TableConfig, TableStakes},
};
use holdem_engine::engine::{
    actions::{ActionType, PlayerAction, PlayerActionKind},
    dealer::DeckDealer,
    errors::{EngineError, IllegalReason},
    game_loop::{start_hand, HandEngine, HandStatus},
    hand_history::{BlindKind, HandEventKind},
    RandomSource,
};

/// shuffle ничего не делает => колода остаётся в стандартном порядке.
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn below(&mut self, _upper: u64) -> u64 {
        0
    }
}

/// Стол на stacks.len() мест, игрок i сидит на месте i, player_id = i + 1.
fn make_table(stacks: &[u64]) -> Table {
    let config = TableConfig {
        max_seats: stacks.len() as u8,
        stakes: TableStakes::new(Chips(5), Chips(10)),
    };
    let mut table = Table::new(1, "Test".to_string(), config).unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        table
            .seat_player(i as SeatIndex, PlayerAtTable::new(i as u64 + 1, Chips(stack)))
            .unwrap();
    }
    table
}

fn start(table: &mut Table) -> (HandEngine, DeckDealer<DummyRng>) {
    let mut dealer = DeckDealer::new(DummyRng);
    let engine = start_hand(table, &mut dealer, 1).unwrap();
    (engine, dealer)
}

fn act(
    engine: &mut HandEngine,
    table: &mut Table,
    seat: SeatIndex,
    kind: PlayerActionKind,
) -> Result<HandStatus, EngineError> {
    let player_id = table.player(seat).unwrap().player_id;
    engine.execute_action(table, PlayerAction::new(player_id, seat, kind))
}

/// Довести 3-местный стол до флопа: все лимпят, BB чекает.
fn limp_to_flop(engine: &mut HandEngine, table: &mut Table, dealer: &mut DeckDealer<DummyRng>) {
    assert_eq!(act(engine, table, 0, PlayerActionKind::Call).unwrap(), HandStatus::Ongoing);
    assert_eq!(act(engine, table, 1, PlayerActionKind::Call).unwrap(), HandStatus::Ongoing);
    assert_eq!(
        act(engine, table, 2, PlayerActionKind::Check).unwrap(),
        HandStatus::RoundComplete
    );
    assert_eq!(engine.advance_phase(table, dealer).unwrap(), Street::Flop);
}

//
// ====================== ПОЗИЦИИ И ОЧЕРЕДЬ ======================
//

#[test]
fn three_handed_blinds_and_first_actor() {
    let mut table = make_table(&[1000, 1000, 1000]);
    let (engine, _dealer) = start(&mut table);

    assert_eq!(engine.button, 0);
    assert_eq!(table.player(1).unwrap().current_bet, Chips(5), "SB слева от кнопки");
    assert_eq!(table.player(2).unwrap().current_bet, Chips(10), "BB следующий");
    assert_eq!(engine.current_actor, Some(0), "первым ходит игрок после BB");
    assert_eq!(engine.betting.current_bet, Chips(10));
    assert_eq!(engine.betting.min_raise, Chips(10));
    assert_eq!(engine.pot_total(), Chips(15));
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first_preflop() {
    let mut table = make_table(&[1000, 1000]);
    let (mut engine, mut dealer) = start(&mut table);

    assert_eq!(engine.button, 0);
    assert_eq!(table.player(0).unwrap().current_bet, Chips(5), "кнопка ставит SB");
    assert_eq!(table.player(1).unwrap().current_bet, Chips(10));
    assert_eq!(engine.next_to_act(&table), Some(0), "кнопка ходит первой на префлопе");

    act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Check).unwrap();
    assert_eq!(status, HandStatus::RoundComplete);

    engine.advance_phase(&mut table, &mut dealer).unwrap();
    assert_eq!(engine.next_to_act(&table), Some(1), "на флопе первым ходит BB");
}

#[test]
fn button_moves_to_next_player_with_chips() {
    let mut table = make_table(&[1000, 1000, 1000]);
    let mut dealer = DeckDealer::new(DummyRng);

    let mut engine = start_hand(&mut table, &mut dealer, 1).unwrap();
    assert_eq!(engine.button, 0);
    // Все фолдят до BB.
    act(&mut engine, &mut table, 0, PlayerActionKind::Fold).unwrap();
    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Fold).unwrap();
    assert!(matches!(status, HandStatus::Finished(_)));

    // Следующая раздача: место 1 без фишек пропускается кнопкой.
    table.player_mut(1).unwrap().stack = Chips::ZERO;
    let total_before = table.total_stacks();
    let engine = start_hand(&mut table, &mut dealer, 2).unwrap();
    assert_eq!(engine.button, 2, "место 1 без фишек – кнопка идёт на 2");
    assert_eq!(table.player(1).unwrap().status, PlayerStatus::Busted);
    assert_eq!(table.total_stacks() + engine.pot_total(), total_before);
}

#[test]
fn next_to_act_is_deterministic() {
    let mut table = make_table(&[1000, 1000, 1000, 1000]);
    let (mut engine, _dealer) = start(&mut table);

    act(&mut engine, &mut table, 3, PlayerActionKind::Call).unwrap();
    let first = engine.next_to_act(&table);
    let second = engine.next_to_act(&table);
    assert_eq!(first, second);
    assert_eq!(first, Some(0), "после UTG ходит кнопка");
}

//
// ====================== ЗАВЕРШЕНИЕ РАУНДА ======================
//

#[test]
fn big_blind_keeps_option_after_limps() {
    let mut table = make_table(&[1000, 1000, 1000]);
    let (mut engine, _dealer) = start(&mut table);

    act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Call).unwrap();

    assert_eq!(status, HandStatus::Ongoing, "BB ещё не высказался");
    assert_eq!(engine.current_actor, Some(2));
    assert_eq!(
        engine.valid_actions(&table, 2),
        vec![ActionType::Check, ActionType::Raise, ActionType::AllIn]
    );
}

#[test]
fn bet_raise_call_completes_round_exactly_on_call() {
    let mut table = make_table(&[1000, 1000]);
    let (mut engine, mut dealer) = start(&mut table);

    act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    act(&mut engine, &mut table, 1, PlayerActionKind::Check).unwrap();
    engine.advance_phase(&mut table, &mut dealer).unwrap();
    assert_eq!(table.board.len(), 3);

    // A (место 1) ставит 10, B (место 0) рейзит до 30, A доплачивает 20.
    assert_eq!(
        act(&mut engine, &mut table, 1, PlayerActionKind::Bet(Chips(10))).unwrap(),
        HandStatus::Ongoing
    );
    assert_eq!(
        act(&mut engine, &mut table, 0, PlayerActionKind::Raise(Chips(30))).unwrap(),
        HandStatus::Ongoing
    );
    assert!(!engine.round_complete(&table), "после рейза A должен ответить");
    assert_eq!(engine.call_amount(&table, 1), Chips(20));

    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Call).unwrap();
    assert_eq!(status, HandStatus::RoundComplete, "раунд закрывается на колле A");
    assert!(engine.round_complete(&table));
    assert_eq!(engine.next_to_act(&table), None);
    assert_eq!(engine.pot_total(), Chips(80));
    assert_eq!(engine.betting.last_aggressor, Some(0));
}

#[test]
fn reraise_requires_everyone_to_act_again() {
    let mut table = make_table(&[1000, 1000, 1000]);
    let (mut engine, _dealer) = start(&mut table);

    act(&mut engine, &mut table, 0, PlayerActionKind::Raise(Chips(30))).unwrap();
    act(&mut engine, &mut table, 1, PlayerActionKind::Raise(Chips(90))).unwrap();
    assert_eq!(engine.betting.min_raise, Chips(60));
    assert_eq!(engine.betting.last_aggressor, Some(1));

    act(&mut engine, &mut table, 2, PlayerActionKind::Fold).unwrap();
    assert_eq!(engine.current_actor, Some(0), "первый рейзер должен ответить на ре-рейз");

    let status = act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    assert_eq!(status, HandStatus::RoundComplete);
    assert_eq!(engine.pot_total(), Chips(190));
}

#[test]
fn round_without_bets_completes_after_everyone_checks() {
    let mut table = make_table(&[1000, 1000, 1000]);
    let (mut engine, mut dealer) = start(&mut table);
    limp_to_flop(&mut engine, &mut table, &mut dealer);

    assert_eq!(engine.betting.first_actor, Some(1));
    act(&mut engine, &mut table, 1, PlayerActionKind::Check).unwrap();
    act(&mut engine, &mut table, 2, PlayerActionKind::Check).unwrap();
    let status = act(&mut engine, &mut table, 0, PlayerActionKind::Check).unwrap();
    assert_eq!(status, HandStatus::RoundComplete);
}

//
// ====================== ОЛЛ-ИНЫ И ПЕРЕОТКРЫТИЕ ======================
//
// Флоп, 3 игрока: A = место 1 (ходит первым), B = место 2, C = место 0 (кнопка).
// A ставит 10 (min raise 10), B идёт олл-ин.

#[test]
fn all_in_full_raise_reopens_action() {
    // B: 35 - 10 на префлопе = 25 на флопе -> олл-ин до 25 (+15 >= 10).
    let mut table = make_table(&[1000, 1000, 35]);
    let (mut engine, mut dealer) = start(&mut table);
    limp_to_flop(&mut engine, &mut table, &mut dealer);

    act(&mut engine, &mut table, 1, PlayerActionKind::Bet(Chips(10))).unwrap();
    act(&mut engine, &mut table, 2, PlayerActionKind::AllIn).unwrap();

    assert_eq!(engine.betting.current_bet, Chips(25));
    assert_eq!(engine.betting.min_raise, Chips(15));
    assert_eq!(engine.betting.last_aggressor, Some(2));
    assert_eq!(table.player(2).unwrap().status, PlayerStatus::AllIn);

    act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    assert_eq!(engine.current_actor, Some(1), "A должен ответить");
    assert!(
        engine.valid_actions(&table, 1).contains(&ActionType::Raise),
        "полный рейз переоткрывает торговлю для A"
    );

    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Raise(Chips(60))).unwrap();
    assert_eq!(status, HandStatus::Ongoing);
    assert_eq!(engine.current_actor, Some(0));
}

#[test]
fn undersized_all_in_does_not_reopen_for_players_who_acted() {
    // B: 25 - 10 = 15 на флопе -> олл-ин до 15 (+5 < 10).
    let mut table = make_table(&[1000, 1000, 25]);
    let (mut engine, mut dealer) = start(&mut table);
    limp_to_flop(&mut engine, &mut table, &mut dealer);

    act(&mut engine, &mut table, 1, PlayerActionKind::Bet(Chips(10))).unwrap();
    act(&mut engine, &mut table, 2, PlayerActionKind::AllIn).unwrap();

    assert_eq!(engine.betting.current_bet, Chips(15), "цена колла выросла");
    assert_eq!(engine.betting.min_raise, Chips(10), "min raise не меняется");
    assert_eq!(engine.betting.last_aggressor, Some(1), "агрессор остаётся A");

    // C ещё не ходил – может и рейзить.
    assert_eq!(engine.current_actor, Some(0));
    assert!(engine.valid_actions(&table, 0).contains(&ActionType::Raise));
    act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();

    // A уже ходил: только доплатить 5 или сфолдить.
    assert_eq!(engine.current_actor, Some(1));
    assert_eq!(engine.call_amount(&table, 1), Chips(5));
    assert_eq!(
        engine.valid_actions(&table, 1),
        vec![ActionType::Fold, ActionType::Call]
    );
    let err = act(&mut engine, &mut table, 1, PlayerActionKind::Raise(Chips(40))).unwrap_err();
    assert_eq!(
        err,
        EngineError::IllegalAction {
            action: ActionType::Raise,
            reason: IllegalReason::ActionNotReopened,
        }
    );

    let status = act(&mut engine, &mut table, 1, PlayerActionKind::Call).unwrap();
    assert_eq!(status, HandStatus::RoundComplete);
}

#[test]
fn all_in_below_call_does_not_make_matched_players_act_again() {
    // B: 15 - 10 = 5 на флопе -> олл-ин на 5 меньше ставки 10.
    let mut table = make_table(&[1000, 1000, 15]);
    let (mut engine, mut dealer) = start(&mut table);
    limp_to_flop(&mut engine, &mut table, &mut dealer);

    act(&mut engine, &mut table, 1, PlayerActionKind::Bet(Chips(10))).unwrap();
    act(&mut engine, &mut table, 2, PlayerActionKind::AllIn).unwrap();
    assert_eq!(engine.betting.current_bet, Chips(10), "колл на меньшую сумму не меняет ставку");

    let status = act(&mut engine, &mut table, 0, PlayerActionKind::Call).unwrap();
    assert_eq!(status, HandStatus::RoundComplete, "A уже уравнял 10 и не ходит снова");
    assert_eq!(engine.next_to_act(&table), None);
}

#[test]
fn short_big_blind_posts_what_is_available() {
    let mut table = make_table(&[1000, 1000, 4]);
    let (engine, _dealer) = start(&mut table);

    let bb_event = engine.history.events.iter().find_map(|e| match &e.kind {
        HandEventKind::BlindPosted {
            seat,
            kind: BlindKind::Big,
            amount,
            all_in,
        } => Some((*seat, *amount, *all_in)),
        _ => None,
    });
    assert_eq!(bb_event, Some((2, Chips(4), true)));
    assert_eq!(table.player(2).unwrap().status, PlayerStatus::AllIn);
    assert_eq!(engine.betting.current_bet, Chips(10), "ставка префлопа – полный BB");
    assert_eq!(engine.call_amount(&table, 0), Chips(10));
}

#[test]
fn valid_actions_follow_stack_and_call_size() {
    let mut table = make_table(&[8, 1000, 1000]);
    let (engine, _dealer) = start(&mut table);

    // Кнопке нужно 10, а в стеке 8: только fold или all-in.
    assert_eq!(
        engine.valid_actions(&table, 0),
        vec![ActionType::Fold, ActionType::AllIn]
    );
    // SB ходит позже, но ему тоже нужно ходить: доплатить 5 или что угодно ещё.
    assert_eq!(
        engine.valid_actions(&table, 1),
        vec![
            ActionType::Fold,
            ActionType::Call,
            ActionType::Raise,
            ActionType::AllIn
        ]
    );
}
