//! Банк раздачи: вклады, сайд-поты, выплата с нечётными фишками, ошибки выплаты.

use std::collections::BTreeMap;

use holdem_engine::domain::{chips::Chips, hand::PotAward, table::SeatIndex};
use holdem_engine::engine::{
    compute_side_pots, errors::EngineError, positions::order_left_of, Contribution, PotLedger,
    SidePot,
};

fn ledger_with(contributions: &[(SeatIndex, u64, bool)]) -> PotLedger {
    let mut ledger = PotLedger::new();
    for &(seat, amount, folded) in contributions {
        ledger.add_contribution(seat, Chips(amount));
        if folded {
            ledger.mark_folded(seat);
        }
    }
    ledger
}

fn pot(amount: u64, cap: u64, eligible: &[SeatIndex]) -> SidePot {
    SidePot {
        amount: Chips(amount),
        cap: Chips(cap),
        eligible_seats: eligible.to_vec(),
    }
}

//
// ====================== СЧЁТ ВКЛАДОВ ======================
//

#[test]
fn contributions_accumulate_and_pot_total_matches() {
    let mut ledger = PotLedger::new();
    ledger.enroll(0);
    ledger.add_contribution(1, Chips(5));
    ledger.add_contribution(2, Chips(10));
    ledger.add_contribution(1, Chips(5));

    assert_eq!(ledger.contribution(0), Chips::ZERO, "enroll не добавляет фишек");
    assert_eq!(ledger.contribution(1), Chips(10));
    assert_eq!(ledger.contribution(3), Chips::ZERO, "неизвестное место – ноль");
    assert_eq!(ledger.total_contributed(), Chips(20));
    assert_eq!(ledger.pot_total(), Chips(20));
    assert_eq!(ledger.contributions().len(), 3);
}

#[test]
fn reset_clears_everything() {
    let mut ledger = ledger_with(&[(0, 50, false), (1, 50, false)]);
    ledger.award_to(&[vec![0]], &[0, 1]).unwrap();
    assert!(ledger.is_settled());

    ledger.reset();
    assert!(!ledger.is_settled());
    assert_eq!(ledger.total_contributed(), Chips::ZERO);
    assert_eq!(ledger.pot_total(), Chips::ZERO);
    assert!(ledger.resolve_side_pots().is_empty());
}

//
// ====================== САЙД-ПОТЫ ======================
//

#[test]
fn short_all_in_creates_main_and_side_pot() {
    // A: 100, B: 50 (олл-ин), C: 100.
    let ledger = ledger_with(&[(0, 100, false), (1, 50, false), (2, 100, false)]);
    let pots = ledger.resolve_side_pots();

    assert_eq!(
        pots,
        vec![pot(150, 50, &[0, 1, 2]), pot(100, 100, &[0, 2])],
        "main pot 150 на троих, side pot 100 на A и C"
    );
}

#[test]
fn resolve_side_pots_is_idempotent() {
    let ledger = ledger_with(&[(0, 30, false), (1, 70, true), (2, 200, false), (3, 120, false)]);
    let first = ledger.resolve_side_pots();
    let second = ledger.resolve_side_pots();
    assert_eq!(first, second);

    let total: Chips = first.iter().map(|p| p.amount).sum();
    assert_eq!(total, ledger.total_contributed(), "сумма потов = сумма вкладов");
}

#[test]
fn folded_chips_fill_bands_but_cannot_win() {
    // Место 0 внесло 100 и сфолдило, 1 – олл-ин на 50, 2 – 60.
    let ledger = ledger_with(&[(0, 100, true), (1, 50, false), (2, 60, false)]);
    let pots = ledger.resolve_side_pots();

    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0], pot(150, 50, &[1, 2]));
    // 10 + 10 в полосе (50, 60] плюс 40 сфолдившего сверху.
    assert_eq!(pots[1], pot(60, 60, &[2]));
    assert!(
        pots.iter().all(|p| !p.eligible_seats.contains(&0)),
        "сфолдивший не претендует ни на один пот"
    );
}

#[test]
fn everyone_folded_gives_single_pot_to_remaining_seats() {
    let mut contributions = BTreeMap::new();
    contributions.insert(0, Contribution { amount: Chips(10), folded: true });
    contributions.insert(1, Contribution { amount: Chips::ZERO, folded: false });

    let pots = compute_side_pots(&contributions);
    assert_eq!(pots, vec![pot(10, 0, &[1])]);
}

#[test]
fn empty_ledger_has_no_pots() {
    let contributions: BTreeMap<SeatIndex, Contribution> = BTreeMap::new();
    assert!(compute_side_pots(&contributions).is_empty());
}

#[test]
fn equal_contributions_make_one_pot() {
    let ledger = ledger_with(&[(0, 40, false), (1, 40, false), (2, 40, false)]);
    assert_eq!(ledger.resolve_side_pots(), vec![pot(120, 40, &[0, 1, 2])]);
}

//
// ====================== ВЫПЛАТА ======================
//

#[test]
fn odd_chips_go_left_of_button_first() {
    // Пот 10 на троих: 3 + 3 + 3 + 1 от сфолдившего места 3.
    let mut ledger = ledger_with(&[(0, 3, false), (1, 3, false), (2, 3, false), (3, 1, true)]);
    assert_eq!(ledger.resolve_side_pots(), vec![pot(10, 3, &[0, 1, 2])]);

    // Кнопка на месте 0: порядок 1, 2, 3, 0.
    let order = order_left_of(4, 0);
    assert_eq!(order, vec![1, 2, 3, 0]);

    let awards = ledger.award_to(&[vec![0, 1, 2]], &order).unwrap();
    assert_eq!(
        awards,
        vec![
            PotAward { pot_index: 0, seat: 1, amount: Chips(4) },
            PotAward { pot_index: 0, seat: 2, amount: Chips(3) },
            PotAward { pot_index: 0, seat: 0, amount: Chips(3) },
        ]
    );
    assert_eq!(ledger.pot_total(), Chips::ZERO);
    assert!(ledger.is_settled());
}

#[test]
fn award_pays_each_pot_to_its_winners() {
    let mut ledger = ledger_with(&[(0, 100, false), (1, 50, false), (2, 100, false)]);
    let awards = ledger.award_to(&[vec![1], vec![2]], &[1, 2, 0]).unwrap();

    assert_eq!(
        awards,
        vec![
            PotAward { pot_index: 0, seat: 1, amount: Chips(150) },
            PotAward { pot_index: 1, seat: 2, amount: Chips(100) },
        ]
    );
    let paid: Chips = awards.iter().map(|a| a.amount).sum();
    assert_eq!(paid, Chips(250), "выплачено ровно столько, сколько внесено");
}

#[test]
fn duplicate_winners_are_paid_once() {
    let mut ledger = ledger_with(&[(0, 20, false), (1, 20, false)]);
    let awards = ledger.award_to(&[vec![1, 1, 0]], &[1, 0]).unwrap();
    assert_eq!(awards.len(), 2);
    assert!(awards.iter().all(|a| a.amount == Chips(20)));
}

//
// ====================== ОШИБКИ ВЫПЛАТЫ ======================
//

#[test]
fn ineligible_winner_is_rejected_without_changes() {
    let mut ledger = ledger_with(&[(0, 100, false), (1, 50, false), (2, 100, false)]);
    let before = ledger.clone();

    // Место 1 (олл-ин на 50) не претендует на side pot.
    let err = ledger.award_to(&[vec![0], vec![1]], &[1, 2, 0]).unwrap_err();
    assert_eq!(err, EngineError::InvalidWinner { pot_index: 1, seat: 1 });
    assert_eq!(ledger, before, "при ошибке леджер не меняется");
}

#[test]
fn winner_for_missing_pot_is_rejected() {
    let mut ledger = ledger_with(&[(0, 10, false), (1, 10, false)]);
    let err = ledger.award_to(&[vec![0], vec![1]], &[1, 0]).unwrap_err();
    assert_eq!(err, EngineError::InvalidWinner { pot_index: 1, seat: 1 });
    assert!(!ledger.is_settled());
}

#[test]
fn pot_without_winner_is_rejected() {
    let mut ledger = ledger_with(&[(0, 100, false), (1, 50, false), (2, 100, false)]);

    let err = ledger.award_to(&[vec![1]], &[1, 2, 0]).unwrap_err();
    assert_eq!(err, EngineError::PotWithoutWinner(1));

    let err = ledger.award_to(&[vec![1], vec![]], &[1, 2, 0]).unwrap_err();
    assert_eq!(err, EngineError::PotWithoutWinner(1));
    assert_eq!(ledger.pot_total(), Chips(250));
}

#[test]
fn second_award_is_rejected() {
    let mut ledger = ledger_with(&[(0, 10, false), (1, 10, false)]);
    ledger.award_to(&[vec![0]], &[1, 0]).unwrap();

    let err = ledger.award_to(&[vec![0]], &[1, 0]).unwrap_err();
    assert_eq!(err, EngineError::PotAlreadyAwarded);
}
