//! Детерминированный RNG и вывод seed'ов.

use std::collections::HashSet;

use holdem_engine::domain::deck::Deck;
use holdem_engine::engine::RandomSource;
use holdem_engine::infra::{DeterministicRng, RngSeed};

fn shuffled(rng: &mut DeterministicRng) -> Deck {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    deck
}

#[test]
fn same_seed_gives_same_shuffle() {
    let mut a = DeterministicRng::from_u64(12345);
    let mut b = DeterministicRng::from_u64(12345);
    assert_eq!(shuffled(&mut a), shuffled(&mut b));
    assert_eq!(a.below(1000), b.below(1000));
}

#[test]
fn different_seeds_give_different_shuffles() {
    let mut a = DeterministicRng::from_u64(1);
    let mut b = DeterministicRng::from_u64(2);
    assert_ne!(shuffled(&mut a), shuffled(&mut b));
}

#[test]
fn shuffle_keeps_all_cards() {
    let mut rng = DeterministicRng::from_u64(99);
    let deck = shuffled(&mut rng);
    assert_eq!(deck.len(), 52);
    let unique: HashSet<_> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);
    assert_ne!(deck, Deck::standard_52(), "колода действительно перемешана");
}

#[test]
fn below_stays_in_range() {
    let mut rng = DeterministicRng::from_u64(5);
    assert_eq!(rng.below(0), 0);
    assert_eq!(rng.below(1), 0);
    for _ in 0..1000 {
        assert!(rng.below(7) < 7);
    }
}

#[test]
fn derived_seeds_are_stable_and_independent() {
    let base = RngSeed::from_u64(42);
    assert_eq!(base.derive(1, 0, 0), base.derive(1, 0, 0));

    let children = [
        base.derive(1, 0, 0),
        base.derive(2, 0, 0),
        base.derive(1, 1, 0),
        base.derive(1, 0, 1),
        RngSeed::from_u64(43).derive(1, 0, 0),
    ];
    let unique: HashSet<_> = children.iter().copied().collect();
    assert_eq!(unique.len(), children.len(), "каждый поток получает свой seed");

    let mut a = base.derive(3, 0, 0).to_rng();
    let mut b = base.derive(3, 0, 0).to_rng();
    assert_eq!(shuffled(&mut a), shuffled(&mut b));
}

#[test]
fn from_u64_fills_low_bytes() {
    let seed = RngSeed::from_u64(0x0102);
    assert_eq!(seed.bytes[0], 0x02);
    assert_eq!(seed.bytes[1], 0x01);
    assert!(seed.bytes[8..].iter().all(|&b| b == 0));
    assert_eq!(RngSeed::from_bytes(seed.bytes), seed);
}
