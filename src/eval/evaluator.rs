use crate::domain::card::Card;
use crate::domain::hand::HandRank;
use crate::engine::HandEvaluator;

use super::hand_rank::HandCategory;

/// Маска рангов: бит `v` выставлен, если есть карта ранга `v` (2..=14).
/// Бит 1 – туз как младшая карта (для стрита A-2-3-4-5).
type RankMask = u16;

/// Стандартный оценщик холдема: лучшая 5-карточная рука из 5–7 карт.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn rank(&self, cards: &[Card]) -> HandRank {
        evaluate_cards(cards)
    }
}

/// Вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut all = Vec::with_capacity(hole.len() + board.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    evaluate_cards(&all)
}

/// Оценка набора карт (обычно 5–7) без перебора комбинаций:
/// считаем ранги и масти и проверяем категории от старшей к младшей.
///
/// Если карт меньше пяти, недостающие кикеры считаются нулевыми.
pub fn evaluate_cards(cards: &[Card]) -> HandRank {
    let mut rank_counts = [0u8; 15];
    let mut suit_masks = [0 as RankMask; 4];
    let mut rank_mask: RankMask = 0;

    for card in cards {
        let v = card.rank.value();
        rank_counts[v as usize] += 1;
        suit_masks[card.suit.index()] |= 1 << v;
        rank_mask |= 1 << v;
    }

    // Стрит-флеш.
    let straight_flush = suit_masks
        .iter()
        .filter(|m| m.count_ones() >= 5)
        .filter_map(|&m| straight_high(m))
        .max();
    if let Some(high) = straight_flush {
        return HandRank::encode(HandCategory::StraightFlush, [high, 0, 0, 0, 0]);
    }

    // Ранги по убыванию, сгруппированные по количеству.
    let by_count = |n: u8| -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|&v| rank_counts[v as usize] == n)
            .collect()
    };
    let quads = by_count(4);
    let trips = by_count(3);
    let pairs = by_count(2);

    if let Some(&q) = quads.first() {
        let kicker = top_ranks(rank_mask & !(1 << q), 1);
        return HandRank::encode(HandCategory::FourOfAKind, [q, kicker[0], 0, 0, 0]);
    }

    if let Some(&t) = trips.first() {
        // Вторая тройка тоже годится как пара.
        let pair = trips
            .get(1)
            .copied()
            .into_iter()
            .chain(pairs.first().copied())
            .max();
        if let Some(p) = pair {
            return HandRank::encode(HandCategory::FullHouse, [t, p, 0, 0, 0]);
        }
    }

    if let Some(&m) = suit_masks.iter().find(|m| m.count_ones() >= 5) {
        let top = top_ranks(m, 5);
        return HandRank::encode(HandCategory::Flush, top);
    }

    if let Some(high) = straight_high(rank_mask) {
        return HandRank::encode(HandCategory::Straight, [high, 0, 0, 0, 0]);
    }

    if let Some(&t) = trips.first() {
        let k = top_ranks(rank_mask & !(1 << t), 2);
        return HandRank::encode(HandCategory::ThreeOfAKind, [t, k[0], k[1], 0, 0]);
    }

    if pairs.len() >= 2 {
        let (hi, lo) = (pairs[0], pairs[1]);
        let k = top_ranks(rank_mask & !(1 << hi) & !(1 << lo), 1);
        return HandRank::encode(HandCategory::TwoPair, [hi, lo, k[0], 0, 0]);
    }

    if let Some(&p) = pairs.first() {
        let k = top_ranks(rank_mask & !(1 << p), 3);
        return HandRank::encode(HandCategory::OnePair, [p, k[0], k[1], k[2], 0]);
    }

    HandRank::encode(HandCategory::HighCard, top_ranks(rank_mask, 5))
}

/// Старшая карта лучшего стрита в маске (5 для "колеса" A-2-3-4-5).
fn straight_high(mask: RankMask) -> Option<u8> {
    let mask = if mask & (1 << 14) != 0 { mask | 1 << 1 } else { mask };
    (5..=14u8).rev().find(|&high| {
        let window: RankMask = 0b1_1111 << (high - 4);
        mask & window == window
    })
}

/// До `n` старших рангов из маски по убыванию, остальное – нули.
fn top_ranks(mask: RankMask, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    let ranks = (2..=14u8).rev().filter(|&v| mask & (1 << v) != 0).take(n.min(5));
    for (slot, v) in out.iter_mut().zip(ranks) {
        *slot = v;
    }
    out
}
