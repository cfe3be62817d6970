//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные точки входа:
//!   `StandardEvaluator` – реализация `HandEvaluator` для движка;
//!   `evaluate_best_hand(hole, board) -> HandRank`.

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::{evaluate_best_hand, evaluate_cards, StandardEvaluator};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
