//! Движок ставок: очередь хода, проверка и применение действий, банк и сайд-поты,
//! переход улиц и шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `HandEngine::execute_action` – проверить и применить действие игрока
//!   - `HandEngine::advance_phase` / `HandEngine::showdown` – улицы и вскрытие
//!   - `apply_action` / `advance_if_needed` – то же с авто-переходом улиц

pub mod actions;
pub mod betting;
pub mod dealer;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{ActionType, PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use dealer::{Dealer, DeckDealer};
pub use errors::{EngineError, IllegalReason};
pub use game_loop::{advance_if_needed, apply_action, start_hand, HandEngine, HandStatus};
pub use hand_history::{BlindKind, HandEvent, HandEventKind, HandHistory};
pub use pot::PotLedger;
pub use side_pots::{compute_side_pots, Contribution, SidePot};

use crate::domain::card::Card;
use crate::domain::hand::HandRank;

/// RNG интерфейс для движка и ботов. Реализация – в infra.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное число в `0..upper` (0, если `upper == 0`).
    fn below(&mut self, upper: u64) -> u64;
}

/// Оценщик силы руки: чем больше `HandRank`, тем сильнее рука.
///
/// Любая функция `Fn(&[Card]) -> HandRank` тоже оценщик (удобно в тестах).
pub trait HandEvaluator {
    fn rank(&self, cards: &[Card]) -> HandRank;
}

impl<F> HandEvaluator for F
where
    F: Fn(&[Card]) -> HandRank,
{
    fn rank(&self, cards: &[Card]) -> HandRank {
        self(cards)
    }
}
