use crate::domain::chips::Chips;
use crate::engine::actions::{ActionType, PlayerActionKind};
use crate::engine::RandomSource;
use crate::players::{ActionSource, TableView};

/// 1 из N: как часто бот идёт all-in, когда есть другие варианты.
const SHOVE_ODDS: u64 = 8;
/// Остались только fold и all-in.
const SHOVE_ODDS_SHORT: u64 = 2;

/// Бот со случайными допустимыми действиями.
///
/// - all-in изредка (1 из 8), против ставки больше стека – через раз;
/// - размер bet/raise – случайный, от минимума до половины стека.
#[derive(Clone, Debug)]
pub struct RandomPolicy<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Случайное число в [lo, hi] (lo, если hi < lo).
    fn between(&mut self, lo: Chips, hi: Chips) -> Chips {
        if hi <= lo {
            return lo;
        }
        Chips(lo.0 + self.rng.below(hi.0 - lo.0 + 1))
    }
}

impl<R: RandomSource> ActionSource for RandomPolicy<R> {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind {
        let mut choices: Vec<ActionType> = view.valid_actions.clone();
        choices.retain(|a| *a != ActionType::AllIn);

        if view.can(ActionType::AllIn) {
            let odds = if choices == [ActionType::Fold] {
                SHOVE_ODDS_SHORT
            } else {
                SHOVE_ODDS
            };
            if choices.is_empty() || self.rng.below(odds) == 0 {
                return PlayerActionKind::AllIn;
            }
        }
        if choices.is_empty() {
            return view.passive_fallback();
        }

        let pick = choices[self.rng.below(choices.len() as u64) as usize];
        let half_stack = Chips(view.stack.0 / 2);

        match pick {
            ActionType::Fold => PlayerActionKind::Fold,
            ActionType::Check => PlayerActionKind::Check,
            ActionType::Call => PlayerActionKind::Call,
            ActionType::AllIn => PlayerActionKind::AllIn,
            ActionType::Bet => {
                let amount = self.between(view.min_raise, half_stack.min(view.stack));
                PlayerActionKind::Bet(amount)
            }
            ActionType::Raise => {
                let max_to = view.max_bet_to().min(view.highest_bet + half_stack);
                let to = self.between(view.min_raise_to, max_to);
                PlayerActionKind::Raise(to)
            }
        }
    }
}

/// Пассивный бот: check, если можно, иначе call, иначе all-in/fold.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveSource;

impl ActionSource for PassiveSource {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind {
        if view.can(ActionType::Check) {
            PlayerActionKind::Check
        } else if view.can(ActionType::Call) {
            PlayerActionKind::Call
        } else if view.can(ActionType::AllIn) {
            PlayerActionKind::AllIn
        } else {
            PlayerActionKind::Fold
        }
    }
}
