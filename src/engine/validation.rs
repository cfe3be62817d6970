use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::domain::SeatIndex;
use crate::engine::actions::{ActionType, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::{EngineError, IllegalReason};

/// Как действие меняет торговлю.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaiseKind {
    /// Ставка улицы не выросла (fold, check, call, all-in на колл или меньше).
    None,
    /// Полный bet/raise: переоткрывает торговлю, `size` – новый min_raise.
    Full { size: Chips },
    /// All-in выше текущей ставки, но меньше полного рейза: не переоткрывает.
    Incomplete,
}

/// Результат успешной проверки: что именно произойдёт при применении.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    /// Сколько фишек уйдёт из стека.
    pub chips: Chips,
    /// Ставка игрока на улице после действия.
    pub new_bet: Chips,
    pub raise: RaiseKind,
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
/// Не ограничено стеком: игрок с меньшим стеком может только all-in.
pub fn call_amount(player: &PlayerAtTable, betting: &BettingState) -> Chips {
    betting.current_bet.saturating_sub(player.current_bet)
}

/// Итоговая ставка, до которой минимально можно повысить.
pub fn min_raise_to(betting: &BettingState) -> Chips {
    betting.current_bet + betting.min_raise
}

/// Допустимые типы действий для игрока на месте `seat`.
///
/// | ситуация                   | действия                                   |
/// |----------------------------|--------------------------------------------|
/// | нечего уравнивать          | check, bet / raise, all-in                 |
/// | есть ставка, стек >= колл  | fold, call, raise (если открыто), all-in   |
/// | есть ставка, стек < колл   | fold, all-in                               |
pub fn valid_actions(player: &PlayerAtTable, seat: SeatIndex, betting: &BettingState) -> Vec<ActionType> {
    if !player.can_act() || player.stack.is_zero() {
        return Vec::new();
    }

    let stack = player.stack;
    let to_call = call_amount(player, betting);
    let open = betting.is_open_for(seat);
    let can_full_raise = open && stack >= min_raise_to(betting) - player.current_bet;

    let mut actions = Vec::with_capacity(4);

    if to_call.is_zero() {
        actions.push(ActionType::Check);
        if betting.current_bet.is_zero() {
            if open && stack >= betting.min_raise {
                actions.push(ActionType::Bet);
            }
        } else if can_full_raise {
            actions.push(ActionType::Raise);
        }
        if open {
            actions.push(ActionType::AllIn);
        }
        return actions;
    }

    actions.push(ActionType::Fold);
    if stack >= to_call {
        actions.push(ActionType::Call);
        if can_full_raise {
            actions.push(ActionType::Raise);
        }
        // All-in больше колла – это повышение, а повышать можно только с открытой торговлей.
        if open || stack == to_call {
            actions.push(ActionType::AllIn);
        }
    } else {
        actions.push(ActionType::AllIn);
    }

    actions
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Ничего не меняет. Статус игрока (может ли он вообще ходить) проверяет вызывающий код.
pub fn validate_action(
    player: &PlayerAtTable,
    seat: SeatIndex,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<ActionPlan, EngineError> {
    let stack = player.stack;
    let to_call = call_amount(player, betting);
    let open = betting.is_open_for(seat);
    let kind = action.action_type();

    let illegal = |reason| EngineError::illegal(kind, reason);
    let stay = ActionPlan {
        chips: Chips::ZERO,
        new_bet: player.current_bet,
        raise: RaiseKind::None,
    };

    match *action {
        PlayerActionKind::Fold => {
            if to_call.is_zero() {
                return Err(illegal(IllegalReason::FoldWithoutBet));
            }
            Ok(stay)
        }

        PlayerActionKind::Check => {
            if !to_call.is_zero() {
                return Err(illegal(IllegalReason::CannotCheck));
            }
            Ok(stay)
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                return Err(illegal(IllegalReason::NothingToCall));
            }
            if stack < to_call {
                return Err(illegal(IllegalReason::CallNeedsAllIn));
            }
            Ok(ActionPlan {
                chips: to_call,
                new_bet: betting.current_bet,
                raise: RaiseKind::None,
            })
        }

        PlayerActionKind::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                return Err(illegal(IllegalReason::BetAlreadyOpened));
            }
            if !open {
                return Err(illegal(IllegalReason::ActionNotReopened));
            }
            if amount > stack {
                return Err(EngineError::InsufficientChips {
                    needed: amount,
                    available: stack,
                });
            }
            if stack < betting.min_raise {
                return Err(illegal(IllegalReason::RaiseUnaffordable));
            }
            if amount < betting.min_raise {
                return Err(illegal(IllegalReason::BelowMinimum {
                    min: betting.min_raise,
                }));
            }
            Ok(ActionPlan {
                chips: amount,
                new_bet: player.current_bet + amount,
                raise: RaiseKind::Full { size: amount },
            })
        }

        PlayerActionKind::Raise(to) => {
            if betting.current_bet.is_zero() {
                return Err(illegal(IllegalReason::NothingToRaise));
            }
            if !open {
                return Err(illegal(IllegalReason::ActionNotReopened));
            }
            let needed = to - player.current_bet;
            if needed > stack {
                return Err(EngineError::InsufficientChips {
                    needed,
                    available: stack,
                });
            }
            let min_to = min_raise_to(betting);
            if stack < min_to - player.current_bet {
                return Err(illegal(IllegalReason::RaiseUnaffordable));
            }
            if to < min_to {
                return Err(illegal(IllegalReason::BelowMinimum { min: min_to }));
            }
            Ok(ActionPlan {
                chips: needed,
                new_bet: to,
                raise: RaiseKind::Full {
                    size: to - betting.current_bet,
                },
            })
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::InsufficientChips {
                    needed: Chips(1),
                    available: stack,
                });
            }
            let new_bet = player.current_bet + stack;
            let raise = if new_bet <= betting.current_bet {
                RaiseKind::None
            } else if !open {
                return Err(illegal(IllegalReason::ActionNotReopened));
            } else if new_bet - betting.current_bet >= betting.min_raise {
                RaiseKind::Full {
                    size: new_bet - betting.current_bet,
                }
            } else {
                RaiseKind::Incomplete
            };
            Ok(ActionPlan {
                chips: stack,
                new_bet,
                raise,
            })
        }
    }
}
