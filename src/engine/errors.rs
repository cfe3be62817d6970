use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::hand::Street;
use crate::domain::table::TableError;
use crate::domain::{Chips, SeatIndex};
use crate::engine::actions::ActionType;

/// Почему конкретное действие запрещено в текущем состоянии ставок.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalReason {
    #[error("нельзя сделать check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("нечего уравнивать")]
    NothingToCall,

    #[error("стека не хватает на call – остаётся только all-in")]
    CallNeedsAllIn,

    #[error("на этой улице уже есть ставка – нужен raise")]
    BetAlreadyOpened,

    #[error("на этой улице ещё нет ставки – нужен bet")]
    NothingToRaise,

    #[error("размер меньше минимального ({min})")]
    BelowMinimum { min: Chips },

    #[error("стека не хватает даже на минимальный рейз")]
    RaiseUnaffordable,

    #[error("торговля не переоткрыта неполным рейзом – только call или fold")]
    ActionNotReopened,

    #[error("fold без ставки не допускается – можно сделать check")]
    FoldWithoutBet,
}

/// Ошибки движка покера.
///
/// Любая ошибка обнаруживается ДО изменения состояния: после `Err`
/// стол, движок и банк остаются ровно такими же, как до вызова.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("в этом месте нет игрока")]
    EmptySeat,

    #[error("недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error(transparent)]
    InvalidTable(#[from] TableError),

    #[error("раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("раздача не активна")]
    NoActiveHand,

    #[error("место {0} сейчас не может действовать")]
    InvalidActor(SeatIndex),

    #[error("действие {action:?} недопустимо: {reason}")]
    IllegalAction {
        action: ActionType,
        reason: IllegalReason,
    },

    #[error("недостаточно фишек: нужно {needed}, в стеке {available}")]
    InsufficientChips { needed: Chips, available: Chips },

    #[error("переход из фазы {from:?} сейчас невозможен")]
    IllegalTransition { from: Street },

    #[error("место {seat} не может претендовать на пот #{pot_index}")]
    InvalidWinner { pot_index: usize, seat: SeatIndex },

    #[error("для пота #{0} не указан ни один победитель")]
    PotWithoutWinner(usize),

    #[error("банк этой раздачи уже выплачен")]
    PotAlreadyAwarded,

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    pub fn illegal(action: ActionType, reason: IllegalReason) -> Self {
        EngineError::IllegalAction { action, reason }
    }
}
