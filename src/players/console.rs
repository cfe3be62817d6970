use std::io::{BufRead, Write};

use thiserror::Error;

use crate::domain::chips::Chips;
use crate::engine::actions::{ActionType, PlayerActionKind};
use crate::players::{ActionSource, TableView};

/// Ошибка разбора команды игрока.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("введите действие")]
    Empty,

    #[error("неизвестное действие: {0}")]
    Unknown(String),

    #[error("некорректная сумма: {0}")]
    BadAmount(String),

    #[error("укажите сумму: {0} <сумма>")]
    MissingAmount(&'static str),

    #[error("сейчас нельзя: {0:?}")]
    NotAllowed(ActionType),

    #[error("сумма должна быть не меньше {0}")]
    TooSmall(Chips),

    #[error("сумма больше доступной ({0})")]
    TooLarge(Chips),
}

/// Разобрать строку команды с учётом того, что сейчас допустимо.
///
/// Команды: `fold|f`, `check|c`, `call`, `bet N`, `raise N` (итоговая ставка),
/// `allin|all-in|ai`.
pub fn parse_command(line: &str, view: &TableView) -> Result<PlayerActionKind, CommandError> {
    let mut parts = line.split_whitespace();
    let word = parts.next().ok_or(CommandError::Empty)?.to_lowercase();
    let amount = parts
        .next()
        .map(|s| {
            s.parse::<u64>()
                .map(Chips)
                .map_err(|_| CommandError::BadAmount(s.to_string()))
        })
        .transpose()?;

    let require = |action: ActionType| {
        if view.can(action) {
            Ok(())
        } else {
            Err(CommandError::NotAllowed(action))
        }
    };

    match word.as_str() {
        "fold" | "f" => {
            require(ActionType::Fold)?;
            Ok(PlayerActionKind::Fold)
        }
        "check" | "c" => {
            require(ActionType::Check)?;
            Ok(PlayerActionKind::Check)
        }
        "call" => {
            require(ActionType::Call)?;
            Ok(PlayerActionKind::Call)
        }
        "bet" => {
            require(ActionType::Bet)?;
            let amount = amount.ok_or(CommandError::MissingAmount("bet"))?;
            if amount < view.min_raise {
                return Err(CommandError::TooSmall(view.min_raise));
            }
            if amount > view.stack {
                return Err(CommandError::TooLarge(view.stack));
            }
            Ok(PlayerActionKind::Bet(amount))
        }
        "raise" => {
            require(ActionType::Raise)?;
            let to = amount.ok_or(CommandError::MissingAmount("raise"))?;
            if to < view.min_raise_to {
                return Err(CommandError::TooSmall(view.min_raise_to));
            }
            if to > view.max_bet_to() {
                return Err(CommandError::TooLarge(view.max_bet_to()));
            }
            Ok(PlayerActionKind::Raise(to))
        }
        "allin" | "all-in" | "ai" => {
            require(ActionType::AllIn)?;
            Ok(PlayerActionKind::AllIn)
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Человек за консолью: печатает состояние, читает команды до корректной.
///
/// Конец ввода (или `quit`) – безопасный ход и флаг `quit_requested`.
pub struct ConsoleSource<R: BufRead, W: Write> {
    input: R,
    output: W,
    quit_requested: bool,
}

impl<R: BufRead, W: Write> ConsoleSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            quit_requested: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print_view(&mut self, view: &TableView) -> std::io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Улица: {:?}   Банк: {}   Ставка: {}", view.street, view.pot, view.highest_bet)?;
        if !view.board.is_empty() {
            writeln!(out, "Борд: {}", join_cards(&view.board))?;
        }
        for opp in &view.opponents {
            writeln!(
                out,
                "  [{}] {}: {} (ставка {}, {:?})",
                opp.seat, opp.name, opp.stack, opp.current_bet, opp.status
            )?;
        }
        writeln!(
            out,
            "{}: стек {}, ставка {}, карты {}",
            view.name,
            view.stack,
            view.current_bet,
            join_cards(&view.hole_cards)
        )?;

        writeln!(out, "Доступно:")?;
        for action in &view.valid_actions {
            match action {
                ActionType::Fold => writeln!(out, "  fold (f)")?,
                ActionType::Check => writeln!(out, "  check (c)")?,
                ActionType::Call => writeln!(out, "  call {}", view.call_amount.min(view.stack))?,
                ActionType::Bet => writeln!(out, "  bet <сумма> (мин {}, макс {})", view.min_raise, view.stack)?,
                ActionType::Raise => writeln!(
                    out,
                    "  raise <до суммы> (мин {}, макс {})",
                    view.min_raise_to,
                    view.max_bet_to()
                )?,
                ActionType::AllIn => writeln!(out, "  allin (ai) – {}", view.stack)?,
            }
        }
        out.flush()
    }
}

impl<R: BufRead, W: Write> ActionSource for ConsoleSource<R, W> {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind {
        if self.quit_requested {
            return view.passive_fallback();
        }
        // Ошибки вывода не мешают игре.
        let _ = self.print_view(view);

        loop {
            let _ = write!(self.output, "{}, ваш ход: ", view.name);
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    self.quit_requested = true;
                    return view.passive_fallback();
                }
                Ok(_) => {}
            }
            if matches!(line.trim(), "quit" | "q" | "exit") {
                self.quit_requested = true;
                return view.passive_fallback();
            }

            match parse_command(&line, view) {
                Ok(action) => return action,
                Err(err) => {
                    let _ = writeln!(self.output, "{err}");
                }
            }
        }
    }
}

fn join_cards(cards: &[crate::domain::card::Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
