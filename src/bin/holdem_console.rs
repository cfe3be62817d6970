//! holdem_console: человек против случайных ботов в консоли.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::player::PlayerAtTable;
use holdem_engine::domain::table::{Table, TableConfig, TableStakes};
use holdem_engine::engine::hand_history::HandEventKind;
use holdem_engine::engine::{DeckDealer, PlayerActionKind};
use holdem_engine::eval::{describe_hand, StandardEvaluator};
use holdem_engine::infra::{DeterministicRng, RngSeed};
use holdem_engine::players::{ActionSource, ConsoleSource, RandomPolicy, TableView};
use holdem_engine::sim::{play_hand, SeatSources};

#[derive(Parser, Debug)]
#[command(author, version, about = "Холдем против случайных ботов")]
struct Args {
    #[arg(short, long, default_value = "Hero")]
    name: String,

    /// Сколько ботов (1..=8).
    #[arg(short, long, default_value_t = 3)]
    bots: u8,

    #[arg(long, default_value_t = 1_000)]
    stack: u64,

    #[arg(long, default_value_t = 5)]
    small_blind: u64,

    #[arg(long, default_value_t = 10)]
    big_blind: u64,

    /// Seed колоды и ботов; по умолчанию – от текущего времени.
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Ссылка на общий консольный источник, чтобы после раздачи проверить флаг выхода.
struct SharedConsole<'a, R: BufRead, W: Write>(&'a RefCell<ConsoleSource<R, W>>);

impl<R: BufRead, W: Write> ActionSource for SharedConsole<'_, R, W> {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind {
        self.0.borrow_mut().decide_action(view)
    }
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if !(1..=8).contains(&args.bots) {
        anyhow::bail!("ботов должно быть от 1 до 8");
    }
    let seed = match args.seed {
        Some(seed) => seed,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("системное время раньше UNIX_EPOCH")?
            .as_secs(),
    };
    let base = RngSeed::from_u64(seed);

    let config = TableConfig {
        max_seats: args.bots + 1,
        stakes: TableStakes::new(Chips(args.small_blind), Chips(args.big_blind)),
    };
    let mut table = Table::new(1, "Console".to_string(), config).context("некорректный стол")?;
    table
        .seat_player(0, PlayerAtTable::named(1, args.name.clone(), Chips(args.stack)))
        .context("не удалось посадить игрока")?;
    for seat in 1..=args.bots {
        table
            .seat_player(
                seat,
                PlayerAtTable::named(1 + seat as u64, format!("Bot{seat}"), Chips(args.stack)),
            )
            .context("не удалось посадить бота")?;
    }

    let stdin = io::stdin();
    let console = RefCell::new(ConsoleSource::new(stdin.lock(), io::stdout()));

    let mut sources: SeatSources<'_> = BTreeMap::new();
    sources.insert(0, Box::new(SharedConsole(&console)));
    for seat in 1..=args.bots {
        let rng: DeterministicRng = base.derive(1, seat as u64, 0).to_rng();
        sources.insert(seat, Box::new(RandomPolicy::new(rng)));
    }

    let mut dealer = DeckDealer::new(base.derive(1, 0, 0).to_rng());
    let evaluator = StandardEvaluator;

    println!("Холдем: {} против {} ботов (seed {seed}). Команда quit – выход.", args.name, args.bots);

    let mut hand_id = 0;
    loop {
        let hero_stack = table.player(0).map(|p| p.stack).unwrap_or_default();
        if hero_stack.is_zero() {
            println!("\nУ вас закончились фишки. Игра окончена.");
            break;
        }
        if table.players_with_chips() < 2 {
            println!("\nВы обыграли всех ботов!");
            break;
        }

        hand_id += 1;
        println!("\n======== Раздача #{hand_id} ========");
        let played = play_hand(&mut table, &mut dealer, &evaluator, &mut sources, hand_id)
            .context("ошибка в раздаче")?;

        for event in &played.history.events {
            match &event.kind {
                HandEventKind::ActionApplied { seat, action, .. } if *seat != 0 => {
                    let name = table.player(*seat).map(|p| p.name.as_str()).unwrap_or("?");
                    println!("  {name}: {action}");
                }
                HandEventKind::ShowdownReveal { seat, hole_cards, rank, .. } => {
                    let name = table.player(*seat).map(|p| p.name.as_str()).unwrap_or("?");
                    let cards: Vec<String> = hole_cards.iter().map(|c| c.to_string()).collect();
                    println!("  {name} показывает {} – {}", cards.join(" "), describe_hand(*rank));
                }
                _ => {}
            }
        }
        let board: Vec<String> = played.summary.board.iter().map(|c| c.to_string()).collect();
        if !board.is_empty() {
            println!("Борд: {}", board.join(" "));
        }
        for award in &played.summary.awards {
            let name = table.player(award.seat).map(|p| p.name.as_str()).unwrap_or("?");
            println!("{name} забирает {} (пот #{})", award.amount, award.pot_index);
        }
        let stacks: Vec<String> = table
            .seats
            .iter()
            .flatten()
            .map(|p| format!("{}: {}", p.name, p.stack))
            .collect();
        println!("Стеки: {}", stacks.join(", "));

        if console.borrow().quit_requested() {
            println!("\nДо встречи!");
            break;
        }
    }

    Ok(())
}
