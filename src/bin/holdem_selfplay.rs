//! holdem_selfplay: параллельный self-play по многим независимым столам.
//!
//! Пример:
//!   holdem_selfplay --tables 32 --hands 500 --seed 7 --dump-history last_hand.json

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use holdem_engine::config::SimulationConfig;
use holdem_engine::domain::chips::Chips;
use holdem_engine::sim::{run_table, TableReport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play симуляция движка холдема")]
struct Args {
    /// JSON-конфиг симуляции (флаги ниже его перекрывают).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    tables: Option<u32>,

    /// Раздач на стол.
    #[arg(long)]
    hands: Option<u32>,

    /// Игроков за столом.
    #[arg(short, long)]
    players: Option<u8>,

    #[arg(long)]
    stack: Option<u64>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Сколько пассивных ботов за каждым столом.
    #[arg(long)]
    passive: Option<u8>,

    /// Записать историю последней раздачи первого стола в JSON.
    #[arg(long)]
    dump_history: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(SimulationConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("не удалось загрузить {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(v) = self.tables {
            config.tables = v;
        }
        if let Some(v) = self.hands {
            config.hands_per_table = v;
        }
        if let Some(v) = self.players {
            config.players_per_table = v;
        }
        if let Some(v) = self.stack {
            config.starting_stack = Chips(v);
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.passive {
            config.passive_players = v;
        }
        config.validate().context("некорректные параметры симуляции")?;

        Ok((config, self.dump_history))
    }
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (config, dump_history) = Args::parse().into_config()?;
    info!(?config, "старт self-play");

    let started = Instant::now();
    let reports: Vec<TableReport> = (1..=config.tables as u64)
        .into_par_iter()
        .map(|table_id| run_table(&config, table_id))
        .collect::<Result<_, _>>()
        .context("ошибка в симуляции стола")?;
    let elapsed = started.elapsed();

    let starting_total = config.starting_stack.0 * config.players_per_table as u64;
    for report in &reports {
        let total: u64 = report.final_stacks.iter().map(|(_, c)| c.0).sum();
        if total != starting_total {
            bail!(
                "стол {}: сумма стеков {} вместо {}",
                report.table_id,
                total,
                starting_total
            );
        }
    }

    let hands: u64 = reports.iter().map(|r| r.hands_played as u64).sum();
    let showdowns: u64 = reports.iter().map(|r| r.showdowns as u64).sum();
    let total_pot: u64 = reports.iter().map(|r| r.total_pot).sum();
    let biggest = reports.iter().map(|r| r.biggest_pot).max().unwrap_or_default();
    let rejected: u64 = reports.iter().map(|r| r.rejected_actions as u64).sum();

    println!("================ SELF-PLAY =================");
    println!("столов:            {}", reports.len());
    println!("раздач:            {hands}");
    println!("шоудаунов:         {showdowns}");
    println!(
        "средний банк:      {}",
        if hands > 0 { total_pot / hands } else { 0 }
    );
    println!("крупнейший банк:   {biggest}");
    println!("отклонено ходов:   {rejected}");
    println!("время:             {:.2?}", elapsed);
    if elapsed.as_secs_f64() > 0.0 {
        println!("раздач/сек:        {:.0}", hands as f64 / elapsed.as_secs_f64());
    }

    if let Some(path) = dump_history {
        let history = reports
            .first()
            .and_then(|r| r.last_history.as_ref())
            .context("нет ни одной сыгранной раздачи")?;
        let json = serde_json::to_string_pretty(history).context("сериализация истории")?;
        fs::write(&path, json).with_context(|| format!("не удалось записать {}", path.display()))?;
        info!(path = %path.display(), "история раздачи записана");
    }

    Ok(())
}
