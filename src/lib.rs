//! Движок раунда ставок техасского холдема.
//!
//! Слои:
//!   - `domain` – карты, фишки, игроки, стол, итоги раздачи;
//!   - `engine` – очередь хода, проверка действий, банк и сайд-поты, улицы, шоудаун;
//!   - `eval` – оценка силы руки;
//!   - `players` – источники решений (консоль, скрипт, боты);
//!   - `sim` – драйвер раздачи и self-play столов;
//!   - `infra` – RNG и seed'ы;
//!   - `config` – конфиг симуляции.

pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod players;
pub mod sim;
