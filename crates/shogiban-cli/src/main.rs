//! shogiban: 将棋 AI のコマンドラインフロントエンド
//!
//! ```bash
//! shogiban bestmove --sfen "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1"
//! shogiban selfplay --games 2 --black beginner --white advanced --seed 42
//! shogiban moves --sfen startpos
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shogiban_core::Difficulty;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "shogiban", version, about = "将棋 AI (minimax + alpha-beta)")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// TOML 設定ファイル（[ai] セクションと max_plies）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// 手番側の AI の指し手を表示
    Bestmove {
        /// 局面（SFEN または "startpos"）
        #[arg(long, default_value = "startpos")]
        sfen: String,
        /// 難易度 (beginner / intermediate / advanced)
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// 乱数シード
        #[arg(long)]
        seed: Option<u64>,
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// AI 同士の対局
    Selfplay {
        /// 対局数
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// 1局の最大手数（設定ファイルより優先）
        #[arg(long)]
        max_plies: Option<u32>,
        /// 先手の難易度
        #[arg(long)]
        black: Option<Difficulty>,
        /// 後手の難易度
        #[arg(long)]
        white: Option<Difficulty>,
        /// 乱数シード（対局ごとに +1 される）
        #[arg(long)]
        seed: Option<u64>,
    },
    /// 合法手の一覧
    Moves {
        /// 局面（SFEN または "startpos"）
        #[arg(long, default_value = "startpos")]
        sfen: String,
    },
}

fn init_logger(debug: bool) {
    use std::io::Write;
    let log_level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if let Err(e) = run(cli) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    log::debug!("config: {config:?}");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    match cli.cmd {
        Cmd::Bestmove {
            sfen,
            difficulty,
            seed,
            json,
        } => {
            let settings = config.ai_settings(difficulty, seed);
            runtime.block_on(commands::bestmove::run(&sfen, settings, json))
        }
        Cmd::Selfplay {
            games,
            max_plies,
            black,
            white,
            seed,
        } => {
            let opts = commands::selfplay::SelfplayOptions {
                games,
                max_plies: max_plies.unwrap_or(config.max_plies),
                black: black.unwrap_or(config.ai.difficulty),
                white: white.unwrap_or(config.ai.difficulty),
                seed: seed.or(config.ai.seed),
            };
            runtime.block_on(commands::selfplay::run(&config.ai, &opts))
        }
        Cmd::Moves { sfen } => commands::moves::run(&sfen),
    }
}
