use anyhow::Result;
use chrono::Local;
use shogiban_core::game::{GameStatus, WinReason};
use shogiban_core::{AiPlayer, AiSettings, Color, Difficulty, Game};

#[derive(Debug, Clone)]
pub struct SelfplayOptions {
    pub games: u32,
    pub max_plies: u32,
    pub black: Difficulty,
    pub white: Difficulty,
    pub seed: Option<u64>,
}

/// 1局を最後まで（または手数上限まで）指す
pub async fn play_one(base: &AiSettings, opts: &SelfplayOptions, seed: u64) -> Result<Game> {
    let player = |ai: Color, difficulty: Difficulty| {
        AiPlayer::new(AiSettings {
            difficulty,
            player_side: ai.opponent(),
            seed: Some(seed.wrapping_mul(2).wrapping_add(ai.index() as u64)),
            ..base.clone()
        })
    };
    let players = [player(Color::Black, opts.black), player(Color::White, opts.white)];

    let mut game = Game::new();
    while !game.is_over() && game.history().len() < opts.max_plies as usize {
        let side = game.position().side_to_move();
        let decision = players[side.index()].think(game.position()).await;
        log::debug!("{:>3} {side}: {decision}", game.ply());
        game.apply(decision)?;
    }
    Ok(game)
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Finished {
            winner,
            reason: WinReason::KingCaptured,
        } => format!("{winner} wins by king capture"),
        GameStatus::Finished {
            winner,
            reason: WinReason::Resignation,
        } => format!("{winner} wins by resignation"),
        GameStatus::InProgress => "no result (ply limit)".to_string(),
    }
}

pub async fn run(base: &AiSettings, opts: &SelfplayOptions) -> Result<()> {
    let base_seed = opts.seed.unwrap_or_else(rand::random);
    log::info!(
        "selfplay: {} game(s), first={} second={} max_plies={} seed={base_seed}",
        opts.games,
        opts.black,
        opts.white,
        opts.max_plies
    );

    let mut wins = [0u32; Color::NUM];
    let mut unfinished = 0u32;
    for index in 0..opts.games {
        let started = Local::now();
        let game = play_one(base, opts, base_seed.wrapping_add(u64::from(index))).await?;
        let plies = game.history().len();
        match game.winner() {
            Some(winner) => wins[winner.index()] += 1,
            None => unfinished += 1,
        }
        println!(
            "[{}] game {}: {} after {plies} plies",
            started.format("%Y-%m-%d %H:%M:%S"),
            index + 1,
            describe(game.status())
        );
        println!("{}", game.position());
        println!("sfen {}", game.to_sfen());
    }

    println!(
        "result: first {} - second {} ({unfinished} unfinished)",
        wins[Color::Black.index()],
        wins[Color::White.index()]
    );
    Ok(())
}
