use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use shogiban_core::position::BoardState;
use shogiban_core::{AiPlayer, AiSettings, Color, Decision, Difficulty, Game};

use super::parse_position;

/// `--json` の出力
#[derive(Debug, Serialize)]
pub struct BestmoveReport {
    pub sfen: String,
    pub side: Color,
    pub difficulty: Difficulty,
    /// "7g7f" / "resign"
    pub usi: String,
    pub decision: Decision,
    pub elapsed_ms: u64,
    /// 指した後の盤面
    pub board: BoardState,
}

/// 手番側を AI に持たせて一手考えさせる
pub async fn decide(sfen: &str, mut settings: AiSettings) -> Result<BestmoveReport> {
    let pos = parse_position(sfen)?;
    let side = pos.side_to_move();
    settings.player_side = side.opponent();
    let difficulty = settings.difficulty;

    let player = AiPlayer::new(settings);
    let start = Instant::now();
    let decision = player.think(&pos).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    log::info!("{side} ({difficulty}) chose {decision} in {elapsed_ms}ms");

    let mut game = Game::from_position(pos.clone());
    game.apply(decision)?;

    Ok(BestmoveReport {
        sfen: pos.to_sfen(),
        side,
        difficulty,
        usi: decision.to_string(),
        decision,
        elapsed_ms,
        board: game.board_state(),
    })
}

pub async fn run(sfen: &str, settings: AiSettings, json: bool) -> Result<()> {
    let report = decide(sfen, settings).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("bestmove {}", report.decision);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AiSettings {
        AiSettings {
            min_thinking_ms: Some(0),
            seed: Some(11),
            difficulty: Difficulty::Intermediate,
            ..AiSettings::default()
        }
    }

    #[tokio::test]
    async fn test_takes_hanging_rook() {
        // 後手番、先手の飛車がただで取れる
        let report = decide("4k4/4r4/9/9/4R4/9/9/9/4K4 w - 1", settings())
            .await
            .unwrap();
        assert_eq!(report.side, Color::White);
        let mv = report.decision.as_move().unwrap();
        assert_eq!(mv.to().to_string(), "5e");
        assert!(report.board.last_move.is_some());
    }

    #[tokio::test]
    async fn test_json_report_shape() {
        let report = decide("startpos", settings()).await.unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["side"], "first");
        assert_eq!(value["difficulty"], "intermediate");
        assert_eq!(value["decision"]["decision"], "move");
        assert_eq!(value["usi"], report.decision.to_string());
        // 指した後なので後手番
        assert_eq!(value["board"]["turn"], "second");
        assert_eq!(value["board"]["cells"].as_array().unwrap().len(), 9);
    }
}
