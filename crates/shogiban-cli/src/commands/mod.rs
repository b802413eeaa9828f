pub mod bestmove;
pub mod moves;
pub mod selfplay;

use anyhow::{Context, Result};
use shogiban_core::Position;

/// "startpos"、"sfen <SFEN>"、素の SFEN のいずれかを受け付ける
pub fn parse_position(input: &str) -> Result<Position> {
    let input = input.trim();
    if input == "startpos" {
        return Ok(Position::startpos());
    }
    let sfen = input.strip_prefix("sfen ").unwrap_or(input);
    Position::from_sfen(sfen).with_context(|| format!("invalid SFEN: {sfen}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shogiban_core::{Color, SFEN_HIRATE};

    #[test]
    fn test_parse_position_forms() {
        assert_eq!(parse_position("startpos").unwrap(), Position::startpos());
        assert_eq!(parse_position(SFEN_HIRATE).unwrap(), Position::startpos());
        let pos = parse_position("sfen 4k4/9/9/9/9/9/9/9/4K4 w - 1").unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert!(parse_position("4k4/9/9 b - 1").is_err());
    }
}
