use anyhow::Result;
use shogiban_core::Position;

use super::parse_position;

/// 合法手を一行ずつ整形する（駒を取る手・成る手には印を付ける）
pub fn format_moves(pos: &Position) -> Vec<String> {
    pos.legal_moves()
        .into_iter()
        .map(|mv| {
            let mut line = mv.to_string();
            if pos.is_capture(mv) {
                line.push_str(" x");
            }
            line
        })
        .collect()
}

pub fn run(sfen: &str) -> Result<()> {
    let pos = parse_position(sfen)?;
    println!("{pos}");

    let side = pos.side_to_move();
    let threatened: Vec<String> =
        pos.threatened_pieces(side).iter().map(ToString::to_string).collect();
    if !threatened.is_empty() {
        println!("threatened: {}", threatened.join(" "));
    }

    let lines = format_moves(&pos);
    println!("{} legal moves for {side}", lines.len());
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
