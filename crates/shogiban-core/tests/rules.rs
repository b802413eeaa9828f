//! 盤面ルールの性質テスト（ランダム対局で検証）

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_xoshiro::Xoshiro256PlusPlus;
use shogiban_core::game::{Game, GameStatus, WinReason};
use shogiban_core::{Color, Move, Piece, PieceType, Position, Square};

/// 乱数で対局を進め、各局面で `check` を呼ぶ
fn random_playout(seed: u64, max_plies: usize, mut check: impl FnMut(&Position)) -> Game {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..max_plies {
        check(game.position());
        let moves = game.position().legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        game.play(mv).unwrap();
        if game.is_over() {
            break;
        }
    }
    game
}

#[test]
fn make_unmake_is_identity_along_random_games() {
    for seed in 0..4 {
        random_playout(seed, 80, |pos| {
            let mut work = pos.clone();
            for mv in pos.legal_moves() {
                let captured = work.do_move(mv).unwrap();
                work.undo_move(mv, captured).unwrap();
                assert_eq!(&work, pos, "seed {seed}: {mv}");
            }
        });
    }
}

#[test]
fn piece_count_is_conserved_until_king_capture() {
    for seed in 10..16 {
        let game = random_playout(seed, 200, |pos| {
            assert_eq!(pos.piece_count(), 40);
        });
        if let GameStatus::Finished {
            reason: WinReason::KingCaptured,
            ..
        } = game.status()
        {
            assert_eq!(game.position().piece_count(), 39);
        }
    }
}

#[test]
fn generated_drops_never_double_pawn() {
    for seed in 20..24 {
        random_playout(seed, 150, |pos| {
            for mv in pos.legal_moves() {
                let Move::Drop {
                    piece_type: PieceType::Pawn,
                    to,
                    color,
                } = mv
                else {
                    continue;
                };
                let clash = (0..9).any(|row| {
                    pos.piece_on(Square::new(row, to.col()))
                        == Some(Piece::new(PieceType::Pawn, color))
                });
                assert!(!clash, "two pawns in column via {mv}");
            }
        });
    }
}

#[test]
fn drop_rank_restrictions_at_the_boundary() {
    let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b PLNpln 1").unwrap();
    let cases = [
        // (駒, 手番, 最奥段, 一つ内側に打てるか)
        (PieceType::Pawn, Color::Black, 0u8, true),
        (PieceType::Lance, Color::Black, 0, true),
        (PieceType::Knight, Color::Black, 0, false),
        (PieceType::Pawn, Color::White, 8, true),
        (PieceType::Lance, Color::White, 8, true),
        (PieceType::Knight, Color::White, 8, false),
    ];
    for (pt, color, far, one_inside_ok) in cases {
        let inward: i8 = if color == Color::Black { 1 } else { -1 };
        let one_in = (far as i8 + inward) as u8;
        let two_in = (far as i8 + 2 * inward) as u8;
        // 列 1 は空いている
        assert!(!pos.can_drop_piece(pt, color, Square::new(far, 1)), "{pt:?} {color}");
        assert_eq!(
            pos.can_drop_piece(pt, color, Square::new(one_in, 1)),
            one_inside_ok,
            "{pt:?} {color}"
        );
        assert!(pos.can_drop_piece(pt, color, Square::new(two_in, 1)), "{pt:?} {color}");
    }
}

#[test]
fn promotion_eligibility_boundary() {
    let silver = |c| Piece::new(PieceType::Silver, c);
    // 先手: 敵陣 (row 0..=2) を出入りする手は成れる
    assert!(Position::can_promote(silver(Color::Black), 2, 3));
    assert!(Position::can_promote(silver(Color::Black), 3, 2));
    assert!(!Position::can_promote(silver(Color::Black), 4, 3));
    assert!(!Position::can_promote(silver(Color::Black), 3, 4));
    // 後手: row 6 が敵陣の入口
    assert!(Position::can_promote(silver(Color::White), 5, 6));
    assert!(Position::can_promote(silver(Color::White), 6, 5));
    assert!(!Position::can_promote(silver(Color::White), 4, 5));
    for pt in [PieceType::King, PieceType::Gold] {
        assert!(!Position::can_promote(Piece::new(pt, Color::Black), 3, 2));
    }
    assert!(!Position::can_promote(Piece::promoted(PieceType::Rook, Color::Black), 3, 2));
}

#[test]
fn king_capture_ends_the_game() {
    let pos = Position::from_sfen("4k4/9/9/9/9/9/9/4r4/4K4 w - 1").unwrap();
    let mut game = Game::from_position(pos);
    let rook = Piece::new(PieceType::Rook, Color::White);
    game.play(Move::normal(Square::new(7, 4), Square::new(8, 4), rook, false))
        .unwrap();
    assert_eq!(game.winner(), Some(Color::White));
    assert!(game.position().hand(Color::White).is_empty());
    assert!(game.position().legal_moves_for(Color::Black).is_empty());
}
