//! find_best_move の振る舞い

use super::pos;
use crate::search::{SearchError, Searcher, random_move};
use crate::types::{Color, Decision, Move, Piece, PieceType, Square};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

#[test]
fn captures_hanging_rook() {
    let mut p = pos("4k4/4r4/9/9/4R4/9/9/9/4K4 w - 1");
    let mut searcher = Searcher::new(Color::White, 2).with_seed(3);
    let decision = searcher.find_best_move(&mut p, true).unwrap();
    let rook = Piece::new(PieceType::Rook, Color::White);
    assert_eq!(
        decision,
        Some(Decision::Move(Move::normal(Square::new(1, 4), Square::new(4, 4), rook, false)))
    );
}

#[test]
fn first_player_ai_maximises_second_relative_value() {
    // 先手 AI は後手視点の評価値を最大化するので、ただの飛車を取らない
    let mut p = pos("4k4/9/9/9/4r4/9/9/4R4/4K4 b - 1");
    let mut searcher = Searcher::new(Color::Black, 2).with_seed(3);
    let decision = searcher.find_best_move(&mut p, true).unwrap();
    let capture = Move::normal(
        Square::new(7, 4),
        Square::new(4, 4),
        Piece::new(PieceType::Rook, Color::Black),
        false,
    );
    assert!(matches!(decision, Some(Decision::Move(mv)) if mv != capture));
}

#[test]
fn takes_the_king_when_possible() {
    let mut p = pos("4k4/9/9/9/9/9/9/4r4/4K4 w - 1");
    let mut searcher = Searcher::new(Color::White, 2).with_seed(3);
    let decision = searcher.find_best_move(&mut p, true).unwrap();
    let Some(Decision::Move(mv)) = decision else {
        panic!("expected a move, got {decision:?}");
    };
    assert_eq!(mv.to(), Square::new(8, 4));
    // 成り・不成が同点なら先に生成される成りが選ばれる
    assert!(mv.is_promote());
}

#[test]
fn resigns_without_king() {
    let mut p = pos("9/9/9/9/9/9/9/9/4K4 w - 1");
    let mut searcher = Searcher::new(Color::White, 3);
    assert_eq!(searcher.find_best_move(&mut p, false).unwrap(), Some(Decision::Resign));
}

#[test]
fn no_legal_moves_depends_on_force_move() {
    let mut p = pos("K8/9/9/9/9/9/9/7pp/7pk w - 1");
    let mut searcher = Searcher::new(Color::White, 2);
    assert_eq!(searcher.find_best_move(&mut p, true).unwrap(), Some(Decision::Resign));
    assert_eq!(searcher.find_best_move(&mut p, false).unwrap(), None);
}

#[test]
fn search_never_changes_side_to_move() {
    let mut p = crate::position::Position::startpos();
    let before = p.clone();
    // 先手番の局面で後手 AI に考えさせる
    let mut searcher = Searcher::new(Color::White, 2).with_seed(11);
    let decision = searcher.find_best_move(&mut p, true).unwrap();
    assert!(matches!(decision, Some(Decision::Move(mv)) if mv.color() == Color::White));
    assert_eq!(p, before);
}

#[test]
fn random_override_is_seeded() {
    let run = |seed| {
        let mut p = crate::position::Position::startpos();
        let mut searcher = Searcher::new(Color::Black, 1)
            .with_seed(seed)
            .with_random_move_rate(1.0);
        let result = searcher.search(&mut p, true).unwrap();
        assert_eq!(result.score, None);
        result.decision
    };
    let a = run(42);
    assert_eq!(a, run(42));
    let legal = crate::position::Position::startpos().legal_moves();
    assert!(matches!(a, Some(Decision::Move(mv)) if legal.contains(&mv)));
}

#[test]
fn stop_flag_aborts_and_restores_board() {
    let mut p = crate::position::Position::startpos();
    let before = p.clone();
    let stop = Arc::new(AtomicBool::new(true));
    let mut searcher = Searcher::new(Color::Black, 3).with_stop_flag(stop);
    assert_eq!(searcher.find_best_move(&mut p, true), Err(SearchError::Stopped));
    assert_eq!(p, before);
}

#[test]
fn random_move_resigns_without_moves() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let stuck = pos("K8/9/9/9/9/9/9/7pp/7pk w - 1");
    assert_eq!(random_move(&stuck, Color::White, &mut rng), Decision::Resign);

    let p = crate::position::Position::startpos();
    let legal = p.legal_moves();
    match random_move(&p, Color::Black, &mut rng) {
        Decision::Move(mv) => assert!(legal.contains(&mv)),
        Decision::Resign => panic!("startpos has moves"),
    }
}
