//! End-to-end tests against the public `Engine`/`Searcher` surface: the concrete scenarios from
//! the testable-properties list (mate-in-1, stalemate, a sane opening move, Chess960 castling)
//! plus the depth-0/depth-1 boundary behaviour of `search` itself.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chess_core::board::Board;
use chess_core::score;

use chess_engine::search::Searcher;
use chess_engine::time::{SearchLimits, TimeManager};
use chess_engine::tt::TranspositionTable;
use chess_engine::Engine;

fn fresh_searcher() -> Searcher {
    let tt = Arc::new(TranspositionTable::new(1));
    let stop = Arc::new(AtomicBool::new(false));
    Searcher::new(0, tt, stop)
}

#[test]
fn starting_position_plays_a_sane_opening_move() {
    let mut engine = Engine::new(1, 1);
    let best = engine.search(SearchLimits::depth(5));
    let reasonable = ["e2e4", "d2d4", "g1f3", "c2c4"];
    assert!(
        reasonable.contains(&best.stringify().as_str()),
        "unexpected opening move: {}",
        best.stringify()
    );
}

#[test]
fn mate_in_one_is_found_within_a_shallow_depth() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let mut searcher = fresh_searcher();
    let result = searcher.iterative_deepening(
        &mut board,
        TimeManager::untimed(std::time::Instant::now()),
        Some(3),
        None,
    );
    assert!(score::is_mate_score(result.score));
    assert!(result.score > 29000);
}

#[test]
fn stalemate_position_yields_no_legal_moves_and_a_draw_score() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.generate_moves().is_empty());
    let mut searcher = fresh_searcher();
    let result = searcher.iterative_deepening(
        &mut board,
        TimeManager::untimed(std::time::Instant::now()),
        Some(1),
        None,
    );
    assert_eq!(result.score, score::DRAW);
}

#[test]
fn chess960_castling_fen_is_searchable() {
    let mut engine = Engine::new(1, 1);
    let board = Board::from_fen(
        "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P1N2/NPP1P1PP/BQ1BR1KR w HEhe - 0 9",
    )
    .unwrap();
    engine.set_position(board);
    let best = engine.search(SearchLimits::depth(3));
    assert!(engine.board().generate_moves().contains(best));
}

#[test]
fn chess960_queen_side_castle_move_is_legal() {
    // King on g1, queen-side rook on e1 (not the standard a1/h1 corners): the move list must
    // contain the king-to-e1 castle, not just tolerate it as the eventual search result.
    let board = Board::from_fen(
        "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P1N2/NPP1P1PP/BQ1BR1KR w HEhe - 0 9",
    )
    .unwrap();
    let moves = board.generate_moves();
    assert!(
        moves.iter().any(|sm| {
            let m = sm.bit_move;
            m.is_castle() && !m.is_king_castle() && m.get_src() == chess_core::SQ::G1
                && m.get_dest() == chess_core::SQ::E1
        }),
        "queen-side castle (g1e1) missing from Chess960 move list: {:?}",
        moves.iter().map(|sm| sm.bit_move.stringify()).collect::<Vec<_>>()
    );
}

#[test]
fn depth_one_search_completes_with_a_finite_score_and_legal_move() {
    let mut board = Board::start_pos();
    let mut searcher = fresh_searcher();
    let result = searcher.iterative_deepening(
        &mut board,
        TimeManager::untimed(std::time::Instant::now()),
        Some(1),
        None,
    );
    assert_eq!(result.depth, 1);
    assert!(!score::is_mate_score(result.score));
    assert!(board.generate_moves().contains(result.best_move));
}
