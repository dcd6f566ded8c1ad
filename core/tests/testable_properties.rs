//! Cross-checks against the invariants and concrete scenarios any conformant implementation of
//! this move generator must satisfy: Zobrist identity across make/unmake, published perft node
//! counts, FEN round-tripping, and a handful of named positions (stalemate, Chess960 castling,
//! repetition, en passant).

use chess_core::board::fen::{OPENING_POS_FEN, STANDARD_FENS_KIWIPETE};
use chess_core::board::perft::perft;
use chess_core::board::Board;

#[test]
fn zobrist_identity_across_make_and_unmake() {
    let mut board = Board::from_fen(STANDARD_FENS_KIWIPETE).unwrap();
    for sm in board.generate_moves().iter() {
        let before = board.zobrist();
        board.apply_move(sm.bit_move);
        board.undo_move();
        assert_eq!(board.zobrist(), before);
    }
}

#[test]
fn perft_matches_published_counts_from_the_start_position() {
    let mut board = Board::from_fen(OPENING_POS_FEN).unwrap();
    let expected = [1u64, 20, 400, 8902, 197281];
    for (depth, &want) in expected.iter().enumerate() {
        assert_eq!(perft(&mut board, depth as u32), want, "depth {}", depth);
    }
}

#[test]
fn perft_matches_published_counts_from_kiwipete() {
    let mut board = Board::from_fen(STANDARD_FENS_KIWIPETE).unwrap();
    let expected = [48u64, 2039, 97862, 4085603];
    for (depth, &want) in expected.iter().enumerate() {
        let d = depth as u32 + 1;
        assert_eq!(perft(&mut board, d), want, "depth {}", d);
    }
}

#[test]
fn fen_round_trips_through_board() {
    for fen in [OPENING_POS_FEN, STANDARD_FENS_KIWIPETE] {
        let board = Board::from_fen(fen).unwrap();
        let round_tripped = chess_core::board::fen::board_to_fen(&board);
        assert_eq!(Board::from_fen(&round_tripped).unwrap().zobrist(), board.zobrist());
    }
}

#[test]
fn legal_move_sequence_applied_then_undone_restores_the_position() {
    let mut board = Board::from_fen(OPENING_POS_FEN).unwrap();
    let start_fen = chess_core::board::fen::board_to_fen(&board);
    let moves: Vec<_> = board.generate_moves().iter().map(|sm| sm.bit_move).take(4).collect();
    for m in &moves {
        board.apply_move(*m);
    }
    for _ in &moves {
        board.undo_move();
    }
    assert_eq!(chess_core::board::fen::board_to_fen(&board), start_fen);
}

#[test]
fn stalemate_position_has_no_legal_moves() {
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.generate_moves().is_empty());
    assert!(board.stalemate());
    assert!(board.is_draw() || board.stalemate());
}

#[test]
fn chess960_shredder_fen_castling_rights_are_accepted() {
    let board =
        Board::from_fen("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P1N2/NPP1P1PP/BQ1BR1KR w HEhe - 0 9")
            .unwrap();
    assert_eq!(board.castling_rights_string(), "KQkq");
}

#[test]
fn chess960_queen_side_castle_move_is_present() {
    // King starts on g1 with its queen-side rook on e1, not a1 — rights-string and
    // best-move-legality checks alone don't catch a move generator that still assumes the
    // standard corner squares and silently drops this castle from the list.
    use chess_core::SQ;
    let board =
        Board::from_fen("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P1N2/NPP1P1PP/BQ1BR1KR w HEhe - 0 9")
            .unwrap();
    let moves = board.generate_moves();
    assert!(moves.iter().any(|sm| {
        let m = sm.bit_move;
        m.is_castle() && !m.is_king_castle() && m.get_src() == SQ::G1 && m.get_dest() == SQ::E1
    }));
}

#[test]
fn triple_repetition_is_detected() {
    let mut board = Board::from_fen(OPENING_POS_FEN).unwrap();
    let knight_shuffle = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];
    for mov in knight_shuffle {
        let m = board
            .generate_moves()
            .iter()
            .find(|sm| sm.bit_move.stringify() == mov)
            .map(|sm| sm.bit_move)
            .unwrap_or_else(|| panic!("{} not legal", mov));
        board.apply_move(m);
    }
    assert!(board.is_repetition(3));
}

#[test]
fn en_passant_capture_is_generated_and_removes_the_captured_pawn() {
    let mut board = Board::from_fen(OPENING_POS_FEN).unwrap();
    for mov in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        let m = board
            .generate_moves()
            .iter()
            .find(|sm| sm.bit_move.stringify() == mov)
            .map(|sm| sm.bit_move)
            .unwrap_or_else(|| panic!("{} not legal", mov));
        board.apply_move(m);
    }
    let ep = board
        .generate_moves()
        .iter()
        .find(|sm| sm.bit_move.stringify() == "e5d6")
        .map(|sm| sm.bit_move)
        .expect("e5d6 en passant should be legal");
    board.apply_move(ep);
    assert!(board.piece_at_sq(chess_core::sq::SQ::D5).is_none());
}
