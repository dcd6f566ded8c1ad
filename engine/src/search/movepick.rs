//! Move ordering: scores a node's move list so the search tries the moves most likely to cause
//! a cutoff first. Grounded on the teacher's `MovePicker` staged ordering (TT move, captures by
//! MVV/LVA-then-SEE, killers, history), simplified to a single-pass scoring function since this
//! crate's search doesn't (yet) stage move generation the way the teacher's does.

use chess_core::board::Board;
use chess_core::move_list::MoveList;
use chess_core::piece_move::BitMove;
use chess_core::PieceType;

use super::history::HistoryTable;

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE_SCORE: i32 = 100_000;
const KILLER_SCORE: [i32; 2] = [90_000, 89_000];

/// Assigns an ordering score to every move in `moves`, then sorts highest-first.
pub fn order_moves(
    board: &Board,
    moves: &mut MoveList,
    tt_move: BitMove,
    killers: [BitMove; 2],
    history: &HistoryTable,
) {
    for sm in moves.iter_mut() {
        let m = sm.bit_move;
        sm.score = if m == tt_move {
            TT_MOVE_SCORE
        } else if m.is_capture() {
            CAPTURE_BASE_SCORE + mvv_lva(board, m)
        } else if m == killers[0] {
            KILLER_SCORE[0]
        } else if m == killers[1] {
            KILLER_SCORE[1]
        } else {
            history.get(board.turn(), m)
        };
    }
    moves.sort();
}

/// Orders only captures/promotions by MVV/LVA, for quiescence search where there's no history
/// table or killer slots to consult — quiet moves are never even generated into this list's
/// interesting subset, but the list itself still contains them, so they're left at score 0 and
/// sorted after every capture.
pub fn order_captures(board: &Board, moves: &mut MoveList) {
    for sm in moves.iter_mut() {
        sm.score = if sm.bit_move.is_capture() {
            CAPTURE_BASE_SCORE + mvv_lva(board, sm.bit_move)
        } else {
            0
        };
    }
    moves.sort();
}

fn mvv_lva(board: &Board, m: BitMove) -> i32 {
    let attacker = board
        .piece_at_sq(m.get_src())
        .map(|p| p.piece_type.value())
        .unwrap_or(0);
    // En-passant's victim isn't on the destination square, but it's always a pawn either way.
    let victim = board
        .piece_at_sq(m.get_dest())
        .map(|p| p.piece_type.value())
        .unwrap_or(PieceType::P.value());
    victim * 16 - attacker
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::fen::OPENING_POS_FEN;

    #[test]
    fn tt_move_sorts_first() {
        let board = Board::from_fen(OPENING_POS_FEN).unwrap();
        let mut moves = board.generate_moves();
        let tt_move = moves.iter().nth(5).unwrap().bit_move;
        let history = HistoryTable::new();
        order_moves(&board, &mut moves, tt_move, [BitMove::null(); 2], &history);
        assert_eq!(moves.iter().next().unwrap().bit_move, tt_move);
    }
}
