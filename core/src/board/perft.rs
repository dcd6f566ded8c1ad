//! Perft: exhaustive move-path counting, used to cross-check the move generator against known
//! node counts for a handful of reference positions.

use crate::board::Board;

/// A breakdown of the leaf nodes under a perft search, split by move category. Only `nodes` is
/// required to match a reference count; the rest is diagnostic when a count disagrees and you
/// need to know which move type to suspect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PerftNodes {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftNodes {
    pub fn check(&self, other: &PerftNodes) -> bool {
        self == other
    }
}

/// Plain node count to `depth` plies, the number most engines report for `go perft N`.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for sm in moves.iter() {
        board.apply_move(sm.bit_move);
        nodes += perft(board, depth - 1);
        board.undo_move();
    }
    nodes
}

/// Perft with a per-move-category breakdown, for when the plain node count disagrees with a
/// reference value and the discrepancy needs to be isolated to captures, castles, etc.
pub fn perft_detailed(board: &mut Board, depth: u32) -> PerftNodes {
    let mut counts = PerftNodes::default();
    perft_detailed_inner(board, depth, &mut counts);
    counts
}

fn perft_detailed_inner(board: &mut Board, depth: u32, counts: &mut PerftNodes) {
    if depth == 0 {
        counts.nodes += 1;
        return;
    }
    let moves = board.generate_moves();
    for sm in moves.iter() {
        let m = sm.bit_move;
        if depth == 1 {
            counts.nodes += 1;
            if m.is_capture() {
                counts.captures += 1;
            }
            if m.is_en_passant() {
                counts.en_passant += 1;
            }
            if m.is_castle() {
                counts.castles += 1;
            }
            if m.is_promo() {
                counts.promotions += 1;
            }
            board.apply_move(m);
            if board.in_check() {
                counts.checks += 1;
            }
            board.undo_move();
        } else {
            board.apply_move(m);
            perft_detailed_inner(board, depth - 1, counts);
            board.undo_move();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::{STANDARD_FENS_KIWIPETE, OPENING_POS_FEN};

    #[test]
    fn perft_depth_one_from_start_is_twenty() {
        let mut b = Board::from_fen(OPENING_POS_FEN).unwrap();
        assert_eq!(perft(&mut b, 1), 20);
    }

    #[test]
    fn perft_depth_two_from_start_is_four_hundred() {
        let mut b = Board::from_fen(OPENING_POS_FEN).unwrap();
        assert_eq!(perft(&mut b, 2), 400);
    }

    #[test]
    fn perft_depth_one_from_kiwipete_is_forty_eight() {
        let mut b = Board::from_fen(STANDARD_FENS_KIWIPETE).unwrap();
        assert_eq!(perft(&mut b, 1), 48);
    }
}
