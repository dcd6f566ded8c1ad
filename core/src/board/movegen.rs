//! Move generation: pseudo-legal moves are produced directly from bitboards, one piece type at a
//! time; legal generation additionally filters every candidate through [`Board::legal_move`].
//!
//! Each generator is a free function over `&Board`, generic over [`PlayerTrait`] so the pawn
//! push/capture direction and promotion rank are resolved at compile time per call site rather
//! than branched on `Board::turn()` inside the hot loop — `gen_pseudolegal` dispatches once on
//! colour and everything downstream is monomorphized.

use crate::attack_tables;
use crate::bitboard::BitBoard;
use crate::mono_traits::{BlackType, PlayerTrait, WhiteType};
use crate::move_list::MoveList;
use crate::piece_move::BitMove;
use crate::sq::{NO_SQ, SQ};
use crate::{CastleType, PieceType, Player};

use super::Board;

/// Which subset of moves to produce. Search calls `All` for the main tree and `Captures` (plus
/// promotions) for quiescence; `Evasions` is selected automatically by `gen_pseudolegal` whenever
/// the board is in check, regardless of what the caller asked for, since any other category would
/// miss the moves that actually escape check.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum GenType {
    All,
    Captures,
    Quiets,
}

pub fn gen_legal(board: &Board) -> MoveList {
    let pseudo = gen_pseudolegal(board, GenType::All);
    let mut legal = MoveList::new();
    for sm in pseudo.iter() {
        if board.legal_move(sm.bit_move) {
            legal.push(sm.bit_move);
        }
    }
    legal
}

pub fn gen_legal_captures(board: &Board) -> MoveList {
    let pseudo = gen_pseudolegal(board, GenType::Captures);
    let mut legal = MoveList::new();
    for sm in pseudo.iter() {
        if board.legal_move(sm.bit_move) {
            legal.push(sm.bit_move);
        }
    }
    legal
}

pub fn gen_pseudolegal(board: &Board, gen_type: GenType) -> MoveList {
    let mut list = MoveList::new();
    if board.turn() == Player::White {
        generate::<WhiteType>(board, gen_type, &mut list);
    } else {
        generate::<BlackType>(board, gen_type, &mut list);
    }
    list
}

fn generate<P: PlayerTrait>(board: &Board, gen_type: GenType, list: &mut MoveList) {
    if board.in_check() {
        generate_evasions::<P>(board, list);
        return;
    }

    let us_occ = board.occupied_player(P::player());
    let them_occ = board.occupied_player(P::opp_player());
    let target = match gen_type {
        GenType::All => !us_occ,
        GenType::Captures => them_occ,
        GenType::Quiets => !(us_occ | them_occ),
    };

    generate_pawn_moves::<P>(board, gen_type, target, list);
    generate_piece_moves::<P>(board, PieceType::N, target, list);
    generate_piece_moves::<P>(board, PieceType::B, target, list);
    generate_piece_moves::<P>(board, PieceType::R, target, list);
    generate_piece_moves::<P>(board, PieceType::Q, target, list);
    generate_piece_moves::<P>(board, PieceType::K, target, list);

    if gen_type != GenType::Captures {
        generate_castling::<P>(board, list);
    }
}

fn moves_bb(board: &Board, pt: PieceType, sq: SQ) -> BitBoard {
    let occ = board.occupied();
    match pt {
        PieceType::N => attack_tables::knight_moves(sq),
        PieceType::B => attack_tables::bishop_moves(occ, sq),
        PieceType::R => attack_tables::rook_moves(occ, sq),
        PieceType::Q => attack_tables::queen_moves(occ, sq),
        PieceType::K => attack_tables::king_moves(sq),
        _ => BitBoard(0),
    }
}

fn generate_piece_moves<P: PlayerTrait>(board: &Board, pt: PieceType, target: BitBoard, list: &mut MoveList) {
    let mut pieces = board.piece_bb(P::player(), pt);
    let us_occ = board.occupied_player(P::player());
    while let Some(src) = pieces.pop_lsb() {
        let mut moves = moves_bb(board, pt, src) & !us_occ & target;
        while let Some(dst) = moves.pop_lsb() {
            if board.piece_at_sq(dst).is_some() {
                list.push(BitMove::make_capture(src, dst));
            } else {
                list.push(BitMove::make_quiet(src, dst));
            }
        }
    }
}

fn generate_pawn_moves<P: PlayerTrait>(board: &Board, gen_type: GenType, target: BitBoard, list: &mut MoveList) {
    let rank_7 = BitBoard(P::rank_7());
    let occ = board.occupied();
    let empty = !occ;
    let them_occ = board.occupied_player(P::opp_player());

    let all_pawns = board.piece_bb(P::player(), PieceType::P);
    let pawns_on_7 = all_pawns & rank_7;
    let pawns_off_7 = all_pawns & !rank_7;

    // `left`/`right` below are relative to the mover looking toward the opponent's back rank;
    // the file offset from `down(dst)` to `src` flips sign between colours (white moves toward
    // increasing ranks, black toward decreasing ones), so it's threaded through explicitly.
    let file_delta: i8 = if P::player() == crate::Player::White { 1 } else { -1 };
    let src_of = |dst: SQ, left: bool| -> SQ {
        let base = P::down(dst).0 as i8;
        SQ((if left { base + file_delta } else { base - file_delta }) as u8)
    };

    if gen_type != GenType::Captures {
        let mut push_one = P::shift_forward(pawns_off_7) & empty;
        let mut push_two = P::shift_forward(push_one) & empty & target;
        push_one &= target;

        while let Some(dst) = push_one.pop_lsb() {
            list.push(BitMove::make_quiet(P::down(dst), dst));
        }
        while let Some(dst) = push_two.pop_lsb() {
            list.push(BitMove::make_double_push(P::down(P::down(dst)), dst));
        }
    }

    if pawns_on_7.is_not_empty() && gen_type != GenType::Quiets {
        let mut no_capture_promo = P::shift_forward(pawns_on_7) & empty & target;
        let mut left_cap_promo = P::shift_fwd_left(pawns_on_7) & them_occ & target;
        let mut right_cap_promo = P::shift_fwd_right(pawns_on_7) & them_occ & target;

        while let Some(dst) = no_capture_promo.pop_lsb() {
            push_all_promotions(list, P::down(dst), dst, false);
        }
        while let Some(dst) = left_cap_promo.pop_lsb() {
            push_all_promotions(list, src_of(dst, true), dst, true);
        }
        while let Some(dst) = right_cap_promo.pop_lsb() {
            push_all_promotions(list, src_of(dst, false), dst, true);
        }
    }

    // Diagonal captures (non-promoting) and en-passant.
    if gen_type != GenType::Quiets {
        let mut left_cap = P::shift_fwd_left(pawns_off_7) & them_occ & target;
        let mut right_cap = P::shift_fwd_right(pawns_off_7) & them_occ & target;
        while let Some(dst) = left_cap.pop_lsb() {
            list.push(BitMove::make_capture(src_of(dst, true), dst));
        }
        while let Some(dst) = right_cap.pop_lsb() {
            list.push(BitMove::make_capture(src_of(dst, false), dst));
        }

        if board.ep_square() != NO_SQ {
            let ep_sq = board.ep_square();
            // The captured pawn doesn't sit on `target` itself (it's on the rank the double-push
            // started from, not between-or-on-checker) so it's checked separately: en-passant is
            // only a valid evasion when it removes the single checking pawn.
            let captured_sq = P::down(ep_sq);
            if board.checkers().is_empty() || (board.checkers() & captured_sq.to_bb()).is_not_empty() {
                let mut attackers = pawns_off_7 & attack_tables::pawn_attacks(ep_sq, P::opp_player() == Player::White);
                while let Some(src) = attackers.pop_lsb() {
                    list.push(BitMove::make_ep_capture(src, ep_sq));
                }
            }
        }
    }
}

fn push_all_promotions(list: &mut MoveList, src: SQ, dst: SQ, capture: bool) {
    use crate::piece_move::{MoveFlag, PreMoveInfo};
    for &pt in &[PieceType::Q, PieceType::R, PieceType::B, PieceType::N] {
        list.push(BitMove::init(PreMoveInfo {
            src,
            dst,
            flags: MoveFlag::Promotion { capture, prom: pt },
        }));
    }
}

fn generate_evasions<P: PlayerTrait>(board: &Board, list: &mut MoveList) {
    let ksq = board.king_sq(P::player());
    let checkers = board.checkers();
    let us_occ = board.occupied_player(P::player());
    let them_occ = board.occupied_player(P::opp_player());

    let sliders = checkers & !(board.piece_bb_both_players(PieceType::P) | board.piece_bb_both_players(PieceType::N));
    let mut slider_attacks = BitBoard(0);
    let mut rem = sliders;
    while let Some(check_sq) = rem.pop_lsb() {
        slider_attacks |= attack_tables::line(check_sq, ksq) ^ check_sq.to_bb();
    }

    let mut king_targets = attack_tables::king_moves(ksq) & !slider_attacks & !us_occ;
    while let Some(dst) = king_targets.pop_lsb() {
        if them_occ & dst.to_bb() != BitBoard(0) {
            list.push(BitMove::make_capture(ksq, dst));
        } else {
            list.push(BitMove::make_quiet(ksq, dst));
        }
    }

    if !checkers.more_than_one() {
        let checking_sq = checkers.to_sq();
        let target = attack_tables::between(checking_sq, ksq) | checking_sq.to_bb();

        generate_pawn_moves::<P>(board, GenType::All, target, list);
        generate_piece_moves::<P>(board, PieceType::N, target, list);
        generate_piece_moves::<P>(board, PieceType::B, target, list);
        generate_piece_moves::<P>(board, PieceType::R, target, list);
        generate_piece_moves::<P>(board, PieceType::Q, target, list);
    }
}

fn generate_castling<P: PlayerTrait>(board: &Board, list: &mut MoveList) {
    for &side in &[CastleType::QueenSide, CastleType::KingSide] {
        if !board.can_castle(P::player(), side) || board.castle_impeded(side) {
            continue;
        }
        let rook_sq = board.castling_rook_square(side);
        if board
            .piece_at_sq(rook_sq)
            .map(|p| p.piece_type != PieceType::R)
            .unwrap_or(true)
        {
            continue;
        }

        let king_side = side == CastleType::KingSide;
        let ksq = board.king_sq(P::player());
        let k_to = P::player().relative_square(if king_side { SQ::G1 } else { SQ::C1 });

        let occ = board.occupied();
        let mut s = k_to;
        let mut safe = true;
        loop {
            if (board.attackers_to(s, occ) & board.occupied_player(P::opp_player())).is_not_empty() {
                safe = false;
                break;
            }
            if s == ksq {
                break;
            }
            s = if king_side { SQ(s.0 - 1) } else { SQ(s.0 + 1) };
        }

        if safe {
            use crate::piece_move::{MoveFlag, PreMoveInfo};
            list.push(BitMove::init(PreMoveInfo {
                src: ksq,
                dst: rook_sq,
                flags: MoveFlag::Castle { king_side },
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn start_pos_has_twenty_legal_moves() {
        let b = Board::start_pos();
        assert_eq!(gen_legal(&b).len(), 20);
    }

    #[test]
    fn pseudolegal_count_is_at_least_legal_count() {
        let b = Board::start_pos();
        assert_eq!(gen_pseudolegal(&b, GenType::All).len(), gen_legal(&b).len());
    }
}
