//! Zero-cost, compile-time side-to-move dispatch.
//!
//! Move generation differs by colour only in a handful of directions (pawns push north for
//! White, south for Black) and rank constants (the double-push and promotion ranks mirror across
//! the board). Rather than branching on `Player` inside the hot generation loop, each of those
//! differences is expressed as an associated function on a dummy `WhiteType` / `BlackType`, and
//! `board::movegen` is generic over a `PlayerTrait` bound — the monomorphized `White` and `Black`
//! instantiations each compile down to straight-line code with no runtime branch on colour.

use crate::bitboard::BitBoard;
use crate::masks::*;
use crate::sq::SQ;
use crate::Player;

pub trait PlayerTrait {
    fn player() -> Player;
    fn opp_player() -> Player;

    /// Shifts a bitboard one rank toward the opponent's back rank (the direction a pawn pushes).
    fn shift_forward(bb: BitBoard) -> BitBoard;
    /// Shifts a bitboard one rank toward this player's own back rank.
    fn shift_backward(bb: BitBoard) -> BitBoard;
    /// Squares a pawn of this colour attacks from its current square, diagonally forward-left.
    fn shift_fwd_left(bb: BitBoard) -> BitBoard;
    /// Squares a pawn of this colour attacks from its current square, diagonally forward-right.
    fn shift_fwd_right(bb: BitBoard) -> BitBoard;

    /// Rank pawns of this colour start on.
    fn pawn_start_rank() -> u64;
    /// Rank a pawn of this colour lands on if it promotes.
    fn promo_rank() -> u64;
    /// Rank a pawn of this colour must be on to be one step from promoting.
    fn rank_7() -> u64;

    fn down(sq: SQ) -> SQ;
    fn up(sq: SQ) -> SQ;
}

pub struct WhiteType;
pub struct BlackType;

impl PlayerTrait for WhiteType {
    #[inline(always)]
    fn player() -> Player {
        Player::White
    }
    #[inline(always)]
    fn opp_player() -> Player {
        Player::Black
    }
    #[inline(always)]
    fn shift_forward(bb: BitBoard) -> BitBoard {
        bb << 8_usize
    }
    #[inline(always)]
    fn shift_backward(bb: BitBoard) -> BitBoard {
        bb >> 8_usize
    }
    #[inline(always)]
    fn shift_fwd_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard(FILE_A)) << 7_usize
    }
    #[inline(always)]
    fn shift_fwd_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard(FILE_H)) << 9_usize
    }
    #[inline(always)]
    fn pawn_start_rank() -> u64 {
        RANK_2
    }
    #[inline(always)]
    fn promo_rank() -> u64 {
        RANK_8
    }
    #[inline(always)]
    fn rank_7() -> u64 {
        RANK_7
    }
    #[inline(always)]
    fn down(sq: SQ) -> SQ {
        SQ(sq.0.wrapping_sub(8))
    }
    #[inline(always)]
    fn up(sq: SQ) -> SQ {
        SQ(sq.0.wrapping_add(8))
    }
}

impl PlayerTrait for BlackType {
    #[inline(always)]
    fn player() -> Player {
        Player::Black
    }
    #[inline(always)]
    fn opp_player() -> Player {
        Player::White
    }
    #[inline(always)]
    fn shift_forward(bb: BitBoard) -> BitBoard {
        bb >> 8_usize
    }
    #[inline(always)]
    fn shift_backward(bb: BitBoard) -> BitBoard {
        bb << 8_usize
    }
    #[inline(always)]
    fn shift_fwd_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard(FILE_H)) >> 7_usize
    }
    #[inline(always)]
    fn shift_fwd_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard(FILE_A)) >> 9_usize
    }
    #[inline(always)]
    fn pawn_start_rank() -> u64 {
        RANK_7
    }
    #[inline(always)]
    fn promo_rank() -> u64 {
        RANK_1
    }
    #[inline(always)]
    fn rank_7() -> u64 {
        RANK_2
    }
    #[inline(always)]
    fn down(sq: SQ) -> SQ {
        SQ(sq.0.wrapping_add(8))
    }
    #[inline(always)]
    fn up(sq: SQ) -> SQ {
        SQ(sq.0.wrapping_sub(8))
    }
}
