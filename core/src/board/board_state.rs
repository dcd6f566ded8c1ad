//! `BoardState`: the part of a position's state that's cheaper to snapshot and link into a
//! history chain than to recompute from scratch on every unmake.
//!
//! Each `Board::apply_move` pushes a new `BoardState` that links back to its predecessor through
//! an `Arc`, so `Board::undo_move` just swaps the current state out for `prev` — no explicit
//! inverse-move bookkeeping required beyond what [`crate::piece_move::BitMove`] already encodes.
//! Cloning a `Board` (e.g. to search a line speculatively) is then an `Arc` clone, not a deep
//! copy of the whole history.

use std::sync::Arc;

use crate::bitboard::BitBoard;
use crate::board::castle_rights::Castling;
use crate::piece_move::BitMove;
use crate::score::Score;
use crate::sq::{NO_SQ, SQ};
use crate::{PieceType, PIECE_TYPE_CNT, PLAYER_CNT};

#[derive(Clone)]
pub struct BoardState {
    pub castling: Castling,
    /// Halfmove clock since the last capture, pawn move, or castle (the fifty-move rule).
    pub rule_50: i16,
    pub ply: u16,
    /// The square behind a just-played double pawn push, or [`NO_SQ`] if none.
    pub ep_square: SQ,
    pub psq: Score,

    pub zobrist: u64,
    pub pawn_key: u64,
    pub material_key: u64,
    pub nonpawn_material: [i32; PLAYER_CNT],
    pub captured_piece: Option<PieceType>,
    pub checkers_bb: BitBoard,
    /// Per player, the pieces (of either color) standing between that player's king and a would-be
    /// pinning slider.
    pub blockers_king: [BitBoard; PLAYER_CNT],
    pub pinners_king: [BitBoard; PLAYER_CNT],
    /// Per piece type, squares from which that piece would give check to the side to move.
    pub check_sqs: [BitBoard; PIECE_TYPE_CNT],
    pub prev_move: BitMove,
    pub prev: Option<Arc<BoardState>>,
}

impl BoardState {
    pub fn blank() -> BoardState {
        BoardState {
            castling: Castling::empty_set(),
            rule_50: 0,
            ply: 0,
            ep_square: NO_SQ,
            psq: Score::ZERO,
            zobrist: 0,
            pawn_key: 0,
            material_key: 0,
            nonpawn_material: [0; PLAYER_CNT],
            captured_piece: None,
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            prev_move: BitMove::null(),
            prev: None,
        }
    }

    pub fn starting() -> BoardState {
        BoardState {
            castling: Castling::all_castling(),
            ..BoardState::blank()
        }
    }

    /// Copies the fields carried forward unconditionally from one ply to the next; the caller
    /// fills in everything that depends on the move just played (capture, checkers, pins, ...).
    pub fn partial_clone(&self, prev: Arc<BoardState>) -> BoardState {
        BoardState {
            castling: self.castling,
            rule_50: self.rule_50,
            ply: self.ply,
            ep_square: self.ep_square,
            psq: self.psq,
            zobrist: self.zobrist,
            pawn_key: self.pawn_key,
            material_key: self.material_key,
            nonpawn_material: self.nonpawn_material,
            captured_piece: None,
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            prev_move: BitMove::null(),
            prev: Some(prev),
        }
    }

    #[inline]
    pub fn get_prev(&self) -> Option<Arc<BoardState>> {
        self.prev.clone()
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &BoardState) -> bool {
        self.castling == other.castling
            && self.rule_50 == other.rule_50
            && self.ep_square == other.ep_square
            && self.zobrist == other.zobrist
            && self.captured_piece == other.captured_piece
            && self.checkers_bb == other.checkers_bb
            && self.blockers_king == other.blockers_king
            && self.pinners_king == other.pinners_king
            && self.check_sqs == other.check_sqs
    }
}
