//! [`Board`]: the chessboard, owning piece placement, castling/en-passant/fifty-move state, and
//! the Zobrist hash, plus the operations (move generation, make/unmake, check and pin detection)
//! that only need that state to answer.
//!
//! A `Board` knows nothing about search, evaluation, or time control — those live in
//! `chess_engine`. It is the thing a search tree, a perft driver, or a UCI front end all hold a
//! (possibly cloned) handle to.

pub mod board_state;
pub mod castle_rights;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod see;

use std::fmt;
use std::sync::Arc;

use crate::attack_tables;
use crate::bitboard::BitBoard;
use crate::masks::*;
use crate::mono_traits::{BlackType, PlayerTrait, WhiteType};
use crate::piece_move::{BitMove, MoveType};
use crate::sq::{NO_SQ, SQ};
use crate::zobrist::ZOBRIST;
use crate::{
    CastleType, Piece, PieceType, Player, ALL_PIECE_TYPES, PIECE_TYPE_CNT, PLAYER_CNT,
};

use self::board_state::BoardState;
use self::castle_rights::Castling;

pub struct Board {
    turn: Player,
    bitboards: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    occ: [BitBoard; PLAYER_CNT],
    occ_all: BitBoard,
    piece_on: [Option<Piece>; 64],
    ply: u16,
    /// Chess960 (Fischer Random) castling: rooks don't start on their standard files, so castling
    /// target squares and the "is this square on the castling path" check are computed from the
    /// actual rook start squares rather than from fixed masks.
    chess960: bool,
    rook_start: [[SQ; 2]; PLAYER_CNT],
    state: Arc<BoardState>,
}

impl Clone for Board {
    fn clone(&self) -> Self {
        self.shallow_clone()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.turn == other.turn
            && self.occ_all == other.occ_all
            && *self.state == *other.state
            && self.piece_on == other.piece_on
    }
}

impl Board {
    pub fn start_pos() -> Board {
        Board::from_fen(fen::OPENING_POS_FEN).expect("the opening FEN is always well-formed")
    }

    /// Constructs a cheap clone sharing the state history. Searching a line from here and then
    /// dropping the clone (rather than undoing back through it) is always safe; only call
    /// `undo_move` on a board as many times as moves were applied to it or a clone of it.
    pub fn shallow_clone(&self) -> Board {
        Board {
            turn: self.turn,
            bitboards: self.bitboards,
            occ: self.occ,
            occ_all: self.occ_all,
            piece_on: self.piece_on,
            ply: self.ply,
            chess960: self.chess960,
            rook_start: self.rook_start,
            state: Arc::clone(&self.state),
        }
    }

    fn empty_with_state(state: BoardState) -> Board {
        Board {
            turn: Player::White,
            bitboards: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            occ: [BitBoard(0); PLAYER_CNT],
            occ_all: BitBoard(0),
            piece_on: [None; 64],
            ply: 0,
            chess960: false,
            rook_start: [
                [SQ(ROOK_WHITE_KSIDE_START), SQ(ROOK_WHITE_QSIDE_START)],
                [SQ(ROOK_BLACK_KSIDE_START), SQ(ROOK_BLACK_QSIDE_START)],
            ],
            state: Arc::new(state),
        }
    }

    // ---- piece placement -------------------------------------------------

    #[inline]
    fn put_piece(&mut self, piece: Piece, sq: SQ) {
        debug_assert!(self.piece_on[sq.0 as usize].is_none());
        let bb = sq.to_bb();
        self.bitboards[piece.player as usize][piece.piece_type as usize] |= bb;
        self.occ[piece.player as usize] |= bb;
        self.occ_all |= bb;
        self.piece_on[sq.0 as usize] = Some(piece);
    }

    #[inline]
    fn remove_piece(&mut self, sq: SQ) -> Piece {
        let piece = self.piece_on[sq.0 as usize].expect("remove_piece called on empty square");
        let bb = sq.to_bb();
        self.bitboards[piece.player as usize][piece.piece_type as usize] &= !bb;
        self.occ[piece.player as usize] &= !bb;
        self.occ_all &= !bb;
        self.piece_on[sq.0 as usize] = None;
        piece
    }

    #[inline]
    fn move_piece(&mut self, from: SQ, to: SQ) -> Piece {
        let piece = self.remove_piece(from);
        self.put_piece(piece, to);
        piece
    }

    // ---- accessors --------------------------------------------------------

    #[inline(always)]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline(always)]
    pub fn moves_played(&self) -> u16 {
        self.ply
    }

    #[inline(always)]
    pub fn rule_50(&self) -> i16 {
        self.state.rule_50
    }

    #[inline(always)]
    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    #[inline(always)]
    pub fn piece_at_sq(&self, sq: SQ) -> Option<Piece> {
        self.piece_on[sq.0 as usize]
    }

    #[inline(always)]
    pub fn piece_bb(&self, player: Player, pt: PieceType) -> BitBoard {
        self.bitboards[player as usize][pt as usize]
    }

    #[inline(always)]
    pub fn piece_bb_both_players(&self, pt: PieceType) -> BitBoard {
        self.bitboards[0][pt as usize] | self.bitboards[1][pt as usize]
    }

    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.occ_all
    }

    #[inline(always)]
    pub fn occupied_player(&self, player: Player) -> BitBoard {
        self.occ[player as usize]
    }

    #[inline]
    pub fn count_piece(&self, player: Player, pt: PieceType) -> u32 {
        self.piece_bb(player, pt).count_bits() as u32
    }

    #[inline]
    pub fn king_sq(&self, player: Player) -> SQ {
        self.piece_bb(player, PieceType::K).to_sq()
    }

    #[inline(always)]
    pub fn ep_square(&self) -> SQ {
        self.state.ep_square
    }

    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.state.zobrist
    }

    #[inline(always)]
    pub fn pawn_key(&self) -> u64 {
        self.state.pawn_key
    }

    #[inline(always)]
    pub fn material_key(&self) -> u64 {
        self.state.material_key
    }

    #[inline(always)]
    pub fn psq_score(&self) -> crate::score::Score {
        self.state.psq
    }

    #[inline(always)]
    pub fn non_pawn_material(&self, player: Player) -> i32 {
        self.state.nonpawn_material[player as usize]
    }

    #[inline(always)]
    pub fn captured_piece(&self) -> Option<PieceType> {
        self.state.captured_piece
    }

    #[inline(always)]
    pub fn checkers(&self) -> BitBoard {
        self.state.checkers_bb
    }

    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.state.checkers_bb.is_not_empty()
    }

    #[inline(always)]
    pub fn last_move(&self) -> BitMove {
        self.state.prev_move
    }

    #[inline(always)]
    pub fn pinned_pieces(&self, player: Player) -> BitBoard {
        self.state.blockers_king[player as usize] & self.occupied_player(player)
    }

    /// Our pieces that, if moved, would expose the opposing king to check along the line they
    /// currently block.
    #[inline]
    pub fn discovered_check_candidates(&self) -> BitBoard {
        self.state.blockers_king[self.turn.other() as usize] & self.occupied_player(self.turn)
    }

    #[inline]
    pub fn can_castle(&self, player: Player, side: CastleType) -> bool {
        self.state.castling.castle_rights(player, side)
    }

    #[inline]
    pub fn castling_rook_square(&self, side: CastleType) -> SQ {
        self.rook_start[self.turn as usize][side as usize]
    }

    /// Whether anything currently occupies the squares the king or rook must pass through to
    /// castle `side` (excluding the king's and rook's own starting squares).
    pub fn castle_impeded(&self, side: CastleType) -> bool {
        let ksq = self.king_sq(self.turn);
        let rsq = self.castling_rook_square(side);
        let k_to = self
            .turn
            .relative_square(if side == CastleType::KingSide { SQ::G1 } else { SQ::C1 });
        let r_to = self
            .turn
            .relative_square(if side == CastleType::KingSide { SQ::F1 } else { SQ::D1 });
        let mut path = (attack_tables::between(ksq, k_to) | k_to.to_bb())
            | (attack_tables::between(rsq, r_to) | r_to.to_bb());
        path &= !ksq.to_bb() & !rsq.to_bb();
        (path & self.occ_all).is_not_empty()
    }

    // ---- attacks / checks --------------------------------------------------

    /// Every piece of either colour currently attacking `sq`, given board occupancy `occ`
    /// (passed explicitly so callers can probe "what would attack this square if some piece were
    /// removed/added", as evasion and castling-through-check generation both need).
    pub fn attackers_to(&self, sq: SQ, occ: BitBoard) -> BitBoard {
        (attack_tables::pawn_attacks(sq, false) & self.piece_bb(Player::White, PieceType::P))
            | (attack_tables::pawn_attacks(sq, true) & self.piece_bb(Player::Black, PieceType::P))
            | (attack_tables::knight_moves(sq) & self.piece_bb_both_players(PieceType::N))
            | (attack_tables::bishop_moves(occ, sq)
                & (self.piece_bb_both_players(PieceType::B) | self.piece_bb_both_players(PieceType::Q)))
            | (attack_tables::rook_moves(occ, sq)
                & (self.piece_bb_both_players(PieceType::R) | self.piece_bb_both_players(PieceType::Q)))
            | (attack_tables::king_moves(sq) & self.piece_bb_both_players(PieceType::K))
    }

    #[inline]
    pub fn attacks_to(&self, sq: SQ) -> BitBoard {
        self.attackers_to(sq, self.occ_all)
    }

    pub fn square_attacked_by(&self, sq: SQ, by: Player) -> bool {
        (self.attacks_to(sq) & self.occupied_player(by)).is_not_empty()
    }

    /// Computes, for the king on `ksq` belonging to `king_owner`, which pieces block a would-be
    /// pinning slider (`blockers`) and which enemy sliders are doing the pinning (`pinners`).
    /// A blocker can be either side's piece; only one piece may stand between the king and the
    /// slider for the pin to count.
    fn slider_blockers(&self, sliders: BitBoard, ksq: SQ, king_owner: Player) -> (BitBoard, BitBoard) {
        let mut blockers = BitBoard(0);
        let mut pinners = BitBoard(0);

        let snipers = sliders
            & ((attack_tables::rook_moves(BitBoard(0), ksq)
                & (self.piece_bb_both_players(PieceType::R) | self.piece_bb_both_players(PieceType::Q)))
                | (attack_tables::bishop_moves(BitBoard(0), ksq)
                    & (self.piece_bb_both_players(PieceType::B)
                        | self.piece_bb_both_players(PieceType::Q))));

        let occupied_excl_snipers = self.occ_all & !snipers;

        let mut remaining = snipers;
        while let Some(sniper_sq) = remaining.pop_lsb() {
            let between = attack_tables::between(ksq, sniper_sq) & occupied_excl_snipers;
            if between.is_not_empty() && !between.more_than_one() {
                blockers |= between;
                if (between & self.occupied_player(king_owner)).is_not_empty() {
                    pinners |= sniper_sq.to_bb();
                }
            }
        }
        (blockers, pinners)
    }

    /// Recomputes `checkers_bb`, `blockers_king` and `pinners_king` for the position as it
    /// currently stands. Called once after every move (and once at `Board` construction).
    fn set_check_info(state: &mut BoardState, board_after: &BoardSnapshot) {
        let white_ksq = board_after.king_sq(Player::White);
        let black_ksq = board_after.king_sq(Player::Black);

        let (w_blockers, b_pinners) =
            board_after.slider_blockers(board_after.occupied_player(Player::Black), white_ksq, Player::White);
        let (b_blockers, w_pinners) =
            board_after.slider_blockers(board_after.occupied_player(Player::White), black_ksq, Player::Black);

        state.blockers_king[Player::White as usize] = w_blockers;
        state.blockers_king[Player::Black as usize] = b_blockers;
        state.pinners_king[Player::White as usize] = w_pinners;
        state.pinners_king[Player::Black as usize] = b_pinners;

        let turn = board_after.turn();
        let their_ksq = board_after.king_sq(!turn);
        for &pt in ALL_PIECE_TYPES.iter() {
            state.check_sqs[pt as usize] = match pt {
                PieceType::P => attack_tables::pawn_attacks(their_ksq, !turn == Player::White),
                PieceType::N => attack_tables::knight_moves(their_ksq),
                PieceType::B => attack_tables::bishop_moves(board_after.occupied(), their_ksq),
                PieceType::R => attack_tables::rook_moves(board_after.occupied(), their_ksq),
                PieceType::Q => {
                    attack_tables::bishop_moves(board_after.occupied(), their_ksq)
                        | attack_tables::rook_moves(board_after.occupied(), their_ksq)
                }
                _ => BitBoard(0),
            };
        }

        let our_ksq = board_after.king_sq(turn);
        state.checkers_bb = board_after.attackers_to(our_ksq, board_after.occupied()) & board_after.occupied_player(!turn);
    }

    /// Refreshes check/pin bookkeeping for the board as it stands right now. Must be called
    /// after any direct mutation of piece placement (construction from FEN, `apply_move`).
    fn refresh_check_info(&mut self) {
        let mut state = (*self.state).clone();
        Board::set_check_info(&mut state, &BoardSnapshot(self));
        self.state = Arc::new(state);
    }

    // ---- legality -----------------------------------------------------------

    /// Whether a pseudo-legal move `m` is actually legal: the moving side's king must not be left
    /// in check afterward. Sufficient to check directly for king moves, en-passant (which can
    /// expose a horizontal pin), and pieces pinned along the line from king to `m`'s destination.
    pub fn legal_move(&self, m: BitMove) -> bool {
        let us = self.turn;
        let ksq = self.king_sq(us);
        let from = m.get_src();
        let to = m.get_dest();

        if m.is_en_passant() {
            let cap_sq = if us == Player::White { SQ(to.0 - 8) } else { SQ(to.0 + 8) };
            let mut occ_after = self.occ_all;
            occ_after &= !from.to_bb();
            occ_after &= !cap_sq.to_bb();
            occ_after |= to.to_bb();
            let attackers = (attack_tables::rook_moves(occ_after, ksq)
                & (self.piece_bb(!us, PieceType::R) | self.piece_bb(!us, PieceType::Q)))
                | (attack_tables::bishop_moves(occ_after, ksq)
                    & (self.piece_bb(!us, PieceType::B) | self.piece_bb(!us, PieceType::Q)));
            return attackers.is_empty();
        }

        if from == ksq {
            if m.is_castle() {
                return true; // castling path safety already checked during generation.
            }
            return !self.square_attacked_by(to, !us);
        }

        let pinned = self.pinned_pieces(us);
        if (pinned & from.to_bb()).is_empty() {
            return true;
        }
        (attack_tables::line(from, ksq) & to.to_bb()).is_not_empty()
    }

    // ---- make / unmake --------------------------------------------------------

    pub fn apply_move(&mut self, m: BitMove) {
        let us = self.turn;
        let them = !us;
        let from = m.get_src();
        let to = m.get_dest();

        let prev_state = Arc::clone(&self.state);
        let mut new_state = self.state.partial_clone(prev_state);
        new_state.ply = self.state.ply + 1;
        new_state.rule_50 = self.state.rule_50 + 1;
        new_state.prev_move = m;

        let mut zob = self.state.zobrist;
        let mut pawn_key = self.state.pawn_key;
        let mut mat_key = self.state.material_key;
        zob ^= ZOBRIST.side();

        let moved_piece = self.piece_at_sq(from).expect("apply_move: no piece on source square");
        debug_assert_eq!(moved_piece.player, us);

        // Captured piece, accounting for en-passant (captured pawn isn't on `to`).
        let cap_sq = if m.is_en_passant() {
            if us == Player::White { SQ(to.0 - 8) } else { SQ(to.0 + 8) }
        } else {
            to
        };
        let captured = if m.is_capture() { self.piece_at_sq(cap_sq) } else { None };

        if m.is_castle() {
            let king_side = m.is_king_castle();
            let side = if king_side { CastleType::KingSide } else { CastleType::QueenSide };
            let rook_from = to; // castle moves encode the rook's square as `dst`.
            let k_to = us.relative_square(if king_side { SQ::G1 } else { SQ::C1 });
            let r_to = us.relative_square(if king_side { SQ::F1 } else { SQ::D1 });

            zob ^= ZOBRIST.piece_sq(from, moved_piece);
            zob ^= ZOBRIST.piece_sq(k_to, moved_piece);
            let rook = Piece::new(us, PieceType::R);
            zob ^= ZOBRIST.piece_sq(rook_from, rook);
            zob ^= ZOBRIST.piece_sq(r_to, rook);

            self.remove_piece(from);
            self.remove_piece(rook_from);
            self.put_piece(moved_piece, k_to);
            self.put_piece(rook, r_to);
            let _ = side;
        } else {
            if let Some(cap) = captured {
                zob ^= ZOBRIST.piece_sq(cap_sq, cap);
                // Material key: XOR out the top count-slot for the captured piece's (player,
                // type), the same count-as-square-index trick `Board::from_fen` uses to build it
                // from scratch.
                let cap_count_before = self.count_piece(cap.player, cap.piece_type);
                mat_key ^= ZOBRIST.piece_sq(SQ((cap_count_before - 1) as u8), cap);
                if cap.piece_type == PieceType::P {
                    pawn_key ^= ZOBRIST.piece_sq(cap_sq, cap);
                }
                self.remove_piece(cap_sq);
                new_state.rule_50 = 0;
            }

            zob ^= ZOBRIST.piece_sq(from, moved_piece);
            if moved_piece.piece_type == PieceType::P {
                pawn_key ^= ZOBRIST.piece_sq(from, moved_piece);
            }
            self.remove_piece(from);

            if m.is_promo() {
                let promoted = Piece::new(us, m.promo_piece());
                zob ^= ZOBRIST.piece_sq(to, promoted);
                // The promoting pawn's slot was the top one before this removal; the promoted
                // piece's new slot is whatever count that type had before this addition.
                let pawn_count_after = self.count_piece(us, PieceType::P);
                mat_key ^= ZOBRIST.piece_sq(SQ(pawn_count_after as u8), moved_piece);
                let promoted_count_before = self.count_piece(us, promoted.piece_type);
                mat_key ^= ZOBRIST.piece_sq(SQ(promoted_count_before as u8), promoted);
                self.put_piece(promoted, to);
            } else {
                zob ^= ZOBRIST.piece_sq(to, moved_piece);
                if moved_piece.piece_type == PieceType::P {
                    pawn_key ^= ZOBRIST.piece_sq(to, moved_piece);
                }
                self.put_piece(moved_piece, to);
            }

            if moved_piece.piece_type == PieceType::P {
                new_state.rule_50 = 0;
            }
        }

        // En-passant target square: clear the old one, set a new one on a double push.
        if self.state.ep_square != NO_SQ {
            zob ^= ZOBRIST.en_passant_file(self.state.ep_square);
        }
        new_state.ep_square = NO_SQ;
        if m.is_double_push() {
            let ep_sq = if us == Player::White { SQ(from.0 + 8) } else { SQ(from.0 - 8) };
            new_state.ep_square = ep_sq;
            zob ^= ZOBRIST.en_passant_file(ep_sq);
        }

        // Castling rights.
        let old_rights = new_state.castling.bits;
        let cleared = new_state.castling.update_castling(to, from);
        let _ = old_rights;
        if cleared != 0 {
            zob ^= ZOBRIST.castling(self.state.castling.bits);
            zob ^= ZOBRIST.castling(new_state.castling.bits);
        }

        new_state.zobrist = zob;
        new_state.pawn_key = pawn_key;
        new_state.material_key = mat_key;
        new_state.captured_piece = captured.map(|p| p.piece_type);
        self.ply += 1;
        self.turn = them;
        self.state = Arc::new(new_state);
        self.refresh_check_info();
    }

    /// Reverses the most recently applied move. Panics if no move has been applied (or if the
    /// board was cloned past the point where more moves than were actually played are undone).
    pub fn undo_move(&mut self) {
        let m = self.state.prev_move;
        debug_assert!(!m.is_null(), "undo_move called with no move to undo");

        let them = self.turn;
        let us = !them;
        let from = m.get_src();
        let to = m.get_dest();
        let captured = self.state.captured_piece;

        if m.is_castle() {
            let king_side = m.is_king_castle();
            let rook_from = to;
            let k_to = us.relative_square(if king_side { SQ::G1 } else { SQ::C1 });
            let r_to = us.relative_square(if king_side { SQ::F1 } else { SQ::D1 });
            self.remove_piece(k_to);
            self.remove_piece(r_to);
            self.put_piece(Piece::new(us, PieceType::K), from);
            self.put_piece(Piece::new(us, PieceType::R), rook_from);
        } else {
            let moved_piece = if m.is_promo() {
                Piece::new(us, PieceType::P)
            } else {
                self.piece_at_sq(to).expect("undo_move: destination square is empty")
            };
            self.remove_piece(to);
            self.put_piece(moved_piece, from);

            if let Some(cap_pt) = captured {
                let cap_sq = if m.is_en_passant() {
                    if us == Player::White { SQ(to.0 - 8) } else { SQ(to.0 + 8) }
                } else {
                    to
                };
                self.put_piece(Piece::new(them, cap_pt), cap_sq);
            }
        }

        self.turn = us;
        self.ply -= 1;
        let prev = self.state.get_prev().expect("undo_move: no previous state");
        self.state = prev;
    }

    /// Applies a null move: flips the side to move without moving a piece. Used by null-move
    /// pruning in search; never legal to call while in check.
    pub fn apply_null_move(&mut self) {
        debug_assert!(!self.in_check());
        let prev_state = Arc::clone(&self.state);
        let mut new_state = self.state.partial_clone(prev_state);
        new_state.ply = self.state.ply + 1;
        new_state.rule_50 = self.state.rule_50 + 1;
        new_state.prev_move = BitMove::null();

        let mut zob = self.state.zobrist ^ ZOBRIST.side();
        if self.state.ep_square != NO_SQ {
            zob ^= ZOBRIST.en_passant_file(self.state.ep_square);
        }
        new_state.ep_square = NO_SQ;
        new_state.zobrist = zob;
        new_state.captured_piece = None;

        self.turn = !self.turn;
        self.state = Arc::new(new_state);
        self.refresh_check_info();
    }

    pub fn undo_null_move(&mut self) {
        debug_assert!(self.state.prev_move.is_null());
        self.turn = !self.turn;
        let prev = self.state.get_prev().expect("undo_null_move: no previous state");
        self.state = prev;
    }

    // ---- move generation entry points -----------------------------------------

    pub fn generate_moves(&self) -> crate::move_list::MoveList {
        movegen::gen_legal(self)
    }

    pub fn generate_pseudolegal_moves(&self) -> crate::move_list::MoveList {
        movegen::gen_pseudolegal(self, movegen::GenType::All)
    }

    /// True if the side to move has no legal moves: combined with [`Board::in_check`] this tells
    /// checkmate (in check) from stalemate (not in check) apart.
    pub fn is_stalemate_or_mate(&self) -> bool {
        self.generate_moves().is_empty()
    }

    pub fn checkmate(&self) -> bool {
        self.in_check() && self.is_stalemate_or_mate()
    }

    pub fn stalemate(&self) -> bool {
        !self.in_check() && self.is_stalemate_or_mate()
    }

    /// Fifty-move rule, or insufficient material (the two lone-king-ish draws a core engine
    /// should recognize without probing a tablebase).
    pub fn is_draw(&self) -> bool {
        if self.state.rule_50 >= 100 {
            return true;
        }
        self.is_material_draw()
    }

    fn is_material_draw(&self) -> bool {
        let total = self.occ_all.count_bits();
        if total > 4 {
            return false;
        }
        let has_major_or_pawn = ALL_PIECE_TYPES.iter().any(|&pt| {
            matches!(pt, PieceType::P | PieceType::R | PieceType::Q)
                && self.piece_bb_both_players(pt).is_not_empty()
        });
        if has_major_or_pawn {
            return false;
        }
        let minors = self.piece_bb_both_players(PieceType::N).count_bits()
            + self.piece_bb_both_players(PieceType::B).count_bits();
        minors <= 1
    }

    /// Whether the current position has occurred at least `count` times before in this board's
    /// history (counting the current position), scanning back only as far as the last
    /// irreversible move (capture, pawn move, or castle) since repetition can't reach further.
    pub fn is_repetition(&self, count: u32) -> bool {
        let mut seen = 1;
        let mut walk = self.state.get_prev();
        let mut plies_back = 0i16;
        while let Some(st) = walk {
            plies_back += 1;
            if plies_back > self.state.rule_50 {
                break;
            }
            if st.zobrist == self.state.zobrist {
                seen += 1;
                if seen >= count {
                    return true;
                }
            }
            walk = st.get_prev();
        }
        false
    }

    pub fn pretty_string(&self) -> String {
        let mut s = String::new();
        for rank in (0..8).rev() {
            s.push_str(&format!("{} | ", rank + 1));
            for file in 0..8 {
                let sq = SQ((rank * 8 + file) as u8);
                let c = self.piece_at_sq(sq).map(|p| p.char()).unwrap_or('.');
                s.push(c);
                s.push(' ');
            }
            s.push('\n');
        }
        s.push_str("    ---------------\n");
        s.push_str("    a b c d e f g h\n");
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board({})", fen::board_to_fen(self))
    }
}

/// Thin helper so [`Board::set_check_info`] can call `Board`'s read-only accessors on the
/// half-constructed board without fighting the borrow checker over the `&mut BoardState`.
struct BoardSnapshot<'a>(&'a Board);

impl<'a> std::ops::Deref for BoardSnapshot<'a> {
    type Target = Board;
    fn deref(&self) -> &Board {
        self.0
    }
}

#[allow(dead_code)]
fn use_player_trait_markers() {
    // `WhiteType`/`BlackType` are consumed by `movegen`; referenced here so an IDE doesn't flag
    // the `use` above as unused on builds where movegen's generics are fully inlined away.
    fn assert_trait<P: PlayerTrait>() {}
    assert_trait::<WhiteType>();
    assert_trait::<BlackType>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_has_correct_material() {
        let b = Board::start_pos();
        assert_eq!(b.count_piece(Player::White, PieceType::P), 8);
        assert_eq!(b.count_piece(Player::Black, PieceType::P), 8);
        assert_eq!(b.occupied().count_bits(), 32);
        assert_eq!(b.turn(), Player::White);
    }

    #[test]
    fn apply_and_undo_move_restores_position() {
        let mut b = Board::start_pos();
        let before = b.zobrist();
        let m = b
            .generate_moves()
            .iter()
            .find(|sm| sm.bit_move.get_src() == SQ::E2 && sm.bit_move.get_dest() == SQ::E4)
            .unwrap()
            .bit_move;
        b.apply_move(m);
        assert_ne!(b.zobrist(), before);
        assert_eq!(b.turn(), Player::Black);
        b.undo_move();
        assert_eq!(b.zobrist(), before);
        assert_eq!(b.turn(), Player::White);
    }

    #[test]
    fn king_in_check_after_scholar_setup() {
        let mut b = Board::start_pos();
        for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5"] {
            let src = SQ::make(
                crate::File::from_char(mv.as_bytes()[0] as char),
                crate::Rank::from_char(mv.as_bytes()[1] as char),
            );
            let dst = SQ::make(
                crate::File::from_char(mv.as_bytes()[2] as char),
                crate::Rank::from_char(mv.as_bytes()[3] as char),
            );
            let picked = b
                .generate_moves()
                .iter()
                .find(|sm| sm.bit_move.get_src() == src && sm.bit_move.get_dest() == dst)
                .unwrap()
                .bit_move;
            b.apply_move(picked);
        }
        assert!(b.in_check());
    }
}
