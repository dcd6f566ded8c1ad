//! Static position evaluation: material + positional tables, pawn structure, and mobility,
//! tapered between a middlegame and endgame score by the material phase. Grounded on the
//! teacher's lazy two-stage evaluation (cheap terms first, bail out early when they're already
//! decisive) but without the king-safety/threats machinery that needs a fuller attack model than
//! this crate's board exposes.

pub mod material;
pub mod pawn_table;
pub mod psqt;

use chess_core::attack_tables;
use chess_core::board::Board;
use chess_core::score::{Score, Value};
use chess_core::{BitBoard, Piece, PieceType, Player, ALL_PLAYERS};

use material::{Material, PHASE_MID_GAME};
use pawn_table::PawnTable;

const LAZY_THRESHOLD: Value = 1500;

const MOBILITY_BONUS: [Score; 6] = [
    Score(0, 0),   // unused (pawn mobility isn't counted this way)
    Score(4, 4),   // Knight
    Score(5, 3),   // Bishop
    Score(3, 4),   // Rook
    Score(1, 2),   // Queen
    Score(0, 0),   // King
];

/// Per-search-thread evaluation context: the caches that make repeated calls to `evaluate`
/// cheap across the many positions visited during a search.
pub struct Evaluator {
    pawns: PawnTable,
    material: Material,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            pawns: PawnTable::new(),
            material: Material::new(),
        }
    }

    pub fn clear(&mut self) {
        self.pawns.clear();
        self.material.clear();
    }

    /// Evaluates `board` from the side-to-move's perspective: positive means the side to move is
    /// better off.
    pub fn evaluate(&mut self, board: &Board) -> Value {
        let material_entry = self.material.probe(board);
        let pawn_entry = self.pawns.probe(board);

        let lazy_score = material_entry.score() + pawn_entry.pawns_score() + psqt_score(board);
        let lazy_value = taper(lazy_score, material_entry.phase);
        if lazy_value.abs() > LAZY_THRESHOLD {
            return if board.turn() == Player::White {
                lazy_value
            } else {
                -lazy_value
            };
        }

        let mobility = mobility_score(board);
        let total = lazy_score + mobility;
        let value = taper(total, material_entry.phase);

        if board.turn() == Player::White {
            value
        } else {
            -value
        }
    }
}

fn taper(score: Score, phase: i32) -> Value {
    (score.mg() * phase + score.eg() * (PHASE_MID_GAME - phase)) / PHASE_MID_GAME.max(1)
}

fn psqt_score(board: &Board) -> Score {
    let mut total = Score::ZERO;
    for &player in ALL_PLAYERS.iter() {
        for &pt in &[
            PieceType::P,
            PieceType::N,
            PieceType::B,
            PieceType::R,
            PieceType::Q,
            PieceType::K,
        ] {
            let mut bb = board.piece_bb(player, pt);
            while let Some(sq) = bb.pop_lsb() {
                total += psqt::psq(Piece::new(player, pt), sq);
            }
        }
    }
    total
}

/// Pseudo-legal attack-square count for knights/bishops/rooks/queens, excluding squares occupied
/// by our own pawns or attacked by an enemy pawn, the same mobility-area definition the teacher's
/// (unfinished) `Evaluation::initialize` sketches.
fn mobility_score(board: &Board) -> Score {
    let mut total = Score::ZERO;
    for &player in ALL_PLAYERS.iter() {
        let sign = if player == Player::White { 1 } else { -1 };
        let our_pawns = board.piece_bb(player, PieceType::P);
        let their_pawn_attacks = pawn_attacks_bb(board, !player);
        let mobility_area = !(our_pawns | their_pawn_attacks);
        let occ = board.occupied();

        for (idx, &pt) in [PieceType::N, PieceType::B, PieceType::R, PieceType::Q]
            .iter()
            .enumerate()
        {
            let bonus = MOBILITY_BONUS[idx + 1];
            let mut bb = board.piece_bb(player, pt);
            while let Some(sq) = bb.pop_lsb() {
                let attacks = match pt {
                    PieceType::N => attack_tables::knight_moves(sq),
                    PieceType::B => attack_tables::bishop_moves(occ, sq),
                    PieceType::R => attack_tables::rook_moves(occ, sq),
                    PieceType::Q => attack_tables::queen_moves(occ, sq),
                    _ => BitBoard(0),
                };
                let count = (attacks & mobility_area).count_bits() as i32;
                total += Score(sign * bonus.0 * count, sign * bonus.1 * count);
            }
        }
    }
    total
}

fn pawn_attacks_bb(board: &Board, player: Player) -> BitBoard {
    let mut attacks = BitBoard(0);
    let mut bb = board.piece_bb(player, PieceType::P);
    while let Some(sq) = bb.pop_lsb() {
        attacks |= attack_tables::pawn_attacks(sq, player == Player::White);
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::fen::OPENING_POS_FEN;

    #[test]
    fn start_position_is_roughly_balanced() {
        let board = Board::from_fen(OPENING_POS_FEN).unwrap();
        let mut evaluator = Evaluator::new();
        let value = evaluator.evaluate(&board);
        assert!(value.abs() < 50, "expected near-zero eval, got {}", value);
    }

    #[test]
    fn being_up_two_rooks_is_clearly_winning() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let mut evaluator = Evaluator::new();
        let value = evaluator.evaluate(&board);
        assert!(value > 500, "expected a large material edge, got {}", value);
    }
}
