//! FEN parsing and serialization, plus a handful of well-known test positions.
//!
//! `Board::from_fen` validates more than the six-field grammar: it rejects positions that are
//! structurally impossible (too many checkers, pawns on the back rank, a missing king) the same
//! way a UCI front end feeding it arbitrary `position fen ...` strings would need it to.

use std::sync::Arc;

use crate::board::board_state::BoardState;
use crate::board::castle_rights::Castling;
use crate::board::Board;
use crate::error::BoardError;
use crate::sq::{NO_SQ, SQ};
use crate::zobrist::ZOBRIST;
use crate::{CastleType, File, Piece, PieceType, Player, Rank, ALL_PIECE_TYPES, PLAYER_CNT};

pub const OPENING_POS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A handful of well-known positions, used by perft and movegen tests: the classic "Kiwipete"
/// position (heavy on captures, promotions, and castling), an endgame position, and a position
/// chosen for its high branching factor.
pub const STANDARD_FENS_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const STANDARD_FENS_ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const STANDARD_FENS_TRICKY: &str =
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 1";
pub const STANDARD_FENS_PROMOTION: &str = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N w - - 0 1";

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, BoardError> {
        let sections: Vec<&str> = fen.split_whitespace().collect();
        if sections.len() != 6 {
            return Err(BoardError::NotEnoughSections {
                sections: sections.len(),
            });
        }

        let ranks: Vec<&str> = sections[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::IncorrectRankAmounts { ranks: ranks.len() });
        }

        let mut state = BoardState::blank();
        let mut board = Board::empty_with_state(BoardState::blank());

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::from_char((b'8' - rank_from_top as u8) as char);
            let mut file_idx: u8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file_idx += skip as u8;
                    continue;
                }
                if file_idx >= 8 {
                    return Err(BoardError::IncorrectRankAmounts { ranks: ranks.len() });
                }
                let piece_type =
                    PieceType::from_char(c).ok_or(BoardError::UnrecognizedPiece { piece: c })?;
                let player = if c.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                let file = File::from_char((b'a' + file_idx) as char);
                board.put_piece(Piece::new(player, piece_type), SQ::make(file, rank));
                file_idx += 1;
            }
        }

        board.turn = match sections[1] {
            "w" => Player::White,
            "b" => Player::Black,
            other => {
                return Err(BoardError::UnrecognizedTurn {
                    turn: other.to_owned(),
                })
            }
        };

        let (rook_start, chess960) = derive_rook_start(&board);
        board.rook_start = rook_start;
        board.chess960 = chess960;

        let mut castling = Castling::empty_set();
        if sections[2] != "-" {
            for c in sections[2].chars() {
                match c {
                    'K' | 'Q' | 'k' | 'q' | '-' => castling.add_castling_char(c),
                    _ => add_shredder_castling_char(&mut castling, &board, c)?,
                }
            }
        }
        state.castling = castling;

        state.ep_square = if sections[3] == "-" {
            NO_SQ
        } else {
            let bytes = sections[3].as_bytes();
            if bytes.len() != 2 {
                return Err(BoardError::EpSquareUnreadable {
                    ep: sections[3].to_owned(),
                });
            }
            let file = match bytes[0] as char {
                c @ 'a'..='h' => File::from_char(c),
                _ => {
                    return Err(BoardError::EpSquareUnreadable {
                        ep: sections[3].to_owned(),
                    })
                }
            };
            let rank = match bytes[1] as char {
                c @ '1'..='8' => Rank::from_char(c),
                _ => {
                    return Err(BoardError::EpSquareUnreadable {
                        ep: sections[3].to_owned(),
                    })
                }
            };
            let sq = SQ::make(file, rank);
            let expected_rank = if board.turn == Player::White { Rank::R6 } else { Rank::R3 };
            if sq.rank() != expected_rank {
                return Err(BoardError::EpSquareInvalid {
                    ep: sections[3].to_owned(),
                });
            }
            sq
        };

        state.rule_50 = sections[4].parse::<i16>()?;
        let fullmove: u16 = sections[5].parse()?;
        let half_moves_from_fullmove = (fullmove.saturating_sub(1)) * 2;
        state.ply = half_moves_from_fullmove + if board.turn == Player::Black { 1 } else { 0 };
        board.ply = state.ply;

        let mut zob: u64 = 0;
        let mut pawn_key: u64 = 0;
        for sq_idx in 0..64u8 {
            let sq = SQ(sq_idx);
            if let Some(piece) = board.piece_at_sq(sq) {
                zob ^= ZOBRIST.piece_sq(sq, piece);
                if piece.piece_type == PieceType::P {
                    pawn_key ^= ZOBRIST.piece_sq(sq, piece);
                }
            }
        }
        if board.turn == Player::Black {
            zob ^= ZOBRIST.side();
        }
        zob ^= ZOBRIST.castling(state.castling.bits);
        if state.ep_square != NO_SQ {
            zob ^= ZOBRIST.en_passant_file(state.ep_square);
        }
        state.zobrist = zob;
        state.pawn_key = pawn_key;

        // Material key: like `zobrist`, but keyed only by piece *counts* per (player, type),
        // reusing the square-indexed table with the count standing in for a square (the same
        // trick `apply_move` uses to update it incrementally on captures/promotions without a
        // dedicated count-keyed table).
        let mut material_key: u64 = 0;
        for &player in &[Player::White, Player::Black] {
            for &pt in ALL_PIECE_TYPES.iter() {
                let piece = Piece::new(player, pt);
                let count = board.count_piece(player, pt);
                for i in 0..count {
                    material_key ^= ZOBRIST.piece_sq(SQ(i as u8), piece);
                }
            }
        }
        state.material_key = material_key;

        board.state = Arc::new(state);
        validate_position(&board)?;
        board.refresh_check_info();
        Ok(board)
    }
}

/// Shredder-FEN castling rights (Chess960): the character names the file of the castling rook
/// rather than king-side/queen-side directly, so it's resolved against that file's king to figure
/// out which of `KQkq` it corresponds to.
fn add_shredder_castling_char(castling: &mut Castling, board: &Board, c: char) -> Result<(), BoardError> {
    let (player, file_char) = if c.is_ascii_uppercase() {
        (Player::White, c.to_ascii_lowercase())
    } else {
        (Player::Black, c)
    };
    let rook_file = match file_char {
        f @ 'a'..='h' => File::from_char(f),
        _ => return Err(BoardError::UnrecognizedPiece { piece: c }),
    };
    let king_file = board.king_sq(player).file();
    let kq_char = match (player, rook_file > king_file) {
        (Player::White, true) => 'K',
        (Player::White, false) => 'Q',
        (Player::Black, true) => 'k',
        (Player::Black, false) => 'q',
    };
    castling.add_castling_char(kq_char);
    Ok(())
}

/// Finds each side's actual king-side and queen-side castling rook squares from the piece
/// placement on the board, rather than assuming the standard a/h-file corners — the only way
/// castling works at all in Chess960, where the rooks can start anywhere on the back rank. Falls
/// back to the standard corner squares for a side with no rook flanking its king (no castling
/// rights will be granted there anyway), and reports `chess960 = true` iff either side's resolved
/// rook squares differ from the standard ones.
fn derive_rook_start(board: &Board) -> ([[SQ; 2]; PLAYER_CNT], bool) {
    let mut rook_start = [
        [SQ(crate::masks::ROOK_WHITE_KSIDE_START), SQ(crate::masks::ROOK_WHITE_QSIDE_START)],
        [SQ(crate::masks::ROOK_BLACK_KSIDE_START), SQ(crate::masks::ROOK_BLACK_QSIDE_START)],
    ];
    let mut chess960 = false;

    for &player in &[Player::White, Player::Black] {
        let rank = if player == Player::White { Rank::R1 } else { Rank::R8 };
        let king_file = board.king_sq(player).file();
        let mut king_side_rook: Option<SQ> = None;
        let mut queen_side_rook: Option<SQ> = None;

        for file_idx in 0u8..8 {
            let sq = SQ::make(File::from_char((b'a' + file_idx) as char), rank);
            if let Some(piece) = board.piece_at_sq(sq) {
                if piece.player == player && piece.piece_type == PieceType::R {
                    if sq.file() > king_file {
                        king_side_rook = Some(sq);
                    } else if sq.file() < king_file && queen_side_rook.is_none() {
                        queen_side_rook = Some(sq);
                    }
                }
            }
        }

        let idx = player as usize;
        if let Some(sq) = king_side_rook {
            if sq != rook_start[idx][CastleType::KingSide as usize] {
                chess960 = true;
            }
            rook_start[idx][CastleType::KingSide as usize] = sq;
        }
        if let Some(sq) = queen_side_rook {
            if sq != rook_start[idx][CastleType::QueenSide as usize] {
                chess960 = true;
            }
            rook_start[idx][CastleType::QueenSide as usize] = sq;
        }
    }

    (rook_start, chess960)
}

fn validate_position(board: &Board) -> Result<(), BoardError> {
    for &player in &[Player::White, Player::Black] {
        if board.count_piece(player, PieceType::K) != 1 {
            return Err(BoardError::MissingKing(player));
        }
        let pawns = board.count_piece(player, PieceType::P);
        if pawns > 8 {
            return Err(BoardError::TooManyPawns { player, num: pawns });
        }
    }

    for &sq in &[SQ::A1, SQ::B1, SQ::C1, SQ::D1, SQ::E1, SQ::F1, SQ::G1, SQ::H1] {
        if let Some(p) = board.piece_at_sq(sq) {
            if p.piece_type == PieceType::P {
                return Err(BoardError::PawnOnBackRank);
            }
        }
    }
    for &sq in &[SQ::A8, SQ::B8, SQ::C8, SQ::D8, SQ::E8, SQ::F8, SQ::G8, SQ::H8] {
        if let Some(p) = board.piece_at_sq(sq) {
            if p.piece_type == PieceType::P {
                return Err(BoardError::PawnOnBackRank);
            }
        }
    }

    let stm = board.turn();
    let ksq = board.king_sq(stm);
    let checkers = board.attackers_to(ksq, board.occupied()) & board.occupied_player(!stm);
    let num = checkers.count_bits();
    if num > 2 {
        return Err(BoardError::IllegalNumCheckingPieces { num: num as u32 });
    }
    if num == 2 {
        let mut rem = checkers;
        let sq_1 = rem.pop_lsb().unwrap();
        let sq_2 = rem.pop_lsb().unwrap();
        let pt_1 = board.piece_at_sq(sq_1).unwrap().piece_type;
        let pt_2 = board.piece_at_sq(sq_2).unwrap().piece_type;
        let double_pawn_or_same_slider_type = matches!(
            (pt_1, pt_2),
            (PieceType::P, PieceType::P) | (PieceType::B, PieceType::B) | (PieceType::R, PieceType::R)
        );
        if double_pawn_or_same_slider_type {
            return Err(BoardError::IllegalCheckState {
                piece_1: pt_1,
                piece_2: pt_2,
            });
        }
    }

    Ok(())
}

pub fn board_to_fen(board: &Board) -> String {
    let mut s = String::new();
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let sq = SQ(rank * 8 + file);
            match board.piece_at_sq(sq) {
                Some(piece) => {
                    if empty_run > 0 {
                        s.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    s.push(piece.char());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            s.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            s.push('/');
        }
    }

    s.push(' ');
    s.push(if board.turn() == Player::White { 'w' } else { 'b' });

    s.push(' ');
    s.push_str(&board.castling_rights_string());

    s.push(' ');
    let ep = board.ep_square();
    if ep == NO_SQ {
        s.push('-');
    } else {
        s.push_str(&ep.to_string());
    }

    s.push(' ');
    s.push_str(&board.rule_50().to_string());
    s.push(' ');
    let fullmove = board.moves_played() / 2 + 1;
    s.push_str(&fullmove.to_string());
    s
}

impl Board {
    pub fn castling_rights_string(&self) -> String {
        self.state.castling.pretty_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_fen_round_trips() {
        let b = Board::from_fen(OPENING_POS_FEN).unwrap();
        assert_eq!(board_to_fen(&b), OPENING_POS_FEN);
    }

    #[test]
    fn kiwipete_parses_and_has_castling_rights() {
        let b = Board::from_fen(STANDARD_FENS_KIWIPETE).unwrap();
        assert_eq!(b.castling_rights_string(), "KQkq");
    }

    #[test]
    fn rejects_missing_king() {
        let err = Board::from_fen("8/8/8/8/8/8/8/k7 w - - 0 1").unwrap_err();
        assert!(matches!(err, BoardError::MissingKing(Player::White)));
    }

    #[test]
    fn rejects_malformed_fields() {
        let err = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0").unwrap_err();
        assert!(matches!(err, BoardError::NotEnoughSections { .. }));
    }
}
