//! Errors produced while building or validating a [`crate::Board`].

use thiserror::Error;

use crate::{Piece, PieceType, Player};

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("invalid number of fen fields: {sections}, expected 6")]
    NotEnoughSections { sections: usize },
    #[error("invalid number of ranks: {ranks}, expected 8")]
    IncorrectRankAmounts { ranks: usize },
    #[error("invalid side to move: '{turn}', expected 'w' or 'b'")]
    UnrecognizedTurn { turn: String },
    #[error("unreadable en-passant square: '{ep}'")]
    EpSquareUnreadable { ep: String },
    #[error("invalid en-passant square: '{ep}'")]
    EpSquareInvalid { ep: String },
    #[error("unrecognized piece character: '{piece}'")]
    UnrecognizedPiece { piece: char },
    #[error("could not parse halfmove/fullmove counters: {0}")]
    UnreadableMoveCounters(#[from] std::num::ParseIntError),
    #[error("too many checking pieces: {num}")]
    IllegalNumCheckingPieces { num: u32 },
    #[error("these two pieces cannot check the king simultaneously: {piece_1:?}, {piece_2:?}")]
    IllegalCheckState {
        piece_1: PieceType,
        piece_2: PieceType,
    },
    #[error("too many pawns for {player}: {num}")]
    TooManyPawns { player: Player, num: u32 },
    #[error("pawn found on the first or last rank")]
    PawnOnBackRank,
    #[error("no king found for {0}")]
    MissingKing(Player),
    #[error("unexpected piece at {sq}: {piece:?}")]
    UnexpectedPiece { sq: String, piece: Piece },
}
