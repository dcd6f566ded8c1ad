//! Masks and other constants shared by the bitboard, square, and board modules.

use crate::sq::SQ;

pub const SQ_CNT: usize = 64;
pub const FILE_CNT: usize = 8;
pub const RANK_CNT: usize = 8;
pub const CASTLING_SIDES: usize = 2;
/// `{white K, white Q, black K, black Q}` — every possible castling-rights byte value.
pub const ALL_CASTLING_RIGHTS: usize = 16;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_B: u64 = FILE_A << 1;
pub const FILE_C: u64 = FILE_A << 2;
pub const FILE_D: u64 = FILE_A << 3;
pub const FILE_E: u64 = FILE_A << 4;
pub const FILE_F: u64 = FILE_A << 5;
pub const FILE_G: u64 = FILE_A << 6;
pub const FILE_H: u64 = FILE_A << 7;

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_3: u64 = RANK_1 << 16;
pub const RANK_4: u64 = RANK_1 << 24;
pub const RANK_5: u64 = RANK_1 << 32;
pub const RANK_6: u64 = RANK_1 << 40;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

pub static FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];
pub static RANK_BB: [u64; RANK_CNT] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
pub const LIGHT_SQUARES: u64 = !DARK_SQUARES;

pub const NORTH: i8 = 8;
pub const SOUTH: i8 = -8;
pub const WEST: i8 = -1;
pub const EAST: i8 = 1;
pub const NORTH_EAST: i8 = 9;
pub const NORTH_WEST: i8 = 7;
pub const SOUTH_EAST: i8 = -7;
pub const SOUTH_WEST: i8 = -9;

pub const WHITE_KING_START: u8 = 4;
pub const BLACK_KING_START: u8 = 60;
pub const ROOK_WHITE_KSIDE_START: u8 = 7;
pub const ROOK_WHITE_QSIDE_START: u8 = 0;
pub const ROOK_BLACK_KSIDE_START: u8 = 63;
pub const ROOK_BLACK_QSIDE_START: u8 = 56;

/// Castling-rights bit: white king-side castle still possible.
pub const C_WHITE_K_MASK: u8 = 0b0000_1000;
/// Castling-rights bit: white queen-side castle still possible.
pub const C_WHITE_Q_MASK: u8 = 0b0000_0100;
/// Castling-rights bit: black king-side castle still possible.
pub const C_BLACK_K_MASK: u8 = 0b0000_0010;
/// Castling-rights bit: black queen-side castle still possible.
pub const C_BLACK_Q_MASK: u8 = 0b0000_0001;

pub static CASTLING_ROOK_START: [[u8; CASTLING_SIDES]; 2] = [
    [ROOK_WHITE_KSIDE_START, ROOK_WHITE_QSIDE_START],
    [ROOK_BLACK_KSIDE_START, ROOK_BLACK_QSIDE_START],
];

pub const CASTLING_PATH_WHITE_K_SIDE: u64 = 1u64 << SQ::F1.0 | 1u64 << SQ::G1.0;
pub const CASTLING_PATH_WHITE_Q_SIDE: u64 =
    1u64 << SQ::B1.0 | 1u64 << SQ::C1.0 | 1u64 << SQ::D1.0;
pub const CASTLING_PATH_BLACK_K_SIDE: u64 = 1u64 << SQ::F8.0 | 1u64 << SQ::G8.0;
pub const CASTLING_PATH_BLACK_Q_SIDE: u64 =
    1u64 << SQ::B8.0 | 1u64 << SQ::C8.0 | 1u64 << SQ::D8.0;

pub static CASTLING_PATH: [[u64; CASTLING_SIDES]; 2] = [
    [CASTLING_PATH_WHITE_K_SIDE, CASTLING_PATH_WHITE_Q_SIDE],
    [CASTLING_PATH_BLACK_K_SIDE, CASTLING_PATH_BLACK_Q_SIDE],
];

pub static SQ_DISPLAY: [&str; SQ_CNT] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

pub static FILE_DISPLAYS: [char; FILE_CNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub static RANK_DISPLAYS: [char; RANK_CNT] = ['1', '2', '3', '4', '5', '6', '7', '8'];
