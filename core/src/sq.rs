//! `SQ`, a single square of a chessboard.
//!
//! Internally a `SQ` is a `u8` in `0..=63`. Index 0 is `a1`, index 63 is `h8`:
//!
//! ```md,ignore
//! 8 | 56 57 58 59 60 61 62 63
//! 7 | 48 49 50 51 52 53 54 55
//! 6 | 40 41 42 43 44 45 46 47
//! 5 | 32 33 34 35 36 37 38 39
//! 4 | 24 25 26 27 28 29 30 31
//! 3 | 16 17 18 19 20 21 22 23
//! 2 |  8  9 10 11 12 13 14 15
//! 1 |  0  1  2  3  4  5  6  7
//!   -------------------------
//!      a  b  c  d  e  f  g  h
//! ```
//!
//! The orientation is an arbitrary but fixed convention: every attack table and mask in this
//! crate is generated consistently against it.

use std::fmt;
use std::mem::transmute;
use std::ops::*;

use crate::bitboard::BitBoard;
use crate::masks::*;
use crate::{File, Rank};

#[derive(Copy, Clone, Default, Hash, PartialEq, PartialOrd, Eq, Debug)]
#[repr(transparent)]
pub struct SQ(pub u8);

impl_bit_ops!(SQ, u8);

/// Sentinel for "no square", used for an absent en-passant target. Equivalent to
/// `Option<SQ>::None` without the enum tag.
pub const NO_SQ: SQ = SQ(64);

impl SQ {
    pub const NONE: SQ = NO_SQ;

    #[inline(always)]
    pub const fn is_okay(self) -> bool {
        self.0 < 64
    }

    #[inline(always)]
    pub fn distance(self, other: SQ) -> u8 {
        let dr = (self.rank_idx() as i8 - other.rank_idx() as i8).unsigned_abs();
        let df = (self.file_idx() as i8 - other.file_idx() as i8).unsigned_abs();
        dr.max(df)
    }

    #[inline(always)]
    pub fn to_bb(self) -> BitBoard {
        debug_assert!(self.is_okay());
        BitBoard(1u64 << self.0)
    }

    #[inline(always)]
    pub fn rank(self) -> Rank {
        unsafe { transmute::<u8, Rank>(self.rank_idx()) }
    }

    #[inline(always)]
    pub const fn rank_idx(self) -> u8 {
        self.0 >> 3
    }

    #[inline(always)]
    pub fn rank_bb(self) -> BitBoard {
        BitBoard(RANK_BB[self.rank_idx() as usize])
    }

    #[inline(always)]
    pub fn file(self) -> File {
        unsafe { transmute::<u8, File>(self.file_idx()) }
    }

    #[inline(always)]
    pub const fn file_idx(self) -> u8 {
        self.0 & 0b111
    }

    #[inline(always)]
    pub fn file_bb(self) -> BitBoard {
        BitBoard(FILE_BB[self.file_idx() as usize])
    }

    #[inline(always)]
    pub fn make(file: File, rank: Rank) -> SQ {
        SQ((rank as u8) * 8 + file as u8)
    }

    /// Castling-rights bits that become impossible if this square's piece moves or is captured.
    /// A rook's home square clears that rook's bit; a king's home square clears both of its
    /// side's bits.
    #[inline]
    pub fn castle_rights_mask(self) -> u8 {
        match self.0 {
            ROOK_WHITE_KSIDE_START => C_WHITE_K_MASK,
            ROOK_WHITE_QSIDE_START => C_WHITE_Q_MASK,
            ROOK_BLACK_KSIDE_START => C_BLACK_K_MASK,
            ROOK_BLACK_QSIDE_START => C_BLACK_Q_MASK,
            WHITE_KING_START => C_WHITE_K_MASK | C_WHITE_Q_MASK,
            BLACK_KING_START => C_BLACK_K_MASK | C_BLACK_Q_MASK,
            _ => 0,
        }
    }

    #[inline(always)]
    pub fn on_dark_square(self) -> bool {
        (self.to_bb() & BitBoard::DARK_SQUARES).is_not_empty()
    }

    /// Mirrors the square across the board's equator: `a1 <-> a8`, `h1 <-> h8`.
    #[inline(always)]
    pub fn flip(self) -> SQ {
        SQ(self.0 ^ 0b111000)
    }
}

impl SQ {
    pub const A1: SQ = SQ(0);
    pub const B1: SQ = SQ(1);
    pub const C1: SQ = SQ(2);
    pub const D1: SQ = SQ(3);
    pub const E1: SQ = SQ(4);
    pub const F1: SQ = SQ(5);
    pub const G1: SQ = SQ(6);
    pub const H1: SQ = SQ(7);
    pub const A2: SQ = SQ(8);
    pub const B2: SQ = SQ(9);
    pub const C2: SQ = SQ(10);
    pub const D2: SQ = SQ(11);
    pub const E2: SQ = SQ(12);
    pub const F2: SQ = SQ(13);
    pub const G2: SQ = SQ(14);
    pub const H2: SQ = SQ(15);
    pub const A3: SQ = SQ(16);
    pub const B3: SQ = SQ(17);
    pub const C3: SQ = SQ(18);
    pub const D3: SQ = SQ(19);
    pub const E3: SQ = SQ(20);
    pub const F3: SQ = SQ(21);
    pub const G3: SQ = SQ(22);
    pub const H3: SQ = SQ(23);
    pub const A4: SQ = SQ(24);
    pub const B4: SQ = SQ(25);
    pub const C4: SQ = SQ(26);
    pub const D4: SQ = SQ(27);
    pub const E4: SQ = SQ(28);
    pub const F4: SQ = SQ(29);
    pub const G4: SQ = SQ(30);
    pub const H4: SQ = SQ(31);
    pub const A5: SQ = SQ(32);
    pub const B5: SQ = SQ(33);
    pub const C5: SQ = SQ(34);
    pub const D5: SQ = SQ(35);
    pub const E5: SQ = SQ(36);
    pub const F5: SQ = SQ(37);
    pub const G5: SQ = SQ(38);
    pub const H5: SQ = SQ(39);
    pub const A6: SQ = SQ(40);
    pub const B6: SQ = SQ(41);
    pub const C6: SQ = SQ(42);
    pub const D6: SQ = SQ(43);
    pub const E6: SQ = SQ(44);
    pub const F6: SQ = SQ(45);
    pub const G6: SQ = SQ(46);
    pub const H6: SQ = SQ(47);
    pub const A7: SQ = SQ(48);
    pub const B7: SQ = SQ(49);
    pub const C7: SQ = SQ(50);
    pub const D7: SQ = SQ(51);
    pub const E7: SQ = SQ(52);
    pub const F7: SQ = SQ(53);
    pub const G7: SQ = SQ(54);
    pub const H7: SQ = SQ(55);
    pub const A8: SQ = SQ(56);
    pub const B8: SQ = SQ(57);
    pub const C8: SQ = SQ(58);
    pub const D8: SQ = SQ(59);
    pub const E8: SQ = SQ(60);
    pub const F8: SQ = SQ(61);
    pub const G8: SQ = SQ(62);
    pub const H8: SQ = SQ(63);
}

impl fmt::Display for SQ {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_okay() {
            write!(f, "{}", SQ_DISPLAY[self.0 as usize])
        } else {
            write!(f, "-")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_and_decompose_round_trip() {
        for &file in crate::ALL_FILES.iter() {
            for &rank in crate::ALL_RANKS.iter() {
                let sq = SQ::make(file, rank);
                assert_eq!(sq.file(), file);
                assert_eq!(sq.rank(), rank);
            }
        }
    }

    #[test]
    fn corner_squares() {
        assert_eq!(SQ::A1.0, 0);
        assert_eq!(SQ::H1.0, 7);
        assert_eq!(SQ::A8.0, 56);
        assert_eq!(SQ::H8.0, 63);
    }

    #[test]
    fn flip_swaps_ranks_keeps_files() {
        assert_eq!(SQ::A1.flip(), SQ::A8);
        assert_eq!(SQ::H4.flip(), SQ::H5);
    }
}
