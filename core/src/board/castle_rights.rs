//! `Castling`: which castles are still possible for each side.
//!
//! A bit being set only means that side's king and the relevant rook have never moved — it says
//! nothing about whether the squares between them are currently clear or attacked. That check
//! happens in move generation, against the live board.

use std::fmt;

use crate::masks::*;
use crate::sq::SQ;
use crate::{CastleType, Player};

const ALL_CASTLING: u8 = 0b0000_1111;

bitflags! {
    pub struct Castling: u8 {
        const WHITE_K   = C_WHITE_K_MASK;
        const WHITE_Q   = C_WHITE_Q_MASK;
        const BLACK_K   = C_BLACK_K_MASK;
        const BLACK_Q   = C_BLACK_Q_MASK;
        const WHITE_ALL = Self::WHITE_K.bits | Self::WHITE_Q.bits;
        const BLACK_ALL = Self::BLACK_K.bits | Self::BLACK_Q.bits;
    }
}

impl Castling {
    #[inline]
    pub fn remove_player_castling(&mut self, player: Player) {
        match player {
            Player::White => self.bits &= Self::BLACK_ALL.bits,
            Player::Black => self.bits &= Self::WHITE_ALL.bits,
        }
    }

    #[inline]
    pub const fn all_castling() -> Self {
        Castling { bits: ALL_CASTLING }
    }

    #[inline]
    pub const fn empty_set() -> Self {
        Castling { bits: 0 }
    }

    #[inline]
    pub fn castle_rights(self, player: Player, side: CastleType) -> bool {
        match (player, side) {
            (Player::White, CastleType::KingSide) => self.contains(Self::WHITE_K),
            (Player::White, CastleType::QueenSide) => self.contains(Self::WHITE_Q),
            (Player::Black, CastleType::KingSide) => self.contains(Self::BLACK_K),
            (Player::Black, CastleType::QueenSide) => self.contains(Self::BLACK_Q),
        }
    }

    #[inline]
    pub fn player_can_castle(self, player: Player) -> Castling {
        Castling {
            bits: self.bits & (Castling::WHITE_ALL.bits >> (2 * player as u8)),
        }
    }

    #[inline]
    pub fn no_castling(self) -> bool {
        self.bits == 0
    }

    /// Clears whatever castling-rights bits `to` and `from` invalidate (a king or rook leaving
    /// its home square, in either direction — captures included), returning the bits actually
    /// cleared so the caller can XOR them back out of the Zobrist key.
    #[inline]
    pub fn update_castling(&mut self, to: SQ, from: SQ) -> u8 {
        let mask_change = to.castle_rights_mask() | from.castle_rights_mask();
        let cleared = self.bits & mask_change;
        self.bits &= !mask_change;
        cleared
    }

    pub fn add_castling_char(&mut self, c: char) {
        self.bits |= match c {
            'K' => Castling::WHITE_K.bits,
            'Q' => Castling::WHITE_Q.bits,
            'k' => Castling::BLACK_K.bits,
            'q' => Castling::BLACK_Q.bits,
            '-' => 0,
            _ => panic!("invalid castling-rights character '{}'", c),
        };
    }

    pub fn pretty_string(self) -> String {
        if self.no_castling() {
            "-".to_owned()
        } else {
            let mut s = String::new();
            if self.contains(Castling::WHITE_K) {
                s.push('K');
            }
            if self.contains(Castling::WHITE_Q) {
                s.push('Q');
            }
            if self.contains(Castling::BLACK_K) {
                s.push('k');
            }
            if self.contains(Castling::BLACK_Q) {
                s.push('q');
            }
            s
        }
    }
}

impl fmt::Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_castling_matches_bitflags_all() {
        assert_eq!(Castling::all(), Castling::all_castling());
    }

    #[test]
    fn update_castling_clears_only_affected_bits() {
        let mut c = Castling::all_castling();
        let cleared = c.update_castling(SQ::NONE, SQ::H1);
        assert_eq!(cleared, C_WHITE_K_MASK);
        assert!(!c.contains(Castling::WHITE_K));
        assert!(c.contains(Castling::WHITE_Q));
    }

    #[test]
    fn fen_round_trip_through_pretty_string() {
        let mut c = Castling::empty_set();
        c.add_castling_char('K');
        c.add_castling_char('q');
        assert_eq!(c.pretty_string(), "Kq");
    }
}
