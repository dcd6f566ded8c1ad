//! Material imbalance cache: phase-of-game and a bishop-pair-aware material score, keyed by the
//! board's material key so repeated positions with the same piece counts don't redo the work.

use chess_core::board::Board;
use chess_core::score::{Score, Value};
use chess_core::{PieceType, Player, ALL_PLAYERS};

use crate::consts::MATERIAL_TABLE_SIZE;

pub const PHASE_MID_GAME: i32 = 128;
pub const PHASE_END_GAME: i32 = 0;

const BISHOP_PAIR_BONUS: Value = 50;

const PHASE_WEIGHT: [(PieceType, i32); 4] = [
    (PieceType::N, 1),
    (PieceType::B, 1),
    (PieceType::R, 2),
    (PieceType::Q, 4),
];
const TOTAL_PHASE_WEIGHT: i32 = 4 * (1 + 1 + 2 + 4);

#[derive(Copy, Clone)]
pub struct MaterialEntry {
    key: u64,
    value: Value,
    pub phase: i32,
}

impl MaterialEntry {
    pub fn score(&self) -> Score {
        Score::new(self.value, self.value)
    }
}

const TABLE_SIZE: usize = MATERIAL_TABLE_SIZE;

pub struct Material {
    entries: Vec<Option<MaterialEntry>>,
}

impl Material {
    pub fn new() -> Self {
        Material {
            entries: vec![None; TABLE_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }

    pub fn probe(&mut self, board: &Board) -> MaterialEntry {
        let key = board.material_key();
        let idx = (key as usize) % TABLE_SIZE;
        if let Some(entry) = self.entries[idx] {
            if entry.key == key {
                return entry;
            }
        }
        let entry = Material::compute(board, key);
        self.entries[idx] = Some(entry);
        entry
    }

    fn compute(board: &Board, key: u64) -> MaterialEntry {
        let mut value: Value = 0;
        let mut phase = 0;

        for &player in ALL_PLAYERS.iter() {
            let sign = if player == Player::White { 1 } else { -1 };
            if board.count_piece(player, PieceType::B) >= 2 {
                value += sign * BISHOP_PAIR_BONUS;
            }
            for &(pt, weight) in PHASE_WEIGHT.iter() {
                phase += weight * board.count_piece(player, pt) as i32;
            }
        }

        phase = (phase.min(TOTAL_PHASE_WEIGHT) * PHASE_MID_GAME) / TOTAL_PHASE_WEIGHT;

        MaterialEntry { key, value, phase }
    }
}
