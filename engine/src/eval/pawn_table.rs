//! Pawn structure cache: doubled/isolated/passed-pawn terms, keyed by the board's pawn zobrist
//! key so the (relatively expensive, file-by-file) pawn structure scan isn't redone for
//! transpositions that share a pawn skeleton.

use chess_core::attack_tables;
use chess_core::board::Board;
use chess_core::masks::FILE_BB;
use chess_core::score::Score;
use chess_core::{BitBoard, File, PieceType, Player, ALL_FILES, ALL_PLAYERS};

use crate::consts::PAWN_TABLE_SIZE;

const DOUBLED_PENALTY: Score = Score(11, 56);
const ISOLATED_PENALTY: Score = Score(5, 15);
const PASSED_BONUS_PER_RANK: i32 = 20;

#[derive(Copy, Clone)]
pub struct PawnEntry {
    key: u64,
    score: Score,
}

impl PawnEntry {
    pub fn pawns_score(&self) -> Score {
        self.score
    }
}

pub struct PawnTable {
    entries: Vec<Option<PawnEntry>>,
}

impl PawnTable {
    pub fn new() -> Self {
        PawnTable {
            entries: vec![None; PAWN_TABLE_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }

    pub fn probe(&mut self, board: &Board) -> PawnEntry {
        let key = board.pawn_key();
        let idx = (key as usize) % PAWN_TABLE_SIZE;
        if let Some(entry) = self.entries[idx] {
            if entry.key == key {
                return entry;
            }
        }
        let entry = PawnEntry {
            key,
            score: evaluate_pawns(board),
        };
        self.entries[idx] = Some(entry);
        entry
    }
}

fn file_bb(file: File) -> BitBoard {
    BitBoard(FILE_BB[file as usize])
}

fn adjacent_files_bb(file: File) -> BitBoard {
    attack_tables::adjacent_files(file)
}

fn ahead_ranks_bb(rank_idx: u8, player: Player) -> BitBoard {
    let ranks: Box<dyn Iterator<Item = u8>> = if player == Player::White {
        Box::new((rank_idx + 1)..8)
    } else {
        Box::new(0..rank_idx)
    };
    let mut mask = BitBoard(0);
    for r in ranks {
        mask |= BitBoard(0xFFu64 << (r * 8));
    }
    mask
}

fn evaluate_pawns(board: &Board) -> Score {
    let mut total = Score::ZERO;
    for &player in ALL_PLAYERS.iter() {
        let sign = if player == Player::White { 1 } else { -1 };
        let ours = board.piece_bb(player, PieceType::P);
        let theirs = board.piece_bb(!player, PieceType::P);

        for &file in ALL_FILES.iter() {
            let fbb = file_bb(file);
            let on_file = ours & fbb;
            let count = on_file.count_bits();
            if count == 0 {
                continue;
            }

            if count >= 2 {
                total -= Score(sign * DOUBLED_PENALTY.0, sign * DOUBLED_PENALTY.1);
            }

            let neighbor_files = adjacent_files_bb(file);
            if (ours & neighbor_files).is_empty() {
                total -= Score(sign * ISOLATED_PENALTY.0, sign * ISOLATED_PENALTY.1);
            }

            let mut scan = on_file;
            while let Some(sq) = scan.pop_lsb() {
                let rank_idx = if player == Player::White {
                    sq.rank_idx()
                } else {
                    7 - sq.rank_idx()
                };
                let blockers = theirs & (fbb | neighbor_files);
                let ahead_mask = ahead_ranks_bb(sq.rank_idx(), player) & (fbb | neighbor_files);
                if (blockers & ahead_mask).is_empty() {
                    total += Score(0, sign * PASSED_BONUS_PER_RANK * rank_idx as i32);
                }
            }
        }
    }
    total
}
