//! The "butterfly" history heuristic: a `[player][from][to]` table of quiet-move success scores,
//! updated with a decaying bonus/penalty each time a quiet move causes (or fails to cause) a beta
//! cutoff. Grounded on the teacher's `ButterflyHistory`, without the separate capture/continuation
//! history tables — this crate tracks one flat history instead of the teacher's four.

use chess_core::piece_move::BitMove;
use chess_core::Player;

const MAX_HISTORY: i32 = 1 << 14;

pub struct HistoryTable {
    table: Vec<i32>,
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable {
            table: vec![0; 2 * 64 * 64],
        }
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|v| *v = 0);
    }

    fn index(player: Player, m: BitMove) -> usize {
        let player_idx = player as usize;
        let from = m.get_src().0 as usize;
        let to = m.get_dest().0 as usize;
        (player_idx * 64 + from) * 64 + to
    }

    pub fn get(&self, player: Player, m: BitMove) -> i32 {
        self.table[Self::index(player, m)]
    }

    /// Applies a gravity-style update: the bonus is scaled down as the entry approaches the
    /// table's saturation point, so history scores stay bounded without an explicit clamp.
    pub fn update(&mut self, player: Player, m: BitMove, bonus: i32) {
        let idx = Self::index(player, m);
        let clamped_bonus = bonus.clamp(-MAX_HISTORY, MAX_HISTORY);
        let entry = &mut self.table[idx];
        *entry += clamped_bonus - (*entry * clamped_bonus.abs()) / MAX_HISTORY;
    }
}

pub fn stat_bonus(depth: i16) -> i32 {
    let d = depth.clamp(0, 17) as i32;
    d * d + 2 * d - 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::SQ;

    #[test]
    fn update_increases_score_for_positive_bonus() {
        let mut history = HistoryTable::new();
        let m = BitMove::make_quiet(SQ::E2, SQ::E4);
        history.update(Player::White, m, 100);
        assert!(history.get(Player::White, m) > 0);
    }

    #[test]
    fn scores_stay_bounded() {
        let mut history = HistoryTable::new();
        let m = BitMove::make_quiet(SQ::E2, SQ::E4);
        for _ in 0..10_000 {
            history.update(Player::White, m, 5_000);
        }
        assert!(history.get(Player::White, m) <= MAX_HISTORY);
    }
}
