//! Time control: the `go` command's search limits, and the ideal/maximum time budget computed
//! from them for a single move.

use std::time::Instant;

use chess_core::Player;

/// Per-side clock state reported by `go wtime/btime/winc/binc/movestogo`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClockState {
    pub time_msec: [i64; 2],
    pub inc_msec: [i64; 2],
    pub moves_to_go: u32,
}

/// Which stopping condition governs the current search.
#[derive(Clone, Debug)]
pub enum LimitsType {
    Clock(ClockState),
    MoveTime(u64),
    Depth(u16),
    Nodes(u64),
    Infinite,
}

impl LimitsType {
    pub fn is_depth(&self) -> bool {
        matches!(self, LimitsType::Depth(_))
    }
}

#[derive(Clone, Debug)]
pub struct SearchLimits {
    pub kind: LimitsType,
    pub search_moves: Vec<String>,
}

impl SearchLimits {
    pub fn infinite() -> Self {
        SearchLimits {
            kind: LimitsType::Infinite,
            search_moves: Vec::new(),
        }
    }

    pub fn depth(d: u16) -> Self {
        SearchLimits {
            kind: LimitsType::Depth(d),
            search_moves: Vec::new(),
        }
    }

    pub fn move_time(msec: u64) -> Self {
        SearchLimits {
            kind: LimitsType::MoveTime(msec),
            search_moves: Vec::new(),
        }
    }

    pub fn clock(state: ClockState) -> Self {
        SearchLimits {
            kind: LimitsType::Clock(state),
            search_moves: Vec::new(),
        }
    }

    pub fn depth_limit(&self) -> Option<u16> {
        match self.kind {
            LimitsType::Depth(d) => Some(d),
            _ => None,
        }
    }

    pub fn uses_time_management(&self) -> bool {
        matches!(self.kind, LimitsType::Clock(_))
    }
}

const MOVE_HORIZON: i64 = 50;
const MAX_RATIO: f64 = 6.32;
const STEAL_RATIO: f64 = 0.34;
const MIN_THINKING_TIME: i64 = 20;
const MOVE_OVERHEAD: i64 = 100;
const SLOW_MOVER: i64 = 22;

/// Computes and tracks the ideal/maximum time budget for one move, following the same
/// "hypothetical moves-to-go" search the teacher's time manager runs, just without the
/// static/unsafe globals — each search thread's `TimeManager` is owned, not shared.
#[derive(Copy, Clone)]
pub struct TimeManager {
    start: Instant,
    ideal_time: i64,
    maximum_time: i64,
}

impl TimeManager {
    /// A time manager with no time pressure: only a movetime/depth/node/infinite limit applies.
    pub fn untimed(start: Instant) -> Self {
        TimeManager {
            start,
            ideal_time: i64::MAX,
            maximum_time: i64::MAX,
        }
    }

    /// A time manager bound to a single fixed per-move budget (`go movetime`), rather than the
    /// clock-based hypothetical-moves-to-go estimate `init` computes.
    pub fn fixed_move_time(start: Instant, msec: u64) -> Self {
        let budget = (msec as i64 - MOVE_OVERHEAD).max(MIN_THINKING_TIME);
        TimeManager {
            start,
            ideal_time: budget,
            maximum_time: budget,
        }
    }

    pub fn init(start: Instant, clock: &ClockState, turn: Player, ply: u16) -> Self {
        let moves_to_go = clock.moves_to_go as i64;
        let my_time = clock.time_msec[turn as usize];
        let my_inc = clock.inc_msec[turn as usize];

        let mut ideal_time = my_time.max(MIN_THINKING_TIME);
        let mut max_time = ideal_time;

        let max_mtg = if moves_to_go == 0 {
            MOVE_HORIZON
        } else {
            moves_to_go.min(MOVE_HORIZON)
        };

        for hyp_mtg in 1..=max_mtg {
            let hyp_my_time = (my_time + my_inc * (hyp_mtg - 1)
                - MOVE_OVERHEAD * (2 + hyp_mtg.min(40)))
            .max(0);

            let t1 = MIN_THINKING_TIME
                + remaining(hyp_my_time, hyp_mtg, ply as i64, SLOW_MOVER, 1.0, 0.0);
            let t2 = MIN_THINKING_TIME
                + remaining(
                    hyp_my_time,
                    hyp_mtg,
                    ply as i64,
                    SLOW_MOVER - 5,
                    MAX_RATIO,
                    STEAL_RATIO,
                );

            ideal_time = ideal_time.min(t1);
            max_time = max_time.min(t2);
        }

        TimeManager {
            start,
            ideal_time,
            maximum_time: max_time,
        }
    }

    pub fn elapsed(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }

    pub fn ideal_time(&self) -> i64 {
        self.ideal_time
    }

    pub fn maximum_time(&self) -> i64 {
        self.maximum_time
    }
}

fn move_importance(ply: i64) -> f64 {
    const X_SCALE: f64 = 6.85;
    const X_SHIFT: f64 = 64.5;
    const SKEW: f64 = 0.171;

    let exp = ((ply as f64 - X_SHIFT) / X_SCALE).exp();
    let base = 1.0 + exp;
    base.powf(-SKEW) + f64::MIN_POSITIVE
}

fn remaining(
    my_time: i64,
    moves_to_go: i64,
    move_num: i64,
    slow_mover: i64,
    t_max_ratio: f64,
    t_steal_ratio: f64,
) -> i64 {
    let importance = (move_importance(move_num) * slow_mover as f64) / 100.0;
    let mut other_moves_importance = 0.0;
    for i in 1..moves_to_go {
        other_moves_importance += move_importance(move_num + 2 * i);
    }

    let ratio1 = (t_max_ratio * importance) / (t_max_ratio * importance + other_moves_importance);
    let ratio2 =
        (importance + t_steal_ratio * other_moves_importance) / (importance + other_moves_importance);

    (my_time as f64 * ratio1.min(ratio2)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_time_is_a_fraction_of_the_clock() {
        let clock = ClockState {
            time_msec: [120_000, 0],
            inc_msec: [6_000, 0],
            moves_to_go: 20,
        };
        let tm = TimeManager::init(Instant::now(), &clock, Player::White, 0);
        assert!(tm.ideal_time() > 0);
        assert!(tm.ideal_time() <= tm.maximum_time());
    }
}
