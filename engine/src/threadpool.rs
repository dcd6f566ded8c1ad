//! Lazy-SMP thread pool: each call to `search` spawns `threads` independent searches over copies
//! of the same position, sharing one transposition table so discoveries made by one thread steer
//! the others. Grounded on the teacher's `threadpool::ThreadPool`/`Searcher` pair, but redone
//! without its global `static mut THREADPOOL`, raw-pointer `Board`/`Searcher` allocation, and
//! condvar idle-loop: this version spawns a plain `std::thread` per `go` and joins it, so there's
//! nothing alive between searches to leak or race on — see `DESIGN.md`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chess_core::board::Board;
use chess_core::piece_move::BitMove;

use crate::search::Searcher;
use crate::time::{LimitsType, SearchLimits, TimeManager};
use crate::tt::TranspositionTable;

pub struct ThreadPool {
    threads: usize,
    tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
}

impl ThreadPool {
    pub fn new(threads: usize, tt_size_mb: usize) -> Self {
        ThreadPool {
            threads: threads.max(1),
            tt: Arc::new(TranspositionTable::new(tt_size_mb)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = Arc::new(TranspositionTable::new(mb));
    }

    pub fn clear(&mut self) {
        self.tt.clear();
    }

    /// Signals every in-flight search thread to return its current best move as soon as it next
    /// checks in. Has no effect if no search is running.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Shares the stop flag with a caller that needs to interrupt an in-flight `search()` call
    /// without holding whatever lock serializes access to the pool itself — the UCI loop's `stop`
    /// command, which must work even while `go` is blocked inside `search()`.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs `threads` independent searches on copies of `board`, sharing the transposition table,
    /// and returns the best move from whichever thread completed the greatest depth (ties broken
    /// by score) — the same selection rule the teacher's pool applies when its helper threads
    /// rejoin the main thread.
    pub fn search(&mut self, board: &Board, limits: SearchLimits) -> BitMove {
        self.stop.store(false, Ordering::Relaxed);
        let start = Instant::now();

        let time_manager = match &limits.kind {
            LimitsType::Clock(clock) => {
                TimeManager::init(start, clock, board.turn(), board.moves_played())
            }
            LimitsType::MoveTime(msec) => TimeManager::fixed_move_time(start, *msec),
            LimitsType::Depth(_) | LimitsType::Nodes(_) | LimitsType::Infinite => {
                TimeManager::untimed(start)
            }
        };
        let depth_limit = limits.depth_limit();
        let node_limit = match limits.kind {
            LimitsType::Nodes(n) => Some(n),
            _ => None,
        };

        let handles: Vec<_> = (0..self.threads)
            .map(|id| {
                let tt = Arc::clone(&self.tt);
                let stop = Arc::clone(&self.stop);
                let mut worker_board = board.clone();
                std::thread::spawn(move || {
                    let mut searcher = Searcher::new(id, tt, stop);
                    searcher.iterative_deepening(
                        &mut worker_board,
                        time_manager,
                        depth_limit,
                        node_limit,
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("search thread panicked"))
            .collect();

        results
            .into_iter()
            .max_by_key(|r| (r.depth, r.score))
            .map(|r| r.best_move)
            .filter(|m| !m.is_null())
            .unwrap_or_else(|| {
                board
                    .generate_moves()
                    .iter()
                    .next()
                    .map(|sm| sm.bit_move)
                    .unwrap_or_else(BitMove::null)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::fen::OPENING_POS_FEN;

    #[test]
    fn searches_with_multiple_threads_and_returns_a_legal_move() {
        let board = Board::from_fen(OPENING_POS_FEN).unwrap();
        let mut pool = ThreadPool::new(2, 1);
        let best = pool.search(&board, SearchLimits::depth(3));
        assert!(!best.is_null());
        assert!(board.generate_moves().contains(best));
    }
}
