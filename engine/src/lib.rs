//! Search engine for `chess_core`: transposition table, evaluation, time management, and a
//! Lazy-SMP search built on iterative deepening, alpha-beta, and quiescence search.
//!
//! This crate has no UCI parsing of its own beyond `uci::parse` turning input lines into
//! `SearchLimits`/position updates — the interactive loop lives in `main.rs`. Everything here is
//! usable as a library: construct an [`Engine`], hand it a position and a time budget, and read
//! back a best move.

#![allow(dead_code)]

#[macro_use]
extern crate lazy_static;

pub mod consts;
pub mod endgame;
pub mod error;
pub mod eval;
pub mod search;
pub mod threadpool;
pub mod time;
pub mod tt;
pub mod uci;

pub use error::EngineError;
pub use tt::{NodeBound, TranspositionTable};

use chess_core::board::Board;
use chess_core::piece_move::BitMove;

use crate::threadpool::ThreadPool;
use crate::time::SearchLimits;

/// Top-level handle a UCI front end (or a test, or a perft-style driver) holds: one board, one
/// shared transposition table, and a pool of search threads that share both.
pub struct Engine {
    board: Board,
    pool: ThreadPool,
}

impl Engine {
    pub fn new(threads: usize, tt_size_mb: usize) -> Self {
        Engine {
            board: Board::start_pos(),
            pool: ThreadPool::new(threads, tt_size_mb),
        }
    }

    pub fn set_position(&mut self, board: Board) {
        self.board = board;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Searches the current position under `limits`, returning the best move found. Blocks until
    /// the search completes (time runs out, the requested depth is reached, or `stop` fires).
    pub fn search(&mut self, limits: SearchLimits) -> BitMove {
        self.pool.search(&self.board, limits)
    }

    pub fn stop(&self) {
        self.pool.stop();
    }

    pub fn resize_tt(&mut self, mb: usize) {
        self.pool.resize_tt(mb);
    }

    pub fn clear(&mut self) {
        self.pool.clear();
        self.board = Board::start_pos();
    }
}
