//! Iterative-deepening principal-variation search: alpha-beta with a transposition table,
//! null-move and futility pruning, and quiescence search at the horizon.
//!
//! Grounded on the teacher's `search::Searcher`, trimmed of singular extensions, continuation
//! histories, counter-move tables, and late-move reductions (see `DESIGN.md`) and restructured so
//! each search thread owns its state (board, evaluator caches, history table, killer slots)
//! instead of reaching into a shared global the way the teacher's `ThreadPool`/`Searcher` pair
//! does.

pub mod history;
pub mod movepick;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chess_core::board::see::see_ge;
use chess_core::board::Board;
use chess_core::piece_move::BitMove;
use chess_core::score::{self, Value};

use crate::consts::{CheckState, InCheck, NoCheck, NonPV, PVNode, MAX_PLY, PV};
use crate::endgame;
use crate::eval::Evaluator;
use crate::time::TimeManager;
use crate::tt::{NodeBound, TranspositionTable};

use history::{stat_bonus, HistoryTable};
use movepick::{order_captures, order_moves};

const NULL_MOVE_MIN_DEPTH: i16 = 3;
const FUTILITY_MARGIN_PER_PLY: Value = 100;
const FUTILITY_MAX_DEPTH: i16 = 6;
// Indexed by depth (0..=2); depth 0 is never reached here since `search` hands depth-0 nodes
// straight to `qsearch` before this point.
const RAZOR_MARGIN: [Value; 3] = [0, 240, 280];
const ASPIRATION_START_DEPTH: u16 = 5;
const ASPIRATION_WINDOW: Value = 25;

/// Per-thread depth skew for Lazy-SMP: helper thread `id` searches `skew[id % 4]` plies deeper
/// than the main thread at the same iteration, so the pool explores more of the tree than one
/// thread repeating the exact same depth sequence would. The main thread (`id == 0`) always gets
/// skew 0.
const DEPTH_SKEW: [u16; 4] = [0, 1, 2, 3];

#[derive(Copy, Clone, Default)]
struct Stack {
    killers: [BitMove; 2],
    static_eval: Value,
}

/// What one call to [`Searcher::iterative_deepening`] found.
pub struct SearchResult {
    pub best_move: BitMove,
    pub score: Value,
    pub depth: u16,
    pub nodes: u64,
}

/// Per-thread search state: everything one Lazy-SMP worker needs that isn't shared with its
/// siblings. The transposition table is the only thing that actually is shared.
pub struct Searcher {
    pub id: usize,
    tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
    evaluator: Evaluator,
    history: HistoryTable,
    stack: Vec<Stack>,
    nodes: u64,
    time_manager: TimeManager,
    depth_limit: Option<u16>,
    node_limit: Option<u64>,
}

impl Searcher {
    pub fn new(id: usize, tt: Arc<TranspositionTable>, stop: Arc<AtomicBool>) -> Self {
        Searcher {
            id,
            tt,
            stop,
            evaluator: Evaluator::new(),
            history: HistoryTable::new(),
            stack: vec![Stack::default(); MAX_PLY as usize + 8],
            nodes: 0,
            time_manager: TimeManager::untimed(std::time::Instant::now()),
            depth_limit: None,
            node_limit: None,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Runs iterative deepening on `board`'s current position until `depth_limit`, `node_limit`,
    /// the time manager, or `self.stop` calls a halt, returning the best move and score found at
    /// the last depth that finished inside its aspiration window.
    pub fn iterative_deepening(
        &mut self,
        board: &mut Board,
        time_manager: TimeManager,
        depth_limit: Option<u16>,
        node_limit: Option<u64>,
    ) -> SearchResult {
        self.time_manager = time_manager;
        self.depth_limit = depth_limit;
        self.node_limit = node_limit;
        self.nodes = 0;
        self.tt.new_search();

        let mut best_move = BitMove::null();
        let mut best_score = score::NEG_INFINITE;
        let mut completed_depth = 0u16;

        let max_depth = depth_limit.unwrap_or(MAX_PLY).min(MAX_PLY);
        let depth_skew = if self.id == 0 { 0 } else { DEPTH_SKEW[self.id % DEPTH_SKEW.len()] };

        'iddeep: for iter in 1..=max_depth {
            let depth = (iter + depth_skew).min(MAX_PLY);
            let mut window = ASPIRATION_WINDOW;
            let (mut alpha, mut beta) = if depth >= ASPIRATION_START_DEPTH {
                (
                    (best_score - window).max(score::NEG_INFINITE),
                    (best_score + window).min(score::INFINITE),
                )
            } else {
                (score::NEG_INFINITE, score::INFINITE)
            };

            loop {
                let value = if board.in_check() {
                    self.search::<PV, InCheck>(board, alpha, beta, depth as i16, 0)
                } else {
                    self.search::<PV, NoCheck>(board, alpha, beta, depth as i16, 0)
                };

                if self.should_stop() {
                    break 'iddeep;
                }

                if value <= alpha {
                    beta = (alpha + beta) / 2;
                    alpha = (value - window).max(score::NEG_INFINITE);
                } else if value >= beta {
                    beta = (value + window).min(score::INFINITE);
                } else {
                    best_score = value;
                    completed_depth = depth;
                    if let Some(entry) = self.tt.probe(board.zobrist()) {
                        if !entry.best_move.is_null() {
                            best_move = entry.best_move;
                        }
                    }
                    break;
                }
                window += window / 2;
            }

            if self.time_manager.elapsed() >= self.time_manager.ideal_time() {
                break;
            }
        }

        if best_move.is_null() {
            if let Some(sm) = board.generate_moves().iter().next() {
                best_move = sm.bit_move;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes,
        }
    }

    fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(limit) = self.node_limit {
            if self.nodes >= limit {
                return true;
            }
        }
        self.nodes % 2048 == 0 && self.time_manager.elapsed() >= self.time_manager.maximum_time()
    }

    fn search<N: PVNode, C: CheckState>(
        &mut self,
        board: &mut Board,
        mut alpha: Value,
        beta: Value,
        depth: i16,
        ply: u16,
    ) -> Value {
        if depth <= 0 {
            return self.qsearch::<N>(board, alpha, beta, ply);
        }

        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        let is_root = ply == 0;
        let is_pv = N::is_pv();
        let mut beta = beta;

        if !is_root {
            if board.is_draw() || board.is_repetition(3) {
                return score::DRAW;
            }
            if ply as usize >= MAX_PLY as usize {
                return self.evaluate(board);
            }

            // Mate distance pruning: no line found deeper than `ply` can beat a mate already
            // known at a shallower ply, so there's no need to search past a window neither side
            // could improve on.
            alpha = alpha.max(-score::MATE + ply as Value);
            beta = beta.min(score::MATE - ply as Value - 1);
            if alpha >= beta {
                return alpha;
            }
        }

        if let Some(endgame_value) = endgame::evaluate_endgame(board) {
            return endgame_value;
        }

        let key = board.zobrist();
        let tt_entry = self.tt.probe(key);
        let tt_move = tt_entry.map(|e| e.best_move).unwrap_or(BitMove::null());

        if !is_pv {
            if let Some(entry) = tt_entry {
                if entry.depth as i16 >= depth {
                    let tt_score = score::value_from_tt(entry.score as Value, ply);
                    let usable = match entry.bound {
                        NodeBound::Exact => true,
                        NodeBound::LowerBound => tt_score >= beta,
                        NodeBound::UpperBound => tt_score <= alpha,
                        NodeBound::NoBound => false,
                    };
                    if usable {
                        return tt_score;
                    }
                }
            }
        }

        let static_eval = self.evaluate(board);
        self.stack[ply as usize].static_eval = static_eval;

        // Razoring: at the lowest depths before qsearch, if the static eval plus a margin still
        // isn't better than alpha, go straight to qsearch.
        if !is_pv && !C::in_check() && depth < 3 && static_eval <= alpha - RAZOR_MARGIN[depth as usize] {
            let r_alpha = alpha - RAZOR_MARGIN[depth as usize];
            let razor_value = self.qsearch::<NonPV>(board, r_alpha, r_alpha + 1, ply);
            if self.should_stop() {
                return 0;
            }
            if depth < 2 || razor_value <= r_alpha {
                return razor_value;
            }
        }

        // Null-move pruning: if passing the move entirely still fails high, the real position is
        // already so good a full-depth search would fail high too. Skipped in check (no legal
        // null move), on PV nodes, and when we have no non-pawn material to move (zugzwang-prone
        // endings make the shortcut unsound).
        if !is_pv
            && !C::in_check()
            && depth >= NULL_MOVE_MIN_DEPTH
            && static_eval >= beta
            && board.non_pawn_material(board.turn()) > 0
        {
            let reduction = 3 + depth / 4;
            board.apply_null_move();
            let null_score = -self.search::<NonPV, NoCheck>(
                board,
                -beta,
                -beta + 1,
                depth - reduction,
                ply + 1,
            );
            board.undo_null_move();

            if self.should_stop() {
                return 0;
            }
            if null_score >= beta {
                return beta;
            }
        }

        // Futility pruning: near the horizon, if the static eval is already far enough below
        // alpha that one quiet move's typical gain can't close the gap, quiet moves at this node
        // are skipped outright.
        let futility_prune = !is_pv
            && !C::in_check()
            && depth <= FUTILITY_MAX_DEPTH
            && static_eval + FUTILITY_MARGIN_PER_PLY * depth as Value <= alpha;

        let mut moves = board.generate_moves();
        if moves.is_empty() {
            return if C::in_check() {
                -score::MATE + ply as Value
            } else {
                score::DRAW
            };
        }

        let killers = self.stack[ply as usize].killers;
        order_moves(board, &mut moves, tt_move, killers, &self.history);

        let mut best_score = score::NEG_INFINITE;
        let mut best_move = BitMove::null();
        let mut bound = NodeBound::UpperBound;
        let mut moves_searched = 0usize;

        for scored in moves.iter() {
            let m = scored.bit_move;
            let is_capture = m.is_capture();

            if futility_prune && moves_searched > 0 && !is_capture && !m.is_promo() {
                continue;
            }

            board.apply_move(m);
            let gives_check = board.in_check();

            // Late-move reductions are deliberately not implemented here (see DESIGN.md): every
            // move after the first gets a full-depth null-window scout, re-searched at the full
            // window only if it beats alpha.
            let value = if moves_searched == 0 {
                if gives_check {
                    -self.search::<N, InCheck>(board, -beta, -alpha, depth - 1, ply + 1)
                } else {
                    -self.search::<N, NoCheck>(board, -beta, -alpha, depth - 1, ply + 1)
                }
            } else {
                let mut value = if gives_check {
                    -self.search::<NonPV, InCheck>(board, -alpha - 1, -alpha, depth - 1, ply + 1)
                } else {
                    -self.search::<NonPV, NoCheck>(board, -alpha - 1, -alpha, depth - 1, ply + 1)
                };

                if value > alpha && is_pv {
                    value = if gives_check {
                        -self.search::<N, InCheck>(board, -beta, -alpha, depth - 1, ply + 1)
                    } else {
                        -self.search::<N, NoCheck>(board, -beta, -alpha, depth - 1, ply + 1)
                    };
                }
                value
            };

            board.undo_move();
            moves_searched += 1;

            if self.should_stop() {
                return 0;
            }

            if value > best_score {
                best_score = value;
                best_move = m;

                if value > alpha {
                    alpha = value;
                    bound = NodeBound::Exact;

                    if value >= beta {
                        bound = NodeBound::LowerBound;
                        if !is_capture {
                            self.record_killer(ply, m);
                            self.history.update(board.turn(), m, stat_bonus(depth));
                        }
                        break;
                    }
                }
            }
        }

        self.tt.store(
            key,
            best_move,
            score::value_to_tt(best_score, ply) as i16,
            static_eval as i16,
            depth.max(0) as u8,
            bound,
        );

        best_score
    }

    /// Extends the search along capturing/promoting lines past the depth-0 horizon, until the
    /// position is "quiet" (no more captures worth examining), so the static evaluator is never
    /// asked to judge a position in the middle of a tactical exchange.
    fn qsearch<N: PVNode>(&mut self, board: &mut Board, alpha: Value, beta: Value, ply: u16) -> Value {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }
        if board.is_draw() {
            return score::DRAW;
        }
        if ply as usize >= MAX_PLY as usize {
            return self.evaluate(board);
        }

        let mut alpha = alpha;
        let in_check = board.in_check();
        let stand_pat = if in_check {
            -score::MATE + ply as Value
        } else {
            self.evaluate(board)
        };

        if !in_check {
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        let mut moves = board.generate_moves();
        if moves.is_empty() {
            return if in_check {
                -score::MATE + ply as Value
            } else {
                score::DRAW
            };
        }
        order_captures(board, &mut moves);

        let mut best_score = stand_pat;

        for scored in moves.iter() {
            let m = scored.bit_move;
            if !in_check && !m.is_capture() && !m.is_promo() {
                continue;
            }

            // Skip captures that lose material outright: the exchange can't possibly recover
            // enough to matter in a quiet position, so it isn't worth the recursive call.
            if !in_check && m.is_capture() && !see_ge(board, m, 0) {
                continue;
            }

            board.apply_move(m);
            let value = -self.qsearch::<N>(board, -beta, -alpha, ply + 1);
            board.undo_move();

            if self.should_stop() {
                return 0;
            }

            if value > best_score {
                best_score = value;
                if value > alpha {
                    alpha = value;
                    if value >= beta {
                        break;
                    }
                }
            }
        }

        best_score
    }

    fn record_killer(&mut self, ply: u16, m: BitMove) {
        let slot = &mut self.stack[ply as usize].killers;
        if slot[0] != m {
            slot[1] = slot[0];
            slot[0] = m;
        }
    }

    fn evaluate(&mut self, board: &Board) -> Value {
        self.evaluator.evaluate(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::fen::OPENING_POS_FEN;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn finds_mate_in_one() {
        let mut board =
            Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let tt = Arc::new(TranspositionTable::new(1));
        let stop = Arc::new(AtomicBool::new(false));
        let mut searcher = Searcher::new(0, tt, stop);
        let result = searcher.iterative_deepening(
            &mut board,
            TimeManager::untimed(std::time::Instant::now()),
            Some(4),
            None,
        );
        assert!(score::is_mate_score(result.score));
        assert!(result.score > 0);
    }

    #[test]
    fn completes_a_shallow_search_from_the_start_position() {
        let mut board = Board::from_fen(OPENING_POS_FEN).unwrap();
        let tt = Arc::new(TranspositionTable::new(1));
        let stop = Arc::new(AtomicBool::new(false));
        let mut searcher = Searcher::new(0, tt, stop);
        let result = searcher.iterative_deepening(
            &mut board,
            TimeManager::untimed(std::time::Instant::now()),
            Some(3),
            None,
        );
        assert!(!result.best_move.is_null());
        assert_eq!(result.depth, 3);
    }
}
