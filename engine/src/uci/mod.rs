//! The interactive UCI loop: reads commands from stdin, drives a [`ThreadPool`] search, and
//! writes UCI responses to stdout.
//!
//! Grounded on the teacher's `PlecoSearcher::uci`, but restructured around a dedicated stdin
//! thread and a `crossbeam_channel` (the same Comm/Search-thread channel split the pack's rustic
//! example uses) rather than a single blocking `read_line` loop — `go infinite` runs on its own
//! thread so `stop`/`quit` typed while it's thinking are read immediately instead of queueing up
//! behind the search that's still running.

pub mod options;
pub mod parse;

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{select, unbounded};
use log::{info, warn};

use chess_core::board::Board;
use chess_core::piece_move::BitMove;

use crate::consts::DEFAULT_TT_SIZE_MB;
use crate::threadpool::ThreadPool;
use options::{OptionWork, OptionsMap};
use parse::{parse_go, parse_position};

pub const ID_NAME: &str = "Corvid";
pub const ID_AUTHOR: &str = "the corvid-chess contributors";

pub struct UciLoop {
    board: Board,
    options: OptionsMap,
    pool: Arc<Mutex<ThreadPool>>,
    stop_flag: Arc<AtomicBool>,
    searching: bool,
}

impl Default for UciLoop {
    fn default() -> Self {
        UciLoop::new()
    }
}

impl UciLoop {
    pub fn new() -> Self {
        let pool = ThreadPool::new(num_cpus::get(), DEFAULT_TT_SIZE_MB);
        let stop_flag = pool.stop_flag();
        UciLoop {
            board: Board::start_pos(),
            options: OptionsMap::new(),
            pool: Arc::new(Mutex::new(pool)),
            stop_flag,
            searching: false,
        }
    }

    /// Runs until `quit` or stdin closes.
    pub fn run(&mut self) {
        self.print_identity();

        let (cmd_tx, cmd_rx) = unbounded::<String>();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines().flatten() {
                if cmd_tx.send(line).is_err() {
                    break;
                }
            }
        });

        let (done_tx, done_rx) = unbounded::<BitMove>();

        loop {
            select! {
                recv(cmd_rx) -> msg => {
                    let line = match msg {
                        Ok(line) => line,
                        Err(_) => break, // stdin closed.
                    };
                    if !self.dispatch(&line, &done_tx) {
                        break;
                    }
                }
                recv(done_rx) -> msg => {
                    if let Ok(best) = msg {
                        println!("bestmove {}", best);
                        self.searching = false;
                    }
                }
            }
        }
    }

    /// Handles one input line. Returns `false` when the loop should exit (`quit`, or stdin EOF).
    fn dispatch(&mut self, line: &str, done_tx: &crossbeam_channel::Sender<BitMove>) -> bool {
        let args: Vec<&str> = line.split_whitespace().collect();
        let command = match args.first() {
            Some(c) => *c,
            None => return true,
        };

        match command {
            "uci" => self.print_identity(),
            "isready" => println!("readyok"),
            "ucinewgame" => {
                self.pool.lock().expect("thread pool lock poisoned").clear();
                self.board = Board::start_pos();
            }
            "position" => match parse_position(&args[1..]) {
                Some(board) => self.board = board,
                None => warn!("couldn't parse 'position {}'", args[1..].join(" ")),
            },
            "setoption" => self.apply_setoption(&args[1..]),
            "go" => self.go(&args[1..], done_tx.clone()),
            "stop" => self.stop_flag.store(true, Ordering::Relaxed),
            "quit" => {
                self.stop_flag.store(true, Ordering::Relaxed);
                return false;
            }
            _ => info!("unrecognized UCI command: {}", line),
        }
        true
    }

    fn go(&mut self, args: &[&str], done_tx: crossbeam_channel::Sender<BitMove>) {
        if self.searching {
            warn!("'go' received while already searching, ignoring");
            return;
        }
        self.searching = true;
        let limits = parse_go(args);
        let board = self.board.clone();
        let pool = Arc::clone(&self.pool);
        thread::spawn(move || {
            let best = pool
                .lock()
                .expect("thread pool lock poisoned")
                .search(&board, limits);
            let _ = done_tx.send(best);
        });
    }

    fn apply_setoption(&mut self, args: &[&str]) {
        // Expected shape: "name <name words...> value <value words...>".
        if args.first() != Some(&"name") {
            warn!("malformed setoption: missing 'name'");
            return;
        }
        let value_idx = args.iter().position(|&a| a == "value");
        let name_end = value_idx.unwrap_or(args.len());
        let name = args[1..name_end].join(" ");
        let value = value_idx
            .map(|idx| args[idx + 1..].join(" "))
            .unwrap_or_default();

        if !self.options.apply(&name, &value) {
            warn!("unable to apply option '{}' = '{}'", name, value);
            return;
        }
        let mut pool = self.pool.lock().expect("thread pool lock poisoned");
        while let Some(work) = self.options.next_work() {
            match work {
                OptionWork::ClearHash => pool.clear(),
                OptionWork::ResizeHash(mb) => pool.resize_tt(mb),
                OptionWork::SetThreads(_) => {
                    // The pool's thread count is fixed at construction; accepted for UCI
                    // compliance but otherwise inert. See DESIGN.md.
                }
            }
        }
    }

    fn print_identity(&self) {
        println!("id name {}", ID_NAME);
        println!("id author {}", ID_AUTHOR);
        for line in self.options.display_all() {
            println!("{}", line);
        }
        println!("uciok");
    }
}
