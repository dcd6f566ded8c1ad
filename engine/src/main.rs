//! `corvid`: a UCI chess engine binary built on `chess_engine`.

use clap::Parser;

/// A UCI-compatible chess engine.
#[derive(Parser, Debug)]
#[command(name = "corvid", version, about)]
struct Cli {
    /// Run a fixed-depth search on the starting position and print the result, instead of
    /// entering the interactive UCI loop. Mainly useful for sanity-checking a build from the
    /// command line without a GUI.
    #[arg(long)]
    bench_depth: Option<u16>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.bench_depth {
        Some(depth) => run_bench(depth),
        None => chess_engine::uci::UciLoop::new().run(),
    }
}

fn run_bench(depth: u16) {
    use chess_core::board::Board;
    use chess_engine::threadpool::ThreadPool;
    use chess_engine::time::SearchLimits;

    let board = Board::start_pos();
    let mut pool = ThreadPool::new(num_cpus::get(), chess_engine::consts::DEFAULT_TT_SIZE_MB);
    let best = pool.search(&board, SearchLimits::depth(depth));
    println!("bestmove {}", best);
}
