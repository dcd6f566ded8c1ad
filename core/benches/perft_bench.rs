//! Perft throughput across a handful of reference positions, grounded on the teacher's
//! `pleco/benches/perft_benches.rs` (same positions, same depths) but ported from the nightly
//! `test::Bencher` harness to `criterion`, matching the rest of this workspace's benches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess_core::board::perft::perft;
use chess_core::board::Board;

static RAND_POSITIONS: [&str; 6] = [
    "rn2k3/pp1qPppr/5n2/1b2B3/8/4NP2/3NP1PP/R2K1B1R b q - 0 23",
    "r1bqkbnr/ppp2ppp/2np4/4p3/4PQ2/2NP4/PPP1NPPP/R1B1KB1R w KQkq e6 0 8",
    "r1bqkb1r/pp2pp2/2p2n2/6Q1/7p/2N4P/PP1B1PP1/R3KBNR w KQkq - 0 14",
    "3k4/6b1/1p5p/4p3/5rP1/6K1/8/8 w - - 0 40",
    "1k6/1p1n4/p6p/4P3/2P5/1R6/5K1P/4R3 b - - 2 33",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
];

fn boards() -> Vec<Board> {
    RAND_POSITIONS
        .iter()
        .map(|fen| Board::from_fen(fen).unwrap())
        .collect()
}

fn perft_depth(c: &mut Criterion, name: &str, depth: u32) {
    let mut boards = boards();
    c.bench_function(name, |b| {
        b.iter(|| {
            for board in boards.iter_mut() {
                black_box(perft(board, depth));
            }
        })
    });
}

fn perft_3(c: &mut Criterion) {
    perft_depth(c, "perft_3", 3);
}

fn perft_4(c: &mut Criterion) {
    perft_depth(c, "perft_4", 4);
}

criterion_group!(benches, perft_3, perft_4);
criterion_main!(benches);
