//! Fixed-depth search throughput from the starting position, grounded on the teacher's
//! `pleco_engine/benches/depth_benches.rs` (`bench_4_ply`/`bench_5_ply`/`bench_6_ply` against a
//! fresh searcher each iteration) but ported to `criterion` and this crate's `ThreadPool`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess_core::board::Board;
use chess_engine::consts::DEFAULT_TT_SIZE_MB;
use chess_engine::threadpool::ThreadPool;
use chess_engine::time::SearchLimits;

fn bench_depth(c: &mut Criterion, name: &str, depth: u16) {
    let board = Board::start_pos();
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut pool = ThreadPool::new(1, DEFAULT_TT_SIZE_MB);
            black_box(pool.search(&board, SearchLimits::depth(depth)));
        })
    });
}

fn bench_4_ply(c: &mut Criterion) {
    bench_depth(c, "search_depth_4", 4);
}

fn bench_5_ply(c: &mut Criterion) {
    bench_depth(c, "search_depth_5", 5);
}

criterion_group!(benches, bench_4_ply, bench_5_ply);
criterion_main!(benches);
