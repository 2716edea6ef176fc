use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess88::*;

fn perft_benchmark(c: &mut Criterion) {
    let kiwipete = Position::from_fen(FEN_KIWIPETE).unwrap();
    c.bench_function("Kiwipete Perft 3", |b| {
        b.iter(|| {
            let mut kiwipete = black_box(kiwipete);
            let depth = black_box(3);
            black_box(perft_nodes(&mut kiwipete, depth))
        });
    });
}

fn search_benchmark(c: &mut Criterion) {
    let startpos = Position::default();
    c.bench_function("Startpos Search 3", |b| {
        b.iter(|| {
            let mut startpos = black_box(startpos);
            black_box(Searcher::new().search(&mut startpos, 3, -INFINITY, INFINITY))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(30));
    targets = perft_benchmark, search_benchmark
}
criterion_main!(benches);
