use connect_n_minimax::{
    alpha_beta::{AlphaBetaPlayer, EngineOptions, Pruning},
    evaluator::LineEvaluator,
};
use types::{wire_representation::GameRecord, Board, Player};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

fn load(game_json: &str) -> Board {
    let record: GameRecord = serde_json::from_str(game_json).unwrap();
    Board::try_from(record).unwrap()
}

fn bench_minimax_to_depth(c: &mut Criterion, max_depth: usize) {
    let game_json = include_str!("../fixtures/start_of_game.json");

    let mut group = c.benchmark_group(format!("Alpha-Beta Depth {}", max_depth));

    let pruned: AlphaBetaPlayer<i64, LineEvaluator> =
        AlphaBetaPlayer::new(LineEvaluator::default(), "bench", Default::default());
    let full_width: AlphaBetaPlayer<i64, LineEvaluator> = AlphaBetaPlayer::new(
        LineEvaluator::default(),
        "bench",
        EngineOptions {
            pruning: Pruning::FullWidth,
            ..Default::default()
        },
    );

    group.bench_function("single minimax", |b| {
        let mut board = load(game_json);
        b.iter(|| pruned.single_minimax(black_box(&mut board), max_depth))
    });

    group.bench_function("full width minimax", |b| {
        let mut board = load(game_json);
        b.iter(|| full_width.single_minimax(black_box(&mut board), max_depth))
    });

    group.bench_function("iterative deepening", |b| {
        let mut board = load(game_json);
        b.iter(|| pruned.deepened_minimax_to_depth(black_box(&mut board), max_depth))
    });

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_minimax_to_depth(c, 5);

    c.bench_function("evaluate midgame", |b| {
        let board = load(include_str!("../fixtures/midgame.json"));
        let evaluator = LineEvaluator::default();

        b.iter(|| evaluator.evaluate(black_box(&board), Player::First))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
