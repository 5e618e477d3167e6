use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use king_reversi::ai::search::Searcher;
use king_reversi::{EvalStrategy, GameState, Move, Variant};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    variant: Variant,
    strategy: EvalStrategy,
    opening: &'static [Move],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "classic_pos_score",
        variant: Variant::Classic,
        strategy: EvalStrategy::PosScore,
        opening: &[],
    },
    BenchCase {
        name: "classic_pos_mobility",
        variant: Variant::Classic,
        strategy: EvalStrategy::PosPlusMobility,
        opening: &[],
    },
    BenchCase {
        name: "king_after_king_opening",
        variant: Variant::King,
        strategy: EvalStrategy::KingPosScore,
        opening: &[Move {
            row: 2,
            col: 4,
            is_king: true,
        }],
    },
];

fn position(case: &BenchCase) -> GameState {
    case.opening
        .iter()
        .fold(GameState::new(case.variant), |state, &mv| {
            state
                .apply_move(mv)
                .expect("bench opening must be legal")
                .switch_turn()
        })
}

fn bench_score_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_root");
    for case in CASES {
        let state = position(case);
        for depth in 1..=3u8 {
            group.bench_with_input(BenchmarkId::new(case.name, depth), &depth, |b, &depth| {
                b.iter(|| {
                    let mut searcher = Searcher::new(case.strategy);
                    black_box(searcher.score_root(black_box(&state), depth))
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_score_root);
criterion_main!(benches);
