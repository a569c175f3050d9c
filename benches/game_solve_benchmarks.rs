use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use rand::prelude::*;
use std::hint::black_box;
use PuzzleEngine::clock::ManualClock;
use PuzzleEngine::console_interface::parse_level;
use PuzzleEngine::core::DeadlockRules;
use PuzzleEngine::generator::{GeneratorConfig, PuzzleGenerator};
use PuzzleEngine::state_graph::{get_all_adjacent_nodes, solve, SolverConfig};

const PUZZLES: &[(&str, &str, usize, SamplingMode)] = &[
    ("puzzle_0", r#"
#####
#@$.#
#####
"#, 100, SamplingMode::Auto),
    ("puzzle_1", r#"
######
#@$ .#
######
"#, 100, SamplingMode::Auto),
    ("puzzle_2", r#"
######
#  . #
# $  #
#  $ #
#.@  #
######
"#, 100, SamplingMode::Auto),
    ("puzzle_3", r#"
#######
#.    #
#  $  #
# $@  #
#    .#
#######
"#, 50, SamplingMode::Auto),
    ("puzzle_4", r#"
#######
#.    #
# $$  #
#  @$.#
#.    #
#######
"#, 10, SamplingMode::Flat),
];

pub fn bench_game_solve_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_solve_full_search");
    let config = SolverConfig { time_limit_ms: u64::MAX / 2, ..SolverConfig::default() };

    for &(puzzle_name, puzzle, sample_size, sample_mode) in PUZZLES {
        group.sample_size(sample_size);
        group.sampling_mode(sample_mode);
        group.bench_with_input(
            BenchmarkId::new("minimum_pushes", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                b.iter_with_setup(
                    || parse_level(puzzle),
                    |(game_state, shared)| {
                        let clock = ManualClock::new();
                        let result = solve(
                            black_box(&shared),
                            black_box(&game_state),
                            &config,
                            &clock,
                        );
                        black_box(result)
                    },
                );
            },
        );
    }
    group.finish();
}

pub fn bench_game_solve_single_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_solve_single_node");
    let rules = DeadlockRules::default();

    for &(puzzle_name, puzzle, sample_size, sample_mode) in PUZZLES {
        group.sample_size(sample_size);
        group.sampling_mode(sample_mode);
        group.bench_with_input(
            BenchmarkId::new("single_node_expansion", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                b.iter_with_setup(
                    || parse_level(puzzle),
                    |(game_state, shared)| {
                        let adjacent_nodes = get_all_adjacent_nodes(
                            black_box(&game_state),
                            black_box(&shared),
                            &rules,
                        );
                        black_box(adjacent_nodes)
                    },
                );
            },
        );
    }
    group.finish();
}

pub fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);

    for boxes in [1usize, 2, 3] {
        let config = GeneratorConfig { boxes: boxes..=boxes, ..GeneratorConfig::default() };
        group.bench_with_input(BenchmarkId::new("boxes", boxes), &config, |b, config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let mut rng = StdRng::seed_from_u64(seed);
                let mut generator = PuzzleGenerator::new(config);
                black_box(generator.generate(&mut rng, &ManualClock::new()))
            });
        });
    }
    group.finish();
}

criterion_group!(
    game_solve_benches,
    bench_game_solve_full_search, bench_game_solve_single_node, bench_generate
);

criterion_main!(game_solve_benches);
