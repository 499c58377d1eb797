use brittle_crates::core::DestructionPolicy;
use brittle_crates::level::{LevelRules, parse_level};
use brittle_crates::planner::{Horizon, evaluate};
use brittle_crates::state_graph::{PopulateResult, StateGraph, populate_node, populate_step};
use criterion::{BenchmarkId, Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;

const PUZZLES: &[(&str, &str, usize, SamplingMode)] = &[
    ("puzzle_0", r#"
    ####
    #@$#
    ####
    "#, 100, SamplingMode::Auto),
    ("puzzle_1", r#"
    ######
    #@$ .#
    ######
    "#, 100, SamplingMode::Auto),
    ("puzzle_2", r#"
    ######
    #@$  #
    # $. #
    # .  #
    ######
    "#, 100, SamplingMode::Auto),
    ("puzzle_3", r#"
    ########
    # @$  .#
    # $  $ #
    # .# $ #
    #..#   #
    ########
    "#, 20, SamplingMode::Flat),
];

const RULES: LevelRules = LevelRules {
    push_budget: 4,
    policy: DestructionPolicy::Unconditional,
};

pub fn bench_game_solve_full_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_solve_full_graph");

    for &(puzzle_name, puzzle, sample_size, sample_mode) in PUZZLES {
        group.sample_size(sample_size);
        group.sampling_mode(sample_mode);
        group.bench_with_input(
            BenchmarkId::new("complete_graph", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                b.iter_with_setup(
                    || {
                        let (game_state, world) = parse_level(puzzle, RULES).unwrap();
                        let mut state_graph = StateGraph::new();
                        state_graph.upsert_state(game_state);
                        (state_graph, world)
                    },
                    |(mut state_graph, world)| {
                        loop {
                            let result = populate_step(black_box(&mut state_graph), black_box(&world));
                            if let PopulateResult::AllVisited = result {
                                break;
                            }
                        }
                        black_box(state_graph)
                    },
                );
            },
        );
    }
    group.finish();
}

pub fn bench_game_solve_single_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_solve_single_node");

    for &(puzzle_name, puzzle, sample_size, sample_mode) in PUZZLES {
        group.sample_size(sample_size);
        group.sampling_mode(sample_mode);
        group.bench_with_input(
            BenchmarkId::new("single_node_expansion", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                b.iter_with_setup(
                    || {
                        let (game_state, world) = parse_level(puzzle, RULES).unwrap();
                        let mut state_graph = StateGraph::new();
                        let root = state_graph.upsert_state(game_state);
                        (state_graph, world, root)
                    },
                    |(mut state_graph, world, root)| {
                        populate_node(black_box(&mut state_graph), black_box(&world), root);
                        black_box(state_graph)
                    },
                );
            },
        );
    }
    group.finish();
}

pub fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle");

    for &(puzzle_name, puzzle, sample_size, sample_mode) in PUZZLES {
        group.sample_size(sample_size);
        group.sampling_mode(sample_mode);
        group.bench_with_input(
            BenchmarkId::new("evaluate", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                let (game_state, world) = parse_level(puzzle, RULES).unwrap();
                b.iter(|| evaluate(black_box(&game_state), black_box(&world), Horizon::default()));
            },
        );
    }
    group.finish();
}

criterion_group!(
    game_solve_benches,
    bench_game_solve_full_graph,
    bench_game_solve_single_node,
    bench_oracle
);

criterion_main!(game_solve_benches);
