use criterion::{criterion_group, criterion_main, Criterion};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sudoku_engine::catalog::{self, Difficulty};
use sudoku_engine::generator::Generator;

// Seeds are varied between iterations so the search does not repeatedly walk
// the same branch ordering, which would make the numbers unrealistically
// stable.

fn benchmark_full_solution(c: &mut Criterion) {
    let mut seed = 0u64;

    c.bench_function("generate full solution", |b| b.iter(|| {
        seed += 1;

        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(seed));
        generator.generate_solution().unwrap()
    }));
}

fn benchmark_puzzle_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate puzzle");
    let difficulties = [
        ("easy", Difficulty::Easy),
        ("medium", Difficulty::Medium),
        ("hard", Difficulty::Hard)
    ];

    for &(name, difficulty) in difficulties.iter() {
        let mut seed = 0u64;

        group.bench_function(name, |b| b.iter(|| {
            seed += 1;

            let rng = ChaCha8Rng::seed_from_u64(seed);
            catalog::generate_puzzle(difficulty, rng).unwrap()
        }));
    }

    group.finish();
}

criterion_group!(benches, benchmark_full_solution,
    benchmark_puzzle_generation);
criterion_main!(benches);
