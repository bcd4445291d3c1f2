use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pushdown::{language::Parameters, prelude::*, random};

fn batch_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_to_completion");
    for size in [4, 64, 1024] {
        let member = Parameters::new(size, size, size).word();
        group.bench_with_input(BenchmarkId::new("member", size), &member, |b, word| {
            b.iter(|| Pda::recognize(black_box(word)))
        });
    }
    group.finish();
}

fn step_run(c: &mut Criterion) {
    let words: Vec<String> = (0..64).map(|_| random::random_near_miss(32, 32, 32)).collect();
    c.bench_function("step near misses", |b| {
        b.iter(|| {
            for word in &words {
                let mut pda = Pda::new();
                pda.load_input(black_box(word)).unwrap();
                while !matches!(pda.step(), StepResult::Halted(_)) {}
            }
        })
    });
}

criterion_group!(benches, batch_run, step_run);
criterion_main!(benches);
