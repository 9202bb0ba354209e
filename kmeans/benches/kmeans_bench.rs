use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wiigee_kmeans::{kmeans, Config, Init};

fn noisy_points(n: usize, seed: u64) -> Vec<[f64; 3]> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((state >> 33) as f64) / (u32::MAX as f64) - 0.5
    };
    let centers = [[0.0, 0.0, 25.0], [25.0, 0.0, 0.0], [0.0, -25.0, 0.0]];
    (0..n)
        .map(|i| {
            let c = centers[i % centers.len()];
            [c[0] + next() * 4.0, c[1] + next() * 4.0, c[2] + next() * 4.0]
        })
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let data = noisy_points(3000, 7);

    for init in [Init::Random, Init::Points, Init::PlusPlus] {
        let cfg = Config {
            k: 3,
            init,
            seed: 1,
            ..Config::default()
        };
        c.bench_function(&format!("kmeans_3000x3_k3_{init}"), |b| {
            b.iter(|| {
                let _ = black_box(kmeans(black_box(&data), &cfg));
            });
        });
    }
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
