use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use polymine_core::*;
use std::hint::black_box;

fn tiers() -> Vec<(&'static str, GameConfig)> {
    let reference = |count| {
        HazardType::REFERENCE
            .into_iter()
            .try_fold(HazardCounts::new(), |counts, hazard| counts.with(hazard, count))
            .expect("reference hazards are valid")
    };

    vec![
        ("beginner", GameConfig::new((9, 9), reference(1))),
        ("intermediate", GameConfig::new((16, 16), reference(5))),
        (
            "expert-torus",
            GameConfig::new((16, 30), reference(12))
                .with_topology(Topology::default().with_wrap(WrapMode::TORUS)),
        ),
        (
            "huge-knight",
            GameConfig::new((200, 200), reference(600))
                .with_topology(Topology::preset(NeighborhoodPreset::Knight)),
        ),
    ]
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in tiers() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomBoardGenerator::from_seed(seed).generate(black_box(config))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
