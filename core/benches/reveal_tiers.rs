use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minegrid_core::*;
use std::hint::black_box;

fn reveal_first_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_first_click");
    for tier in Difficulty::TIERS {
        let config = tier.config();
        let center = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(BenchmarkId::from_parameter(tier), &tier, |b, &tier| {
            b.iter(|| {
                let mut grid = Grid::new(tier)
                    .expect("tier config is valid")
                    .with_placer(RandomPlacer::seeded(7));
                black_box(grid.reveal(black_box(center)).expect("center is on the board"))
            })
        });
    }
    group.finish();
}

fn flood_blank_board(c: &mut Criterion) {
    let config = GameConfig::new_unchecked((64, 64), 0);
    c.bench_function("flood_blank_64x64", |b| {
        b.iter(|| {
            let mut grid = Grid::new(Difficulty::Custom(config)).expect("config is valid");
            black_box(grid.reveal((0, 0)).expect("origin is on the board"))
        })
    });
}

criterion_group!(benches, reveal_first_click, flood_blank_board);
criterion_main!(benches);
