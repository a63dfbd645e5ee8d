use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexgrid::{GridConfig, HexGrid, OutputFormat};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid-plan");
    group.sample_size(10);

    let mut config = GridConfig::new(OutputFormat::Svg);
    config.hex_side = Some(10.0);
    config.columns = Some(200);
    config.rows = Some(200);
    config.coord.format = "%C%03r".parse().unwrap();
    group.bench_function("200x200 plan", |b| {
        b.iter(|| HexGrid::new(black_box(config.clone())))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
