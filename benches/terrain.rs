use chizu::config::MapConfig;
use chizu::raster::{render_terrain, RenderMode, TerrainScene};
use chizu::settlement::{place_settlements, PlacementParams, TerrainProbe};
use chizu::spatial::SpatialIndex;
use chizu::terrain::{HeightLattice, LatticeParams, PointField, SimplexSampler, TerrainVisibility};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use egui::Pos2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn generate_random_points(n: usize, width: f32, height: f32) -> Vec<Pos2> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    (0..n)
        .map(|_| Pos2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)))
        .collect()
}

fn bench_point_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("Point Field");
    let noise = SimplexSampler::new(42);

    for &n in &[1000, 3000, 10000] {
        let config = MapConfig {
            point_count: n,
            ..Default::default()
        };
        group.bench_function(format!("generate_{}", n), |b| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                black_box(PointField::generate(&config, &mut rng, &noise));
            });
        });
    }

    group.finish();
}

fn bench_spatial_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spatial Index");

    for &n in &[1000, 3000, 10000] {
        let points = generate_random_points(n, 1120.0, 920.0);
        group.bench_function(format!("build_{}", n), |b| {
            b.iter(|| black_box(SpatialIndex::build(&points)));
        });

        let index = SpatialIndex::build(&points);
        let queries = generate_random_points(1000, 1120.0, 920.0);
        group.bench_function(format!("nearest_1000_of_{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(index.find_nearest(*q));
                }
            });
        });
    }

    group.finish();
}

fn bench_render_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Terrain Render");
    group.sample_size(20);

    let config = MapConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let noise = SimplexSampler::new(42);
    let field = PointField::generate(&config, &mut rng, &noise);
    let index = SpatialIndex::build(&field.points);
    let lattice = HeightLattice::generate(&config, &LatticeParams::default(), &noise);
    let visibility = TerrainVisibility::default();
    let scene = TerrainScene {
        field: &field,
        index: &index,
        lattice: &lattice,
        visibility: &visibility,
    };

    for mode in RenderMode::ALL {
        group.bench_function(format!("{}_800x600", mode), |b| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(1);
                black_box(render_terrain(mode, scene, &mut rng));
            });
        });
    }

    group.finish();
}

fn bench_settlements(c: &mut Criterion) {
    let mut group = c.benchmark_group("Settlements");
    group.sample_size(20);

    let config = MapConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let noise = SimplexSampler::new(42);
    let field = PointField::generate(&config, &mut rng, &noise);
    let index = SpatialIndex::build(&field.points);
    let params = PlacementParams::default();

    group.bench_function("place_800x600", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            black_box(place_settlements(TerrainProbe::new(&field, &index), &params, &mut rng));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_point_field,
    bench_spatial_index,
    bench_render_modes,
    bench_settlements
);
criterion_main!(benches);
