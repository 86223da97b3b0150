//! Physics benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rein2d::physics::body::RigidBody;
use rein2d::physics::broadphase::SpatialHashGrid;
use rein2d::physics::manager::CollisionManager;
use rein2d::physics::narrowphase::{
    circle_circle, circle_polygon, circle_segment, detect_collision, polygon_polygon,
};
use rein2d::physics::rigid_body::integrate_bodies;
use rein2d::physics::shape::Shape;
use rein2d::physics::solver::resolve_collision;
use rein2d_bench::*;

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    let scenes: [(&str, fn(usize) -> rein2d::BodySet); 3] = [
        ("broadphase/packed_circles", setup_circle_bodies),
        ("broadphase/mixed_shapes", setup_mixed_bodies),
        ("broadphase/sparse", setup_sparse_bodies),
    ];

    for (name, setup) in scenes {
        let mut group = c.benchmark_group(name);
        for &n in &[100, 500, 1000, 2000] {
            let bodies = setup(n);
            let mut grid = SpatialHashGrid::default();
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| grid.find_pairs(&bodies));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("broadphase/cell_size");
        let bodies = setup_mixed_bodies(1000);
        for &cell in &[16.0_f32, 32.0, 64.0, 128.0, 256.0] {
            let mut grid = SpatialHashGrid::new(cell);
            group.bench_with_input(BenchmarkId::from_parameter(cell), &cell, |b, _| {
                b.iter(|| grid.find_pairs(&bodies));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    let circle = Shape::circle(Vec2::ZERO, 10.0);
    let rect = Shape::rect(Vec2::ZERO, 20.0, 20.0);

    {
        let mut group = c.benchmark_group("narrowphase/circle_circle");
        let hit = Shape::circle(Vec2::new(15.0, 0.0), 10.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| circle_circle(&circle, &hit));
        });
        let miss = Shape::circle(Vec2::new(50.0, 0.0), 10.0);
        group.bench_function("separated", |b| {
            b.iter(|| circle_circle(&circle, &miss));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/circle_polygon");
        let hit = Shape::circle(Vec2::new(15.0, 3.0), 8.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| circle_polygon(&hit, &rect));
        });
        let miss = Shape::circle(Vec2::new(40.0, 0.0), 8.0);
        group.bench_function("separated", |b| {
            b.iter(|| circle_polygon(&miss, &rect));
        });
        let tri = Shape::triangle(Vec2::ZERO, 20.0, 20.0).with_rotation(0.7);
        group.bench_function("triangle", |b| {
            b.iter(|| circle_polygon(&hit, &tri));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/polygon_polygon");
        let hit = Shape::rect(Vec2::new(15.0, 0.0), 20.0, 20.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| polygon_polygon(&rect, &hit));
        });
        let miss = Shape::rect(Vec2::new(50.0, 0.0), 20.0, 20.0);
        group.bench_function("separated", |b| {
            b.iter(|| polygon_polygon(&rect, &miss));
        });
        let rotated = Shape::rect(Vec2::new(15.0, 0.0), 20.0, 20.0).with_rotation(0.785);
        group.bench_function("rotated", |b| {
            b.iter(|| polygon_polygon(&rect, &rotated));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/circle_segment");
        let line = Shape::segment(Vec2::new(-50.0, 12.0), Vec2::new(50.0, 12.0), 6.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| circle_segment(&circle, &line));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/batch");
        for &n in &[100, 500, 1000] {
            let pairs: Vec<_> = (0..n)
                .map(|i| {
                    let x = i as f32 * 60.0;
                    let a = Shape::rect(Vec2::new(x, 0.0), 20.0, 20.0).with_rotation(0.3);
                    let b = Shape::circle(Vec2::new(x + 15.0, 2.0), 8.0);
                    (a, b)
                })
                .collect();

            group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
                b.iter(|| {
                    for (sa, sb) in pairs {
                        detect_collision(sa, sb);
                    }
                });
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/resolve");
    let a = RigidBody::new_dynamic(Shape::circle(Vec2::ZERO, 10.0), 1.0);
    let mut b_body = RigidBody::new_dynamic(Shape::circle(Vec2::new(15.0, 0.0), 10.0), 2.0);
    b_body.velocity = Vec2::new(-120.0, 10.0);
    let manifold = detect_collision(&a.shape, &b_body.shape);

    group.bench_function("circle_pair", |b| {
        b.iter_batched(
            || (a, b_body),
            |(mut a, mut b)| {
                if let Some(m) = &manifold {
                    resolve_collision(&mut a, &mut b, m);
                }
                (a, b)
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn bench_pipeline(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("pipeline/step");
        group.sample_size(30);
        for &n in &[50, 100, 500, 1000] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_scene(n),
                    |mut world| world.step(|_, _| {}),
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/sustained_60steps");
        group.sample_size(10);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_scene(n),
                    |mut world| {
                        for _ in 0..60 {
                            world.step(|_, _| {});
                        }
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/stages");
        let n = 500;

        group.bench_function("integrate_500", |b| {
            b.iter_batched(
                || setup_mixed_bodies(n),
                |mut bodies| integrate_bodies(&mut bodies, 1.0 / 60.0),
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_function("collisions_500", |b| {
            let mut manager = CollisionManager::default();
            b.iter_batched(
                || setup_mixed_bodies(n),
                |mut bodies| manager.step(&mut bodies),
                criterion::BatchSize::LargeInput,
            );
        });
        group.finish();
    }
}

criterion_group!(
    benches,
    bench_broadphase,
    bench_narrowphase,
    bench_solver,
    bench_pipeline
);
criterion_main!(benches);
