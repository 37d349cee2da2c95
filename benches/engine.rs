use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sparselife::{Coord, Life};

fn make_alive(width: i32, height: i32) -> Vec<Coord> {
    let mut alive = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 3 == 0 {
                alive.push(Coord { x, y });
            }
        }
    }
    alive
}

/// Gliders spaced far apart, so most of the plane between them is empty
fn make_glider_field(count: i32) -> Vec<Coord> {
    const GLIDER: [(i32, i32); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    const SPACING: i32 = 1000;

    let mut alive = Vec::new();
    for i in 0..count {
        for j in 0..count {
            let offset = Coord::new(i * SPACING, j * SPACING);
            alive.extend(
                GLIDER
                    .iter()
                    .filter_map(|&p| Coord::from(p).checked_add(offset)),
            );
        }
    }
    alive
}

fn bench_advance_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_one");
    for size in [32, 64, 128] {
        let alive = make_alive(size, size);

        group.bench_with_input(BenchmarkId::new("dense", size), &alive, |b, alive| {
            b.iter_batched(
                || Life::new(alive.iter().copied()),
                |mut game| game.advance_one(),
                BatchSize::LargeInput,
            );
        });
    }
    for count in [4, 16] {
        let alive = make_glider_field(count);

        group.bench_with_input(BenchmarkId::new("sparse", count), &alive, |b, alive| {
            b.iter_batched(
                || Life::new(alive.iter().copied()),
                |mut game| game.advance_one(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_advance_one);
criterion_main!(benches);
