//! # Distance Field Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use mouse_lib::auto::{
    loc::{Cell, GridSize, Heading},
    map::{DistanceField, GoalRegion, WallMap},
    nav::PathPlanner,
};

/// Build a 16x16 maze of long east-west corridors, joined alternately at the east and west ends,
/// with some extra walls scattered through it.
fn serpentine_map() -> WallMap {
    let size = GridSize {
        width: 16,
        height: 16,
    };
    let mut map = WallMap::new(size);

    for y in 0..15 {
        let gap_x = if y % 2 == 0 { 15 } else { 0 };
        for x in 0..16 {
            if x != gap_x {
                map.record_wall(Cell { x, y }, Heading::North).unwrap();
            }
        }
    }

    // Scatter a few extra walls between cells in the same corridor
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..40 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let x = ((state >> 33) % 15) as usize;
        let y = ((state >> 17) % 16) as usize;
        if x % 4 == 1 {
            map.record_wall(Cell { x, y }, Heading::East).unwrap();
        }
    }

    map
}

fn dist_field_benchmark(c: &mut Criterion) {
    let map = serpentine_map();
    let goal = GoalRegion::centre(map.size());
    let start = Cell { x: 0, y: 0 };

    c.bench_function("DistanceField::recompute", |b| {
        let mut field = DistanceField::new(map.size());
        b.iter(|| field.recompute(&map, goal.cells()))
    });

    c.bench_function("DistanceField::ensure_consistent", |b| {
        let mut field = DistanceField::new(map.size());
        field.recompute(&map, goal.cells());
        b.iter(|| field.ensure_consistent(&map, &start))
    });

    c.bench_function("PathPlanner::plan", |b| {
        let mut planner = PathPlanner::new();
        b.iter(|| planner.plan(&map, start, Cell { x: 15, y: 15 }).unwrap())
    });
}

criterion_group!(benches, dist_field_benchmark);
criterion_main!(benches);
