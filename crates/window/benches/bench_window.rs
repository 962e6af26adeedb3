use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use gridstream_window::{WindowConfig, WindowTracker};

fn bench_no_op_ticks(radius: i32, iterations: usize) {
    let mut tracker = WindowTracker::new(WindowConfig {
        radius,
        cell_size: 4.0,
    })
    .unwrap();
    tracker.update(Vec2::ZERO);

    let start = Instant::now();
    for _ in 0..iterations {
        // Jitter inside the same cell: the guard must keep this O(1).
        let _ = black_box(tracker.update(black_box(Vec2::new(0.3, -0.2))));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  no-op tick (r={radius}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_transitions(radius: i32, iterations: usize) {
    let mut tracker = WindowTracker::new(WindowConfig {
        radius,
        cell_size: 4.0,
    })
    .unwrap();

    let start = Instant::now();
    for i in 0..iterations {
        // Step one cell east each tick; every update is a transition.
        let observer = Vec2::new(i as f32 * 4.0, 0.0);
        let _ = black_box(tracker.update(black_box(observer)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  transition (r={radius}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Window Tracker Benchmarks ===\n");

    println!("No-op ticks (observer stays in cell):");
    bench_no_op_ticks(2, 1_000_000);
    bench_no_op_ticks(8, 1_000_000);

    println!("\nFull transitions (observer crosses a cell every tick):");
    bench_transitions(2, 10_000);
    bench_transitions(4, 10_000);
    bench_transitions(8, 1_000);

    println!("\n=== Done ===");
}
