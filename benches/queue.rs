use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use procflow::queue::BoundedQueue;

fn bench_enqueue_dequeue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    for capacity in [1usize, 16, 256].iter() {
        group.bench_with_input(
            BenchmarkId::new("pingpong", capacity),
            capacity,
            |b, &capacity| {
                let queue = BoundedQueue::new(capacity).unwrap();
                b.iter(|| {
                    for i in 0..capacity {
                        queue.enqueue(black_box(i as u64)).unwrap();
                    }
                    for _ in 0..capacity {
                        black_box(queue.dequeue().unwrap());
                    }
                })
            },
        );
    }

    group.bench_function("threaded_64", |b| {
        b.iter(|| {
            let queue = Arc::new(BoundedQueue::new(64).unwrap());
            let total = 10_000u64;

            let producer = {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..total {
                        queue.enqueue(i).unwrap();
                    }
                })
            };
            let consumer = {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for _ in 0..total {
                        black_box(queue.dequeue().unwrap());
                    }
                })
            };

            producer.join().unwrap();
            consumer.join().unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_enqueue_dequeue);
criterion_main!(benches);
