use btree_interval_map::IntervalMap;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use std::hint::black_box;

fn random_ops(seed: u64, count: usize) -> Vec<(i32, i32, u8)> {
	let mut rng = SmallRng::seed_from_u64(seed);

	(0..count)
		.map(|_| {
			let begin = rng.random_range(-10_000..10_000);
			let size = rng.random_range(1..100);
			(begin, begin + size, rng.random_range(0..26u8))
		})
		.collect()
}

fn bench_assign(c: &mut Criterion) {
	let mut group = c.benchmark_group("assign");
	let ops = random_ops(0x1d3a7, 10_000);

	group.bench_function("random_ranges", |b| {
		b.iter(|| {
			let mut map = IntervalMap::new(0u8);
			for &(begin, end, value) in &ops {
				map.assign(begin, end, value);
			}
			map
		})
	});

	group.finish();
}

fn bench_get(c: &mut Criterion) {
	let mut group = c.benchmark_group("get");

	let mut map = IntervalMap::new(0u8);
	for (begin, end, value) in random_ops(0x2e4b8, 10_000) {
		map.assign(begin, end, value);
	}

	let mut rng = SmallRng::seed_from_u64(0x3f5c9);
	let keys: Vec<i32> = (0..1000).map(|_| rng.random_range(-12_000..12_000)).collect();

	group.bench_function("random_keys", |b| {
		b.iter(|| {
			for key in &keys {
				black_box(map.get(key));
			}
		})
	});

	group.finish();
}

criterion_group!(benches, bench_assign, bench_get);
criterion_main!(benches);
