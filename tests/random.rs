use btree_interval_map::IntervalMap;
use rand::prelude::*;

fn assert_canonical(map: &IntervalMap<i32, char>) {
	let mut previous: Option<(&i32, &char)> = None;

	for (key, value) in map.iter() {
		match previous {
			Some((previous_key, previous_value)) => {
				assert!(previous_key < key, "unordered transition at key {}", key);
				assert_ne!(
					previous_value, value,
					"redundant adjacent transitions at key {}",
					key
				);
			}
			None => assert_ne!(
				map.default_value(),
				value,
				"leading transition carries the default value"
			),
		}

		previous = Some((key, value));
	}
}

/// Random assignments over a bounded key domain, checked after every call
/// for canonical form and, against a flat model, for lookup correctness.
fn run(seed: u64, iterations: usize) {
	const LOW: i32 = -1000;
	const HIGH: i32 = 1000;
	const DEFAULT: char = 'g';

	let mut rng = SmallRng::seed_from_u64(seed);
	let mut map = IntervalMap::new(DEFAULT);
	let mut model = vec![DEFAULT; (HIGH - LOW + 200) as usize];

	for _ in 0..iterations {
		let size = rng.random_range(1..100);
		let begin = rng.random_range(LOW..HIGH);
		let value = char::from(b'a' + rng.random_range(0..26u8));

		map.assign(begin, begin + size, value);
		for key in begin..begin + size {
			model[(key - LOW) as usize] = value;
		}

		assert_canonical(&map);
	}

	for (index, expected) in model.iter().enumerate() {
		let key = index as i32 + LOW;
		assert_eq!(map.get(&key), expected, "wrong value at key {}", key);
	}
	assert_eq!(*map.get(&(LOW - 1)), DEFAULT);
}

#[test]
fn random_assignments_stay_canonical() {
	run(1234567890, 2000);
	run(9876543210, 2000);
	run(26131590, 2000);
}

#[test]
fn dense_small_ranges() {
	let mut rng = SmallRng::seed_from_u64(5678901234);
	let mut map = IntervalMap::new(false);

	for _ in 0..5000 {
		let begin = rng.random_range(0..64);
		let size = rng.random_range(1..4);
		map.assign(begin, begin + size, rng.random_range(0..2) == 1);
	}

	// A boolean map over 64 keys can only alternate.
	let mut previous: Option<&bool> = None;
	for (_, value) in map.iter() {
		if let Some(previous) = previous {
			assert_ne!(previous, value);
		}
		previous = Some(value);
	}
	assert!(map.transition_count() <= 67);
}
