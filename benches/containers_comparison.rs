use core::hash::BuildHasherDefault;
use core::hash::Hash;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use probe_hash::HashMap as ProbeHashMap;
use probe_hash::Natural;
use probe_hash::OrderedMap;
use probe_hash::ScalarMap;
use probe_hash::TableConfig;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

type Sip = BuildHasherDefault<SipHasher>;

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

/// The operations every compared map supports.
trait BenchMap<K>: Default {
    const NAME: &'static str;

    fn with_capacity(capacity: usize) -> Self;
    fn insert(&mut self, key: K, value: u64) -> Option<u64>;
    fn get(&self, key: &K) -> Option<&u64>;
    fn remove(&mut self, key: &K) -> Option<u64>;
}

impl<K: BenchKey> BenchMap<K> for ProbeHashMap<K, u64, Natural<Sip>> {
    const NAME: &'static str = "probe_hash";

    fn with_capacity(capacity: usize) -> Self {
        let mut map = Self::new();
        map.ensure_capacity(capacity);
        map
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        ProbeHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        ProbeHashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        ProbeHashMap::remove(self, key)
    }
}

impl<K: BenchKey> BenchMap<K> for HashbrownHashMap<K, u64, Sip> {
    const NAME: &'static str = "hashbrown";

    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Sip::default())
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        HashbrownHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        HashbrownHashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        HashbrownHashMap::remove(self, key)
    }
}

impl<K: BenchKey> BenchMap<K> for StdHashMap<K, u64, Sip> {
    const NAME: &'static str = "std";

    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Sip::default())
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        StdHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        StdHashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        StdHashMap::remove(self, key)
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn shuffled<K: Clone>(keys: &[K]) -> Vec<K> {
    let mut keys = keys.to_vec();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn insert_random<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    keys: &[K],
    preallocate: bool,
) {
    group.bench_function(M::NAME, |b| {
        b.iter_batched(
            || shuffled(keys),
            |keys| {
                let mut map = if preallocate {
                    M::with_capacity(keys.len())
                } else {
                    M::default()
                };
                for (i, key) in keys.into_iter().enumerate() {
                    black_box(map.insert(key, i as u64));
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    for preallocate in [false, true] {
        let mut group = c.benchmark_group(format!(
            "insert_random{}_{}",
            if preallocate { "_preallocated" } else { "" },
            core::any::type_name::<K>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for size in SIZES[..=MAX_SIZE].iter() {
            let keys = random_keys::<K>(*size);
            group.throughput(Throughput::Elements(*size as u64));
            insert_random::<K, ProbeHashMap<K, u64, Natural<Sip>>>(&mut group, &keys, preallocate);
            insert_random::<K, HashbrownHashMap<K, u64, Sip>>(&mut group, &keys, preallocate);
            insert_random::<K, StdHashMap<K, u64, Sip>>(&mut group, &keys, preallocate);
        }
        group.finish();
    }
}

fn find_hit_miss<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    present: &[K],
    absent: &[K],
) {
    let mut map = M::default();
    for (i, key) in present.iter().cloned().enumerate() {
        map.insert(key, i as u64);
    }
    let probes = shuffled(&[present, absent].concat());

    group.bench_function(M::NAME, |b| {
        b.iter(|| {
            for key in &probes {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_find_hit_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_hit_miss_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        let present = random_keys::<K>(*size);
        let absent = random_keys::<K>(*size);
        group.throughput(Throughput::Elements(*size as u64 * 2));
        find_hit_miss::<K, ProbeHashMap<K, u64, Natural<Sip>>>(&mut group, &present, &absent);
        find_hit_miss::<K, HashbrownHashMap<K, u64, Sip>>(&mut group, &present, &absent);
        find_hit_miss::<K, StdHashMap<K, u64, Sip>>(&mut group, &present, &absent);
    }
    group.finish();
}

/// Removal followed by reinsertion keeps the table at a steady load, which
/// is where backward-shift deletion pays off against tombstones.
fn churn<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    keys: &[K],
) {
    group.bench_function(M::NAME, |b| {
        b.iter_batched(
            || {
                let mut map = M::default();
                for (i, key) in keys.iter().cloned().enumerate() {
                    map.insert(key, i as u64);
                }
                (map, shuffled(keys))
            },
            |(mut map, order)| {
                for key in order {
                    let value = map.remove(&key);
                    black_box(map.insert(key, value.unwrap_or_default()));
                }
                black_box(map)
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_churn<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(*size);
        group.throughput(Throughput::Elements(*size as u64 * 2));
        churn::<K, ProbeHashMap<K, u64, Natural<Sip>>>(&mut group, &keys);
        churn::<K, HashbrownHashMap<K, u64, Sip>>(&mut group, &keys);
        churn::<K, StdHashMap<K, u64, Sip>>(&mut group, &keys);
    }
    group.finish();
}

fn mixed_zipf<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    size: usize,
) {
    let zipf = Zipf::new(size as f32 * 2.0 - 1.0, 1.0).unwrap();
    let mut rng = SmallRng::from_os_rng();
    let operations = (0..size * 3)
        .map(|_| (rng.random_range(0..3u8), K::new(rng.sample(zipf) as u64)))
        .collect::<Vec<_>>();

    group.bench_function(M::NAME, |b| {
        b.iter_batched(
            || operations.clone(),
            |operations| {
                let mut map = M::default();
                for (op, key) in operations {
                    match op {
                        0 => {
                            black_box(map.insert(key, 0));
                        }
                        1 => {
                            black_box(map.get(&key));
                        }
                        _ => {
                            black_box(map.remove(&key));
                        }
                    }
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_mixed_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        group.throughput(Throughput::Elements(*size as u64 * 3));
        mixed_zipf::<K, ProbeHashMap<K, u64, Natural<Sip>>>(&mut group, *size);
        mixed_zipf::<K, HashbrownHashMap<K, u64, Sip>>(&mut group, *size);
        mixed_zipf::<K, StdHashMap<K, u64, Sip>>(&mut group, *size);
    }
    group.finish();
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_u64");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES.iter() {
        let mut rng = OsRng;
        let keys = (0..*size)
            .map(|_| rng.try_next_u64().unwrap())
            .collect::<Vec<u64>>();
        group.throughput(Throughput::Elements(*size as u64 * 2));

        group.bench_function("probe_hash_scalar", |b| {
            b.iter(|| {
                let mut map: ScalarMap<u64, u64> = ScalarMap::new();
                for &key in &keys {
                    map.insert(key, key);
                }
                for &key in &keys {
                    black_box(map.get(key));
                }
                black_box(map)
            })
        });

        group.bench_function("probe_hash", |b| {
            b.iter(|| {
                let mut map: ProbeHashMap<u64, u64> = ProbeHashMap::new();
                for &key in &keys {
                    map.insert(key, key);
                }
                for key in &keys {
                    black_box(map.get(key));
                }
                black_box(map)
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let mut map: HashbrownHashMap<u64, u64> = HashbrownHashMap::new();
                for &key in &keys {
                    map.insert(key, key);
                }
                for key in &keys {
                    black_box(map.get(key));
                }
                black_box(map)
            })
        });
    }
    group.finish();
}

fn bench_ordered_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_iteration");

    for size in SIZES.iter() {
        let config = TableConfig::with_capacity(*size).unwrap();
        let mut ordered: OrderedMap<u64, u64> = OrderedMap::with_config(config);
        let mut plain: ProbeHashMap<u64, u64> = ProbeHashMap::with_config(config);
        for key in 0..*size as u64 {
            ordered.insert(key, key);
            plain.insert(key, key);
        }
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function("ordered", |b| {
            b.iter(|| black_box(ordered.iter().map(|(_, v)| *v).sum::<u64>()))
        });
        group.bench_function("unordered", |b| {
            b.iter(|| black_box(plain.iter().map(|(_, v)| *v).sum::<u64>()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey, 4>,
    bench_insert_random::<StringKey, 4>,
    bench_find_hit_miss::<SmallKey, 4>,
    bench_find_hit_miss::<StringKey, 4>,
    bench_churn::<SmallKey, 4>,
    bench_churn::<StringKey, 3>,
    bench_mixed_zipf::<SmallKey, 4>,
    bench_mixed_zipf::<StringKey, 3>,
    bench_scalar,
    bench_ordered_iteration,
);

criterion_main!(benches);
