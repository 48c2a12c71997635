use chained_hashtable::{ChainedHashTable, Keyed};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

struct Record {
    id: String,
    n: u64,
}

impl Keyed for Record {
    fn key(&self) -> &str {
        &self.id
    }
}

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ChainedHashTable<Record>, Vec<String>) {
    let mut t = ChainedHashTable::new();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.insert(k.as_str(), Record { id: k.clone(), n: i as u64 })
            .unwrap();
    }
    (t, keys)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chained_insert_10k_default", |b| {
        b.iter_batched(
            ChainedHashTable::<Record>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    let k = key(x);
                    t.insert(k.as_str(), Record { id: k.clone(), n: i as u64 })
                        .unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    // Starting at capacity 2 forces every doubling step.
    c.bench_function("chained_insert_10k_from_2", |b| {
        b.iter_batched(
            || ChainedHashTable::<Record>::with_capacity_and_threshold(2, 0.75),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    let k = key(x);
                    t.insert(k.as_str(), Record { id: k.clone(), n: i as u64 })
                        .unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_get_hit", |b| {
        let (t, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k.as_str()).unwrap().n);
        })
    });
}

fn bench_get_hit_mixed_case(c: &mut Criterion) {
    c.bench_function("chained_get_hit_upper", |b| {
        let (t, keys) = filled(7, 20_000);
        let upper: Vec<String> = keys.iter().map(|k| k.to_uppercase()).collect();
        let mut it = upper.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k.as_str()).unwrap().n);
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_get_miss", |b| {
        let (t, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the table
            let k = key(miss.next().unwrap());
            black_box(t.get(k.as_str()).is_err());
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("chained_remove_reinsert", |b| {
        let (mut t, keys) = filled(13, 10_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let r = t.take(k.as_str()).unwrap().unwrap();
            t.insert(k.as_str(), r).unwrap();
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_hit_mixed_case, bench_get_miss, bench_remove_reinsert
}
criterion_main!(benches);
