use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use postbox::{BlogServer, FixedClock, Post, PostStore, WritePolicy};
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Duration;

fn bench_path(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("postbox_bench_{}_{}.json", name, size))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn posts(size: usize) -> Vec<Post> {
    (0..size)
        .map(|i| Post::new(format!("post {i}"), "lorem ipsum dolor sit amet", "bench", today()))
        .collect()
}

fn policies() -> [(&'static str, WritePolicy); 2] {
    [
        ("direct", WritePolicy::Direct),
        ("serialized", WritePolicy::Serialized),
    ]
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("pretty", size), &size, |b, &size| {
            let path = bench_path("load", size);
            let store = PostStore::open(&path).unwrap();
            store.save(&posts(size)).unwrap();
            b.iter(|| black_box(store.load().unwrap()));
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(8));
    for (name, policy) in policies() {
        for size in [100, 1000] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let path = bench_path(&format!("save_{name}"), size);
                let store = PostStore::builder(&path).policy(policy).build().unwrap();
                let data = posts(size);
                b.iter(|| store.save(&data).unwrap());
                let _ = std::fs::remove_file(&path);
            });
        }
    }
}

fn bench_list_and_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_and_touch");
    for (name, policy) in policies() {
        for size in [10, 100, 1000] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let path = bench_path(&format!("list_{name}"), size);
                let store = PostStore::builder(&path).policy(policy).build().unwrap();
                store.save(&posts(size)).unwrap();
                let blog = BlogServer::with_clock(store, FixedClock(today()));
                b.iter(|| black_box(blog.list_and_touch().unwrap()));
                let _ = std::fs::remove_file(&path);
            });
        }
    }
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.sample_size(50);
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("direct", size), &size, |b, &size| {
            let path = bench_path("create", size);
            let store = PostStore::open(&path).unwrap();
            let seed = posts(size);
            let blog = BlogServer::with_clock(store, FixedClock(today()));
            b.iter(|| {
                blog.store().save(&seed).unwrap();
                black_box(blog.create("new", "content", "bench").unwrap());
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

criterion_group!(
    benches,
    bench_load,
    bench_save,
    bench_list_and_touch,
    bench_create,
);
criterion_main!(benches);
