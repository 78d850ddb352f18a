use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vecta_common::prelude::*;

fn dynarr_new(c: &mut Criterion) {
    c.bench_function("DynArr::new", |b| b.iter(|| {
        DynArr::<u32>::new()
    }));
    c.bench_function("Vec::new", |b| b.iter(|| {
        Vec::<u32>::new()
    }));
    c.bench_function("DynArr::with_capacity(64)", |b| b.iter(|| {
        DynArr::<u32>::with_capacity(64)
    }));
    c.bench_function("Vec::with_capacity(64)", |b| b.iter(|| {
        Vec::<u32>::with_capacity(64)
    }));
}

fn dynarr_push(c: &mut Criterion) {
    c.bench_function("DynArr::push(100) no reserve", |b| b.iter(|| {
        let mut arr = DynArr::<u32>::new();
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
    c.bench_function("DynArr::push(100) reserve", |b| b.iter(|| {
        let mut arr = DynArr::<u32>::new();
        arr.reserve(100);
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
    c.bench_function("Vec::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vec::<u32>::new();
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
    c.bench_function("GuardedDynArr::push(100) no reserve", |b| b.iter(|| {
        let arr = GuardedDynArr::<u32>::new();
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
}

fn dynarr_insert_remove(c: &mut Criterion) {
    c.bench_function("DynArr::insert(0) + remove(0) (100)", |b| b.iter_batched_ref(
        || dynarr![0u32; 100],
        |arr| {
            for i in 0..100 {
                let _ = arr.insert(0, i);
                let _ = arr.remove(0);
            }
        },
        criterion::BatchSize::SmallInput,
    ));
    c.bench_function("DynArr::remove_range(10..90)", |b| b.iter_batched_ref(
        || dynarr![0u32; 100],
        |arr| arr.remove_range(10..90),
        criterion::BatchSize::SmallInput,
    ));
}

fn dynarr_index(c: &mut Criterion) {
    let arr = dynarr![5; 100];
    c.bench_function("DynArr::index(100)", |b| b.iter(|| {
        for i in 0..100 {
            black_box(arr[i]);
        }
    }));
    c.bench_function("DynArr::at(100)", |b| b.iter(|| {
        for i in 0..100 {
            let _ = black_box(arr.at(i));
        }
    }));

    let vbuf = vec![5; 100];
    c.bench_function("Vec::index(100)", |b| b.iter(|| {
        for i in 0..100 {
            black_box(vbuf[i]);
        }
    }));
}

criterion_group!(dynarr,
    dynarr_new,
    dynarr_push,
    dynarr_insert_remove,
    dynarr_index
);
criterion_main!(dynarr);
