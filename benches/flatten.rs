use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flattener::{
    flatten, flatten_with_options, payload, unflatten, FlattenOptions, Value, ValueMap,
};

fn nested_user(id: i64) -> Value {
    payload!({
        "id": id,
        "name": "Alice",
        "address": {
            "city": "NYC",
            "zip": "10001",
            "geo": { "lat": 40.7, "lng": -74.0 }
        },
        "tags": ["admin", "verified", "production"]
    })
}

fn wide_payload(size: i64) -> Value {
    let mut root = ValueMap::new();
    for i in 0..size {
        if let Value::Object(user) = nested_user(i) {
            root.insert(format!("user{}", i), Value::Object(user));
        }
    }
    Value::Object(root)
}

fn benchmark_flatten_nested(c: &mut Criterion) {
    let data = nested_user(1);

    c.bench_function("flatten_nested", |b| b.iter(|| flatten(black_box(&data))));
}

fn benchmark_unflatten_nested(c: &mut Criterion) {
    let flat = flatten(&nested_user(1)).unwrap();

    c.bench_function("unflatten_nested", |b| b.iter(|| unflatten(black_box(&flat))));
}

fn benchmark_flatten_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_wide");

    for size in [10, 50, 100, 500].iter() {
        let data = wide_payload(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| flatten(black_box(&data)))
        });
    }
    group.finish();
}

fn benchmark_unflatten_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten_wide");

    for size in [10, 50, 100, 500].iter() {
        let flat = flatten(&wide_payload(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &flat, |b, flat| {
            b.iter(|| unflatten(black_box(flat)))
        });
    }
    group.finish();
}

fn benchmark_flatten_policies(c: &mut Criterion) {
    let data = wide_payload(100);
    let mut group = c.benchmark_group("flatten_policies");

    let safe = FlattenOptions::new().with_safe(true);
    group.bench_function("safe_arrays", |b| {
        b.iter(|| flatten_with_options(black_box(&data), &safe))
    });

    let depth = FlattenOptions::new().with_depth(2);
    group.bench_function("depth_limited", |b| {
        b.iter(|| flatten_with_options(black_box(&data), &depth))
    });

    let transform = FlattenOptions::new().with_transform_key(str::to_uppercase);
    group.bench_function("transform_key", |b| {
        b.iter(|| flatten_with_options(black_box(&data), &transform))
    });

    group.finish();
}

fn benchmark_round_trip(c: &mut Criterion) {
    let data = nested_user(1);

    c.bench_function("round_trip_nested", |b| {
        b.iter(|| {
            let flat = flatten(black_box(&data)).unwrap();
            let _back = unflatten(black_box(&flat)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_flatten_nested,
    benchmark_unflatten_nested,
    benchmark_flatten_wide,
    benchmark_unflatten_wide,
    benchmark_flatten_policies,
    benchmark_round_trip
);
criterion_main!(benches);
