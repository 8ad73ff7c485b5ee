use criterion::{criterion_group, criterion_main, Criterion};
use lazyq::{Query, Value};

fn make_query(rows: usize) -> Query {
    Query::from_values((0..rows).map(|i| match i % 4 {
        0 => Value::I8((i % 100) as i8),
        1 => Value::I16(i as i16),
        2 => Value::I32(i as i32),
        _ => Value::I64(i as i64),
    }))
}

fn bench_count_with(c: &mut Criterion) {
    let q = Query::range(0, 4096);
    c.bench_function("count_with_untyped", |b| {
        b.iter(|| q.count_with(|v| v.as_i64().map_or(false, |x| x % 2 == 0)))
    });
    c.bench_function("count_with_typed", |b| {
        b.iter(|| q.count_with_t(|x: i64| x % 2 == 0).unwrap())
    });
}

fn bench_sums(c: &mut Criterion) {
    let mixed = make_query(4096);
    c.bench_function("sum_ints_mixed_widths", |b| {
        b.iter(|| mixed.sum_ints().unwrap())
    });
    c.bench_function("average_mixed_widths", |b| {
        b.iter(|| mixed.average().unwrap())
    });
}

fn bench_to_slice(c: &mut Criterion) {
    let q = Query::range(0, 4096);
    c.bench_function("to_slice_from_empty", |b| {
        b.iter(|| {
            let mut dest: Vec<i64> = Vec::new();
            q.to_slice(&mut dest).unwrap();
            dest
        })
    });
}

criterion_group!(operators, bench_count_with, bench_sums, bench_to_slice);
criterion_main!(operators);
