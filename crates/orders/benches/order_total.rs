use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordering_core::{Address, Id, PositiveNumber};
use ordering_orders::{DiscountCode, Order, OrderLine};

fn build_order(lines: usize, discount: Option<DiscountCode>) -> Order {
    let items = (0..lines)
        .map(|i| {
            OrderLine::new(
                Id::from_raw(format!("prod-{i}")),
                PositiveNumber::create((i % 7 + 1) as f64).unwrap(),
                PositiveNumber::create(9.99).unwrap(),
            )
        })
        .collect();

    Order::create(items, Address::create("1 Bench Way").unwrap(), discount).unwrap()
}

fn bench_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_total");

    for lines in [1usize, 10, 100, 1000] {
        let plain = build_order(lines, None);
        let discounted = build_order(lines, Some(DiscountCode::Discount20));

        group.bench_with_input(BenchmarkId::new("plain", lines), &plain, |b, order| {
            b.iter(|| black_box(order.total().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("discounted", lines), &discounted, |b, order| {
            b.iter(|| black_box(order.total().unwrap()))
        });
    }

    group.finish();
}

fn bench_snapshot_round_trip(c: &mut Criterion) {
    let order = build_order(50, Some(DiscountCode::Discount20));

    c.bench_function("snapshot_round_trip_50_lines", |b| {
        b.iter(|| {
            let snapshot = black_box(&order).to_snapshot();
            black_box(Order::from_snapshot(snapshot).unwrap())
        })
    });
}

criterion_group!(benches, bench_total, bench_snapshot_round_trip);
criterion_main!(benches);
