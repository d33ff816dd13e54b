use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use merchdesk_catalog::{InventoryRecord, Product};
use merchdesk_view::{QueryState, SelectionState, SortColumn, SortSpec, derive_view_with, merge};

/// `products` products, each with `per_product` inventory records, plus a
/// handful of orphans.
fn catalog(products: usize, per_product: usize) -> (Vec<Product>, Vec<InventoryRecord>) {
    let product_list: Vec<Product> = (0..products)
        .map(|n| Product {
            stock: Some((n % 17) as i64),
            ..Product::new(format!("p{n}").as_str())
        })
        .collect();

    let mut inventory = Vec::with_capacity(products * per_product + 8);
    for v in 0..per_product {
        for n in 0..products {
            inventory.push(InventoryRecord {
                stock: Some(((n + v) % 23) as i64),
                price: Some((n % 50) as f64 + 0.99),
                ..InventoryRecord::for_product(
                    format!("i{n}-{v}").as_str(),
                    format!("p{n}").as_str(),
                )
            });
        }
    }
    for o in 0..8 {
        inventory.push(InventoryRecord::for_product(
            format!("orphan{o}").as_str(),
            "missing",
        ));
    }

    (product_list, inventory)
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &size in &[100usize, 1_000, 10_000] {
        let (products, inventory) = catalog(size, 3);
        group.throughput(Throughput::Elements((products.len() + inventory.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| merge(black_box(&products), black_box(&inventory)))
        });
    }
    group.finish();
}

fn bench_derive_view(c: &mut Criterion) {
    let (products, inventory) = catalog(1_000, 3);
    let products = QueryState::ready(products);
    let inventory = QueryState::ready(inventory);
    let selection = SelectionState::new();

    c.bench_function("derive_view/sorted_by_stock", |b| {
        b.iter(|| {
            derive_view_with(
                black_box(&products),
                black_box(&inventory),
                &selection,
                Some(SortSpec::ascending(SortColumn::Stock)),
            )
        })
    });
}

criterion_group!(benches, bench_merge, bench_derive_view);
criterion_main!(benches);
