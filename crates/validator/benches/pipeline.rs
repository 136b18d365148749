//! Benchmarks for the validation pipeline
//!
//! Measures:
//! - Specification evaluation with and without short-circuiting
//! - Full-object validation on exact and composite resolution
//! - Error container filing

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keel_validator::prelude::*;
use std::hint::black_box;

struct Order {
    reference: String,
    quantity: u32,
    email: String,
    lines: Vec<u32>,
    min_quantity: u32,
}

impl Order {
    fn new(valid: bool) -> Self {
        if valid {
            Self {
                reference: "ORD-1001".to_owned(),
                quantity: 4,
                email: "buyer@example.com".to_owned(),
                lines: vec![1, 2],
                min_quantity: 1,
            }
        } else {
            Self {
                reference: String::new(),
                quantity: 0,
                email: "nope".to_owned(),
                lines: Vec::new(),
                min_quantity: 2,
            }
        }
    }
}

struct Envelope {
    order: Order,
}

fn registry() -> ValidatorRegistry {
    let registry = ValidatorRegistry::new();
    let order = registry.for_type::<Order>();
    order
        .property("Reference", |o: &Order| &o.reference)
        .unwrap()
        .apply(required())
        .apply(string_length(3, 20).unwrap());
    order
        .property("Quantity", |o: &Order| &o.quantity)
        .unwrap()
        .apply(range(1, 100).unwrap())
        .apply_per_instance(greater_or_equal("MinQuantity", |o: &Order| &o.min_quantity));
    order
        .property("Email", |o: &Order| &o.email)
        .unwrap()
        .apply(email());
    order
        .property("Lines", |o: &Order| &o.lines)
        .unwrap()
        .apply(size(1, 50).unwrap());
    registry
}

fn specification_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("specification");

    let positive = Specification::new(|n: &i64| *n > 0);
    let spec = positive.and(|n: &i64| n % 7 == 0).or(|n: &i64| *n == -1);

    for value in [-1_i64, 5, 49] {
        group.bench_with_input(BenchmarkId::new("and_or", value), &value, |b, value| {
            b.iter(|| black_box(spec.is_satisfied_by(black_box(value))));
        });
    }

    group.finish();
}

fn object_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/validate");
    let registry = registry();

    for valid in [true, false] {
        let order = Order::new(valid);
        let label = if valid { "valid" } else { "invalid" };
        group.bench_function(BenchmarkId::new("exact", label), |b| {
            b.iter(|| black_box(registry.validate(black_box(&order))));
        });
    }

    registry.declare_compatible(|e: &Envelope| &e.order);
    let envelope = Envelope {
        order: Order::new(false),
    };
    group.bench_function("projected", |b| {
        b.iter(|| black_box(registry.validate(black_box(&envelope))));
    });

    group.finish();
}

fn container_filing(c: &mut Criterion) {
    let registry = registry();
    let errors = registry.validate(&Order::new(false));

    c.bench_function("container/apply_object_results", |b| {
        let mut container = ErrorContainer::new();
        b.iter(|| {
            container.apply_object_results(errors.iter().cloned());
            black_box(container.has_errors())
        });
    });
}

criterion_group!(benches, specification_eval, object_validation, container_filing);
criterion_main!(benches);
