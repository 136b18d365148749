//! Type-covariant resolution

use keel_validator::prelude::*;
use pretty_assertions::assert_eq;

/// Something with a display label.
trait Labelled: Send + Sync {
    fn label(&self) -> &String;
}

/// Something with a stock count.
trait Stocked: Send + Sync {
    fn stock(&self) -> &i64;
}

struct Shelf {
    label: String,
    stock: i64,
}

impl Labelled for Shelf {
    fn label(&self) -> &String {
        &self.label
    }
}

impl Stocked for Shelf {
    fn stock(&self) -> &i64 {
        &self.stock
    }
}

struct Unchecked;

fn registry() -> ValidatorRegistry {
    let registry = ValidatorRegistry::new();
    registry
        .for_type::<dyn Labelled>()
        .property("Label", |l| l.label())
        .unwrap()
        .apply(required())
        .apply(string_length(3, 10).unwrap());
    registry
        .for_type::<dyn Stocked>()
        .property("Stock", |s| s.stock())
        .unwrap()
        .apply(range(0, 100).unwrap());
    registry
        .declare_compatible::<Shelf, dyn Labelled, _>(|s| s)
        .declare_compatible::<Shelf, dyn Stocked, _>(|s| s);
    registry
}

fn broken_shelf() -> Shelf {
    Shelf {
        label: String::new(),
        stock: -1,
    }
}

#[test]
fn composite_counts_every_capability() {
    let registry = registry();
    let shelf = broken_shelf();

    let labelled = registry.for_type::<dyn Labelled>().validate_object(&shelf);
    let stocked = registry.for_type::<dyn Stocked>().validate_object(&shelf);
    assert_eq!(labelled.len(), 2);
    assert_eq!(stocked.len(), 1);

    let resolved = registry.resolve::<Shelf>().unwrap();
    assert_eq!(resolved.declared_type(), TypeKey::of::<Shelf>());
    assert_eq!(
        registry.validate(&shelf).len(),
        labelled.len() + stocked.len()
    );
}

#[test]
fn composite_keeps_relation_order() {
    let registry = registry();
    let members: Vec<_> = registry
        .validate(&broken_shelf())
        .iter()
        .map(|e| e.primary_member().to_owned())
        .collect();
    assert_eq!(members, ["Label", "Label", "Stock"]);
}

#[test]
fn later_registration_is_picked_up() {
    let registry = ValidatorRegistry::new();
    registry.declare_compatible::<Shelf, dyn Stocked, _>(|s| s);
    assert!(registry.resolve::<Shelf>().is_none());

    registry
        .for_type::<dyn Stocked>()
        .property("Stock", |s| s.stock())
        .unwrap()
        .apply(range(0, 100).unwrap());
    assert_eq!(registry.validate(&broken_shelf()).len(), 1);
}

#[test]
fn registered_without_rules_is_valid() {
    let registry = registry();
    registry.for_type::<Unchecked>();

    let mut results = Vec::new();
    assert!(registry.try_validate_object(&ValidationContext::new(&Unchecked), &mut results));
    assert!(results.is_empty());
}

#[test]
fn unknown_type_is_valid() {
    let registry = registry();
    let mut results = Vec::new();
    assert!(registry.try_validate_object(&ValidationContext::new(&42_u8), &mut results));
    assert!(results.is_empty());
}

#[test]
fn registration_order_is_kept() {
    let registry = registry();
    registry.for_type::<Unchecked>();
    let names: Vec<_> = registry.registered_types().iter().map(TypeKey::name).collect();
    assert_eq!(
        names,
        [
            std::any::type_name::<dyn Labelled>(),
            std::any::type_name::<dyn Stocked>(),
            std::any::type_name::<Unchecked>(),
        ]
    );
}
