//! Repeated passes over unchanged objects

use keel_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::common::{Booking, booking_registry, codes};

#[test]
fn valid_object_twice_yields_two_empty_lists() {
    let registry = booking_registry();
    let booking = Booking::valid();
    assert!(registry.validate(&booking).is_empty());
    assert!(registry.validate(&booking).is_empty());
}

#[test]
fn invalid_object_twice_yields_equal_lists() {
    let registry = booking_registry();
    let booking = Booking::invalid();
    let first = registry.validate(&booking);
    let second = registry.validate(&booking);

    assert_eq!(codes(&first), ["required", "email", "less_or_equal", "size"]);
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.message, b.message);
        assert_eq!(a.member_names, b.member_names);
    }
}

#[test]
fn member_scoped_pass_runs_only_that_member() {
    let registry = booking_registry();
    let booking = Booking::invalid();
    let mut results = Vec::new();
    let ctx = ValidationContext::new(&booking).with_member("Rooms");
    assert!(!registry.try_validate_object(&ctx, &mut results));
    assert_eq!(codes(&results), ["size"]);
}

#[test]
fn results_serialise_to_json() {
    let registry = booking_registry();
    let errors = registry.validate(&Booking::invalid());
    let comparison = errors[2].to_json_value();
    assert_eq!(comparison["code"], "less_or_equal");
    assert_eq!(comparison["member_names"], serde_json::json!(["Start", "End"]));
}
