//! Untyped values and instances

use std::any::Any;

use keel_validator::prelude::*;
use keel_validator::validator::{INVALID_VALUE_TYPE, VALUE_CANNOT_BE_NULL};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{Booking, booking_registry, codes};

fn try_property(member: &str, value: Option<&dyn Any>) -> (bool, Vec<ValidationError>) {
    let registry = booking_registry();
    let booking = Booking::valid();
    let ctx = ValidationContext::new(&booking).with_member(member);
    let mut results = Vec::new();
    let valid = registry
        .try_validate_property_any(&ctx, value, &mut results)
        .unwrap();
    (valid, results)
}

#[rstest]
#[case::start_in_range("Start", Some(&10_i32 as &dyn Any), vec![])]
#[case::start_out_of_range("Start", Some(&400_i32 as &dyn Any), vec!["range"])]
#[case::start_null("Start", None, vec![VALUE_CANNOT_BE_NULL])]
#[case::start_wrong_type("Start", Some(&"ten" as &dyn Any), vec![INVALID_VALUE_TYPE])]
#[case::guest_null("Guest", None, vec!["required"])]
#[case::guest_wrong_type("Guest", Some(&7_u8 as &dyn Any), vec![INVALID_VALUE_TYPE])]
#[case::unknown_member("Nickname", Some(&1_u8 as &dyn Any), vec![])]
fn untyped_property_values(
    #[case] member: &str,
    #[case] value: Option<&dyn Any>,
    #[case] expected: Vec<&str>,
) {
    let (valid, results) = try_property(member, value);
    assert_eq!(codes(&results), expected);
    assert_eq!(valid, expected.is_empty());
}

#[test]
fn null_message_comes_from_config() {
    let registry = ValidatorRegistry::with_config(RegistryConfig {
        null_value_message: "{name} may not be blank".to_owned(),
        ..RegistryConfig::default()
    });
    registry
        .for_type::<Booking>()
        .property("Start", |b: &Booking| &b.start)
        .unwrap();

    let booking = Booking::valid();
    let ctx = ValidationContext::new(&booking).with_member("Start");
    let mut results = Vec::new();
    registry
        .try_validate_property_any(&ctx, None, &mut results)
        .unwrap();
    assert_eq!(results[0].message, "Start may not be blank");
}

#[test]
fn untyped_instance_checks_its_type() {
    let registry = booking_registry();
    let untyped = registry.for_type::<Booking>().into_untyped();

    let errors = untyped.validate_any(&Booking::invalid()).unwrap();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        untyped.validate_any(&42_u64),
        Err(ContractError::InstanceTypeMismatch {
            expected: std::any::type_name::<Booking>()
        })
    );
    assert_eq!(
        codes(&untyped.validate_property_any("Rooms", Some(&Vec::<u32>::new()))),
        ["size"]
    );
}
