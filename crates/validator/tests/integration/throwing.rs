//! The throwing family surfaces the first violation only

use keel_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::common::{Booking, booking_registry};

#[test]
fn object_fault_carries_first_violation() {
    let registry = booking_registry();
    let booking = Booking::invalid();
    let ctx = ValidationContext::new(&booking);

    let mut all = Vec::new();
    assert!(!registry.try_validate_object(&ctx, &mut all));
    assert!(all.len() > 1);

    let fault = registry.validate_object(&ctx).unwrap_err();
    assert_eq!(fault.error, all[0]);
    assert_eq!(fault.value, None);
    assert_eq!(fault.to_string(), all[0].to_string());
}

#[test]
fn valid_object_does_not_fault() {
    let registry = booking_registry();
    let booking = Booking::valid();
    assert!(registry.validate_object(&ValidationContext::new(&booking)).is_ok());
}

#[test]
fn property_fault_renders_the_value() {
    let registry = booking_registry();
    let booking = Booking::valid();
    let ctx = ValidationContext::new(&booking).with_member("Rooms");

    let error = registry
        .validate_property(&ctx, Some(&vec![1_u32, 2, 3, 4]))
        .unwrap_err();
    assert_eq!(error.validation_error().map(|e| e.code.as_ref()), Some("size"));
    let Error::Fault(fault) = error else {
        panic!("expected a validation fault");
    };
    assert_eq!(fault.value.as_deref(), Some("[1, 2, 3, 4]"));
}

#[test]
fn null_property_fault_has_no_value() {
    let registry = booking_registry();
    let booking = Booking::valid();
    let ctx = ValidationContext::new(&booking).with_member("Guest");

    let error = registry
        .validate_property::<_, Option<String>>(&ctx, None)
        .unwrap_err();
    let Error::Fault(fault) = error else {
        panic!("expected a validation fault");
    };
    assert_eq!(fault.error.code, "required");
    assert_eq!(fault.value, None);
}

#[test]
fn missing_member_is_a_contract_fault() {
    let registry = booking_registry();
    let booking = Booking::valid();
    let error = registry
        .validate_property(&ValidationContext::new(&booking), Some(&1_i32))
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Contract(ContractError::MissingMemberName { .. })
    ));
    assert!(error.validation_error().is_none());
}
