//! Shared fixtures

use keel_validator::prelude::*;

/// A booking window with a guest list.
#[derive(Debug, Clone)]
pub struct Booking {
    pub guest: Option<String>,
    pub email: String,
    pub start: i32,
    pub end: i32,
    pub rooms: Vec<u32>,
}

impl Booking {
    pub fn valid() -> Self {
        Self {
            guest: Some("Ada".to_owned()),
            email: "ada@example.com".to_owned(),
            start: 1,
            end: 4,
            rooms: vec![101],
        }
    }

    pub fn invalid() -> Self {
        Self {
            guest: None,
            email: "not an email".to_owned(),
            start: 5,
            end: 3,
            rooms: Vec::new(),
        }
    }
}

/// Registers the booking rules and returns the registry.
pub fn booking_registry() -> ValidatorRegistry {
    let registry = ValidatorRegistry::new();
    let booking = registry.for_type::<Booking>();
    booking
        .property("Guest", |b: &Booking| &b.guest)
        .unwrap()
        .apply(required())
        .apply(string_length(1, 40).unwrap());
    booking
        .property("Email", |b: &Booking| &b.email)
        .unwrap()
        .apply(email());
    booking
        .property("Start", |b: &Booking| &b.start)
        .unwrap()
        .apply(range(0, 365).unwrap())
        .apply_per_instance(less_or_equal("End", |b: &Booking| &b.end));
    booking
        .property("Rooms", |b: &Booking| &b.rooms)
        .unwrap()
        .apply(size(1, 3).unwrap());
    registry
}

pub fn codes(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_ref()).collect()
}
