//! Error bookkeeping driven by validation passes

use std::sync::Arc;

use keel_validator::aggregator::MultiValueMap;
use keel_validator::prelude::*;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{Booking, booking_registry};

fn violation(member: &'static str) -> ValidationError {
    ValidationError::new("required", "missing", member)
}

#[test]
fn empty_set_range_removes_key() {
    let mut map = MultiValueMap::new();
    map.set_range("X".to_owned(), vec![violation("X")]);
    assert!(map.contains_key("X"));
    map.set_range("X".to_owned(), Vec::new());
    assert!(!map.contains_key("X"));
    assert!(map.is_empty());
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Set(&'static str),
    Clear(&'static str),
    Remove(&'static str),
}

#[rstest]
#[case::set_then_clear(vec![Step::Set("A"), Step::Clear("A")])]
#[case::two_keys(vec![Step::Set("A"), Step::Set("B"), Step::Remove("A"), Step::Clear("B")])]
#[case::remove_absent(vec![Step::Remove("A"), Step::Set("B"), Step::Remove("B")])]
#[case::overwrite(vec![Step::Set("A"), Step::Set("A"), Step::Remove("A"), Step::Set("A")])]
fn has_errors_tracks_non_emptiness(#[case] steps: Vec<Step>) {
    let mut container = ErrorContainer::new();
    let mut live = std::collections::BTreeSet::new();
    for step in steps {
        match step {
            Step::Set(key) => {
                container.set_range(key, vec![violation(key)]);
                live.insert(key);
            }
            Step::Clear(key) => {
                container.set_range(key, Vec::new());
                live.remove(key);
            }
            Step::Remove(key) => {
                container.remove(key);
                live.remove(key);
            }
        }
        assert_eq!(container.has_errors(), !live.is_empty());
        assert_eq!(container.is_valid(), live.is_empty());
        assert_eq!(container.errors().len(), live.len());
    }
}

#[test]
fn full_pass_files_comparison_under_both_members() {
    let registry = booking_registry();
    let mut container = ErrorContainer::new();
    container.apply_object_results(registry.validate(&Booking::invalid()));

    assert_eq!(container.errors_for("Start").len(), 1);
    assert_eq!(container.errors_for("End").len(), 1);
    assert_eq!(
        container.errors_for("Start")[0],
        container.errors_for("End")[0]
    );
    let keys: Vec<_> = container.errors().keys().cloned().collect();
    assert_eq!(keys, ["Guest", "Email", "Start", "End", "Rooms"]);
}

#[test]
fn state_drives_container_events() {
    let registry = Arc::new(booking_registry());
    let mut state = ValidationState::<Booking>::new(registry);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    state.subscribe(move |event| sink.lock().push(event.clone()));

    let mut booking = Booking::invalid();
    assert!(!state.validate_all(&booking));
    assert!(events
        .lock()
        .contains(&ErrorEvent::ValidityChanged { has_errors: true }));
    events.lock().clear();

    booking.email = "ada@example.com".to_owned();
    assert!(state.validate_member(&booking, "Email"));
    assert_eq!(
        *events.lock(),
        [ErrorEvent::ErrorsChanged {
            property: "Email".to_owned()
        }]
    );
    events.lock().clear();

    assert!(state.validate_member(&booking, "Email"));
    assert!(events.lock().is_empty());

    let fixed = Booking::valid();
    assert!(state.validate_all(&fixed));
    assert!(state.is_valid());
    assert_eq!(
        events.lock().last(),
        Some(&ErrorEvent::ValidityChanged { has_errors: false })
    );
}
