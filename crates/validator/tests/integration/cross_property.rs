//! Cross-property rules bound per instance

use keel_validator::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Interval {
    start: i32,
    end: i32,
}

fn interval_validator() -> ObjectValidator<Interval> {
    let validator = ObjectValidator::new();
    validator
        .property("End", |i: &Interval| &i.end)
        .unwrap()
        .apply_per_instance(less_than("Start", |i: &Interval| &i.start));
    validator
}

#[test]
fn violation_names_both_properties() {
    let validator = interval_validator();
    let errors = validator.validate_object(&Interval { start: 5, end: 7 });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].member_names.as_slice(), ["End", "Start"]);
    assert_eq!(errors[0].message, "End must be less than Start.");
}

#[test]
fn satisfied_comparison_yields_nothing() {
    let validator = interval_validator();
    assert!(validator.validate_object(&Interval { start: 5, end: 1 }).is_empty());
}

#[test]
fn bare_value_has_no_sibling_to_compare() {
    let validator = interval_validator();
    let end = validator.property("End", |i: &Interval| &i.end).unwrap();
    for value in [i32::MIN, 0, 5, i32::MAX] {
        assert!(end.validate_value(&value).is_empty());
    }
}

#[test]
fn comparison_reads_live_sibling_value() {
    let validator = interval_validator();
    let mut interval = Interval { start: 5, end: 1 };
    assert!(validator.validate_object(&interval).is_empty());

    interval.start = 0;
    assert_eq!(validator.validate_object(&interval).len(), 1);
}

#[test]
fn custom_message_expands_both_names() {
    let validator = ObjectValidator::new();
    validator
        .property("Confirm", |p: &(String, String)| &p.1)
        .unwrap()
        .apply_per_instance(
            equal_to("Password", |p: &(String, String)| &p.0)
                .with_message("{name} does not match {other}."),
        );

    let errors = validator.validate_object(&("secret".to_owned(), "typo".to_owned()));
    assert_eq!(errors[0].code, "equal_to");
    assert_eq!(errors[0].message, "Confirm does not match Password.");
}

#[test]
fn one_rule_shared_by_two_properties() {
    let validator = ObjectValidator::new();
    let not_before_start = greater_or_equal("Start", |i: &Interval| &i.start);
    validator
        .property("End", |i: &Interval| &i.end)
        .unwrap()
        .apply_per_instance(not_before_start.clone());
    validator
        .property("Start", |i: &Interval| &i.start)
        .unwrap()
        .apply_per_instance(not_before_start);

    let errors = validator.validate_object(&Interval { start: 9, end: 2 });
    let members: Vec<_> = errors.iter().map(|e| e.member_names.to_vec()).collect();
    assert_eq!(members, [vec!["End", "Start"]]);
}
