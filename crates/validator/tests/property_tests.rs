//! Property-based tests for keel-validator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keel_validator::prelude::*;
use proptest::prelude::*;

fn threshold(limit: i64) -> Specification<i64> {
    Specification::new(move |n: &i64| *n > limit)
}

fn parity(even: bool) -> Specification<i64> {
    Specification::new(move |n: &i64| (n % 2 == 0) == even)
}

// ============================================================================
// ALGEBRA LAWS: and / or / not agree with &&, || and !
// ============================================================================

proptest! {
    #[test]
    fn and_matches_logical_and(limit in -50i64..50, even in any::<bool>(), x in -100i64..100) {
        let a = threshold(limit);
        let b = parity(even);
        prop_assert_eq!(
            a.and(b.clone()).is_satisfied_by(&x),
            a.is_satisfied_by(&x) && b.is_satisfied_by(&x)
        );
    }

    #[test]
    fn or_matches_logical_or(limit in -50i64..50, even in any::<bool>(), x in -100i64..100) {
        let a = threshold(limit);
        let b = parity(even);
        prop_assert_eq!(
            a.or(b.clone()).is_satisfied_by(&x),
            a.is_satisfied_by(&x) || b.is_satisfied_by(&x)
        );
    }

    #[test]
    fn not_negates(limit in -50i64..50, x in -100i64..100) {
        let a = threshold(limit);
        prop_assert_eq!(a.not().is_satisfied_by(&x), !a.is_satisfied_by(&x));
    }

    #[test]
    fn de_morgan(limit in -50i64..50, even in any::<bool>(), x in -100i64..100) {
        let a = threshold(limit);
        let b = parity(even);
        prop_assert_eq!(
            a.and(b.clone()).not().is_satisfied_by(&x),
            a.not().or(b.not()).is_satisfied_by(&x)
        );
    }
}

// ============================================================================
// SHORT-CIRCUIT: the right operand runs only when it can change the outcome
// ============================================================================

proptest! {
    #[test]
    fn and_skips_right_when_left_fails(limit in -50i64..50, x in -100i64..100) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let spec = threshold(limit).and(move |_: &i64| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let _ = spec.is_satisfied_by(&x);
        let expected = usize::from(x > limit);
        prop_assert_eq!(calls.load(Ordering::SeqCst), expected);
    }

    #[test]
    fn or_skips_right_when_left_holds(limit in -50i64..50, x in -100i64..100) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let spec = threshold(limit).or(move |_: &i64| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });

        let _ = spec.is_satisfied_by(&x);
        let expected = usize::from(x <= limit);
        prop_assert_eq!(calls.load(Ordering::SeqCst), expected);
    }
}

// ============================================================================
// RULES: bounds are inclusive, outcomes are deterministic
// ============================================================================

proptest! {
    #[test]
    fn range_is_inclusive(min in -100i64..100, span in 0i64..100, x in -300i64..300) {
        let max = min + span;
        let rule = range(min, max).unwrap();
        let passed = rule.evaluate(&Property::new("Value", &x)).is_success();
        prop_assert_eq!(passed, (min..=max).contains(&x));
    }

    #[test]
    fn string_length_counts_chars(s in "\\PC{0,12}", min in 0usize..5, span in 0usize..5) {
        let max = min + span;
        let rule = string_length(min, max).unwrap();
        let passed = rule.evaluate(&Property::new("Text", s.as_str())).is_success();
        let count = s.chars().count();
        prop_assert_eq!(passed, count >= min && count <= max);
    }

    #[test]
    fn size_matches_element_count(items in prop::collection::vec(any::<u8>(), 0..8)) {
        let rule = size(1, 3).unwrap();
        let passed = rule.evaluate(&Property::new("Items", &items)).is_success();
        prop_assert_eq!(passed, (1..=3).contains(&items.len()));
    }

    #[test]
    fn evaluation_is_idempotent(s in ".{0,40}") {
        let rule = email();
        let first = rule.evaluate(&Property::new("Email", s.as_str()));
        let second = rule.evaluate(&Property::new("Email", s.as_str()));
        prop_assert_eq!(first, second);
    }
}
