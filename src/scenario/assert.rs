//! Assertions available to outcome bodies
//!
//! Every predicate returns whether it held and records a [`Failure`] with
//! the caller's location when it did not. A fresh [`Assert`] is handed to
//! each outcome, so failures never carry over to the next one.

use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe, Location};

/// A failed assertion and where it was made
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub message: String,
    pub location: &'static Location<'static>,
}

/// Assertion capability passed to outcome bodies
#[derive(Debug, Default)]
pub struct Assert {
    failures: Vec<Failure>,
}

impl Assert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any assertion failed so far
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub(crate) fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    #[track_caller]
    fn check(&mut self, ok: bool, message: impl FnOnce() -> String) -> bool {
        if !ok {
            self.failures.push(Failure {
                message: message(),
                location: Location::caller(),
            });
        }
        ok
    }

    /// Record an unconditional failure
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        self.check(false, || message)
    }

    #[track_caller]
    pub fn equal<E, A>(&mut self, expected: E, actual: A) -> bool
    where
        E: PartialEq<A> + Debug,
        A: Debug,
    {
        self.check(expected == actual, || {
            format!("Expected: {:?}\nActual:   {:?}", expected, actual)
        })
    }

    #[track_caller]
    pub fn not_equal<E, A>(&mut self, unexpected: E, actual: A) -> bool
    where
        E: PartialEq<A> + Debug,
        A: Debug,
    {
        self.check(unexpected != actual, || {
            format!("Should not be: {:?}", actual)
        })
    }

    #[track_caller]
    pub fn is_true(&mut self, value: bool) -> bool {
        self.check(value, || "Should be true".to_string())
    }

    #[track_caller]
    pub fn is_false(&mut self, value: bool) -> bool {
        self.check(!value, || "Should be false".to_string())
    }

    #[track_caller]
    pub fn is_some<T: Debug>(&mut self, value: &Option<T>) -> bool {
        self.check(value.is_some(), || "Expected Some(..), got None".to_string())
    }

    #[track_caller]
    pub fn is_none<T: Debug>(&mut self, value: &Option<T>) -> bool {
        self.check(value.is_none(), || format!("Expected None, got {:?}", value))
    }

    #[track_caller]
    pub fn is_ok<T: Debug, E: Debug>(&mut self, value: &Result<T, E>) -> bool {
        self.check(value.is_ok(), || format!("Expected Ok(..), got {:?}", value))
    }

    #[track_caller]
    pub fn is_err<T: Debug, E: Debug>(&mut self, value: &Result<T, E>) -> bool {
        self.check(value.is_err(), || format!("Expected Err(..), got {:?}", value))
    }

    #[track_caller]
    pub fn contains(&mut self, haystack: &str, needle: &str) -> bool {
        self.check(haystack.contains(needle), || {
            format!("{:?} does not contain {:?}", haystack, needle)
        })
    }

    #[track_caller]
    pub fn len<T: Debug>(&mut self, items: &[T], expected: usize) -> bool {
        self.check(items.len() == expected, || {
            format!("{:?} should have {} item(s), but has {}", items, expected, items.len())
        })
    }

    #[track_caller]
    pub fn is_empty<T: Debug>(&mut self, items: &[T]) -> bool {
        self.check(items.is_empty(), || format!("Should be empty, but was {:?}", items))
    }

    /// Numbers within `delta` of each other
    #[track_caller]
    pub fn in_delta(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(!diff.is_nan() && diff <= delta, || {
            format!(
                "Max difference between {} and {} allowed is {}, but difference was {}",
                expected, actual, delta, diff
            )
        })
    }

    /// `f` panics when called
    #[track_caller]
    pub fn panics<F: FnOnce()>(&mut self, f: F) -> bool {
        let panicked = panic::catch_unwind(AssertUnwindSafe(f)).is_err();
        self.check(panicked, || "Function should panic, but did not".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_assertions_record_nothing() {
        let mut a = Assert::new();
        assert!(a.equal(1, 1));
        assert!(a.equal("x".to_string(), "x"));
        assert!(a.not_equal(4, 5));
        assert!(a.is_true(true));
        assert!(a.is_false(false));
        assert!(a.is_some(&Some(1)));
        assert!(a.is_none::<i32>(&None));
        assert!(a.is_ok::<i32, ()>(&Ok(1)));
        assert!(a.is_err::<i32, &str>(&Err("e")));
        assert!(a.contains("hello world", "lo w"));
        assert!(a.len(&[1, 2, 3], 3));
        assert!(a.is_empty::<u8>(&[]));
        assert!(a.in_delta(1.0, 1.05, 0.1));
        assert!(a.panics(|| panic!("boom")));
        assert!(!a.failed());
    }

    #[test]
    fn test_failure_records_message_and_location() {
        let mut a = Assert::new();
        let line = line!() + 1;
        assert!(!a.equal(1, 2));
        assert!(a.failed());
        let failure = &a.failures()[0];
        assert!(failure.message.contains("Expected: 1"));
        assert!(failure.message.contains("Actual:   2"));
        assert_eq!(failure.location.line(), line);
        assert!(failure.location.file().ends_with("assert.rs"));
    }

    #[test]
    fn test_every_failure_is_kept() {
        let mut a = Assert::new();
        a.in_delta(1.0, 2.0, 0.5);
        a.panics(|| {});
        a.fail("custom");
        let messages: Vec<_> = a.into_failures().into_iter().map(|f| f.message).collect();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], "custom");
    }
}
