//! Path invariants checked after every applied move.
//!
//! A violation means the round's bookkeeping and its board disagree. The
//! round logs it and asserts in debug builds.

mod path;

pub use path::{PathContiguousInvariant, PathOwnedInvariant, PositionAtPathEndInvariant};

/// A property of `S` that every reachable state satisfies.
pub trait Invariant<S> {
    /// True if `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Short name used in violation reports.
    fn description() -> &'static str;
}

/// One failed invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Name of the failed invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps an invariant name.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked as a group.
pub trait InvariantSet<S> {
    /// Every failed invariant, or `Ok` when all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<InvariantViolation> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The three path invariants of a [`crate::Round`].
pub type RoundInvariants = (
    PathOwnedInvariant,
    PathContiguousInvariant,
    PositionAtPathEndInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;

    struct Positive;
    struct Even;
    struct Small;

    impl Invariant<i32> for Positive {
        fn holds(n: &i32) -> bool {
            *n > 0
        }
        fn description() -> &'static str {
            "positive"
        }
    }

    impl Invariant<i32> for Even {
        fn holds(n: &i32) -> bool {
            n % 2 == 0
        }
        fn description() -> &'static str {
            "even"
        }
    }

    impl Invariant<i32> for Small {
        fn holds(n: &i32) -> bool {
            *n < 10
        }
        fn description() -> &'static str {
            "small"
        }
    }

    #[test]
    fn test_check_all_reports_each_failure_in_order() {
        assert_eq!(<(Positive, Even, Small)>::check_all(&4), Ok(()));
        assert_eq!(
            <(Positive, Even, Small)>::check_all(&-3),
            Err(vec![InvariantViolation::new("positive"), InvariantViolation::new("even")])
        );
        assert_eq!(
            <(Positive, Even, Small)>::check_all(&12),
            Err(vec![InvariantViolation::new("small")])
        );
    }
}
