use crate::morse_error::MorseError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MorseError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Check that `sets` are pairwise disjoint (every handle appears at most once).
pub fn check_disjoint<T, I, S>(sets: I) -> Result<(), MorseError>
where
    T: std::hash::Hash + Eq + Copy + std::fmt::Debug,
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
{
    let mut seen = std::collections::HashSet::new();
    for (idx, set) in sets.into_iter().enumerate() {
        for x in set {
            if !seen.insert(x) {
                return Err(MorseError::InvariantViolation(format!(
                    "element {x:?} appears in more than one set (second occurrence in set {idx})"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_sets_pass() {
        assert!(check_disjoint(vec![vec![1, 2], vec![3], vec![]]).is_ok());
    }

    #[test]
    fn overlapping_sets_fail() {
        let err = check_disjoint(vec![vec![1, 2], vec![2, 3]]).unwrap_err();
        assert!(matches!(err, MorseError::InvariantViolation(_)));
    }
}
