//! Utility macros used internally by the client implementation.

/// A macro for early returns with an error if a condition is not met.
///
/// Like `assert!`, but produces an `Err` instead of panicking, which keeps
/// validation code in `Result`-returning functions flat.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
