//! Custom assertions for testing

// Allow missing panics docs for test utilities - these assertions are designed to panic
// on failure which is their core purpose in test contexts
#![allow(clippy::missing_panics_doc)]

/// Assert that two floats are within `epsilon` of each other
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// use tempo_common::testing::assert_approx_eq;
///
/// assert_approx_eq(10.0, 10.004, 0.01);
/// # }
/// ```
pub fn assert_approx_eq(left: f64, right: f64, epsilon: f64) {
    assert!(
        (left - right).abs() <= epsilon,
        "assertion failed: |{left} - {right}| <= {epsilon}"
    );
}

/// Assert that an error's display output contains a specific substring
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// let result: Result<(), String> = Err("Timer is not running.".to_string());
/// tempo_common::assert_error_contains!(result, "not running");
/// # }
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $substring:expr) => {
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($substring),
                    "Error message '{}' does not contain '{}'",
                    error_msg,
                    $substring
                );
            }
        }
    };
}
