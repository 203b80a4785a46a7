//! Unique test data, so tests sharing a directory never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("user");
/// let b = unique_username("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A password unlikely to match anything else in the test run.
pub fn unique_password() -> String {
    format!("pw-{}", Ulid::new())
}
