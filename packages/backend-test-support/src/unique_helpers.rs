//! Unique test data, so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("alice");
/// assert_ne!(a, unique_email("alice"));
/// assert!(a.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix))
}
