//! Reachability predicate over an issue's coordinates.

use crate::snyk::IssueRecord;

/// Reachability values that mean the vulnerable code is exercised.
pub const REACHABLE_VALUES: [&str; 2] = ["function", "package"];

/// True iff at least one coordinate is reachable at function or package level.
///
/// Values are compared exactly; `"Function"` does not count.
#[must_use]
pub fn is_reachable(record: &IssueRecord) -> bool {
    record
        .coordinates
        .iter()
        .filter_map(|c| c.reachability.as_deref())
        .any(|r| REACHABLE_VALUES.contains(&r))
}
