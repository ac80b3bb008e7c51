//! Scope encoding helpers.
//!
//! Scopes cross the storage boundary as a single space-separated string
//! and are persisted as an ordered list of strings. These two functions
//! are the only place that transform lives.

pub fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(|s| s.to_string()).collect()
}

pub fn join_scopes(scopes: &[String]) -> Option<String> {
    if scopes.is_empty() {
        None
    } else {
        Some(scopes.join(" "))
    }
}
