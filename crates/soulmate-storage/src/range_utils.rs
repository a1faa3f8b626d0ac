//! Range query helpers for prefix scans over composite index keys.

/// Calculate the exclusive end bound for a prefix range query.
///
/// Given prefix "user-001:", returns "user-001;" (next ASCII char after ':').
/// This allows range scans of the form `range(prefix..end_prefix)`.
pub fn prefix_end_bound(prefix: &str) -> String {
    if prefix.is_empty() {
        return String::new();
    }

    let mut bytes = prefix.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        *last = last.saturating_add(1);
    }

    String::from_utf8(bytes).unwrap_or_else(|_| format!("{}\x7F", prefix))
}

/// Create a prefix range for redb queries.
pub fn prefix_range(prefix: &str) -> (String, String) {
    (prefix.to_string(), prefix_end_bound(prefix))
}

/// Zero-padded decimal encoding so that lexical order matches numeric order.
pub fn sortable_u64(value: u64) -> String {
    format!("{value:020}")
}

/// Sortable encoding for millisecond timestamps; negative values clamp to 0.
pub fn sortable_millis(timestamp_ms: i64) -> String {
    sortable_u64(timestamp_ms.max(0) as u64)
}
