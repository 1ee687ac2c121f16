//! Pure pattern matching functions for cache keys.
//!
//! These functions support glob-style patterns with `*` wildcard
//! that matches any sequence of characters.

/// Checks if a cache key matches a glob pattern.
///
/// The pattern supports `*` as a wildcard that matches any sequence
/// of characters (including empty strings).
///
/// # Examples
///
/// ```
/// use assigncache_core::cache::pattern_matches;
///
/// assert!(pattern_matches("Issue:*", "Issue:board:42"));
/// assert!(pattern_matches("Assignment:*:User/1:*", "Assignment:GetByUser:User/1:0:10"));
/// assert!(!pattern_matches("Document:*", "Issue:board:42"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');

    // The text before the first wildcard anchors at the start of the key.
    let head = segments.next().unwrap_or_default();
    let Some(mut remaining) = key.strip_prefix(head) else {
        return false;
    };

    let rest: Vec<&str> = segments.collect();
    let Some((tail, middle)) = rest.split_last() else {
        return remaining.is_empty();
    };

    // Leftmost match for every inner segment, then the tail anchors at the end.
    for segment in middle {
        match remaining.find(segment) {
            Some(pos) => remaining = &remaining[pos + segment.len()..],
            None => return false,
        }
    }

    remaining.ends_with(tail)
}
