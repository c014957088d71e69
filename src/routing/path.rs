//! Path joining and prefix matching.
//!
//! # Design Decisions
//! - Only the seam between two segments is cleaned; duplicate slashes inside a
//!   segment are left alone
//! - Prefix matching is plain string prefixing in both directions, no segment
//!   awareness (`/inbox` matches `/inboxes`)

/// Join two `/`-delimited paths, removing duplicate `/`s at the point of joining.
///
/// ```
/// use route_sync::routing::path::join;
///
/// assert_eq!(join("/", "inbox"), "/inbox");
/// assert_eq!(join("/", "/inbox"), "/inbox");
/// assert_eq!(join("inbox", "messages"), "inbox/messages");
/// assert_eq!(join("/inbox/messages/", "/1/"), "/inbox/messages/1");
/// ```
pub fn join(base: &str, segment: &str) -> String {
    let head = base.strip_suffix('/').unwrap_or(base);
    let tail = segment.strip_prefix('/').unwrap_or(segment);

    let mut joined = String::with_capacity(head.len() + tail.len() + 1);
    joined.push_str(head);
    joined.push('/');
    joined.push_str(tail);

    // A lone "/" is the root and keeps its slash.
    if joined.len() > 1 && joined.ends_with('/') {
        joined.pop();
    }
    joined
}

/// Join a sequence of optional segments, skipping absent ones.
///
/// Returns an empty string when no segment is present.
pub fn join_all<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    segments
        .into_iter()
        .flatten()
        .fold(String::new(), |acc, segment| join(&acc, segment))
}

/// True iff `path` lies on the same branch as `prefix`: either one starts with the other.
pub fn matches_prefix(prefix: &str, path: &str) -> bool {
    prefix.starts_with(path) || path.starts_with(prefix)
}
