//! Segment-sequence path helpers.
//!
//! Paths are kept as ordered segment lists (`["blog", "post.md"]`). Strings
//! only appear at the edges, joined with `/` and without leading or trailing
//! slashes.

/// Split a slash-separated path into segments.
///
/// Empty segments and `.` are dropped, `..` pops the previous segment.
pub fn split(path: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for part in path.split('/').filter(|s| !s.is_empty()) {
        match part {
            ".." => {
                parts.pop();
            }
            "." => {}
            _ => parts.push(part.to_string()),
        }
    }
    parts
}

/// Join segments with `/`.
pub fn join(segments: &[String]) -> String {
    segments.join("/")
}

/// Concatenate two segment lists.
pub fn concat(base: &[String], rest: &[String]) -> Vec<String> {
    base.iter().chain(rest.iter()).cloned().collect()
}

/// Append a single segment.
pub fn child(base: &[String], name: &str) -> Vec<String> {
    let mut out = base.to_vec();
    out.push(name.to_string());
    out
}

/// Parent of a segment list; `None` for the empty list.
pub fn parent(segments: &[String]) -> Option<Vec<String>> {
    segments
        .split_last()
        .map(|(_, parent)| parent.to_vec())
}

/// Check whether a name can be used as a single path segment.
pub fn is_valid_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

/// Collect string slices into owned segments.
pub fn segments<S: AsRef<str>>(parts: &[S]) -> Vec<String> {
    parts.iter().map(|s| s.as_ref().to_string()).collect()
}
