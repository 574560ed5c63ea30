// Container identifiers arrive as untrusted path segments.

/// Drop path separators, then anything outside `[A-Za-z0-9_.-]`.
///
/// The result is only ever bound as a query parameter; this is a second line of defense.
pub fn sanitize_container_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '/')
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect()
}
