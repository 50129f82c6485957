/// Keeps the first `max_segments` comma-separated parts of a display name.
///
/// Segments are trimmed and blank ones skipped. Returns `None` when nothing
/// usable is left, so callers can fall back instead of storing an empty address.
pub fn shorten_display_name(display_name: &str, max_segments: usize) -> Option<String> {
    let parts: Vec<&str> = display_name
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(max_segments.max(1))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
