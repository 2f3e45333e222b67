//! Cleans raw speech-recognition output into a dispatchable command.

/// Trims surrounding whitespace. Returns `None` for empty or whitespace-only
/// input, in which case nothing is dispatched.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
