pub mod bills;
pub mod categories;
pub mod customers;
pub mod settings;
pub mod stores;

/// Collapses runs of whitespace, strips control characters and trims the
/// result. Shared by every form converter.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitizes an optional field, mapping a blank submission to `None`.
pub(crate) fn sanitize_optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}
