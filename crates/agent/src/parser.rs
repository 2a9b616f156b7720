//! Numbered-list response parsing.
//!
//! Task creation and prioritization prompts ask the model for output like:
//!
//! ```text
//! 1. Research venues
//! 2. Book a venue
//! ```
//!
//! Models do not always comply. The parser is deliberately forgiving: any
//! line that does not look like a numbered entry is dropped without error,
//! so a refusal such as "There are no tasks to add at this time." simply
//! parses to an empty list.

/// Extract task names from a numbered-list response.
///
/// Each line is considered independently:
/// 1. Trim surrounding whitespace.
/// 2. Split at the first `.` into a number part and a name part. Lines
///    without a `.` are dropped.
/// 3. Keep only the ASCII digits of the number part. Lines whose number
///    part has no digits are dropped.
/// 4. Strip every character of the name part that is not alphanumeric,
///    whitespace, or `_`, then trim. Lines whose name ends up empty are
///    dropped.
///
/// The numbers themselves are ignored; line order decides task order.
pub fn parse_numbered_list(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| {
            let (number, name) = line.trim().split_once('.')?;
            if !number.chars().any(|c| c.is_ascii_digit()) {
                return None;
            }
            let name: String = name
                .chars()
                .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
                .collect();
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(name.to_string())
        })
        .collect()
}
