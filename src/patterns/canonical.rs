//! Rendering of paths into comparable pattern strings.

use super::{graph::DocGraph, mention::MentionNormalizer};

/// Pattern of a path whose endpoints are adjacent or identical.
pub const EMPTY_PATTERN: &str = " ";

/// Path without its first and last node.
pub fn interior<T>(path: &[T]) -> &[T] {
    if path.len() < 2 {
        return &[];
    }
    &path[1..path.len() - 1]
}

/// Join interior tokens: placeholders collapse to their type tag, everything
/// else is lowercased.
pub fn render<'a, I, F>(tokens: I, is_placeholder: F) -> String
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> bool,
{
    let parts: Vec<String> = tokens
        .into_iter()
        .map(|token| {
            if is_placeholder(token) {
                type_tag(token).to_string()
            } else {
                token.to_lowercase()
            }
        })
        .collect();
    let pattern = parts.join(" ");
    if pattern.is_empty() {
        EMPTY_PATTERN.to_string()
    } else {
        pattern
    }
}

/// Text before the first underscore of a placeholder.
pub fn type_tag(placeholder: &str) -> &str {
    placeholder.split('_').next().unwrap_or(placeholder)
}

/// Canonical pattern of a full endpoint-to-endpoint path in `graph`.
pub fn canonicalize(path: &[usize], graph: &DocGraph, normalizer: &MentionNormalizer) -> String {
    render(
        interior(path).iter().map(|&node| graph.surface(node)),
        |token| normalizer.is_placeholder(token),
    )
}
