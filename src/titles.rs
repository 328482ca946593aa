/// Converts text to a URL slug: lowercased, ASCII letters/digits kept,
/// runs of whitespace and hyphens collapsed to a single hyphen, everything
/// else dropped.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    kept.replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalizes a page title: underscores become spaces, surrounding
/// whitespace goes, and the first character is uppercased.
pub fn normalize_title(title: &str) -> String {
    let spaced = title.replace('_', " ");
    let trimmed = spaced.trim();

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
