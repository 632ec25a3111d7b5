//! Slug derivation for categories and tags

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Lowercase `name` and collapse every run of non-alphanumerics into one `-`.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Motivation"), "motivation");
        assert_eq!(slugify("human nature"), "human-nature");
        assert_eq!(slugify("  Self-Belief & Grit! "), "self-belief-grit");
        assert_eq!(slugify("---"), "");
    }
}
