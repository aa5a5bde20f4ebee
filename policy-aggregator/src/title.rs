use regex::Regex;
use std::sync::OnceLock;

/// Titles longer than this are shortened when no short name is found.
pub const MAX_SIMPLE_TITLE_CHARS: usize = 100;

fn short_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // A bracketed group naming a law: "(Wachstumschancengesetz)",
        // "(Widget Act)", "(Gesetz zur ... - GVG)".
        Regex::new(r"(?i)\(([^()]*(?:gesetz|\bact\b|\blaw\b)[^()]*)\)")
            .expect("short name pattern is a valid regex")
    })
}

/// Best-effort short display title for a long official title.
///
/// A bracketed short name wins over truncation; only one strategy applies.
pub fn simplify(official: &str) -> String {
    let short_name = short_name_pattern()
        .captures_iter(official)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .last();

    if let Some(short_name) = short_name {
        return short_name.to_string();
    }

    if official.chars().count() > MAX_SIMPLE_TITLE_CHARS {
        let kept: String = official.chars().take(MAX_SIMPLE_TITLE_CHARS - 3).collect();
        return format!("{}...", kept);
    }

    official.to_string()
}
