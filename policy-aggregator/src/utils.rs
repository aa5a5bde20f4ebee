/// Text processing utilities
pub mod text {
    /// Remove markup tags and collapse whitespace.
    ///
    /// Entities are decoded first so double-escaped HTML is stripped too.
    /// A `<` only opens a tag when followed by a letter, `/` or `!`.
    pub fn strip_markup(html: &str) -> String {
        let decoded = decode_common_entities(html);
        let mut text = String::with_capacity(decoded.len());
        let mut in_tag = false;
        let mut chars = decoded.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '<' if !in_tag && chars.peek().is_some_and(|&n| opens_tag(n)) => in_tag = true,
                '>' if in_tag => {
                    // Keep words on either side of a tag apart.
                    text.push(' ');
                    in_tag = false;
                }
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn opens_tag(next: char) -> bool {
        next.is_ascii_alphabetic() || next == '/' || next == '!'
    }

    /// Entities that survive XML decoding when a feed double-escapes its HTML.
    fn decode_common_entities(text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    /// Cut `text` to `max_chars` characters, appending `...` when cut.
    ///
    /// Counts characters, not bytes; German text is full of umlauts.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let kept: String = text.chars().take(max_chars).collect();
        format!("{}...", kept.trim_end())
    }

    /// Substring test against a keyword list. The haystack must already be
    /// lower-cased and the keywords written in lower case.
    pub fn contains_any(haystack_lower: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| haystack_lower.contains(k))
    }
}

/// Identifier helpers
pub mod ids {
    use sha2::{Digest, Sha256};

    /// Stable id for items whose upstream has no id of its own.
    pub fn from_title(prefix: &str, title: &str) -> String {
        let digest = Sha256::digest(title.as_bytes());
        let hex = format!("{:x}", digest);
        format!("{}-{}", prefix, &hex[..16])
    }
}
