/// Maximum teaser length in characters.
pub const TEASER_MAX_CHARS: usize = 160;

/// Derive a plain-text teaser from a post's raw content.
///
/// Strips complete HTML tags (a `<` with no matching `>` is kept as
/// literal text), truncates to the first [`TEASER_MAX_CHARS`] characters,
/// and trims surrounding whitespace.
pub fn derive_teaser(content: &str) -> String {
    let text = strip_tags(content);
    let truncated: String = text.chars().take(TEASER_MAX_CHARS).collect();
    truncated.trim().to_string()
}

fn strip_tags(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            // "<>" is not a tag; keep it as literal text.
            Some(0) => {
                text.push_str("<>");
                rest = &after[1..];
            }
            Some(end) => rest = &after[end + 1..],
            None => {
                text.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_truncates() {
        let content = format!("<p>Hello <b>World</b></p>{}", "x".repeat(200));
        let teaser = derive_teaser(&content);
        assert_eq!(teaser.chars().count(), TEASER_MAX_CHARS);
        assert!(teaser.starts_with("Hello World"));
    }

    #[test]
    fn short_content_is_kept_whole() {
        assert_eq!(derive_teaser("<p>Just a line.</p>"), "Just a line.");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(derive_teaser("  <br>  padded  "), "padded");
    }

    #[test]
    fn unclosed_angle_bracket_is_literal() {
        assert_eq!(derive_teaser("2 < 3 and that is all"), "2 < 3 and that is all");
    }

    #[test]
    fn empty_content() {
        assert_eq!(derive_teaser(""), "");
    }

    #[test]
    fn tags_only() {
        assert_eq!(derive_teaser("<p><br/></p>"), "");
    }
}
