/// Derive a URL-safe slug from a post title.
///
/// Lowercases, strips everything outside `[a-z0-9\s-]`, collapses runs of
/// whitespace and hyphens into a single hyphen, and trims hyphens from both
/// ends. The derivation is deterministic for any title containing at least
/// one ASCII alphanumeric character.
///
/// When the title reduces to nothing (for example, all punctuation) the
/// result falls back to `post-<epoch_millis>` — the only non-deterministic
/// branch.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // Anything else is stripped without acting as a separator boundary
        // beyond the hyphen already pending.
    }
    if slug.is_empty() {
        format!("post-{}", chrono::Utc::now().timestamp_millis())
    } else {
        slug
    }
}
