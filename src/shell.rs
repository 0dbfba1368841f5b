//! POSIX shell quoting for remote command strings.
//!
//! Remote commands reach the build host as a single string interpreted by
//! the remote login shell, so every path and argument embedded into one must
//! be quoted individually.

/// Characters that never need quoting.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote `s` so the shell reads it back as exactly one word.
///
/// Safe strings pass through bare, the empty string becomes `''`, anything
/// else is wrapped in single quotes with embedded quotes spelled `'"'"'`.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(is_safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}
