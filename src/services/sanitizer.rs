//! Terminal color stripping for captured output.

use regex::Regex;
use std::sync::LazyLock;

/// `ESC [ <n> ; <n> m` with both numeric fields optional.
static SGR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[\d*;?\d*m").expect("SGR pattern is valid")
});

/// Remove ANSI SGR color/style sequences, leaving every other character as is.
pub fn sanitize(raw: &str) -> String {
    SGR_PATTERN.replace_all(raw, "").into_owned()
}
