//! Class-name token extraction from rendered CSS.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern should compile"));
static STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#).expect("string pattern should compile")
});
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\([^)]*\)").expect("url pattern should compile"));
static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(-?[_a-zA-Z][_a-zA-Z0-9-]*)").expect("class pattern should compile")
});

/// Extract class names used in selectors, in first-seen order.
///
/// Only rule preludes are scanned; declaration values and at-rule preludes
/// (`@media`, `@supports`, ...) never contribute tokens.
pub fn extract_classes(css: &str) -> Vec<String> {
    let css = COMMENT.replace_all(css, "");
    let css = URL.replace_all(&css, "url()");
    let css = STRING.replace_all(&css, "\"\"");

    let mut classes = IndexSet::new();
    let mut prelude_start = 0;
    for (idx, ch) in css.char_indices() {
        match ch {
            '{' => {
                let prelude = css[prelude_start..idx].trim();
                if !prelude.starts_with('@') {
                    for cap in CLASS.captures_iter(prelude) {
                        classes.insert(cap[1].to_string());
                    }
                }
                prelude_start = idx + 1;
            }
            '}' | ';' => prelude_start = idx + 1,
            _ => {}
        }
    }

    classes.into_iter().collect()
}

/// camelCase a class name: `-` and `_` separate words, later words are
/// capitalised.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' || ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
