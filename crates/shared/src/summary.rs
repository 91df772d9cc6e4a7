//! Best-effort split of generated text into individual summary variants.

use regex::Regex;
use std::sync::LazyLock;

static VARIANT_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"2\.|3\.").expect("delimiter pattern is valid"));

/// Cut the accumulated generation output into summary variants on its
/// numeric list markers.
///
/// Everything up to the first `'1'` plus the two characters after it
/// (the "1. " marker) is dropped, then the remainder is split on every
/// literal occurrence of `"2."` or `"3."` and each segment is trimmed.
/// There is deliberately no cut before `"4."`, so the last segment keeps
/// that marker attached. Generated text is free-form; this is a heuristic
/// cut, not a grammar, and malformed output yields however many segments
/// the delimiters produce.
///
/// If no `'1'` occurs (e.g. while the first fragments are still
/// streaming in), the whole text is treated as a single variant.
pub fn split_variants(text: &str) -> Vec<String> {
    let rest = match text.find('1') {
        Some(idx) => {
            // Skip two characters (not bytes) past the marker.
            let mut after = text[idx + 1..].chars();
            after.next();
            after.next();
            after.as_str()
        }
        None => text,
    };
    VARIANT_DELIMITER
        .split(rest)
        .map(|segment| segment.trim().to_string())
        .collect()
}
