//! Custom element name validation.
//!
//! Browsers only upgrade elements whose names follow the custom element
//! naming rules, so every exported tag is checked against them before the
//! registry is populated.

/// Names the HTML specification reserves for SVG and MathML elements that
/// already contain a hyphen. These are never valid custom element names.
const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Checks whether `name` is a valid custom element name.
///
/// A valid name starts with an ASCII lowercase letter, contains at least one
/// hyphen, uses only lowercase letters, digits, `-`, `_` and `.`, and is not
/// one of the reserved hyphenated names.
#[must_use]
pub fn is_valid_custom_element_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }
    if !name.contains('-') {
        return false;
    }
    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
    {
        return false;
    }
    !RESERVED_NAMES.contains(&name)
}
