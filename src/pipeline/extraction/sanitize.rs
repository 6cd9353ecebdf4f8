/// Unicode MINUS SIGN, common in lab reference ranges ("−0.5").
pub const UNICODE_MINUS: char = '\u{2212}';

/// Normalize extracted text before passing downstream.
///
/// Replaces U+2212 with the ASCII hyphen-minus, which single-byte report fonts
/// can render, and drops NUL bytes. Every other character is kept as is;
/// in particular whitespace is neither trimmed nor collapsed.
pub fn normalize_extracted_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '\0')
        .map(|c| if c == UNICODE_MINUS { '-' } else { c })
        .collect()
}

/// True when the text holds nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
