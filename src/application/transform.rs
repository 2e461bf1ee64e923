// src/application/transform.rs
//! Text-to-slug normalisation shared by every built-in strategy.

/// Symbols that read as words and are spelled out instead of dropped.
const SYMBOL_WORDS: &[(char, &str)] = &[
    ('&', "and"),
    ('|', "or"),
    ('<', "less"),
    ('>', "greater"),
    ('$', "dollar"),
    ('%', "percent"),
    ('¢', "cent"),
    ('£', "pound"),
    ('¥', "yen"),
    ('€', "euro"),
    ('₹', "indian rupee"),
    ('₽', "russian ruble"),
    ('฿', "baht"),
    ('™', "tm"),
    ('∑', "sum"),
    ('∞', "infinity"),
    ('♥', "love"),
];

fn symbol_word(ch: char) -> Option<&'static str> {
    SYMBOL_WORDS
        .iter()
        .find(|(symbol, _)| *symbol == ch)
        .map(|(_, word)| *word)
}

/// Normalise `value` into a lowercase ASCII slug joined by `separator`.
///
/// Diacritics and other non-ASCII letters are transliterated, punctuation is
/// dropped without leaving a gap (`"How's"` becomes `"hows"`), and whitespace
/// runs collapse into a single separator. An occurrence of a single-character
/// separator in the input counts as whitespace, which keeps the function
/// idempotent.
pub fn slugify(value: &str, separator: &str) -> String {
    let mut separator_chars = separator.chars();
    let separator_char = match (separator_chars.next(), separator_chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    };

    let mut buffer = String::with_capacity(value.len());
    for ch in value.chars() {
        if Some(ch) == separator_char {
            buffer.push(' ');
        } else if let Some(word) = symbol_word(ch) {
            buffer.push_str(word);
        } else if ch.is_ascii() || ch.is_whitespace() {
            buffer.push(ch);
        } else {
            // slug::slugify transliterates through deunicode; its own dashes
            // become word breaks here.
            let ascii = slug::slugify(ch.to_string());
            buffer.extend(ascii.chars().map(|c| if c == '-' { ' ' } else { c }));
        }
    }

    buffer.retain(|c| c.is_ascii_alphanumeric() || c.is_whitespace());

    buffer
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(separator)
        .to_lowercase()
}

/// Cap `value` at `limit` characters.
///
/// With `complete_words` a word straddling the limit is kept whole, so the
/// result may run past `limit`; a dangling separator at the cut is removed.
pub fn truncate(value: &str, limit: usize, complete_words: bool) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= limit {
        return value.to_string();
    }

    if !complete_words {
        return chars[..limit].iter().collect();
    }

    let mut end = limit;
    if end > 0 && chars[end - 1].is_alphanumeric() {
        while end < chars.len() && chars[end].is_alphanumeric() {
            end += 1;
        }
    }

    let cut: String = chars[..end].iter().collect();
    cut.trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}
