/// Unicode script blocks checked in order; the first script present in the
/// text decides the language. Marathi shares Devanagari and reports as `hi`.
const SCRIPTS: [(&str, char, char); 8] = [
    ("hi", '\u{0900}', '\u{097F}'),
    ("bn", '\u{0980}', '\u{09FF}'),
    ("ta", '\u{0B80}', '\u{0BFF}'),
    ("te", '\u{0C00}', '\u{0C7F}'),
    ("gu", '\u{0A80}', '\u{0AFF}'),
    ("kn", '\u{0C80}', '\u{0CFF}'),
    ("ml", '\u{0D00}', '\u{0D7F}'),
    ("pa", '\u{0A00}', '\u{0A7F}'),
];

/// Guesses the language of `text` from the scripts it uses, defaulting to `en`.
pub fn detect_language(text: &str) -> &'static str {
    SCRIPTS
        .iter()
        .find(|(_, start, end)| text.chars().any(|c| (*start..=*end).contains(&c)))
        .map(|(code, _, _)| *code)
        .unwrap_or("en")
}

/// Reduces a locale such as `hi-IN` to its language code.
pub fn base_language(locale: &str) -> &str {
    locale.split(|c: char| c == '-' || c == '_').next().unwrap_or(locale)
}
