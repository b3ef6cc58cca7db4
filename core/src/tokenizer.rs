use crate::config::TRAILING_PUNCTUATION;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // letters and decimal digits only
    static ref WORD: Regex = Regex::new(r"^[\p{L}\p{Nd}]+$").expect("valid regex");
    static ref NOT_WORD_CHAR: Regex = Regex::new(r"[^\p{L}\p{Nd}]").expect("valid regex");
}

/// Words that are never indexed, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct NoiseWords {
    words: HashSet<String>,
}

impl NoiseWords {
    pub fn new() -> Self { Self::default() }

    /// Parse whitespace-separated words; case is folded and duplicates collapse.
    pub fn parse(text: &str) -> Self {
        text.split_whitespace().collect()
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for NoiseWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { words }
    }
}

fn is_trailing_punctuation(c: char) -> bool { TRAILING_PUNCTUATION.contains(&c) }

/// Turn a raw description token into an indexable word.
///
/// Trailing `. , ? : ; !` are stripped, and the lowercased rest must consist of letters and
/// decimal digits and must not be a noise word. Returns `None` when the token is rejected.
///
/// The character check runs after lowercasing, since lowercasing can introduce combining marks
/// (`İ` becomes `i` + U+0307).
pub fn normalize_word(token: &str, noise: &NoiseWords) -> Option<String> {
    let stripped = token.trim_end_matches(is_trailing_punctuation);
    let word = stripped.to_lowercase();
    if !WORD.is_match(&word) { return None; }
    if noise.contains(&word) { return None; }
    Some(word)
}

/// Key under which a movie title is grouped: lowercased, letters and decimal digits only.
/// The title itself is kept as written for display.
pub fn title_key(title: &str) -> String {
    NOT_WORD_CHAR.replace_all(&title.to_lowercase(), "").into_owned()
}

/// Prepare a user-supplied query term for lookup: surrounding whitespace and trailing
/// punctuation removed, lowercased. Noise words are not filtered here; they simply never match.
pub fn normalize_query(term: &str) -> String {
    term.trim().trim_end_matches(is_trailing_punctuation).to_lowercase()
}
