use crate::tokenizer::NoiseWords;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A movie as read from the corpus: its title and the raw description tokens in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub words: Vec<String>,
}

impl MovieRecord {
    pub fn new<S: Into<String>>(title: impl Into<String>, words: impl IntoIterator<Item = S>) -> Self {
        Self { title: title.into(), words: words.into_iter().map(Into::into).collect() }
    }
}

/// Parse movie records of the form `Some Title| word word word;`.
///
/// Tokens are whitespace separated. The title runs up to the first `|`; description tokens
/// follow until one containing `;`, whose text before the `;` is the last word. Anything after
/// `|` in the same token is the first description word.
pub fn parse_movies(text: &str) -> Vec<MovieRecord> {
    let mut movies = Vec::new();
    let mut tokens = text.split_whitespace();

    'movies: loop {
        let mut title_parts: Vec<&str> = Vec::new();
        let mut words: Vec<String> = Vec::new();
        let mut rest: Option<&str> = None;
        loop {
            let Some(tok) = tokens.next() else {
                if !title_parts.is_empty() {
                    tracing::warn!(partial = %title_parts.join(" "), "trailing text without '|' ignored");
                }
                break 'movies;
            };
            match tok.split_once('|') {
                Some((head, tail)) => {
                    if !head.is_empty() { title_parts.push(head); }
                    if !tail.is_empty() { rest = Some(tail); }
                    break;
                }
                None => title_parts.push(tok),
            }
        }
        let title = title_parts.join(" ");

        let mut push_word = |tok: &str| -> bool {
            match tok.split_once(';') {
                Some((last, _)) => {
                    if !last.is_empty() { words.push(last.to_string()); }
                    true
                }
                None => {
                    words.push(tok.to_string());
                    false
                }
            }
        };
        let mut done = rest.map_or(false, &mut push_word);
        while !done {
            match tokens.next() {
                Some(tok) => done = push_word(tok),
                None => break,
            }
        }

        if title.is_empty() {
            tracing::warn!("movie without a title skipped");
            continue;
        }
        movies.push(MovieRecord { title, words });
    }
    movies
}

/// Read movies from a file, or from every `.txt` file under a directory in path order.
pub fn load_movies<P: AsRef<Path>>(path: P) -> Result<Vec<MovieRecord>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut movies = Vec::new();
    for file in files {
        let text = fs::read_to_string(&file).with_context(|| format!("reading movies from {}", file.display()))?;
        let parsed = parse_movies(&text);
        tracing::debug!(file = %file.display(), movies = parsed.len(), "parsed movie file");
        movies.extend(parsed);
    }
    Ok(movies)
}

pub fn load_noise_words<P: AsRef<Path>>(path: P) -> Result<NoiseWords> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading noise words from {}", path.display()))?;
    Ok(NoiseWords::parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_titles_and_terminator() {
        let movies = parse_movies("The Big Sleep| A detective, hired. Then more;\nHeat| Cops chase thieves;");
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "The Big Sleep");
        assert_eq!(movies[0].words, vec!["A", "detective,", "hired.", "Then", "more"]);
        assert_eq!(movies[1], MovieRecord::new("Heat", ["Cops", "chase", "thieves"]));
    }

    #[test]
    fn description_may_start_in_title_token() {
        let movies = parse_movies("Alien|Crew meets; Up| balloon");
        assert_eq!(movies[0], MovieRecord::new("Alien", ["Crew", "meets"]));
        assert_eq!(movies[1], MovieRecord::new("Up", ["balloon"]));
    }

    #[test]
    fn lone_semicolon_ends_description() {
        let movies = parse_movies("X| one two ;");
        assert_eq!(movies[0].words, vec!["one", "two"]);
    }

    #[test]
    fn ignores_text_without_separator() {
        assert!(parse_movies("no separator here").is_empty());
        assert!(parse_movies("").is_empty());
    }
}
