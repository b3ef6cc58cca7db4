pub mod config;
pub mod corpus;
pub mod error;
pub mod hash;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use config::IndexConfig;
pub use corpus::{load_movies, load_noise_words, MovieRecord};
pub use error::IndexError;
pub use index::{Location, MovieIndex, WordOccurrence};
pub use query::{min_distance, MovieSearchResult, Ranking};
pub use tokenizer::NoiseWords;

use anyhow::Result;
use std::path::Path;

/// Load the noise words and corpus from disk and build an index over them.
pub fn build_index<P: AsRef<Path>, Q: AsRef<Path>>(movies: P, noise_words: Q, config: IndexConfig) -> Result<MovieIndex> {
    let noise = load_noise_words(noise_words)?;
    let movies = load_movies(movies)?;
    let index = MovieIndex::from_corpus(config, noise, &movies)?;
    Ok(index)
}
