use crate::config::IndexConfig;
use crate::corpus::MovieRecord;
use crate::error::IndexError;
use crate::hash::bucket_for;
use crate::tokenizer::{normalize_word, NoiseWords};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Slot of a [`WordOccurrence`] in the index's node arena.
pub type NodeId = usize;

/// One mention of a word: the movie it appeared in and its 1-based position in the description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    title: String,
    position: usize,
}

impl Location {
    pub fn new(title: impl Into<String>, position: usize) -> Self {
        Self { title: title.into(), position }
    }

    pub fn title(&self) -> &str { &self.title }

    pub fn position(&self) -> usize { self.position }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.title, self.position)
    }
}

/// A chain node: a distinct word and every place it was seen, in insertion order.
#[derive(Debug, Clone)]
pub struct WordOccurrence {
    word: String,
    occurrences: Vec<Location>,
    next: Option<NodeId>,
}

impl WordOccurrence {
    fn new(word: &str, next: Option<NodeId>) -> Self {
        Self { word: word.to_string(), occurrences: Vec::new(), next }
    }

    pub fn word(&self) -> &str { &self.word }

    pub fn locations(&self) -> &[Location] { &self.occurrences }
}

impl fmt::Display for WordOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)?;
        for loc in &self.occurrences {
            write!(f, "{loc}")?;
        }
        Ok(())
    }
}

/// Separately chained hash table from normalized word to its occurrences.
///
/// Nodes live in an arena and are never removed, so the number of distinct words is the arena
/// length. Buckets hold the head of each chain; new words are prepended.
#[derive(Debug, Clone)]
pub struct MovieIndex {
    nodes: Vec<WordOccurrence>,
    buckets: Vec<Option<NodeId>>,
    threshold: f64,
    noise_words: NoiseWords,
}

impl MovieIndex {
    pub fn new(config: IndexConfig, noise_words: NoiseWords) -> Result<Self, IndexError> {
        config.validate()?;
        Ok(Self {
            nodes: Vec::new(),
            buckets: vec![None; config.table_size],
            threshold: config.load_factor_threshold,
            noise_words,
        })
    }

    /// Build an index and insert every movie in order.
    pub fn from_corpus<'a, I>(config: IndexConfig, noise_words: NoiseWords, movies: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = &'a MovieRecord>,
    {
        let mut index = Self::new(config, noise_words)?;
        let mut num_movies = 0usize;
        let mut num_locations = 0usize;
        for movie in movies {
            num_locations += index.insert_movie(movie);
            num_movies += 1;
        }
        tracing::info!(
            num_movies,
            num_locations,
            num_words = index.word_count(),
            size = index.size(),
            "corpus indexed"
        );
        Ok(index)
    }

    /// Number of bucket slots.
    pub fn size(&self) -> usize { self.buckets.len() }

    /// Number of distinct words stored.
    pub fn word_count(&self) -> usize { self.nodes.len() }

    pub fn load_factor(&self) -> f64 { self.word_count() as f64 / self.size() as f64 }

    pub fn threshold(&self) -> f64 { self.threshold }

    pub fn noise_words(&self) -> &NoiseWords { &self.noise_words }

    /// Index every significant word of a movie's description. Returns how many were inserted.
    pub fn insert_movie(&mut self, movie: &MovieRecord) -> usize {
        let mut inserted = 0;
        for (i, token) in movie.words.iter().enumerate() {
            if let Some(word) = normalize_word(token, &self.noise_words) {
                self.insert(&word, Location::new(movie.title.as_str(), i + 1));
                inserted += 1;
            }
        }
        inserted
    }

    /// Record `location` under `word`, creating the word's node if it is new.
    ///
    /// `word` is stored as given; callers pass normalized words. Doubles the table when the load
    /// factor passes the threshold. Because the threshold is at least `1 / size`, one doubling
    /// always brings the load factor back under it.
    pub fn insert(&mut self, word: &str, location: Location) {
        match self.find_id(word) {
            Some(id) => self.nodes[id].occurrences.push(location),
            None => {
                let slot = bucket_for(word, self.size());
                let id = self.nodes.len();
                let mut node = WordOccurrence::new(word, self.buckets[slot]);
                node.occurrences.push(location);
                self.nodes.push(node);
                self.buckets[slot] = Some(id);
            }
        }

        if self.load_factor() > self.threshold {
            match self.size().checked_mul(2) {
                Some(new_size) => self.rehash(new_size),
                None => tracing::warn!(size = self.size(), "table cannot grow further"),
            }
        }
    }

    pub fn find(&self, word: &str) -> Option<&WordOccurrence> {
        self.find_id(word).map(|id| &self.nodes[id])
    }

    fn find_id(&self, word: &str) -> Option<NodeId> {
        let mut cur = self.buckets[bucket_for(word, self.size())];
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if node.word == word {
                return Some(id);
            }
            cur = node.next;
        }
        None
    }

    /// Relink every node into a fresh bucket array of `new_size` slots, appending to the tail of
    /// each new chain, then swap it in.
    fn rehash(&mut self, new_size: usize) {
        let old_size = self.size();
        let mut buckets: Vec<Option<NodeId>> = vec![None; new_size];
        let mut tails: Vec<Option<NodeId>> = vec![None; new_size];

        for slot in 0..old_size {
            let mut cur = self.buckets[slot];
            while let Some(id) = cur {
                cur = self.nodes[id].next.take();
                let target = bucket_for(&self.nodes[id].word, new_size);
                match tails[target] {
                    Some(tail) => self.nodes[tail].next = Some(id),
                    None => buckets[target] = Some(id),
                }
                tails[target] = Some(id);
            }
        }

        self.buckets = buckets;
        tracing::debug!(old_size, new_size, words = self.word_count(), "rehashed");
    }

    /// Nodes chained in one bucket, head first.
    pub fn chain(&self, slot: usize) -> impl Iterator<Item = &WordOccurrence> + '_ {
        let head = self.buckets.get(slot).copied().flatten();
        std::iter::successors(head, move |&id| self.nodes[id].next).map(move |id| &self.nodes[id])
    }

    /// Every stored word, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &WordOccurrence> + '_ {
        (0..self.size()).flat_map(move |slot| self.chain(slot))
    }

    /// Render the bucket array, one `[slot]->word(...)->word(...)` line per slot.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for slot in 0..self.size() {
            let _ = write!(out, "[{slot}]->");
            let chain: Vec<String> = self.chain(slot).map(|n| n.to_string()).collect();
            out.push_str(&chain.join("->"));
            out.push('\n');
        }
        out
    }
}
