//! Two-word proximity queries over a [`MovieIndex`].
//!
//! A query gathers, per movie, the positions of both words, scores each movie by the closest
//! pair of positions, and keeps the best `k` movies.

use crate::config::DEFAULT_TOP_K;
use crate::index::MovieIndex;
use crate::tokenizer::title_key;
use serde::Serialize;
use std::collections::HashMap;

/// Positions of both query words within one movie's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieSearchResult {
    pub title: String,
    pub positions_a: Vec<usize>,
    pub positions_b: Vec<usize>,
    /// Closest distance between the two words, `None` until computed or when either is absent.
    pub min_distance: Option<usize>,
}

impl MovieSearchResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), positions_a: Vec::new(), positions_b: Vec::new(), min_distance: None }
    }

    /// Fill in `min_distance` from the collected positions and return it.
    pub fn compute_min_distance(&mut self) -> Option<usize> {
        self.min_distance = min_distance(&self.positions_a, &self.positions_b);
        self.min_distance
    }
}

/// Smallest `|a - b|` over `a` in `positions_a` and `b` in `positions_b`.
///
/// Both slices must be ascending. Walks them together, always advancing the side holding the
/// smaller value (the B side on ties). Returns `None` if either slice is empty.
pub fn min_distance(positions_a: &[usize], positions_b: &[usize]) -> Option<usize> {
    let (mut i, mut j) = (0, 0);
    let mut best: Option<usize> = None;
    while i < positions_a.len() && j < positions_b.len() {
        let (a, b) = (positions_a[i], positions_b[j]);
        let d = a.abs_diff(b);
        if best.map_or(true, |m| d < m) {
            best = Some(d);
        }
        if a < b { i += 1; } else { j += 1; }
    }
    best
}

/// Best movies for a query, plus how many movies contained both words before truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub hits: Vec<MovieSearchResult>,
    pub total_hits: usize,
}

impl MovieIndex {
    /// One result per movie mentioning either word, in the order movies were first seen
    /// (word A's occurrences first). Titles that differ only in case or punctuation are the same
    /// movie; the first spelling seen is kept. Distances are left uncomputed.
    pub fn aggregate(&self, word_a: &str, word_b: &str) -> Vec<MovieSearchResult> {
        let mut results: Vec<MovieSearchResult> = Vec::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();

        for (word, is_a) in [(word_a, true), (word_b, false)] {
            let Some(occ) = self.find(word) else { continue };
            for loc in occ.locations() {
                let idx = *by_title.entry(title_key(loc.title())).or_insert_with(|| {
                    results.push(MovieSearchResult::new(loc.title()));
                    results.len() - 1
                });
                let entry = &mut results[idx];
                if is_a {
                    entry.positions_a.push(loc.position());
                } else {
                    entry.positions_b.push(loc.position());
                }
            }
        }
        results
    }

    /// Up to `k` movies containing both words, closest first. Movies at equal distance keep the
    /// order in which they were aggregated.
    pub fn top_k(&self, word_a: &str, word_b: &str, k: usize) -> Vec<MovieSearchResult> {
        self.rank(word_a, word_b, k).hits
    }

    /// [`top_k`](Self::top_k) together with the number of movies that matched both words.
    pub fn rank(&self, word_a: &str, word_b: &str, k: usize) -> Ranking {
        let mut hits: Vec<MovieSearchResult> = Vec::with_capacity(k.min(64));
        let mut total_hits = 0;
        for mut candidate in self.aggregate(word_a, word_b) {
            let Some(distance) = candidate.compute_min_distance() else { continue };
            total_hits += 1;
            let at = hits
                .iter()
                .position(|r| r.min_distance.map_or(false, |d| d > distance))
                .unwrap_or(hits.len());
            if at >= k {
                continue;
            }
            hits.insert(at, candidate);
            hits.truncate(k);
        }
        tracing::debug!(word_a, word_b, k, total_hits, hits = hits.len(), "top-k query");
        Ranking { hits, total_hits }
    }

    pub fn top_ten(&self, word_a: &str, word_b: &str) -> Vec<MovieSearchResult> {
        self.top_k(word_a, word_b, DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::index::Location;
    use crate::tokenizer::NoiseWords;

    fn index_with(entries: &[(&str, &str, usize)]) -> MovieIndex {
        let mut ix = MovieIndex::new(IndexConfig::new(8, 2.0), NoiseWords::new()).unwrap();
        for (word, title, pos) in entries {
            ix.insert(word, Location::new(*title, *pos));
        }
        ix
    }

    #[test]
    fn worked_example_distance() {
        assert_eq!(min_distance(&[1, 3, 5, 11], &[4, 10, 12]), Some(1));
        assert_eq!(min_distance(&[], &[1, 2]), None);
        assert_eq!(min_distance(&[1, 2], &[]), None);
        assert_eq!(min_distance(&[5], &[5]), Some(0));
    }

    #[test]
    fn distance_matches_brute_force() {
        let cases: [(&[usize], &[usize]); 4] = [
            (&[2, 9, 40], &[20, 21, 60]),
            (&[100], &[1, 50, 99]),
            (&[1, 2, 3], &[7, 8, 9]),
            (&[10, 30, 50], &[10, 31]),
        ];
        for (a, b) in cases {
            let brute = a.iter().flat_map(|x| b.iter().map(move |y| x.abs_diff(*y))).min();
            assert_eq!(min_distance(a, b), brute, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn aggregate_groups_by_title_in_first_seen_order() {
        let ix = index_with(&[
            ("cat", "B", 3),
            ("cat", "A", 1),
            ("cat", "B", 8),
            ("dog", "C", 2),
            ("dog", "A", 5),
        ]);
        let agg = ix.aggregate("cat", "dog");
        let titles: Vec<&str> = agg.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
        assert_eq!(agg[0].positions_a, vec![3, 8]);
        assert!(agg[0].positions_b.is_empty());
        assert_eq!(agg[1].positions_b, vec![5]);
        assert!(agg.iter().all(|r| r.min_distance.is_none()));
    }

    #[test]
    fn unknown_words_aggregate_to_nothing() {
        let ix = index_with(&[("cat", "A", 1)]);
        assert!(ix.aggregate("zebra", "yak").is_empty());
        assert!(ix.top_k("cat", "yak", 10).is_empty());
    }

    #[test]
    fn titles_differing_in_case_are_one_movie() {
        let ix = index_with(&[("cat", "Heat", 1), ("dog", "HEAT", 4), ("dog", "Heat!", 2)]);
        let agg = ix.aggregate("cat", "dog");
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].title, "Heat");
        assert_eq!(agg[0].positions_b, vec![4, 2]);
    }

    #[test]
    fn rank_counts_matches_beyond_k() {
        let ix = index_with(&[
            ("cat", "A", 1), ("dog", "A", 2),
            ("cat", "B", 1), ("dog", "B", 5),
            ("cat", "C", 1),
        ]);
        let ranking = ix.rank("cat", "dog", 1);
        assert_eq!(ranking.total_hits, 2);
        assert_eq!(ranking.hits.len(), 1);
        assert_eq!(ranking.hits[0].title, "A");
        assert_eq!(ix.rank("cat", "dog", 0), Ranking { hits: vec![], total_hits: 2 });
    }

    #[test]
    fn same_word_twice_matches_itself() {
        let ix = index_with(&[("cat", "A", 4)]);
        let hits = ix.top_ten("cat", "cat");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].min_distance, Some(0));
    }

    #[test]
    fn ranking_is_stable_and_truncated() {
        let mut entries = Vec::new();
        let titles: Vec<String> = (0..15).map(|i| format!("M{i:02}")).collect();
        for (i, t) in titles.iter().enumerate() {
            // distance cycles 1..=3
            let gap = i % 3 + 1;
            entries.push(("cat", t.as_str(), 10));
            entries.push(("dog", t.as_str(), 10 + gap));
        }
        let ix = index_with(&entries);
        let hits = ix.top_k("cat", "dog", 10);
        assert_eq!(hits.len(), 10);
        let ds: Vec<usize> = hits.iter().map(|h| h.min_distance.unwrap()).collect();
        assert!(ds.windows(2).all(|w| w[0] <= w[1]));
        let ones: Vec<&str> = hits.iter().filter(|h| h.min_distance == Some(1)).map(|h| h.title.as_str()).collect();
        assert_eq!(ones, vec!["M00", "M03", "M06", "M09", "M12"]);
        assert!(ix.top_k("cat", "dog", 0).is_empty());
    }
}
