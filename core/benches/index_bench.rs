use criterion::{criterion_group, criterion_main, Criterion};
use rumdb_core::corpus::parse_movies;
use rumdb_core::{IndexConfig, MovieIndex, NoiseWords};

const WORDS: &[&str] = &[
    "heist", "detective", "space", "pirate", "robot", "love", "war", "city", "night", "the",
    "a", "ship", "family", "secret", "island", "storm", "king", "ghost", "train", "river",
];

fn synthetic_corpus(movies: usize, len: usize) -> String {
    let mut text = String::new();
    for m in 0..movies {
        text.push_str(&format!("Movie {m}|"));
        for i in 0..len {
            let w = WORDS[(m * 31 + i * 7) % WORDS.len()];
            text.push(' ');
            text.push_str(w);
            if i % 9 == 8 { text.push(','); }
        }
        text.push_str(";\n");
    }
    text
}

fn bench_index(c: &mut Criterion) {
    let movies = parse_movies(&synthetic_corpus(2_000, 60));
    let noise = NoiseWords::parse("the a");

    c.bench_function("build_index_2000_movies", |b| {
        b.iter(|| MovieIndex::from_corpus(IndexConfig::default(), noise.clone(), &movies).unwrap())
    });

    let index = MovieIndex::from_corpus(IndexConfig::default(), noise, &movies).unwrap();
    c.bench_function("top_ten_space_pirate", |b| b.iter(|| index.top_ten("space", "pirate")));
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
