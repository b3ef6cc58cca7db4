use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use rumdb_core::config::{DEFAULT_LOAD_FACTOR_THRESHOLD, DEFAULT_TABLE_SIZE, DEFAULT_TOP_K};
use rumdb_core::tokenizer::normalize_query;
use rumdb_core::{build_index, IndexConfig, MovieIndex};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "rumdb")]
#[command(about = "Index movie descriptions and run two-word proximity searches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Movie file, or a directory of .txt movie files
    #[arg(long)]
    movies: String,
    /// Noise word file (whitespace separated)
    #[arg(long)]
    noise: String,
    /// Initial number of hash buckets
    #[arg(long, default_value_t = DEFAULT_TABLE_SIZE)]
    table_size: usize,
    /// Load factor that triggers a rehash
    #[arg(long, default_value_t = DEFAULT_LOAD_FACTOR_THRESHOLD)]
    threshold: f64,
}

impl CorpusArgs {
    fn build(&self) -> Result<MovieIndex> {
        build_index(&self.movies, &self.noise, IndexConfig::new(self.table_size, self.threshold))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the movies where two words appear closest together
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// First word
        word_a: String,
        /// Second word
        word_b: String,
        /// Number of movies to return
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print every bucket and its chain
    Dump {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Print table size, word count and load factor
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Serialize)]
struct Stats {
    size: usize,
    word_count: usize,
    load_factor: f64,
    threshold: f64,
    noise_words: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, word_a, word_b, k, json } => search(&corpus, &word_a, &word_b, k, json),
        Commands::Dump { corpus } => {
            let index = corpus.build()?;
            print!("{}", index.dump());
            Ok(())
        }
        Commands::Stats { corpus } => {
            let index = corpus.build()?;
            let stats = Stats {
                size: index.size(),
                word_count: index.word_count(),
                load_factor: index.load_factor(),
                threshold: index.threshold(),
                noise_words: index.noise_words().len(),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

fn search(corpus: &CorpusArgs, word_a: &str, word_b: &str, k: usize, json: bool) -> Result<()> {
    let (a, b) = (normalize_query(word_a), normalize_query(word_b));
    if a.is_empty() || b.is_empty() {
        bail!("query words must contain at least one letter or digit");
    }
    let index = corpus.build()?;
    let hits = index.top_k(&a, &b, k);
    tracing::info!(word_a = %a, word_b = %b, hits = hits.len(), "search complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("no movie mentions both \"{a}\" and \"{b}\"");
    }
    for (rank, hit) in hits.iter().enumerate() {
        let distance = hit.min_distance.unwrap_or_default();
        println!("{:>2}. {} (distance {distance}; {a} at {:?}, {b} at {:?})", rank + 1, hit.title, hit.positions_a, hit.positions_b);
    }
    Ok(())
}
