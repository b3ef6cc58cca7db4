use anyhow::Result;
use axum::{extract::{Query, State}, http::StatusCode, routing::get, Json, Router};
use rumdb_core::config::{DEFAULT_TOP_K, MAX_TOP_K};
use rumdb_core::tokenizer::normalize_query;
use rumdb_core::{build_index, IndexConfig, MovieIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub a: String,
    pub b: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub word_a: String,
    pub word_b: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub title: String,
    pub distance: usize,
    pub positions_a: Vec<usize>,
    pub positions_b: Vec<usize>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub size: usize,
    pub word_count: usize,
    pub load_factor: f64,
    pub threshold: f64,
}

/// The index is fully built before the router exists and is only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<MovieIndex>,
}

pub fn build_app(movies: &str, noise: &str, config: IndexConfig) -> Result<Router> {
    let index = build_index(movies, noise, config)?;
    Ok(router(index))
}

pub fn router(index: MovieIndex) -> Router {
    let app_state = AppState { index: Arc::new(index) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/dump", get(dump_handler))
        .route("/stats", get(stats_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let word_a = normalize_query(&params.a);
    let word_b = normalize_query(&params.b);
    if word_a.is_empty() || word_b.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "both query words are required".into()));
    }

    let k = params.k.max(1).min(MAX_TOP_K);
    let ranking = state.index.rank(&word_a, &word_b, k);
    let total_hits = ranking.total_hits;
    let results = ranking
        .hits
        .into_iter()
        .filter_map(|r| {
            Some(SearchHit { distance: r.min_distance?, title: r.title, positions_a: r.positions_a, positions_b: r.positions_b })
        })
        .collect();

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { word_a, word_b, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn dump_handler(State(state): State<AppState>) -> String {
    state.index.dump()
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let ix = &state.index;
    Json(StatsResponse { size: ix.size(), word_count: ix.word_count(), load_factor: ix.load_factor(), threshold: ix.threshold() })
}
