use anyhow::Result;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use raag_core::catalog::Catalog;
use raag_core::recommend::{RecommendStatus, Recommendation, Recommender, DEFAULT_K};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    DEFAULT_K
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub took_s: f64,
    pub total: usize,
    pub items: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RecommendStatus>,
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// Load the catalog CSV, build the recommender, and assemble the router.
/// The catalog and index are built once here and read-only afterwards.
pub fn build_app(catalog_path: &str) -> Result<Router> {
    let catalog = Catalog::load_csv(catalog_path)?;
    tracing::info!(catalog_path, num_items = catalog.len(), "catalog loaded");
    let recommender = Arc::new(Recommender::new(catalog));
    let state = AppState { recommender };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Json<RecommendResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, 100);
    let outcome = state.recommender.recommend(&params.q, k);
    let took_s = start.elapsed().as_secs_f64();
    Json(RecommendResponse {
        query: params.q,
        took_s,
        total: outcome.items.len(),
        items: outcome.items,
        hint: outcome.hint,
        error: outcome.error,
    })
}
