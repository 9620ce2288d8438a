//! Local stand-in for the remote catalog API.
//!
//! Serves the two read endpoints the portal consumes, with the same quirks
//! as the real service: empty searches and out-of-range pages answer 404,
//! and the episode endpoint returns a bare object for one id and an array
//! for a comma-separated list.

pub mod config;
pub mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use fixtures::{Character, CharacterPage, Dataset, Episode, PAGE_SIZE};

pub type Db = Arc<Dataset>;

#[derive(Debug, Deserialize)]
pub struct CharacterQuery {
    pub page: Option<String>,
    pub name: Option<String>,
}

pub fn app(db: Db) -> Router {
    Router::new()
        .route("/api/character", get(list_characters))
        .route("/api/episode/{ids}", get(episodes_by_ids))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

/// Serve a generated dataset on `listener`, with locators pointing back at
/// the listener's own address.
pub async fn run(listener: TcpListener, character_count: usize) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    let db = Arc::new(Dataset::generate(&format!("http://{addr}/api"), character_count));
    tracing::info!(%addr, characters = character_count, "mock catalog ready");
    axum::serve(listener, app(db)).await
}

fn nothing_here(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": message }))).into_response()
}

async fn list_characters(State(db): State<Db>, Query(query): Query<CharacterQuery>) -> Response {
    // The real API treats a missing or malformed page as page 1.
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);
    let name = query.name.as_deref().filter(|n| !n.is_empty());

    match db.character_page(name, page) {
        Some(result) => Json(result).into_response(),
        None => nothing_here("There is nothing here"),
    }
}

async fn episodes_by_ids(State(db): State<Db>, Path(ids): Path<String>) -> Response {
    let parsed: Result<Vec<u64>, _> = ids
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<u64>)
        .collect();
    let parsed = match parsed {
        Ok(parsed) if !parsed.is_empty() => parsed,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "Hey! you must provide an id" })),
            )
                .into_response()
        }
    };

    if !ids.contains(',') {
        return match db.episode(parsed[0]) {
            Some(episode) => Json(episode.clone()).into_response(),
            None => nothing_here("Episode not found"),
        };
    }

    let found: Vec<Episode> = parsed.iter().filter_map(|id| db.episode(*id).cloned()).collect();
    Json(found).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_query_fields_are_optional() {
        let q: CharacterQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert!(q.page.is_none());
        assert!(q.name.is_none());
    }

    #[test]
    fn character_serializes_type_field() {
        let db = Dataset::generate("http://localhost:3000/api", 6);
        let json = serde_json::to_value(&db.characters()[5]).unwrap();
        assert_eq!(json["type"], "Parasite");
        assert!(json.get("kind").is_none());
    }
}
