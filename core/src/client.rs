//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each read operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the round-trip in between, so the core
//! stays deterministic and free of I/O dependencies. There are no retries,
//! timeouts or caches at this layer.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Character, Episode, OneOrMany, Page};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_character_page(&self, page: u32) -> HttpRequest {
        get(format!("{}/character?page={page}", self.base_url))
    }

    /// The name is percent-encoded; blank names must be filtered by the
    /// caller beforehand.
    pub fn build_search_characters(&self, name: &str, page: u32) -> HttpRequest {
        get(format!(
            "{}/character?name={}&page={page}",
            self.base_url,
            urlencoding::encode(name)
        ))
    }

    /// One batched request for every id, joined with commas.
    pub fn build_episodes_by_ids(&self, ids: &[u64]) -> Result<HttpRequest, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::EmptyIdList);
        }
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Ok(get(format!("{}/episode/{joined}", self.base_url)))
    }

    /// Fetch a single episode by its full locator, as embedded in a
    /// character's `episode` list.
    pub fn build_episode_by_url(&self, url: &str) -> HttpRequest {
        get(url.to_string())
    }

    pub fn parse_character_page(&self, response: HttpResponse) -> Result<Page<Character>, ApiError> {
        decode(response)
    }

    /// Parses the episode batch response without normalizing it; callers
    /// decide what to do with the single-object form.
    pub fn parse_episodes(&self, response: HttpResponse) -> Result<OneOrMany<Episode>, ApiError> {
        decode(response)
    }

    pub fn parse_episode(&self, response: HttpResponse) -> Result<Episode, ApiError> {
        decode(response)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
