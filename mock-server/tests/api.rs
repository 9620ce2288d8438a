use std::sync::Arc;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, CharacterPage, Dataset, Episode, PAGE_SIZE};
use tower::ServiceExt;

const BASE: &str = "http://localhost:3000/api";

fn router() -> axum::Router {
    app(Arc::new(Dataset::generate(BASE, 45)))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn get(uri: &str) -> axum::response::Response {
    router()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap()
}

// --- characters ---

#[tokio::test]
async fn first_page_is_full() {
    let resp = get("/api/character?page=1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page: CharacterPage = body_json(resp).await;
    assert_eq!(page.info.count, 45);
    assert_eq!(page.info.pages, 3);
    assert_eq!(page.results.len(), PAGE_SIZE);
    assert_eq!(page.results[0].id, 1);
    assert!(page.info.prev.is_none());
    assert_eq!(
        page.info.next.as_deref(),
        Some("http://localhost:3000/api/character?page=2")
    );
}

#[tokio::test]
async fn missing_page_defaults_to_first() {
    let resp = get("/api/character").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: CharacterPage = body_json(resp).await;
    assert_eq!(page.results[0].id, 1);
}

#[tokio::test]
async fn page_past_end_returns_404() {
    let resp = get("/api/character?page=4").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "There is nothing here");
}

#[tokio::test]
async fn every_page_respects_page_size() {
    for n in 1..=3 {
        let page: CharacterPage = body_json(get(&format!("/api/character?page={n}")).await).await;
        assert!(page.results.len() <= PAGE_SIZE);
        assert!(page.info.pages >= 1);
    }
}

#[tokio::test]
async fn search_matches_name_substring() {
    let resp = get("/api/character?name=morty&page=1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: CharacterPage = body_json(resp).await;
    assert!(!page.results.is_empty());
    assert!(page.results.iter().all(|c| c.name.starts_with("Morty")));
}

#[tokio::test]
async fn search_with_encoded_space() {
    let resp = get("/api/character?name=Rick%20Sanchez&page=1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: CharacterPage = body_json(resp).await;
    assert!(page.results.iter().all(|c| c.name == "Rick Sanchez"));
}

#[tokio::test]
async fn search_without_match_returns_404() {
    let resp = get("/api/character?name=nobody&page=1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- episodes ---

#[tokio::test]
async fn single_episode_is_an_object() {
    let resp = get("/api/episode/7").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body.is_object());
    assert_eq!(body["episode"], "S01E07");
}

#[tokio::test]
async fn multiple_episodes_are_an_array() {
    let resp = get("/api/episode/1,3").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let episodes: Vec<Episode> = body_json(resp).await;
    let ids: Vec<_> = episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn unknown_ids_are_skipped_in_batches() {
    let resp = get("/api/episode/2,99").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let episodes: Vec<Episode> = body_json(resp).await;
    assert_eq!(episodes.len(), 1);
}

#[tokio::test]
async fn unknown_single_episode_returns_404() {
    let resp = get("/api/episode/99").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_episode_id_returns_400() {
    let resp = get("/api/episode/pilot").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!body_bytes(resp).await.is_empty());
}

// --- cross references ---

#[tokio::test]
async fn episode_cast_links_back_to_characters() {
    use tower::Service;

    let mut app = router().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri("/api/character?page=1").body(String::new()).unwrap())
        .await
        .unwrap();
    let page: CharacterPage = body_json(resp).await;
    let morty = &page.results[1];
    let first_locator = morty.episode[0].clone();
    let id = first_locator.rsplit('/').next().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri(format!("/api/episode/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let episode: Episode = body_json(resp).await;
    assert_eq!(episode.url, first_locator);
    assert!(episode.characters.contains(&morty.url));
}
