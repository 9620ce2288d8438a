//! Detail view for the character handed off by the list.
//!
//! # Design
//! The detail view never fetches a character itself. It reads the one the
//! list stored in the session store; with nothing stored it stays in
//! `AwaitingCharacter` indefinitely and there is no fallback fetch by id, so
//! deep links into the detail view do not resolve.
//!
//! Episodes are resolved from the character's locators in one batched
//! request. Episode failures are logged and otherwise swallowed: the view
//! keeps whatever episodes it had and stops loading.

use serde::Serialize;

use crate::client::CatalogClient;
use crate::episode::{completion_percentage, episode_ids, sort_episodes};
use crate::error::{ApiError, StoreError};
use crate::http::HttpResponse;
use crate::sequence::{PendingRequest, Sequencer};
use crate::store::{KeyValueStore, SELECTED_CHARACTER_KEY};
use crate::theme::{Theme, ThemePreference};
use crate::types::{Character, Episode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    AwaitingCharacter,
    Ready,
}

/// Render snapshot of the detail view.
#[derive(Debug, Serialize)]
pub struct DetailView<'a> {
    pub state: DetailState,
    pub character: Option<&'a Character>,
    pub kind_label: Option<&'a str>,
    pub origin_name: Option<&'a str>,
    pub location_name: Option<&'a str>,
    pub episodes: &'a [Episode],
    pub loading_episodes: bool,
    /// Number of episode locators on the character.
    pub episode_count: usize,
    pub completion_percentage: u32,
    pub theme: Theme,
}

#[derive(Debug)]
pub struct DetailController {
    client: CatalogClient,
    sequencer: Sequencer,
    character: Option<Character>,
    episodes: Vec<Episode>,
    loading_episodes: bool,
    theme: ThemePreference,
}

impl DetailController {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            sequencer: Sequencer::new(),
            character: None,
            episodes: Vec::new(),
            loading_episodes: false,
            theme: ThemePreference::default(),
        }
    }

    pub fn state(&self) -> DetailState {
        if self.character.is_some() {
            DetailState::Ready
        } else {
            DetailState::AwaitingCharacter
        }
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn is_loading_episodes(&self) -> bool {
        self.loading_episodes
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Enter the view: load the theme, read the selected character, and
    /// return the episode batch request if there is anything to resolve.
    ///
    /// Any request still in flight from an earlier activation becomes stale.
    pub fn activate<S, P>(&mut self, session: &S, prefs: &P) -> Option<PendingRequest>
    where
        S: KeyValueStore + ?Sized,
        P: KeyValueStore + ?Sized,
    {
        self.theme = ThemePreference::load(prefs);
        self.sequencer.invalidate();
        self.episodes.clear();
        self.loading_episodes = false;
        self.character = read_selected(session);

        let character = self.character.as_ref()?;
        if character.episode.is_empty() {
            return None;
        }
        let ids = episode_ids(&character.episode);
        let request = match self.client.build_episodes_by_ids(&ids) {
            Ok(request) => request,
            Err(ApiError::EmptyIdList) => {
                tracing::debug!(character = character.id, "no resolvable episode locators");
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "could not build episode request");
                return None;
            }
        };

        let seq = self.sequencer.next();
        self.loading_episodes = true;
        tracing::debug!(seq, character = character.id, count = ids.len(), "issuing episode batch request");
        Some(PendingRequest { seq, request })
    }

    /// Feed back the outcome of the episode batch request.
    ///
    /// Returns `false` when `seq` is stale and the outcome was discarded.
    pub fn apply(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> bool {
        if !self.sequencer.is_current(seq) {
            tracing::debug!(seq, latest = self.sequencer.latest(), "discarding stale episode response");
            return false;
        }

        match outcome.and_then(|resp| self.client.parse_episodes(resp)) {
            Ok(batch) => {
                let mut episodes = batch.into_vec();
                sort_episodes(&mut episodes);
                self.episodes = episodes;
            }
            Err(e) => tracing::error!(error = %e, "loading episodes failed"),
        }
        self.loading_episodes = false;
        true
    }

    /// Share of the series the character appears in, from its locator
    /// count over a fixed 51 episodes.
    pub fn completion_percentage(&self) -> u32 {
        completion_percentage(self.episode_count())
    }

    pub fn episode_count(&self) -> usize {
        self.character.as_ref().map_or(0, |c| c.episode.len())
    }

    pub fn toggle_theme<P: KeyValueStore + ?Sized>(&mut self, prefs: &mut P) -> Result<Theme, StoreError> {
        self.theme.toggle(prefs)
    }

    pub fn view(&self) -> DetailView<'_> {
        let character = self.character.as_ref();
        DetailView {
            state: self.state(),
            character,
            kind_label: character.map(Character::kind_label),
            origin_name: character.map(Character::origin_name),
            location_name: character.map(Character::location_name),
            episodes: &self.episodes,
            loading_episodes: self.loading_episodes,
            episode_count: self.episode_count(),
            completion_percentage: self.completion_percentage(),
            theme: self.theme.theme(),
        }
    }
}

fn read_selected<S: KeyValueStore + ?Sized>(session: &S) -> Option<Character> {
    let raw = session.get(SELECTED_CHARACTER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(character) => Some(character),
        Err(e) => {
            tracing::error!(error = %e, "stored character is unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, THEME_KEY};
    use crate::types::Status;

    const BASE: &str = "http://localhost:3000/api";

    fn controller() -> DetailController {
        DetailController::new(CatalogClient::new(BASE))
    }

    fn character(locators: &[&str]) -> Character {
        Character {
            id: 2,
            name: "Morty Smith".to_string(),
            status: Status::Alive,
            species: "Human".to_string(),
            kind: String::new(),
            gender: "Male".to_string(),
            origin: None,
            location: None,
            image: String::new(),
            episode: locators.iter().map(|l| l.to_string()).collect(),
            url: String::new(),
            created: "2017-11-04T18:50:21.651Z".to_string(),
        }
    }

    fn session_with(c: &Character) -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .set(SELECTED_CHARACTER_KEY, &serde_json::to_string(c).unwrap())
            .unwrap();
        store
    }

    fn episode_json(id: u64, code: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("Episode {id}"),
            "air_date": "December 2, 2013",
            "episode": code,
            "characters": [],
            "url": "",
            "created": "2017-11-10T12:56:33.798Z",
        })
    }

    #[test]
    fn no_stored_character_stays_awaiting() {
        let mut d = controller();
        assert!(d.activate(&MemoryStore::new(), &MemoryStore::new()).is_none());
        assert_eq!(d.state(), DetailState::AwaitingCharacter);
        assert_eq!(d.completion_percentage(), 0);
    }

    #[test]
    fn corrupt_stored_character_stays_awaiting() {
        let mut session = MemoryStore::new();
        session.set(SELECTED_CHARACTER_KEY, "{not json").unwrap();
        let mut d = controller();
        assert!(d.activate(&session, &MemoryStore::new()).is_none());
        assert_eq!(d.state(), DetailState::AwaitingCharacter);
    }

    #[test]
    fn character_without_episodes_skips_loading() {
        let mut d = controller();
        let session = session_with(&character(&[]));
        assert!(d.activate(&session, &MemoryStore::new()).is_none());
        assert_eq!(d.state(), DetailState::Ready);
        assert!(!d.is_loading_episodes());
        assert_eq!(d.view().episode_count, 0);
    }

    #[test]
    fn unparseable_locators_skip_loading() {
        let mut d = controller();
        let session = session_with(&character(&["/episode/", "/episode/pilot"]));
        assert!(d.activate(&session, &MemoryStore::new()).is_none());
        assert!(!d.is_loading_episodes());
        assert!(d.episodes().is_empty());
    }

    #[test]
    fn issues_one_batched_request() {
        let mut d = controller();
        let session = session_with(&character(&["/episode/1", "/episode/3"]));
        let req = d.activate(&session, &MemoryStore::new()).unwrap();
        assert_eq!(req.request.url, format!("{BASE}/episode/1,3"));
        assert!(d.is_loading_episodes());
    }

    #[test]
    fn single_object_response_is_normalized() {
        let mut d = controller();
        let session = session_with(&character(&["/episode/7"]));
        let req = d.activate(&session, &MemoryStore::new()).unwrap();

        let body = episode_json(7, "S01E07").to_string();
        assert!(d.apply(req.seq, Ok(HttpResponse::new(200, body))));
        assert_eq!(d.episodes().len(), 1);
        assert_eq!(d.episodes()[0].id, 7);
        assert!(!d.is_loading_episodes());
    }

    #[test]
    fn episodes_are_sorted_by_number_after_e() {
        let mut d = controller();
        let session = session_with(&character(&["/episode/10", "/episode/2", "/episode/12"]));
        let req = d.activate(&session, &MemoryStore::new()).unwrap();

        let body = serde_json::json!([
            episode_json(10, "S01E10"),
            episode_json(2, "S01E02"),
            episode_json(12, "S02E01"),
        ])
        .to_string();
        d.apply(req.seq, Ok(HttpResponse::new(200, body)));

        let codes: Vec<_> = d.episodes().iter().map(|e| e.episode.as_str()).collect();
        assert_eq!(codes, vec!["S02E01", "S01E02", "S01E10"]);
    }

    #[test]
    fn failure_keeps_episodes_and_stops_loading() {
        let mut d = controller();
        let session = session_with(&character(&["/episode/1", "/episode/2"]));
        let req = d.activate(&session, &MemoryStore::new()).unwrap();
        d.apply(req.seq, Err(ApiError::Transport("timed out".into())));

        assert!(d.episodes().is_empty());
        assert!(!d.is_loading_episodes());
        assert_eq!(d.state(), DetailState::Ready);
        assert_eq!(d.episode_count(), 2);
    }

    #[test]
    fn response_from_previous_activation_is_discarded() {
        let mut d = controller();
        let first = d
            .activate(&session_with(&character(&["/episode/1"])), &MemoryStore::new())
            .unwrap();
        let second = d
            .activate(&session_with(&character(&["/episode/4"])), &MemoryStore::new())
            .unwrap();

        let stale = episode_json(1, "S01E01").to_string();
        assert!(!d.apply(first.seq, Ok(HttpResponse::new(200, stale))));
        assert!(d.is_loading_episodes());

        let fresh = episode_json(4, "S01E04").to_string();
        assert!(d.apply(second.seq, Ok(HttpResponse::new(200, fresh))));
        assert_eq!(d.episodes()[0].id, 4);
    }

    #[test]
    fn completion_counts_locators() {
        let locators: Vec<String> = (1..=26).map(|i| format!("/episode/{i}")).collect();
        let refs: Vec<&str> = locators.iter().map(String::as_str).collect();
        let mut d = controller();
        d.activate(&session_with(&character(&refs)), &MemoryStore::new());
        assert_eq!(d.completion_percentage(), 51);
    }

    #[test]
    fn theme_is_loaded_and_toggled() {
        let mut prefs = MemoryStore::new();
        let mut d = controller();
        d.activate(&MemoryStore::new(), &prefs);
        assert_eq!(d.theme(), Theme::Dark);

        assert_eq!(d.toggle_theme(&mut prefs).unwrap(), Theme::Light);
        assert_eq!(prefs.get(THEME_KEY).as_deref(), Some("light"));

        let mut reloaded = controller();
        reloaded.activate(&MemoryStore::new(), &prefs);
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn view_serializes_display_fields() {
        let mut d = controller();
        d.activate(&session_with(&character(&[])), &MemoryStore::new());
        let json = serde_json::to_value(d.view()).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["kind_label"], "N/A");
        assert_eq!(json["origin_name"], "Unknown");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["character"]["name"], "Morty Smith");
    }
}
