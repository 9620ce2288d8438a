//! Paginated, searchable character list.
//!
//! # Design
//! `ListController` is a sans-IO state machine. Operations that need the
//! network return a `PendingRequest`; the host executes it and feeds the
//! outcome back through `apply` with the same sequence token. Operations
//! that are rejected locally (blank search, paging past either end) return
//! `None` and never reach the client.
//!
//! The active filter (unfiltered or a search term) survives pagination:
//! paging while a search is active pages through the search results.

use serde::Serialize;

use crate::client::CatalogClient;
use crate::error::{ApiError, StoreError};
use crate::http::HttpResponse;
use crate::sequence::{PendingRequest, Sequencer};
use crate::store::{KeyValueStore, SELECTED_CHARACTER_KEY};
use crate::types::Character;

pub const BLANK_SEARCH_MESSAGE: &str = "Type something to search";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the catalog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    All,
    Search(String),
}

/// Where the host should navigate after a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub character_id: u64,
    pub path: String,
}

/// Render snapshot of the list.
#[derive(Debug, Serialize)]
pub struct ListView<'a> {
    pub state: &'a ListState,
    pub page: u32,
    pub max_pages: u32,
    pub term: &'a str,
    pub characters: &'a [Character],
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Loaded with nothing to show and no error.
    pub show_empty: bool,
}

#[derive(Debug)]
pub struct ListController {
    client: CatalogClient,
    sequencer: Sequencer,
    state: ListState,
    characters: Vec<Character>,
    page: u32,
    max_pages: u32,
    filter: Filter,
}

impl ListController {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            sequencer: Sequencer::new(),
            state: ListState::Idle,
            characters: Vec::new(),
            page: 1,
            max_pages: 1,
            filter: Filter::All,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// The active search term, empty when unfiltered.
    pub fn term(&self) -> &str {
        match &self.filter {
            Filter::All => "",
            Filter::Search(term) => term,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Load page `n` of the unfiltered collection, dropping any active
    /// search. Pages outside `1..=max_pages` are not requested.
    pub fn fetch_page(&mut self, n: u32) -> Option<PendingRequest> {
        if !self.in_bounds(n) {
            tracing::debug!(page = n, max_pages = self.max_pages, "page out of bounds, not requested");
            return None;
        }
        if self.filter != Filter::All {
            self.filter = Filter::All;
            self.max_pages = 1;
        }
        self.page = n;
        Some(self.issue())
    }

    /// Start a name search from page 1. A blank term is rejected locally and
    /// any request still in flight is dropped, so the validation message
    /// stays up.
    ///
    /// The page count is unknown until the first result page lands; paging
    /// stays closed until then.
    pub fn search(&mut self, term: &str) -> Option<PendingRequest> {
        let term = term.trim();
        if term.is_empty() {
            self.sequencer.invalidate();
            self.state = ListState::Error(BLANK_SEARCH_MESSAGE.to_string());
            return None;
        }
        self.filter = Filter::Search(term.to_string());
        self.page = 1;
        self.max_pages = 1;
        Some(self.issue())
    }

    /// Drop the search and reload the first unfiltered page. Also serves as
    /// the retry affordance after an error.
    pub fn clear(&mut self) -> PendingRequest {
        self.filter = Filter::All;
        self.page = 1;
        self.max_pages = 1;
        self.issue()
    }

    pub fn page_forward(&mut self) -> Option<PendingRequest> {
        if self.page >= self.max_pages {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    pub fn page_back(&mut self) -> Option<PendingRequest> {
        if self.page <= 1 {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    /// Feed back the outcome of a request issued by this controller.
    ///
    /// Returns `false` when `seq` is stale and the outcome was discarded.
    pub fn apply(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> bool {
        if !self.sequencer.is_current(seq) {
            tracing::debug!(seq, latest = self.sequencer.latest(), "discarding stale list response");
            return false;
        }

        match outcome.and_then(|resp| self.client.parse_character_page(resp)) {
            Ok(page) => {
                self.max_pages = page.info.pages.max(1);
                self.characters = page.results;
                self.state = ListState::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, page = self.page, term = self.term(), "character page failed");
                self.characters.clear();
                self.state = ListState::Error(match &self.filter {
                    Filter::All => UNREACHABLE_MESSAGE.to_string(),
                    Filter::Search(term) => format!("No results for \"{term}\""),
                });
            }
        }
        true
    }

    /// Hand `character` off to the detail view through the session store.
    pub fn select<S: KeyValueStore + ?Sized>(
        &self,
        character: &Character,
        session: &mut S,
    ) -> Result<Navigation, StoreError> {
        let json = serde_json::to_string(character).map_err(|e| StoreError::Serialize(e.to_string()))?;
        session.set(SELECTED_CHARACTER_KEY, &json)?;
        Ok(Navigation {
            character_id: character.id,
            path: format!("/character/{}", character.id),
        })
    }

    pub fn view(&self) -> ListView<'_> {
        let settled = !self.is_loading();
        ListView {
            state: &self.state,
            page: self.page,
            max_pages: self.max_pages,
            term: self.term(),
            characters: &self.characters,
            can_go_back: settled && self.page > 1,
            can_go_forward: settled && self.page < self.max_pages,
            show_empty: self.state == ListState::Loaded && self.characters.is_empty(),
        }
    }

    fn in_bounds(&self, n: u32) -> bool {
        n >= 1 && n <= self.max_pages
    }

    fn issue(&mut self) -> PendingRequest {
        let request = match &self.filter {
            Filter::All => self.client.build_character_page(self.page),
            Filter::Search(term) => self.client.build_search_characters(term, self.page),
        };
        let seq = self.sequencer.next();
        self.state = ListState::Loading;
        tracing::debug!(seq, url = %request.url, "issuing character page request");
        PendingRequest { seq, request }
    }
}
