//! Headless client core for the character catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the two views of
//! the catalog on top of that: a paginated, searchable character list and a
//! character detail view with its episodes.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only `base_url`.
//! - `ListController` and `DetailController` are sans-IO state machines.
//!   They hand the host a `PendingRequest` tagged with a sequence token and
//!   accept the outcome back through `apply`; outcomes for any token but the
//!   latest are dropped.
//! - Storage is an injected `KeyValueStore` capability: a session-scoped store
//!   carries the selected character from list to detail, a durable one keeps
//!   the theme preference.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod detail;
pub mod episode;
pub mod error;
pub mod http;
pub mod list;
pub mod sequence;
pub mod store;
pub mod theme;
pub mod types;

pub use client::CatalogClient;
pub use config::PortalConfig;
pub use detail::{DetailController, DetailState, DetailView};
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ListController, ListState, ListView, Navigation};
pub use sequence::PendingRequest;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{Theme, ThemePreference};
pub use types::{Character, Episode, LocationRef, OneOrMany, Page, PageInfo, Status};
