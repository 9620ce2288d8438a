//! Domain DTOs for the catalog API.
//!
//! # Design
//! These types mirror the remote schema field for field, so a `Character`
//! read from a page response can be written to the transient store and read
//! back by the detail view unchanged. The mock-server crate defines its own
//! copies; integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// Life status of a character. Unrecognized values read as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Alive" => Status::Alive,
            "Dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

/// A named reference to a location resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character as returned by the character endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: Status,
    pub species: String,
    /// Subtype; the API calls this field `type` and often leaves it empty.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    #[serde(default)]
    pub origin: Option<LocationRef>,
    #[serde(default)]
    pub location: Option<LocationRef>,
    pub image: String,
    /// Episode locators, each ending in the episode's numeric id.
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: String,
}

impl Character {
    /// Subtype for display, `"N/A"` when the API leaves it blank.
    pub fn kind_label(&self) -> &str {
        if self.kind.is_empty() {
            "N/A"
        } else {
            &self.kind
        }
    }

    pub fn origin_name(&self) -> &str {
        named_or_unknown(self.origin.as_ref())
    }

    pub fn location_name(&self) -> &str {
        named_or_unknown(self.location.as_ref())
    }
}

fn named_or_unknown(r: Option<&LocationRef>) -> &str {
    match r {
        Some(r) if !r.name.is_empty() => &r.name,
        _ => "Unknown",
    }
}

/// An episode as returned by the episode endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub air_date: String,
    /// Episode code of the form `S01E07`.
    pub episode: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: String,
}

/// Pagination metadata attached to every collection response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// The episode endpoint answers with a bare object when exactly one id is
/// requested and with an array otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
