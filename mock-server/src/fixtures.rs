//! Deterministic stand-in for the public catalog dataset.
//!
//! Everything is derived from the character id, so two datasets generated
//! with the same arguments are identical and tests can predict search hits,
//! page counts and episode membership.

use serde::{Deserialize, Serialize};

/// Results per page, fixed by the remote API.
pub const PAGE_SIZE: usize = 20;

/// Episodes per season; the series totals 51.
const SEASONS: [u32; 5] = [11, 10, 10, 10, 10];

const FIRST_NAMES: [&str; 10] = [
    "Rick", "Morty", "Summer", "Beth", "Jerry", "Squanchy", "Birdperson", "Unity", "Abradolf", "Tammy",
];
const LAST_NAMES: [&str; 5] = ["Sanchez", "Smith", "Lincler", "Person", "Gueterman"];
const SPECIES: [&str; 4] = ["Human", "Alien", "Humanoid", "Robot"];
const GENDERS: [&str; 3] = ["Male", "Female", "unknown"];
const STATUSES: [&str; 3] = ["Alive", "Dead", "unknown"];
const PLACES: [&str; 4] = ["Earth (C-137)", "Citadel of Ricks", "Bird World", "Gazorpazorp"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: Location,
    pub location: Location,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub air_date: String,
    pub episode: String,
    pub characters: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Info {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: Info,
    pub results: Vec<Character>,
}

/// The full, immutable dataset served by the mock.
#[derive(Debug)]
pub struct Dataset {
    base_url: String,
    characters: Vec<Character>,
    episodes: Vec<Episode>,
}

impl Dataset {
    /// Build `character_count` characters and the 51 episodes, with every
    /// locator rooted at `base_url` (e.g. `http://127.0.0.1:3000/api`).
    pub fn generate(base_url: &str, character_count: usize) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let total_episodes: u64 = SEASONS.iter().map(|n| u64::from(*n)).sum();

        let characters: Vec<Character> = (1..=character_count as u64)
            .map(|id| character(&base_url, id, total_episodes))
            .collect();

        let mut episodes = Vec::with_capacity(total_episodes as usize);
        let mut id = 0u64;
        for (season, count) in SEASONS.iter().enumerate() {
            for number in 1..=*count {
                id += 1;
                let episode_url = format!("{base_url}/episode/{id}");
                let cast = characters
                    .iter()
                    .filter(|c| c.episode.contains(&episode_url))
                    .map(|c| c.url.clone())
                    .collect();
                episodes.push(Episode {
                    id,
                    name: if id == 1 { "Pilot".to_string() } else { format!("Episode {id}") },
                    air_date: format!("{} {}, {}", month(id), (id % 28) + 1, 2013 + season as u64 * 2),
                    episode: format!("S{:02}E{:02}", season + 1, number),
                    characters: cast,
                    url: episode_url,
                    created: "2017-11-10T12:56:33.798Z".to_string(),
                });
            }
        }

        Self {
            base_url,
            characters,
            episodes,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn episode(&self, id: u64) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// One page of characters, optionally filtered by a case-insensitive
    /// name substring. `None` when the filter matches nothing or the page is
    /// out of range.
    pub fn character_page(&self, name: Option<&str>, page: usize) -> Option<CharacterPage> {
        let needle = name.map(str::to_lowercase);
        let matches: Vec<&Character> = self
            .characters
            .iter()
            .filter(|c| match &needle {
                Some(n) => c.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .collect();

        let pages = matches.len().div_ceil(PAGE_SIZE);
        if page == 0 || page > pages {
            return None;
        }

        let link = |p: usize| match name {
            Some(n) => format!("{}/character?page={p}&name={n}", self.base_url),
            None => format!("{}/character?page={p}", self.base_url),
        };
        let results = matches
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|c| (*c).clone())
            .collect();

        Some(CharacterPage {
            info: Info {
                count: matches.len(),
                pages,
                next: (page < pages).then(|| link(page + 1)),
                prev: (page > 1).then(|| link(page - 1)),
            },
            results,
        })
    }
}

fn character(base_url: &str, id: u64, total_episodes: u64) -> Character {
    let i = (id - 1) as usize;
    let place = |offset: usize| {
        let n = (i + offset) % PLACES.len();
        Location {
            name: PLACES[n].to_string(),
            url: format!("{base_url}/location/{}", n + 1),
        }
    };
    Character {
        id,
        name: format!("{} {}", FIRST_NAMES[i % FIRST_NAMES.len()], LAST_NAMES[i % LAST_NAMES.len()]),
        status: STATUSES[i % STATUSES.len()].to_string(),
        species: SPECIES[i % SPECIES.len()].to_string(),
        kind: if i % 6 == 5 { "Parasite".to_string() } else { String::new() },
        gender: GENDERS[i % GENDERS.len()].to_string(),
        origin: place(0),
        location: place(1),
        image: format!("{base_url}/character/avatar/{id}.jpeg"),
        episode: appearances(id, total_episodes)
            .map(|e| format!("{base_url}/episode/{e}"))
            .collect(),
        url: format!("{base_url}/character/{id}"),
        created: "2017-11-04T18:48:46.250Z".to_string(),
    }
}

/// Episode ids a character appears in. Character 1 is in every episode; the
/// rest appear in every `stride`-th episode.
fn appearances(id: u64, total_episodes: u64) -> impl Iterator<Item = u64> {
    let stride = if id == 1 { 1 } else { id % 7 + 2 };
    (1..=total_episodes).filter(move |e| e % stride == 0 || *e == (id % total_episodes) + 1)
}

fn month(id: u64) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    MONTHS[(id % 12) as usize]
}
