//! Light/dark theme flag persisted in the durable store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value. Anything but `"light"` and `"dark"` is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current theme, read from and written back to a durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePreference {
    theme: Theme,
}

impl ThemePreference {
    /// Dark unless the store holds `"light"`.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flip the theme and persist it. The in-memory flag only changes once
    /// the write succeeds.
    pub fn toggle<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        tracing::debug!(theme = %next, "theme toggled");
        Ok(next)
    }
}
