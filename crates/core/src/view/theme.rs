use crate::storage::KvStore;
use anyhow::Context;

/// Fixed preference key, shared with anything else reading the same store.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button: offers the opposite theme.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "fa-moon",
            Theme::Dark => "fa-sun",
        }
    }
}

/// Reads the stored theme. Missing, unreadable or unknown values fall back to light.
pub fn load_theme(store: &dyn KvStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
            tracing::warn!(%value, "unknown stored theme; using light");
            Theme::Light
        }),
        Ok(None) => Theme::Light,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read theme preference");
            Theme::Light
        }
    }
}

pub fn save_theme(store: &dyn KvStore, theme: Theme) -> anyhow::Result<()> {
    store
        .set(THEME_KEY, theme.as_str())
        .context("failed to persist theme preference")
}
