//! Display theme preference.

use std::fmt::Display;

use tracing::warn;

use super::KeyValueStore;

/// The key under which the theme preference is stored.
pub const THEME_KEY: &str = "rps_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl Theme {
    /// Reads the saved theme. Anything other than `dark` is [`Theme::Light`].
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(raw)) if raw.trim() == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                warn!(%err, "failed to read theme");
                Theme::Light
            }
        }
    }

    /// Saves the theme. Failures are logged, not returned.
    pub fn save(self, store: &mut dyn KeyValueStore) {
        if let Err(err) = store.set(THEME_KEY, &self.to_string()) {
            warn!(%err, "failed to save theme");
        }
    }

    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
