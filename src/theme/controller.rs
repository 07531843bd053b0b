use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::store::{KeyValueStore, StoreError};
use crate::theme::{SystemPreference, Theme, ThemeMode};

/// Store key holding the persisted mode
pub const THEME_KEY: &str = "theme";

/// Tracks the active light/dark mode, persists it on toggle and resolves the
/// palette to render with.
#[derive(Debug)]
pub struct ThemeController<S: KeyValueStore> {
    store: S,
    mode: ThemeMode,
    dark: Theme,
    light: Theme,
    custom_themes: HashMap<String, Theme>,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Resolve the initial mode: the persisted value if present, otherwise the
    /// system preference, otherwise dark.
    ///
    /// A stored value that is neither `light` nor `dark` resolves to dark. It is
    /// not kept as a lookup key for custom themes, and it is not treated as light.
    pub fn load(store: S, preference: &dyn SystemPreference) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                None
            }
        };

        let mode = match stored {
            Some(value) => value.parse::<ThemeMode>().unwrap_or_else(|e: String| {
                warn!("{}, falling back to dark", e);
                ThemeMode::Dark
            }),
            None => {
                let system = preference.color_scheme();
                debug!(?system, "No stored theme, using system preference");
                system.unwrap_or_default()
            }
        };

        Self {
            store,
            mode,
            dark: Theme::dark(),
            light: Theme::light(),
            custom_themes: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark and persist the new mode
    pub fn toggle(&mut self) -> Result<ThemeMode, StoreError> {
        let next = self.mode.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.mode = next;
        info!(mode = %next, "Theme mode changed");
        Ok(next)
    }

    /// Register a palette that replaces the built-in one when `name` matches
    /// the active mode. Registering the same name again replaces it.
    pub fn add_custom_theme(&mut self, name: impl Into<String>, theme: Theme) {
        let name = name.into();
        debug!(name = %name, "Registered custom theme");
        self.custom_themes.insert(name, theme);
    }

    /// Palette for the active mode
    pub fn current_theme(&self) -> &Theme {
        if let Some(theme) = self.custom_themes.get(self.mode.as_str()) {
            return theme;
        }
        match self.mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    /// Names of all registered custom themes
    pub fn custom_theme_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.custom_themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
