use splashload::store::{FileStore, KeyValueStore, MemoryStore};
use splashload::theme::{FixedPreference, Theme, ThemeController, ThemeMode, THEME_KEY};
use tempfile::TempDir;

#[test]
fn test_theme_creation() {
    let dark_theme = Theme::dark();
    assert_eq!(dark_theme.name, "dark");

    let light_theme = Theme::light();
    assert_eq!(light_theme.name, "light");

    // Default is dark
    assert_eq!(Theme::default(), dark_theme);
}

#[test]
fn test_system_preference_used_when_nothing_stored() {
    let controller = ThemeController::load(MemoryStore::new(), &FixedPreference(Some(ThemeMode::Light)));
    assert_eq!(controller.mode(), ThemeMode::Light);
    assert_eq!(controller.current_theme().name, "light");

    // Nothing is written until the user toggles
    assert!(controller.store().is_empty());
}

#[test]
fn test_dark_when_no_hint_available() {
    let controller = ThemeController::load(MemoryStore::new(), &FixedPreference(None));
    assert_eq!(controller.mode(), ThemeMode::Dark);
}

#[test]
fn test_toggle_writes_every_time() {
    let mut controller = ThemeController::load(MemoryStore::new(), &FixedPreference(Some(ThemeMode::Dark)));

    assert_eq!(controller.toggle().unwrap(), ThemeMode::Light);
    assert_eq!(controller.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));

    assert_eq!(controller.toggle().unwrap(), ThemeMode::Dark);
    assert_eq!(controller.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_theme_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.toml");

    let store = FileStore::open(&path).unwrap();
    let mut controller = ThemeController::load(store, &FixedPreference(Some(ThemeMode::Dark)));
    controller.toggle().unwrap();
    drop(controller);

    // A fresh session ignores the system preference once a mode is stored
    let store = FileStore::open(&path).unwrap();
    let controller = ThemeController::load(store, &FixedPreference(Some(ThemeMode::Dark)));
    assert_eq!(controller.mode(), ThemeMode::Light);
}

#[test]
fn test_custom_themes() {
    let mut controller = ThemeController::load(MemoryStore::new(), &FixedPreference(None));

    let mut custom = Theme::dark().named("oled");
    custom.splash.bg = ratatui::style::Color::Black;
    controller.add_custom_theme("dark", custom.clone());
    assert_eq!(controller.current_theme(), &custom);

    // Later registrations replace earlier ones
    let replacement = Theme::dark().named("dim");
    controller.add_custom_theme("dark", replacement.clone());
    assert_eq!(controller.current_theme().name, "dim");

    // Custom themes for unrelated names never apply
    controller.add_custom_theme("sepia", Theme::light());
    assert_eq!(controller.custom_theme_names(), vec!["dark", "sepia"]);
    assert_eq!(controller.current_theme(), &replacement);
}
