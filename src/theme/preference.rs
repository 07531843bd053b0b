use crate::theme::ThemeMode;

/// Source of the operating system's preferred color scheme
pub trait SystemPreference {
    /// `None` when the platform gives no hint
    fn color_scheme(&self) -> Option<ThemeMode>;
}

/// Reads the `COLORFGBG` convention set by many terminal emulators
/// (`"<fg>;<bg>"`, where background indices 7 and 15 are light).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPreference;

impl EnvPreference {
    pub fn parse(value: &str) -> Option<ThemeMode> {
        let background = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
        match background {
            7 | 15 => Some(ThemeMode::Light),
            0..=6 | 8 => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

impl SystemPreference for EnvPreference {
    fn color_scheme(&self) -> Option<ThemeMode> {
        std::env::var("COLORFGBG").ok().as_deref().and_then(Self::parse)
    }
}

/// Fixed answer, for tests and for overriding detection
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPreference(pub Option<ThemeMode>);

impl SystemPreference for FixedPreference {
    fn color_scheme(&self) -> Option<ThemeMode> {
        self.0
    }
}
