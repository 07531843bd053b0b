use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// Complete color scheme for the application shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub splash: SplashColors,
    pub layout: LayoutColors,
    pub sidebar: SidebarColors,
    pub search: SearchColors,
    pub options: OptionsColors,
    pub common: CommonColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplashColors {
    pub bg: Color,
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub logo_fill: Color,
    pub progress_bg: Color,
    pub progress_fill: Color,
    pub title_color: Color,
    pub subtitle_color: Color,
    pub icon_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutColors {
    pub bg: Color,
    pub content_shadow: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarColors {
    pub border: Color,
    pub icon: Color,
    pub header_bg: Color,
    pub contact_container_bg: Color,
    pub contact: Color,
    pub contact_icon: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchColors {
    pub icon: Color,
    pub text: Color,
    pub container: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsColors {
    pub bg: Color,
    pub shadow: Color,
    pub hover: Color,
    pub text: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonColors {
    pub container: Color,
    pub title: Color,
    pub subtitle: Color,
    pub read_tick: Color,
    pub notification_bg: Color,
    pub info_alert_bg: Color,
}

impl Theme {
    /// Built-in dark scheme
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            splash: SplashColors {
                bg: Color::Rgb(17, 27, 33),
                gradient_start: Color::Rgb(17, 27, 33),
                gradient_end: Color::Rgb(32, 44, 51),
                logo_fill: Color::Rgb(103, 118, 125),
                progress_bg: Color::Rgb(36, 49, 56),
                progress_fill: Color::Rgb(0, 168, 132),
                title_color: Color::Rgb(233, 237, 239),
                subtitle_color: Color::Rgb(134, 150, 160),
                icon_color: Color::Rgb(134, 150, 160),
            },
            layout: LayoutColors {
                bg: Color::Rgb(12, 19, 23),
                content_shadow: Color::Rgb(0, 0, 0),
            },
            sidebar: SidebarColors {
                border: Color::Rgb(47, 59, 67),
                icon: Color::Rgb(174, 186, 193),
                header_bg: Color::Rgb(32, 44, 51),
                contact_container_bg: Color::Rgb(17, 27, 33),
                contact: Color::Rgb(233, 237, 239),
                contact_icon: Color::Rgb(134, 150, 160),
            },
            search: SearchColors {
                icon: Color::Rgb(134, 150, 160),
                text: Color::Rgb(209, 215, 219),
                container: Color::Rgb(32, 44, 51),
            },
            options: OptionsColors {
                bg: Color::Rgb(35, 45, 54),
                shadow: Color::Rgb(11, 20, 26),
                hover: Color::Rgb(17, 27, 33),
                text: Color::Rgb(209, 215, 219),
            },
            common: CommonColors {
                container: Color::Rgb(17, 27, 33),
                title: Color::Rgb(233, 237, 239),
                subtitle: Color::Rgb(134, 150, 160),
                read_tick: Color::Rgb(83, 189, 235),
                notification_bg: Color::Rgb(0, 168, 132),
                info_alert_bg: Color::Rgb(24, 34, 41),
            },
        }
    }

    /// Built-in light scheme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            splash: SplashColors {
                bg: Color::Rgb(240, 242, 245),
                gradient_start: Color::Rgb(240, 242, 245),
                gradient_end: Color::Rgb(255, 255, 255),
                logo_fill: Color::Rgb(187, 197, 203),
                progress_bg: Color::Rgb(225, 233, 235),
                progress_fill: Color::Rgb(0, 218, 96),
                title_color: Color::Rgb(65, 82, 91),
                subtitle_color: Color::Rgb(102, 119, 129),
                icon_color: Color::Rgb(140, 150, 157),
            },
            layout: LayoutColors {
                bg: Color::Rgb(218, 221, 225),
                content_shadow: Color::Rgb(180, 180, 180),
            },
            sidebar: SidebarColors {
                border: Color::Rgb(233, 237, 239),
                icon: Color::Rgb(84, 101, 111),
                header_bg: Color::Rgb(240, 242, 245),
                contact_container_bg: Color::Rgb(255, 255, 255),
                contact: Color::Rgb(17, 27, 33),
                contact_icon: Color::Rgb(102, 119, 129),
            },
            search: SearchColors {
                icon: Color::Rgb(84, 101, 111),
                text: Color::Rgb(59, 74, 84),
                container: Color::Rgb(240, 242, 245),
            },
            options: OptionsColors {
                bg: Color::Rgb(255, 255, 255),
                shadow: Color::Rgb(200, 200, 200),
                hover: Color::Rgb(245, 246, 246),
                text: Color::Rgb(59, 74, 84),
            },
            common: CommonColors {
                container: Color::Rgb(255, 255, 255),
                title: Color::Rgb(17, 27, 33),
                subtitle: Color::Rgb(102, 119, 129),
                read_tick: Color::Rgb(83, 189, 235),
                notification_bg: Color::Rgb(37, 211, 102),
                info_alert_bg: Color::Rgb(255, 243, 196),
            },
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Rename a copy of this theme, for registering as a custom theme
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
