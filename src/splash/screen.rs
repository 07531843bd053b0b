use crate::progress::{LoadingStatus, ProgressSnapshot};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

const LOGO: [&str; 3] = ["╭──────╮", "│ ◉  ◉ │", "╰──────╯"];

/// Full-screen splash shown while the application loads
pub struct SplashScreen {
    title: String,
    subtitle: String,
    show_hints: bool,
}

impl SplashScreen {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            show_hints: true,
        }
    }

    /// Toggle the key hint footer
    pub fn toggle_hints(&mut self) {
        self.show_hints = !self.show_hints;
    }

    pub fn shows_hints(&self) -> bool {
        self.show_hints
    }

    /// Render the splash screen
    pub fn render(&self, frame: &mut Frame, area: Rect, snapshot: &ProgressSnapshot, theme: &Theme) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(theme.splash.bg)), area);

        let content_area = centered(area, 48, 14);
        let container = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.splash.gradient_end))
            .style(Style::default().bg(theme.splash.gradient_start));
        let inner = container.inner(content_area);
        frame.render_widget(container, content_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Logo
                Constraint::Length(1), // Title
                Constraint::Length(1), // Subtitle
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Progress bar
                Constraint::Length(1), // Status
                Constraint::Min(0),    // Hints
            ])
            .split(inner.inner(&Margin {
                vertical: 1,
                horizontal: 2,
            }));

        let logo: Vec<Line> = LOGO
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(theme.splash.logo_fill))))
            .collect();
        frame.render_widget(Paragraph::new(logo).alignment(Alignment::Center), chunks[0]);

        let title = Paragraph::new(self.title.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.splash.title_color)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(title, chunks[1]);

        let subtitle = Paragraph::new(self.subtitle.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.splash.subtitle_color));
        frame.render_widget(subtitle, chunks[2]);

        self.render_progress(frame, chunks[4], snapshot, theme);

        let status = Paragraph::new(status_line(snapshot))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.splash.icon_color));
        frame.render_widget(status, chunks[5]);

        if self.show_hints {
            let hints = Paragraph::new(hint_line(snapshot.status))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.splash.subtitle_color));
            frame.render_widget(hints, chunks[6]);
        }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, snapshot: &ProgressSnapshot, theme: &Theme) {
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(theme.splash.progress_fill)
                    .bg(theme.splash.progress_bg),
            )
            .ratio(snapshot.ratio())
            .label(format!("{}%", snapshot.progress));

        frame.render_widget(gauge, area);
    }
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self::new("splashload", "Preparing your workspace")
    }
}

/// Status text shown under the progress bar
pub fn status_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "{} {} · {}%",
        snapshot.status.status_icon(),
        snapshot.status.description(),
        snapshot.progress
    )
}

fn hint_line(status: LoadingStatus) -> &'static str {
    match status {
        LoadingStatus::Idle => "s start · t theme · q quit",
        LoadingStatus::Loading => "p pause · +/- threshold · t theme · q quit",
        LoadingStatus::Paused => "r resume · d done · +/- threshold · t theme · q quit",
        LoadingStatus::Completed => "q quit",
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
