use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::watch;
use tokio::time::{Duration, Instant};
use tracing::{info, warn};

use crate::progress::{LoadingStatus, ProgressController, ProgressSnapshot, MAX_PROGRESS};
use crate::splash::SplashScreen;
use crate::store::KeyValueStore;
use crate::theme::ThemeController;

/// How long the finished splash stays on screen before the app exits
const COMPLETED_LINGER: Duration = Duration::from_millis(800);

/// Interval between input polls while the splash is visible
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Splash screen application: wires the progress controller, the theme
/// controller and the terminal together.
pub struct SplashApp<S: KeyValueStore> {
    controller: ProgressController,
    themes: ThemeController<S>,
    screen: SplashScreen,
    updates: watch::Receiver<ProgressSnapshot>,
    completed_at: Option<Instant>,
    should_quit: bool,
}

impl<S: KeyValueStore> SplashApp<S> {
    pub fn new(controller: ProgressController, themes: ThemeController<S>, screen: SplashScreen) -> Self {
        let updates = controller.subscribe();
        Self {
            controller,
            themes,
            screen,
            updates,
            completed_at: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &ProgressController {
        &self.controller
    }

    pub fn themes(&self) -> &ThemeController<S> {
        &self.themes
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a key press. Returns whether the key was recognised.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.controller.start(),
            KeyCode::Char('p') => self.controller.pause(),
            KeyCode::Char('r') => self.controller.resume(),
            KeyCode::Char('d') => self.controller.done(),
            KeyCode::Char('h') => self.screen.toggle_hints(),
            KeyCode::Char('t') => {
                if let Err(e) = self.themes.toggle() {
                    warn!("Failed to persist theme mode: {}", e);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.shift_threshold(true),
            KeyCode::Char('-') => self.shift_threshold(false),
            _ => return false,
        }
        true
    }

    fn shift_threshold(&mut self, raise: bool) {
        let step = self.controller.config().increment_step;
        let current = self.controller.threshold();
        let next = if raise {
            current.saturating_add(step).min(MAX_PROGRESS)
        } else {
            current.saturating_sub(step)
        };
        self.controller.set_threshold(next);
    }

    /// Record completion and decide whether the splash has lingered long enough
    fn observe(&mut self, snapshot: &ProgressSnapshot) {
        if snapshot.is_loaded && self.completed_at.is_none() {
            info!("Splash complete");
            self.completed_at = Some(Instant::now());
        }
        if let Some(completed_at) = self.completed_at {
            if completed_at.elapsed() >= COMPLETED_LINGER {
                self.should_quit = true;
            }
        }
    }

    /// Render the latest snapshot with the active theme
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<ProgressSnapshot> {
        let snapshot = *self.updates.borrow_and_update();
        self.observe(&snapshot);

        terminal.draw(|frame| {
            let area = frame.size();
            self.screen.render(frame, area, &snapshot, self.themes.current_theme());
        })?;
        Ok(snapshot)
    }

    /// Drive the splash on an already prepared terminal
    pub async fn run_on<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.draw(terminal)?;

            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
                continue;
            }

            // Wake on the next progress change or after a short poll interval
            let _ = tokio::time::timeout(POLL_INTERVAL, self.updates.changed()).await;
        }
        Ok(())
    }

    /// Take over the terminal, run the splash and restore the terminal
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_on(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

/// Run without a terminal UI, logging every snapshot until loading completes.
/// When completion needs an explicit signal, `done()` is sent once the
/// threshold is reached.
pub async fn run_headless(controller: &ProgressController, json: bool) -> Result<ProgressSnapshot> {
    let mut updates = controller.subscribe();
    let auto_complete = controller.config().auto_complete;

    controller.start();

    loop {
        let snapshot = *updates.borrow_and_update();
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            info!(
                progress = snapshot.progress,
                status = %snapshot.status,
                threshold = snapshot.threshold,
                "Progress"
            );
        }

        if snapshot.is_loaded {
            return Ok(snapshot);
        }

        if !auto_complete
            && snapshot.status == LoadingStatus::Paused
            && snapshot.progress >= snapshot.threshold.min(MAX_PROGRESS)
        {
            info!("Threshold reached, signalling done");
            controller.done();
            continue;
        }

        if updates.changed().await.is_err() {
            anyhow::bail!("progress controller stopped before completing");
        }
    }
}
