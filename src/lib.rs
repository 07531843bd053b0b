pub mod app;
pub mod cli;
pub mod config;
pub mod progress;
pub mod splash;
pub mod store;
pub mod theme;

pub use app::SplashApp;
pub use progress::{LoadingStatus, ProgressConfig, ProgressController};
