//! Simulated loading progress
//!
//! This module provides:
//! - `ProgressController`: a timer-driven state machine that advances a
//!   synthetic progress value, pauses at a threshold and completes either
//!   after a delay or on an explicit `done()`
//! - `ProgressConfig`: construction-time settings
//! - `LoadingStatus` / `ProgressSnapshot`: observable state

pub mod config;
pub mod controller;
pub mod status;

pub use config::ProgressConfig;
pub use controller::{CompletionCallback, ProgressController, ProgressError};
pub use status::{LoadingStatus, ProgressSnapshot, MAX_PROGRESS};
