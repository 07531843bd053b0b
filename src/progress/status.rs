use serde::{Deserialize, Serialize};

/// Progress value reported once loading has completed
pub const MAX_PROGRESS: u8 = 100;

/// Lifecycle state of a progress controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStatus {
    #[default]
    Idle,
    Loading,
    Paused,
    Completed,
}

impl LoadingStatus {
    pub fn name(&self) -> &'static str {
        match self {
            LoadingStatus::Idle => "idle",
            LoadingStatus::Loading => "loading",
            LoadingStatus::Paused => "paused",
            LoadingStatus::Completed => "completed",
        }
    }

    /// Short human readable label for the splash screen
    pub fn description(&self) -> &'static str {
        match self {
            LoadingStatus::Idle => "Waiting to start",
            LoadingStatus::Loading => "Loading resources",
            LoadingStatus::Paused => "Finishing up",
            LoadingStatus::Completed => "Ready",
        }
    }

    /// Whether `start()` may move the controller into `Loading`
    pub fn can_start(&self) -> bool {
        matches!(self, LoadingStatus::Idle | LoadingStatus::Paused)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadingStatus::Completed)
    }

    pub fn status_icon(&self) -> &'static str {
        match self {
            LoadingStatus::Idle => "⏳",
            LoadingStatus::Loading => "🔄",
            LoadingStatus::Paused => "⏸",
            LoadingStatus::Completed => "✅",
        }
    }
}

impl std::fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Point-in-time view of a controller, published after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub progress: u8,
    pub status: LoadingStatus,
    pub threshold: u8,
    pub is_loaded: bool,
}

impl ProgressSnapshot {
    pub fn initial(threshold: u8) -> Self {
        Self {
            progress: 0,
            status: LoadingStatus::Idle,
            threshold,
            is_loaded: false,
        }
    }

    /// Progress as a ratio in `0.0..=1.0`, for gauges
    pub fn ratio(&self) -> f64 {
        f64::from(self.progress.min(MAX_PROGRESS)) / f64::from(MAX_PROGRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(LoadingStatus::Idle.name(), "idle");
        assert_eq!(LoadingStatus::Loading.to_string(), "loading");
        assert_eq!(LoadingStatus::Paused.name(), "paused");
        assert_eq!(LoadingStatus::Completed.name(), "completed");
        assert_eq!(LoadingStatus::default(), LoadingStatus::Idle);
    }

    #[test]
    fn test_status_transitions_allowed() {
        assert!(LoadingStatus::Idle.can_start());
        assert!(LoadingStatus::Paused.can_start());
        assert!(!LoadingStatus::Loading.can_start());
        assert!(!LoadingStatus::Completed.can_start());

        // Only completion is terminal
        assert!(LoadingStatus::Completed.is_terminal());
        assert!(!LoadingStatus::Paused.is_terminal());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LoadingStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");

        let status: LoadingStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, LoadingStatus::Paused);
    }

    #[test]
    fn test_snapshot_ratio() {
        let mut snapshot = ProgressSnapshot::initial(70);
        assert_eq!(snapshot.ratio(), 0.0);
        assert!(!snapshot.is_loaded);

        snapshot.progress = 70;
        assert!((snapshot.ratio() - 0.7).abs() < f64::EPSILON);

        snapshot.progress = MAX_PROGRESS;
        assert_eq!(snapshot.ratio(), 1.0);
    }
}
