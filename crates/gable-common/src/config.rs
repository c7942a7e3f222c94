use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing configuration for an editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet period before surface content is written into document
    /// state, in milliseconds.
    pub sync_debounce_ms: u64,
    /// Idle period before a dirty draft is autosaved, in milliseconds.
    pub autosave_idle_ms: u64,
}

impl EditorConfig {
    /// Debounce window for surface content notifications.
    pub fn sync_debounce(&self) -> Duration {
        Duration::from_millis(self.sync_debounce_ms)
    }

    /// Idle window after the last field change before autosave fires.
    pub fn autosave_idle(&self) -> Duration {
        Duration::from_millis(self.autosave_idle_ms)
    }
}

impl Default for EditorConfig {
    /// Creates the production configuration.
    ///
    /// Content sync settles after 150ms of quiet; autosave fires after
    /// 5 seconds without a field change.
    fn default() -> Self {
        Self {
            sync_debounce_ms: 150,
            autosave_idle_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings() {
        let config = EditorConfig::default();
        assert_eq!(config.sync_debounce(), Duration::from_millis(150));
        assert_eq!(config.autosave_idle(), Duration::from_secs(5));
    }

    #[test]
    fn roundtrips_through_json() {
        let config = EditorConfig {
            sync_debounce_ms: 200,
            autosave_idle_ms: 10_000,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EditorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sync_debounce_ms, 200);
        assert_eq!(back.autosave_idle_ms, 10_000);
    }
}
