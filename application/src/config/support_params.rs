//! Support flow parameters.
//!
//! [`SupportParams`] groups the static knobs of the support/chat flows:
//! the ticket poll cadence and the chat greeting. These are application
//! concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the support session and ticket flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportParams {
    /// Interval between ticket polls while the thread is non-terminal.
    pub poll_interval: Duration,
    /// Seed assistant message for new chat sessions.
    pub greeting: String,
}

impl Default for SupportParams {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            greeting: "Hi! How can we help you today?".to_string(),
        }
    }
}

impl SupportParams {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SupportParams::default();
        assert_eq!(params.poll_interval, Duration::from_secs(5));
        assert!(!params.greeting.is_empty());
    }

    #[test]
    fn test_builders() {
        let params = SupportParams::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_greeting("مرحبا!");
        assert_eq!(params.poll_interval, Duration::from_secs(1));
        assert_eq!(params.greeting, "مرحبا!");
    }
}
