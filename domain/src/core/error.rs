//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The cart and session stores themselves never fail; invalid input is a
/// defensive no-op. These errors cover parsing values that arrive from the
/// outside (CLI flags, remote status strings).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Unknown ticket status: {0}")]
    UnknownTicketStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_display() {
        let error = DomainError::UnknownLocale("xx".to_string());
        assert_eq!(error.to_string(), "Unknown locale: xx");
    }

    #[test]
    fn test_unknown_status_display() {
        let error = DomainError::UnknownTicketStatus("archived".to_string());
        assert_eq!(error.to_string(), "Unknown ticket status: archived");
    }
}
