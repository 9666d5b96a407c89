//! Storefront locales and locale-static currency formatting.
//!
//! The locale is an external reactive value owned by the UI shell; the
//! stores only carry it as a query dimension and as a snapshot on cart
//! lines. No currency conversion happens here; formatting is static per
//! currency mode.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported storefront locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

/// Text direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    /// Query-parameter form used on every CMS call
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn dir(&self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::Ar => TextDirection::Rtl,
        }
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            other => Err(DomainError::UnknownLocale(other.to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Currency display mode snapshotted on cart lines.
///
/// Display-only: the backend serves prices already denominated per locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyMode {
    #[default]
    Usd,
    Aed,
}

impl CurrencyMode {
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyMode::Usd => "$",
            CurrencyMode::Aed => "AED",
        }
    }

    /// Format an amount for display, e.g. `$25.00` or `125.00 AED`.
    pub fn format_price(&self, amount: f64) -> String {
        match self {
            CurrencyMode::Usd => format!("{}{:.2}", self.symbol(), amount),
            CurrencyMode::Aed => format!("{:.2} {}", amount, self.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse_roundtrip() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_direction() {
        assert_eq!(Locale::En.dir(), TextDirection::Ltr);
        assert_eq!(Locale::Ar.dir(), TextDirection::Rtl);
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(CurrencyMode::Usd.format_price(25.0), "$25.00");
        assert_eq!(CurrencyMode::Aed.format_price(125.5), "125.50 AED");
    }
}
