//! Core domain primitives shared across the cart and support modules.

pub mod error;
pub mod locale;
pub mod string;

pub use error::DomainError;
pub use locale::{CurrencyMode, Locale, TextDirection};
