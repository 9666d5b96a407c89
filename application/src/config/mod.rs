//! Application-layer configuration types.

mod support_params;

pub use support_params::SupportParams;
