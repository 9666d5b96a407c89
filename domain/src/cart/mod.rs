//! Shopping cart state core: line items, identity merge, derived totals.

pub mod entities;
pub mod state;

pub use entities::{CartLine, CartLinePatch};
pub use state::CartState;
