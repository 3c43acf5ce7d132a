//! Wire models for the POS backend.
//!
//! Every response is decoded into one of these schemas at the network boundary.

mod analytics;
mod auth;
mod dish;
mod expense;
mod order;
mod range;

pub use analytics::*;
pub use auth::*;
pub use dish::*;
pub use expense::*;
pub use order::*;
pub use range::*;
