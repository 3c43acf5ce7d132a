//! Restaurant POS client
//!
//! Typed access to the point-of-sale backend: menu, billing, expenses, order
//! history and analytics, plus the order draft and filtering logic the billing
//! screen runs locally.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod session;
pub mod state;

pub use api::OrderReceipt;
pub use cart::{format_amount, OrderDraft};
pub use catalog::{Catalog, MealSchedule};
pub use config::Config;
pub use errors::{ClientError, ErrorKind};
pub use http::ApiClient;
pub use session::{MemoryTokenStore, Session, SessionStatus, SqliteTokenStore, TokenStore};
pub use state::{LoadState, Loadable, Notice};
