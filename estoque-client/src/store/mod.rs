//! Local persistence for client-owned state
//!
//! Two independent stores with different lifetimes:
//! - [`CookieStore`]: expiring entries (device identity, ~1 year)
//! - [`DurableStore`]: plain key/value entries with no expiry (theme)

mod cookie;
mod durable;
mod file;

pub use cookie::{Cookie, CookieStore, DEFAULT_COOKIE_DAYS};
pub use durable::{DurableStore, THEME_KEY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
