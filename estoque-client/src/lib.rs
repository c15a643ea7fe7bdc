//! Estoque Client - inventory backend client
//!
//! Typed operations over the local inventory backend, the device/theme
//! persistence rules, and the theme controller for the UI shell.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod login;
pub mod store;
pub mod theme;

pub use api::{BatchInput, InventoryApi, NewBatch};
pub use app::App;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{ApiResponse, Form, Gateway, HttpGateway, Payload};
pub use login::{LoginGate, LoginOutcome};
pub use store::{CookieStore, DurableStore, StoreError};
pub use theme::{ClassList, ThemeController, ThemeSurface};

// Re-export shared types for convenience
pub use shared::{Batch, Product, ProductType, ReportNode, Section, Theme, ThemeChanged};
