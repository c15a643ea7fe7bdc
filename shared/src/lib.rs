//! Shared types for the estoque workspace
//!
//! Wire models exchanged with the inventory backend and the theme
//! vocabulary used by the client stores and the UI shell.

pub mod models;
pub mod report;
pub mod routes;
pub mod theme;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Batch, Product, ProductType, Section};
pub use report::{ReportLevel, ReportNode};
pub use theme::{Palette, Theme, ThemeChanged, ThemeParseError};
