//! Inventory models as exchanged with the backend
//!
//! Field names on the wire are the backend's (Portuguese) names; the Rust
//! side uses descriptive names and maps them through serde attributes.
//! These are transient, request-scoped copies: the backend owns the data.

use serde::{Deserialize, Serialize};

/// Top level grouping (`secao`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Product category inside a section (`tipo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "id_secao")]
    pub section_id: i64,
}

/// Product (`produto`)
///
/// Listed products carry `id_tipo`; older payloads used `tipo_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "id_tipo", alias = "tipo_id")]
    pub type_id: i64,
}

/// Stock batch of a product with a single expiry date (`lote`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    #[serde(rename = "id_produto", alias = "produto_id")]
    pub product_id: i64,
    /// Expiry date as stored by the backend (`YYYY-MM-DD`)
    #[serde(rename = "validade")]
    pub expiry_date: String,
    #[serde(rename = "quantidade_total")]
    pub total_quantity: i64,
    #[serde(rename = "quantidade_prateleira")]
    pub shelf_quantity: i64,
}

impl Batch {
    /// Units kept in the stock room (total minus what is on the shelf)
    pub fn stock_quantity(&self) -> i64 {
        self.total_quantity - self.shelf_quantity
    }

    /// Whether the shelf count fits inside the total.
    ///
    /// The backend is expected to enforce this; the client only reports it.
    pub fn is_consistent(&self) -> bool {
        self.shelf_quantity <= self.total_quantity
    }
}
