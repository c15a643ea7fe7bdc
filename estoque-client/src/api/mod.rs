//! Inventory operations
//!
//! Each method maps typed arguments onto a single [`Gateway::call`]. The
//! untyped methods hand back [`ApiResponse`] as received; the plural
//! helpers (`sections`, `products`, ...) additionally decode it.

mod batch;
mod device_theme;

pub use batch::{BatchInput, NewBatch};
pub use device_theme::generate_device_id;

use reqwest::Method;
use shared::routes;
use shared::{Batch, Product, ProductType, ReportNode, Section};

use crate::gateway::{ApiResponse, Form, Gateway, HttpGateway};
use crate::store::CookieStore;
use crate::{ClientConfig, ClientError, ClientResult};

/// Key the CSV document is posted under
pub const CSV_PAYLOAD_KEY: &str = "csvData";

/// Operation set over a gateway, plus the cookie store holding the
/// device identity used for per-device themes.
pub struct InventoryApi<G: Gateway = HttpGateway> {
    gateway: G,
    cookies: CookieStore,
}

impl InventoryApi<HttpGateway> {
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(
            HttpGateway::new(config)?,
            CookieStore::new(config.cookie_path()),
        ))
    }
}

impl<G: Gateway> InventoryApi<G> {
    pub fn new(gateway: G, cookies: CookieStore) -> Self {
        Self { gateway, cookies }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn cookies(&self) -> &CookieStore {
        &self.cookies
    }

    async fn post(&self, route: &str, form: Form) -> ClientResult<ApiResponse> {
        self.gateway.call(route, Some(form.into()), None).await
    }

    async fn get(&self, route: &str) -> ClientResult<ApiResponse> {
        self.gateway.call(route, None, None).await
    }

    async fn delete(&self, route: &str, id: i64) -> ClientResult<ApiResponse> {
        self.gateway
            .call(&routes::item(route, id), None, Some(Method::DELETE))
            .await
    }

    // ========== Login ==========

    /// Check credentials. The backend answers `true`/`false` (or a payload).
    pub async fn verify(&self, name: &str, password: &str) -> ClientResult<ApiResponse> {
        let form = Form::new().field("nome", name).field("password", password);
        self.post(routes::LOGIN, form).await
    }

    // ========== Sections ==========

    pub async fn list_sections(&self) -> ClientResult<ApiResponse> {
        self.get(routes::SECTIONS).await
    }

    pub async fn sections(&self) -> ClientResult<Vec<Section>> {
        self.list_sections().await?.into_typed()
    }

    pub async fn create_section(&self, name: &str) -> ClientResult<ApiResponse> {
        let form = Form::new().field("id", 0).field("nome", name);
        self.post(routes::SECTIONS, form).await
    }

    pub async fn delete_section(&self, id: i64) -> ClientResult<ApiResponse> {
        self.delete(routes::SECTIONS, id).await
    }

    // ========== Types ==========

    pub async fn list_types(&self, section_id: i64) -> ClientResult<ApiResponse> {
        self.get(&routes::children_of(routes::TYPES, "secao", section_id))
            .await
    }

    pub async fn types(&self, section_id: i64) -> ClientResult<Vec<ProductType>> {
        self.list_types(section_id).await?.into_typed()
    }

    pub async fn create_type(&self, name: &str, section_id: i64) -> ClientResult<ApiResponse> {
        let form = Form::new()
            .field("id", 0)
            .field("nome", name)
            .field("id_secao", section_id);
        self.post(routes::TYPES, form).await
    }

    pub async fn delete_type(&self, id: i64) -> ClientResult<ApiResponse> {
        self.delete(routes::TYPES, id).await
    }

    // ========== Products ==========

    pub async fn list_products(&self, type_id: i64) -> ClientResult<ApiResponse> {
        self.get(&routes::children_of(routes::PRODUCTS, "tipo", type_id))
            .await
    }

    pub async fn products(&self, type_id: i64) -> ClientResult<Vec<Product>> {
        self.list_products(type_id).await?.into_typed()
    }

    /// The type reference goes out under both names the backend has used.
    pub async fn create_product(&self, name: &str, type_id: i64) -> ClientResult<ApiResponse> {
        let form = Form::new()
            .field("id", 0)
            .field("nome", name)
            .field("tipo_id", type_id)
            .field("id_tipo", type_id);
        self.post(routes::PRODUCTS, form).await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<ApiResponse> {
        self.delete(routes::PRODUCTS, id).await
    }

    /// Products whose name contains `term` (case-insensitive on the backend).
    ///
    /// The term travels as one path segment, so a blank term or one
    /// containing `/` is rejected before any request is made.
    pub async fn search_products(&self, term: &str) -> ClientResult<Vec<Product>> {
        if term.trim().is_empty() {
            return Err(ClientError::Validation("search term is empty".into()));
        }
        if term.contains('/') {
            return Err(ClientError::Validation(format!(
                "search term must not contain '/': {term:?}"
            )));
        }
        self.get(&routes::item(routes::SEARCH, term))
            .await?
            .into_typed()
    }

    // ========== Batches ==========

    pub async fn list_batches(&self, product_id: i64) -> ClientResult<ApiResponse> {
        self.get(&routes::children_of(routes::BATCHES, "produto", product_id))
            .await
    }

    pub async fn batches(&self, product_id: i64) -> ClientResult<Vec<Batch>> {
        self.list_batches(product_id).await?.into_typed()
    }

    /// Accepts either naming convention via [`BatchInput`], or a ready
    /// [`NewBatch`].
    pub async fn create_batch(&self, batch: impl Into<NewBatch>) -> ClientResult<ApiResponse> {
        let batch = batch.into();
        if batch.shelf_within_total() == Some(false) {
            tracing::warn!(
                product_id = ?batch.product_id,
                "shelf quantity exceeds total, leaving it to the backend"
            );
        }
        self.post(routes::BATCHES, batch.to_form()).await
    }

    pub async fn delete_batch(&self, id: i64) -> ClientResult<ApiResponse> {
        self.delete(routes::BATCHES, id).await
    }

    /// Set the shelf count of a batch
    pub async fn update_shelf(&self, batch_id: i64, quantity: i64) -> ClientResult<ApiResponse> {
        let form = Form::new()
            .field("lote_id", batch_id)
            .field("quantidade_prateleira", quantity);
        self.post(routes::UPDATE_SHELF, form).await
    }

    // ========== Stock ==========

    /// Sell `quantity` units from the shelf of a batch
    pub async fn sell(&self, batch_id: i64, quantity: i64) -> ClientResult<ApiResponse> {
        let form = Form::new().field("quantidade", quantity);
        self.post(&routes::item(routes::SELL, batch_id), form).await
    }

    /// Move `quantity` units from the stock room to the shelf
    pub async fn restock(&self, batch_id: i64, quantity: i64) -> ClientResult<ApiResponse> {
        let form = Form::new().field("quantidade", quantity);
        self.post(&routes::item(routes::RESTOCK, batch_id), form).await
    }

    // ========== Reports ==========

    pub async fn full_report(&self) -> ClientResult<ApiResponse> {
        self.get(routes::REPORT).await
    }

    pub async fn report(&self) -> ClientResult<Vec<ReportNode>> {
        self.full_report().await?.into_typed()
    }

    /// Batches expiring within `days`
    pub async fn expiring(&self, days: u32) -> ClientResult<ApiResponse> {
        self.get(&routes::item(routes::EXPIRING, days)).await
    }

    pub async fn expiring_batches(&self, days: u32) -> ClientResult<Vec<Batch>> {
        self.expiring(days).await?.into_typed()
    }

    // ========== CSV ==========

    /// Full inventory as a CSV document, verbatim
    pub async fn export_csv(&self) -> ClientResult<String> {
        self.gateway.fetch_text(routes::EXPORT_CSV).await
    }

    pub async fn import_csv(&self, csv: &str) -> ClientResult<ApiResponse> {
        let form = Form::new().field(CSV_PAYLOAD_KEY, csv);
        self.post(routes::IMPORT_CSV, form).await
    }
}
