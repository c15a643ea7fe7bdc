//! Process-wide services
//!
//! Built once at startup and handed to whoever needs them by reference.

use crate::api::InventoryApi;
use crate::gateway::HttpGateway;
use crate::store::DurableStore;
use crate::theme::{ClassList, ThemeController, ThemeSurface};
use crate::{ClientConfig, ClientResult};

pub struct App<S: ThemeSurface = ClassList> {
    pub api: InventoryApi<HttpGateway>,
    pub themes: ThemeController<S>,
}

impl<S: ThemeSurface> App<S> {
    /// Build the services and apply the stored theme to `surface`.
    pub fn start(config: &ClientConfig, surface: S) -> ClientResult<Self> {
        tracing::info!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "starting client");

        let api = InventoryApi::from_config(config)?;
        let themes = ThemeController::new(surface, DurableStore::new(config.preferences_path()));
        let theme = themes.load();
        tracing::debug!(%theme, "initial theme applied");

        Ok(Self { api, themes })
    }
}
