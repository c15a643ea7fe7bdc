//! Backend route names (relative to the `/api` prefix)

pub const LOGIN: &str = "login";

pub const SECTIONS: &str = "secoes";
pub const TYPES: &str = "tipos";
pub const PRODUCTS: &str = "produtos";
pub const BATCHES: &str = "lotes";

pub const UPDATE_SHELF: &str = "atualizar_prateleira";
pub const SELL: &str = "vender";
pub const RESTOCK: &str = "abastecer";
pub const SEARCH: &str = "pesquisar";

pub const REPORT: &str = "relatorio";
pub const EXPIRING: &str = "vencer";

pub const EXPORT_CSV: &str = "exportar";
pub const IMPORT_CSV: &str = "importar";

pub const SAVE_THEME: &str = "salvar_tema";
pub const LOAD_THEME: &str = "carregar_tema";

/// `<route>/<id>`
pub fn item(route: &str, id: impl std::fmt::Display) -> String {
    format!("{route}/{id}")
}

/// Children listing, e.g. `tipos/secao/3`
pub fn children_of(route: &str, parent: &str, id: i64) -> String {
    format!("{route}/{parent}/{id}")
}
