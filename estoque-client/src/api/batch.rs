//! Batch creation input and its normalization
//!
//! Batch forms reach the client in two historical shapes: canonical
//! snake_case (`produto_id`) and legacy camelCase (`produtoId`). Both are
//! accepted, then resolved per field into [`NewBatch`] before anything is
//! sent. When both names are present the canonical one wins.

use serde::{Deserialize, Deserializer, de};

use crate::gateway::Form;

/// Batch creation input as received from a form, in either naming
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchInput {
    #[serde(rename = "produto_id", default, deserialize_with = "lenient_i64")]
    pub product_id: Option<i64>,
    #[serde(rename = "produtoId", default, deserialize_with = "lenient_i64")]
    pub legacy_product_id: Option<i64>,

    #[serde(rename = "validade", default)]
    pub expiry_date: Option<String>,

    #[serde(rename = "quantidade_total", default, deserialize_with = "lenient_i64")]
    pub total_quantity: Option<i64>,
    #[serde(rename = "quantidadeTotal", default, deserialize_with = "lenient_i64")]
    pub legacy_total_quantity: Option<i64>,

    #[serde(rename = "quantidade_prateleira", default, deserialize_with = "lenient_i64")]
    pub shelf_quantity: Option<i64>,
    #[serde(rename = "quantidadePrateleira", default, deserialize_with = "lenient_i64")]
    pub legacy_shelf_quantity: Option<i64>,
}

impl BatchInput {
    pub fn normalize(self) -> NewBatch {
        NewBatch {
            product_id: self.product_id.or(self.legacy_product_id),
            expiry_date: self.expiry_date,
            total_quantity: self.total_quantity.or(self.legacy_total_quantity),
            shelf_quantity: self.shelf_quantity.or(self.legacy_shelf_quantity),
        }
    }
}

/// Canonical batch creation payload
///
/// Fields stay optional: whatever the caller left out is left out of the
/// request too, and the backend decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBatch {
    pub product_id: Option<i64>,
    pub expiry_date: Option<String>,
    pub total_quantity: Option<i64>,
    pub shelf_quantity: Option<i64>,
}

impl NewBatch {
    pub fn new(
        product_id: i64,
        expiry_date: impl Into<String>,
        total_quantity: i64,
        shelf_quantity: i64,
    ) -> Self {
        Self {
            product_id: Some(product_id),
            expiry_date: Some(expiry_date.into()),
            total_quantity: Some(total_quantity),
            shelf_quantity: Some(shelf_quantity),
        }
    }

    /// `Some(shelf <= total)` when both counts are known
    pub fn shelf_within_total(&self) -> Option<bool> {
        match (self.shelf_quantity, self.total_quantity) {
            (Some(shelf), Some(total)) => Some(shelf <= total),
            _ => None,
        }
    }

    /// Form body for `lotes`, with the `id=0` placeholder the backend needs
    pub fn to_form(&self) -> Form {
        Form::new()
            .field("id", 0)
            .field_opt("produto_id", self.product_id)
            .field_opt("validade", self.expiry_date.as_deref())
            .field_opt("quantidade_total", self.total_quantity)
            .field_opt("quantidade_prateleira", self.shelf_quantity)
    }
}

impl From<BatchInput> for NewBatch {
    fn from(input: BatchInput) -> Self {
        input.normalize()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Form inputs arrive as numbers or as numeric text; blank text is absent.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("not an integer: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> NewBatch {
        serde_json::from_value::<BatchInput>(value).unwrap().normalize()
    }

    #[test]
    fn test_both_namings_normalize_to_same_payload() {
        let legacy = parse(json!({"produtoId": 5, "quantidadeTotal": 10}));
        let canonical = parse(json!({"produto_id": 5, "quantidade_total": 10}));

        assert_eq!(legacy, canonical);
        assert_eq!(legacy.to_form(), canonical.to_form());
        assert_eq!(canonical.to_form().get("produto_id"), Some("5"));
        assert_eq!(canonical.to_form().get("quantidade_total"), Some("10"));
    }

    #[test]
    fn test_canonical_name_wins_per_field() {
        let batch = parse(json!({
            "produto_id": 5,
            "produtoId": 9,
            "quantidadeTotal": 10,
            "quantidade_prateleira": 2,
            "quantidadePrateleira": 7
        }));

        assert_eq!(batch.product_id, Some(5));
        assert_eq!(batch.total_quantity, Some(10));
        assert_eq!(batch.shelf_quantity, Some(2));
    }

    #[test]
    fn test_form_carries_placeholder_id() {
        let form = NewBatch::new(5, "2026-03-01", 10, 4).to_form();
        let keys: Vec<_> = form.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "id",
                "produto_id",
                "validade",
                "quantidade_total",
                "quantidade_prateleira"
            ]
        );
        assert_eq!(form.get("id"), Some("0"));
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let batch = parse(json!({"produtoId": "5", "quantidade_total": " 12 ", "quantidadePrateleira": ""}));
        assert_eq!(batch.product_id, Some(5));
        assert_eq!(batch.total_quantity, Some(12));
        assert_eq!(batch.shelf_quantity, None);
    }

    #[test]
    fn test_garbage_number_is_rejected() {
        let result = serde_json::from_value::<BatchInput>(json!({"produto_id": "cinco"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_shelf_check() {
        assert_eq!(NewBatch::new(1, "2026-01-01", 10, 4).shelf_within_total(), Some(true));
        assert_eq!(NewBatch::new(1, "2026-01-01", 3, 4).shelf_within_total(), Some(false));
        assert_eq!(NewBatch::default().shelf_within_total(), None);
    }
}
