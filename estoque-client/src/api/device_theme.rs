//! Per-device theme kept on the backend
//!
//! The device is identified by a random token in the `dispositivo_id`
//! cookie. Saving creates the token on first use; loading never does, and
//! degrades to the default theme on any failure.

use rand::Rng;
use serde_json::Value;
use shared::Theme;
use shared::routes;

use super::InventoryApi;
use crate::ClientResult;
use crate::gateway::{ApiResponse, Form, Gateway};

/// Cookie holding the device identity
pub const DEVICE_COOKIE: &str = "dispositivo_id";

const DEVICE_ID_PREFIX: &str = "dev_";
const DEVICE_ID_LEN: usize = 13;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `dev_` followed by 13 random base-36 characters
pub fn generate_device_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..DEVICE_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{DEVICE_ID_PREFIX}{suffix}")
}

impl<G: Gateway> InventoryApi<G> {
    /// Current device id, if one was ever created
    pub fn device_id(&self) -> ClientResult<Option<String>> {
        Ok(self.cookies.get(DEVICE_COOKIE)?.filter(|id| !id.is_empty()))
    }

    /// Existing device id, or a fresh one persisted for a year
    pub fn ensure_device_id(&self) -> ClientResult<String> {
        if let Some(id) = self.device_id()? {
            return Ok(id);
        }
        let id = generate_device_id();
        self.cookies.set_default(DEVICE_COOKIE, &id)?;
        tracing::info!(device_id = %id, "generated device id");
        Ok(id)
    }

    pub async fn save_device_theme(&self, theme: Theme) -> ClientResult<ApiResponse> {
        let device_id = self.ensure_device_id()?;
        let form = Form::new()
            .field(DEVICE_COOKIE, &device_id)
            .field("tema", theme);
        self.gateway
            .call(routes::SAVE_THEME, Some(form.into()), None)
            .await
    }

    /// Never fails: without a device id no request is made at all, and
    /// errors or unknown answers fall back to [`Theme::DEFAULT`].
    pub async fn load_device_theme(&self) -> Theme {
        let device_id = match self.device_id() {
            Ok(Some(id)) => id,
            Ok(None) => return Theme::DEFAULT,
            Err(e) => {
                tracing::debug!(error = %e, "device id unreadable, using default theme");
                return Theme::DEFAULT;
            }
        };

        let form = Form::new().field(DEVICE_COOKIE, &device_id);
        match self
            .gateway
            .call(routes::LOAD_THEME, Some(form.into()), None)
            .await
        {
            Ok(response) => theme_from_response(&response),
            Err(e) => {
                tracing::debug!(error = %e, "remote theme unavailable, using default");
                Theme::DEFAULT
            }
        }
    }
}

/// Accepts a bare token (text or JSON string) or an object with `tema`.
/// Raw replies often end in a newline, so the token is trimmed.
fn theme_from_response(response: &ApiResponse) -> Theme {
    let token = match response {
        ApiResponse::Structured(Value::Object(map)) => map.get("tema").and_then(Value::as_str),
        other => other.as_text(),
    };
    Theme::from_token_or_default(token.map(str::trim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_id_shape() {
        let id = generate_device_id();
        let suffix = id.strip_prefix("dev_").unwrap();
        assert_eq!(suffix.len(), 13);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
        assert_ne!(generate_device_id(), id);
    }

    #[test]
    fn test_theme_from_response_shapes() {
        assert_eq!(
            theme_from_response(&ApiResponse::Raw("matrix".into())),
            Theme::Matrix
        );
        assert_eq!(
            theme_from_response(&ApiResponse::Structured(json!("claro"))),
            Theme::Light
        );
        assert_eq!(
            theme_from_response(&ApiResponse::Structured(json!({"tema": "matrix"}))),
            Theme::Matrix
        );
        assert_eq!(
            theme_from_response(&ApiResponse::Structured(json!({"erro": "x"}))),
            Theme::Dark
        );
        assert_eq!(
            theme_from_response(&ApiResponse::Raw("<html>".into())),
            Theme::Dark
        );
        assert_eq!(
            theme_from_response(&ApiResponse::Raw(" matrix\n".into())),
            Theme::Matrix
        );
    }
}
