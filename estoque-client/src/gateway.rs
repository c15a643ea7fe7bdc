//! Request gateway - one HTTP request per logical operation
//!
//! Every operation goes through [`Gateway::call`], which infers the method,
//! form-encodes the payload and decodes the body JSON-first with a raw text
//! fallback. Transport failures propagate; there is no retry.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// Content type sent with every request, whatever the payload shape
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Key a bare string payload is encoded under
pub const TEXT_PAYLOAD_KEY: &str = "nome";

/// Ordered form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form(Vec<(String, String)>);

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Keys may repeat; order is kept.
    pub fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a field only when a value is present
    pub fn field_opt(self, key: &str, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Request payload: a key/value mapping or a bare string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Form(Form),
    Text(String),
}

impl Payload {
    /// Flatten into the pairs that end up in the form body
    pub fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Payload::Form(form) => form.0,
            Payload::Text(text) => vec![(TEXT_PAYLOAD_KEY.to_string(), text)],
        }
    }
}

impl From<Form> for Payload {
    fn from(form: Form) -> Self {
        Payload::Form(form)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

/// Explicit method wins; otherwise POST when there is a payload, GET when not.
pub fn resolve_method(payload: Option<&Payload>, method: Option<Method>) -> Method {
    method.unwrap_or_else(|| {
        if payload.is_some() {
            Method::POST
        } else {
            Method::GET
        }
    })
}

/// Decoded response body
///
/// The backend answers with JSON for most routes and plain text for others
/// (messages, CSV). Callers match on the variant instead of assuming a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Structured(Value),
    Raw(String),
}

impl ApiResponse {
    /// JSON first, raw text untouched on parse failure
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ApiResponse::Structured(value),
            Err(_) => ApiResponse::Raw(body),
        }
    }

    /// Truthiness as the login screen sees it: `false`, `null`, `0`, empty
    /// strings and empty bodies are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ApiResponse::Raw(text) => !text.is_empty(),
            ApiResponse::Structured(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    /// Text content: raw bodies and JSON strings
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Raw(text) => Some(text),
            ApiResponse::Structured(Value::String(text)) => Some(text),
            ApiResponse::Structured(_) => None,
        }
    }

    /// Decode a structured body into `T`
    pub fn into_typed<T: DeserializeOwned>(self) -> ClientResult<T> {
        match self {
            ApiResponse::Structured(value) => Ok(serde_json::from_value(value)?),
            ApiResponse::Raw(text) => Err(ClientError::InvalidResponse(text)),
        }
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiResponse::Raw(text) => f.write_str(text),
            ApiResponse::Structured(Value::String(text)) => f.write_str(text),
            ApiResponse::Structured(value) => write!(f, "{value}"),
        }
    }
}

/// Transport seam used by the operation set
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue a single request and decode the body
    async fn call(
        &self,
        route: &str,
        payload: Option<Payload>,
        method: Option<Method>,
    ) -> ClientResult<ApiResponse>;

    /// GET a route and hand back the body verbatim (never JSON-parsed)
    async fn fetch_text(&self, route: &str) -> ClientResult<String>;
}

/// reqwest-backed gateway
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    api_prefix: String,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base url cannot carry a path: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            api_prefix: config.api_prefix.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<prefix>/<route>`, each route segment percent-encoded
    pub fn url(&self, route: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.api_prefix.split('/').filter(|s| !s.is_empty()))
                .extend(route.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    async fn send(&self, route: &str, request: reqwest::RequestBuilder) -> ClientResult<String> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(route, error = %e, "request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(route, %status, "backend answered with error status");
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn call(
        &self,
        route: &str,
        payload: Option<Payload>,
        method: Option<Method>,
    ) -> ClientResult<ApiResponse> {
        let method = resolve_method(payload.as_ref(), method);
        tracing::debug!(%method, route, "request");

        let mut request = self
            .client
            .request(method.clone(), self.url(route))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        if let Some(payload) = payload
            && method != Method::GET
        {
            request = request.form(&payload.into_pairs());
        }

        let body = self.send(route, request).await?;
        Ok(ApiResponse::from_body(body))
    }

    async fn fetch_text(&self, route: &str) -> ClientResult<String> {
        tracing::debug!(method = %Method::GET, route, "request (text)");
        let request = self.client.get(self.url(route));
        self.send(route, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_inference() {
        let payload = Payload::from(Form::new().field("id", 0));
        assert_eq!(resolve_method(Some(&payload), None), Method::POST);
        assert_eq!(resolve_method(None, None), Method::GET);
        assert_eq!(resolve_method(None, Some(Method::DELETE)), Method::DELETE);
        assert_eq!(
            resolve_method(Some(&payload), Some(Method::GET)),
            Method::GET
        );
    }

    #[test]
    fn test_text_payload_goes_under_name_key() {
        let pairs = Payload::from("Bebidas").into_pairs();
        assert_eq!(pairs, vec![("nome".to_string(), "Bebidas".to_string())]);
    }

    #[test]
    fn test_form_keeps_order_and_skips_absent() {
        let form = Form::new()
            .field("id", 0)
            .field_opt("validade", None::<String>)
            .field("nome", "Arroz");
        let keys: Vec<_> = form.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["id", "nome"]);
        assert_eq!(form.get("id"), Some("0"));
    }

    #[test]
    fn test_decoding_is_json_first() {
        assert_eq!(
            ApiResponse::from_body("[1,2]".into()),
            ApiResponse::Structured(json!([1, 2]))
        );
        assert_eq!(
            ApiResponse::from_body("true".into()),
            ApiResponse::Structured(json!(true))
        );
        assert_eq!(
            ApiResponse::from_body("Seção criada com sucesso".into()),
            ApiResponse::Raw("Seção criada com sucesso".into())
        );
        assert_eq!(ApiResponse::from_body(String::new()), ApiResponse::Raw(String::new()));
    }

    #[test]
    fn test_truthiness() {
        assert!(ApiResponse::Structured(json!(true)).is_truthy());
        assert!(ApiResponse::Structured(json!({"ok": false})).is_truthy());
        assert!(!ApiResponse::Structured(json!(false)).is_truthy());
        assert!(!ApiResponse::Structured(json!(0)).is_truthy());
        assert!(!ApiResponse::Structured(Value::Null).is_truthy());
        assert!(!ApiResponse::Raw(String::new()).is_truthy());
    }

    #[test]
    fn test_raw_body_is_not_typed() {
        let err = ApiResponse::Raw("erro".into())
            .into_typed::<Vec<i64>>()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(text) if text == "erro"));
    }

    #[test]
    fn test_url_building() {
        let gateway = HttpGateway::new(&ClientConfig::new("http://127.0.0.1:1420/")).unwrap();
        assert_eq!(
            gateway.url("tipos/secao/3").as_str(),
            "http://127.0.0.1:1420/api/tipos/secao/3"
        );
        assert_eq!(
            gateway.url("pesquisar/feijão preto").as_str(),
            "http://127.0.0.1:1420/api/pesquisar/feij%C3%A3o%20preto"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let err = HttpGateway::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
