//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod cursor;
#[cfg(test)]
pub(crate) mod testing;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::domain::{ApiKey, FieldError, QueryOptions, ResourceId, ValidationError};
use crate::resource::{Entity, Project, Resource};

pub use cursor::Cursor;

const DEFAULT_BASE_URL: &str = "https://api.telerivet.com/v1";
const API_KEY_ENV: &str = "TELERIVET_API_KEY";
const API_URL_ENV: &str = "TELERIVET_API_URL";
const MAX_LOG_BODY_LENGTH: usize = 200;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// HTTP verb of an API call.
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    api_key: ApiKey,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method.into(), request.url)
                .basic_auth(request.api_key.as_str(), Some(""));
            if let Some(body) = request.body.as_ref() {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelerivetClient`] and the resource types.
///
/// This error preserves:
/// - transport failures and non-2xx responses,
/// - API errors reported in the `{"error": {...}}` envelope,
/// - local validation and entity contract violations, which never reach the network.
pub enum TelerivetError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code without a decodable error payload.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The API rejected the request and described why.
    #[error("API error ({status}): {code:?} {message:?}")]
    Api {
        status: u16,
        code: Option<String>,
        message: Option<String>,
        param: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request options could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A local entity contract was violated (read-only write, unloaded field access).
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

#[derive(Debug, Clone)]
/// Builder for [`TelerivetClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct TelerivetClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelerivetClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Read `TELERIVET_API_KEY` (required) and `TELERIVET_API_URL` (optional).
    ///
    /// Errors:
    /// - [`ValidationError::MissingEnvVar`] when `TELERIVET_API_KEY` is unset,
    /// - [`ValidationError::Empty`] when it is blank.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let api_key =
            lookup(API_KEY_ENV).ok_or(ValidationError::MissingEnvVar { name: API_KEY_ENV })?;
        let mut builder = Self::new(ApiKey::new(api_key)?);
        if let Some(base_url) = lookup(API_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        Ok(builder)
    }

    /// Override the API base URL (default `https://api.telerivet.com/v1`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelerivetClient`].
    pub fn build(self) -> Result<TelerivetClient, TelerivetError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TelerivetError::Transport(Box::new(err)))?;

        Ok(TelerivetClient {
            api_key: self.api_key,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Telerivet REST client.
///
/// The client is cheap to clone; every entity it returns holds a clone so that it can
/// load and save itself. No state is shared between calls.
pub struct TelerivetClient {
    api_key: ApiKey,
    base_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for TelerivetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelerivetClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TelerivetClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`TelerivetClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> TelerivetClientBuilder {
        TelerivetClientBuilder::new(api_key)
    }

    /// Fetch a project (`GET /projects/{id}`).
    pub async fn get_project_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<Project, TelerivetError> {
        let id = ResourceId::new(id)?;
        self.request_entity(HttpMethod::Get, &format!("/projects/{id}"), None)
            .await
    }

    /// Build a project handle without a network call.
    pub fn init_project_by_id(&self, id: impl Into<String>) -> Result<Project, ValidationError> {
        let id = ResourceId::new(id)?;
        Ok(Project::from_entity(Entity::handle::<Project>(
            self.clone(),
            id.clone(),
            id,
        )))
    }

    /// List the projects the API key can access (`GET /projects`).
    pub fn query_projects(&self, options: QueryOptions) -> Cursor<Project> {
        self.cursor("/projects", options)
    }

    /// Send one request and return the decoded JSON body as-is.
    ///
    /// `path` is relative to the base URL, e.g. `/projects/PJ123/messages/send`.
    /// An empty response body decodes to `null`.
    pub async fn do_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, TelerivetError> {
        let body = self.execute(method, path, query, body).await?;
        crate::transport::decode_value_json_response(&body)
            .map_err(|err| TelerivetError::Parse(Box::new(err)))
    }

    /// Lazy paginated query over a list endpoint.
    pub fn cursor<T: Resource>(&self, path: impl Into<String>, options: QueryOptions) -> Cursor<T> {
        Cursor::new(self.clone(), path.into(), options)
    }

    pub(crate) async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<String, TelerivetError> {
        let url = self.endpoint(path, query)?;
        tracing::debug!(%method, %url, "sending request");

        let response = self
            .http
            .send(HttpRequest {
                method,
                url,
                api_key: self.api_key.clone(),
                body,
            })
            .await
            .map_err(TelerivetError::Transport)?;

        if !(200..=299).contains(&response.status) {
            tracing::warn!(
                %method,
                path,
                status = response.status,
                body = %truncate_for_log(&response.body),
                "request failed"
            );
            if let Some(error) = crate::transport::decode_api_error(&response.body) {
                return Err(TelerivetError::Api {
                    status: response.status,
                    code: error.code,
                    message: error.message,
                    param: error.param,
                });
            }
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TelerivetError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }

    pub(crate) async fn request_object(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Map<String, Value>, TelerivetError> {
        let body = self.execute(method, path, &[], body).await?;
        crate::transport::decode_object_json_response(&body)
            .map_err(|err| TelerivetError::Parse(Box::new(err)))
    }

    pub(crate) async fn request_entity<T: Resource>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, TelerivetError> {
        let fields = self.request_object(method, path, body).await?;
        let entity = Entity::from_fields::<T>(self.clone(), fields, true)?;
        Ok(T::from_entity(entity))
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, TelerivetError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ValidationError::InvalidBaseUrl {
                input: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Encode request options as a JSON body.
pub(crate) fn to_body<T: Serialize>(options: &T) -> Result<Value, TelerivetError> {
    serde_json::to_value(options).map_err(TelerivetError::Encode)
}

fn parse_base_url(input: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(input).map_err(|_| ValidationError::InvalidBaseUrl {
        input: input.to_owned(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ValidationError::InvalidBaseUrl {
            input: input.to_owned(),
        });
    }
    Ok(url)
}

fn truncate_for_log(body: &str) -> String {
    if body.chars().count() <= MAX_LOG_BODY_LENGTH {
        return body.to_owned();
    }
    let truncated = body.chars().take(MAX_LOG_BODY_LENGTH).collect::<String>();
    format!("{truncated}... [truncated, {} bytes total]", body.len())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{FakeTransport, fake_client};
    use super::*;

    #[tokio::test]
    async fn get_project_by_id_issues_get_and_parses_project() {
        let transport = FakeTransport::new();
        transport.push_json(200, json!({"id": "PJ1", "name": "Demo", "timezone_id": "UTC"}));
        let client = fake_client(&transport);

        let project = client.get_project_by_id("PJ1").await.unwrap();
        assert_eq!(project.id().as_str(), "PJ1");
        assert_eq!(project.name().unwrap(), Some("Demo"));
        assert!(project.is_loaded());

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/v1/projects/PJ1");
        assert_eq!(request.api_key, "test_key");
        assert_eq!(request.body, None);
    }

    #[test]
    fn init_project_by_id_makes_no_request() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        let project = client.init_project_by_id("PJ1").unwrap();
        assert_eq!(project.id().as_str(), "PJ1");
        assert!(!project.is_loaded());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn api_error_envelope_maps_to_api_error() {
        let transport = FakeTransport::new();
        transport.push_json(
            404,
            json!({"error": {"code": "not_found", "message": "Project not found"}}),
        );
        let client = fake_client(&transport);

        let err = client.get_project_by_id("PJ404").await.unwrap_err();
        match err {
            TelerivetError::Api {
                status,
                code,
                message,
                param,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("not_found"));
                assert_eq!(message.as_deref(), Some("Project not found"));
                assert_eq!(param, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_without_envelope_maps_to_http_status() {
        let transport = FakeTransport::new();
        transport.push(500, "oops");
        transport.push(503, "   ");
        let client = fake_client(&transport);

        let err = client.get_project_by_id("PJ1").await.unwrap_err();
        assert!(matches!(
            err,
            TelerivetError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));

        let err = client.get_project_by_id("PJ1").await.unwrap_err();
        assert!(matches!(
            err,
            TelerivetError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let transport = FakeTransport::new();
        transport.push(200, "{ not json }");
        let client = fake_client(&transport);

        let err = client.get_project_by_id("PJ1").await.unwrap_err();
        assert!(matches!(err, TelerivetError::Parse(_)));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_transport_error() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        let err = client.get_project_by_id("PJ1").await.unwrap_err();
        assert!(matches!(err, TelerivetError::Transport(_)));
    }

    #[tokio::test]
    async fn invalid_id_fails_before_any_request() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        let err = client.get_project_by_id("  ").await.unwrap_err();
        assert!(matches!(err, TelerivetError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn do_request_returns_raw_json_and_encodes_query() {
        let transport = FakeTransport::new();
        transport.push_json(200, json!({"ok": true}));
        let client = fake_client(&transport);

        let query = vec![("name[prefix]".to_owned(), "a b".to_owned())];
        let value = client
            .do_request(HttpMethod::Get, "/projects/PJ1/contacts", &query, None)
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));

        let request = transport.only_request();
        assert_eq!(request.path, "/v1/projects/PJ1/contacts");
        assert_eq!(request.query, query);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let api_key = ApiKey::new("key").unwrap();
        let err = TelerivetClient::builder(api_key.clone())
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TelerivetError::Validation(ValidationError::InvalidBaseUrl { .. })
        ));

        let err = TelerivetClient::builder(api_key)
            .base_url("mailto:someone@example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, TelerivetError::Validation(_)));
    }

    #[test]
    fn builder_base_url_override_is_applied() {
        let client = TelerivetClient::builder(ApiKey::new("key").unwrap())
            .base_url("https://example.invalid/api/v1/")
            .timeout(Duration::from_secs(5))
            .user_agent("telerivet-tests")
            .build()
            .unwrap();
        let url = client.endpoint("/projects/PJ1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.invalid/api/v1/projects/PJ1");
    }

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn from_env_requires_api_key() {
        let err = TelerivetClientBuilder::from_lookup(env(&[(
            "TELERIVET_API_URL",
            "https://example.invalid/v1",
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingEnvVar {
                name: "TELERIVET_API_KEY"
            }
        );

        let err = TelerivetClientBuilder::from_lookup(env(&[("TELERIVET_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn from_env_uses_default_url_unless_overridden() {
        let builder =
            TelerivetClientBuilder::from_lookup(env(&[("TELERIVET_API_KEY", "key")])).unwrap();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.api_key.as_str(), "key");

        let client = TelerivetClientBuilder::from_lookup(env(&[
            ("TELERIVET_API_KEY", "key"),
            ("TELERIVET_API_URL", "https://proxy.example.invalid/telerivet/v1"),
        ]))
        .unwrap()
        .build()
        .unwrap();
        let url = client.endpoint("/projects/PJ1", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.invalid/telerivet/v1/projects/PJ1"
        );
    }

    #[test]
    fn endpoint_percent_encodes_path_segments() {
        let client = TelerivetClient::new(ApiKey::new("key").unwrap());
        let url = client.endpoint("/projects/a b", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.telerivet.com/v1/projects/a%20b");
    }

    #[test]
    fn truncate_for_log_limits_long_bodies() {
        assert_eq!(truncate_for_log("short"), "short");
        let long = "x".repeat(MAX_LOG_BODY_LENGTH + 10);
        let truncated = truncate_for_log(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(truncated.ends_with("[truncated, 210 bytes total]"));
    }
}
