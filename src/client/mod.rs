pub mod query;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use log::debug;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use self::query::Query;
use self::session::Session;

/// Backend location used when no configuration is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Login screen every 401 redirects to.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

const MIME_JSON: &str = "application/json";

/// Callback fired when a call comes back 401, after the local session has
/// been cleared. Receives the login path the user should be sent to.
pub type UnauthorizedHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Normalized failure shape for every API call.
///
/// `status_code == 0` means the request never reached the server (DNS or
/// connection failure); any nonzero code is the HTTP status the server
/// answered with. `errors`, when present, is the backend's field-level
/// validation map.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: u16,
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub(crate) fn transport(err: impl ToString) -> Self {
        let message = err.to_string();
        Self {
            message: if message.is_empty() {
                String::from("Network error occurred")
            } else {
                message
            },
            status_code: 0,
            errors: None,
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self {
            message: String::from("Unauthorized - please login again"),
            status_code: StatusCode::UNAUTHORIZED.as_u16(),
            errors: None,
        }
    }

    pub(crate) fn empty_response() -> Self {
        Self {
            message: String::from("Server returned an empty response"),
            status_code: StatusCode::OK.as_u16(),
            errors: None,
        }
    }

    fn from_status(status: StatusCode, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_else(|| String::from("An error occurred"));

        let errors = body
            .get("errors")
            .and_then(|errors| serde_json::from_value(errors.clone()).ok());

        Self {
            message,
            status_code: status.as_u16(),
            errors,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status_code == 0
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == StatusCode::UNAUTHORIZED.as_u16()
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Typed HTTP client for the platform backend. Cheap to clone; clones share
/// the same session.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    session: Session,
    login_path: String,
    unauthorized_hook: Option<UnauthorizedHook>,
}

pub struct ClientBuilder {
    base_url: String,
    session: Option<Session>,
    login_path: String,
    unauthorized_hook: Option<UnauthorizedHook>,
}

impl ClientBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
            login_path: String::from(DEFAULT_LOGIN_PATH),
            unauthorized_hook: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_login_path(mut self, path: &str) -> Self {
        self.login_path = path.to_string();
        self
    }

    pub fn with_unauthorized_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.unauthorized_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Client> {
        let parsed = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(_) => bail!("invalid base url '{}'", self.base_url),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            _ => bail!(
                "invalid url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }

        Ok(Client {
            base_url: self.base_url,
            http: reqwest::Client::new(),
            session: self.session.unwrap_or_else(Session::in_memory),
            login_path: self.login_path,
            unauthorized_hook: self.unauthorized_hook,
        })
    }
}

impl Client {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a request and normalizes the outcome.
    ///
    /// A 2xx response whose body is empty or not parseable as JSON resolves
    /// to `Ok(None)`; some endpoints legitimately answer with no body. A 401
    /// clears the session, fires the unauthorized hook and fails with a
    /// generic unauthorized error, discarding any detail the server sent.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        params: Option<&Query>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Option<T>, ApiError> {
        let query = params.map(Query::encode).unwrap_or_default();
        let url = format!("{}{}{}", self.base_url, path, query);
        debug!("Request {method} {url}");

        let mut req = self.http.request(method, &url).header("Content-Type", MIME_JSON);
        if let Some(extra) = headers {
            for (key, value) in extra {
                req = req.header(key, value);
            }
        }
        // Attached for every call, public endpoints included; the backend
        // ignores auth it does not recognize.
        if let Some(token) = self.session.token() {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.body(body.to_string());
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => return Err(ApiError::transport(err)),
        };

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear_token();
            if let Some(hook) = &self.unauthorized_hook {
                hook(&self.login_path);
            }
            return Err(ApiError::unauthorized());
        }

        let body: Value = match resp.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
            Err(_) => Value::Null,
        };

        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }

        if body.is_null() {
            return Ok(None);
        }
        match serde_json::from_value(body) {
            Ok(data) => Ok(Some(data)),
            Err(err) => Err(ApiError {
                message: format!("decode response: {err}"),
                status_code: status.as_u16(),
                errors: None,
            }),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&Query>,
    ) -> Result<T, ApiError> {
        let data = self.request(Method::GET, path, None, params, None).await?;
        data.ok_or_else(ApiError::empty_response)
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = body.map(|body| serde_json::to_value(body).unwrap());
        let data = self.request(Method::POST, path, body, None, None).await?;
        data.ok_or_else(ApiError::empty_response)
    }

    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = body.map(|body| serde_json::to_value(body).unwrap());
        let data = self.request(Method::PUT, path, body, None, None).await?;
        data.ok_or_else(ApiError::empty_response)
    }

    pub async fn patch<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = body.map(|body| serde_json::to_value(body).unwrap());
        let data = self.request(Method::PATCH, path, body, None, None).await?;
        data.ok_or_else(ApiError::empty_response)
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&Query>,
    ) -> Result<T, ApiError> {
        let data = self
            .request(Method::DELETE, path, None, params, None)
            .await?;
        data.ok_or_else(ApiError::empty_response)
    }
}
