//! Shared HTTP plumbing for the resource adapters.
//!
//! Every response body is read as text, parsed with `serde_json` into the
//! adapter's closed record type, then validated. Non-success statuses become
//! [`CaseloadError::Api`] carrying the server's message.

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};

use caseload_core::config::ApiSettings;
use caseload_core::{CaseloadError, Result, Validate};

/// Cheap-to-clone handle over one `reqwest::Client` and the bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            CaseloadError::config(format!("invalid api.base_url '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CaseloadError::config(format!(
                "api.base_url '{}' cannot be used as a base URL",
                settings.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CaseloadError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets or clears the bearer token sent with every request.
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get<T>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let request = self.request(Method::GET, segments).query(query);
        let body = self.send(request).await?;
        decode(&body)
    }

    /// Like [`get`](Self::get), but a 404 is `Ok(None)`.
    pub async fn get_optional<T>(&self, segments: &[&str]) -> Result<Option<T>>
    where
        T: DeserializeOwned + Validate,
    {
        match self.get(segments, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let request = self.request(Method::POST, segments).json(body);
        let body = self.send(request).await?;
        decode(&body)
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B>(&self, segments: &[&str], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments).json(body);
        self.send(request).await.map(|_| ())
    }

    pub async fn patch<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let request = self.request(Method::PATCH, segments).json(body);
        let body = self.send(request).await?;
        decode(&body)
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        let request = self.request(Method::DELETE, segments);
        self.send(request).await.map(|_| ())
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        tracing::debug!("{} {}", method, url);

        let request = self.http.request(method, url);
        let token = self.token.read().unwrap_or_else(|e| e.into_inner());
        match token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!("Request failed with status {}", status);
            Err(CaseloadError::api(status.as_u16(), error_message(status, &body)))
        }
    }
}

fn transport_error(err: reqwest::Error) -> CaseloadError {
    if err.is_decode() {
        CaseloadError::validation(err.to_string())
    } else {
        CaseloadError::transport(err.to_string())
    }
}

/// Parses a response body into `T` and validates it.
pub fn decode<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(body)
        .map_err(|e| CaseloadError::validation(format!("unexpected response shape: {}", e)))?;
    value.validate()?;
    Ok(value)
}

/// Message for a failed response: the body's `detail`, `message` or `error`
/// field, else the status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message", "error"].iter().find_map(|field| {
                match value.get(field)? {
                    serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    // FastAPI-style validation errors: a list of {msg}
                    serde_json::Value::Array(items) => {
                        let msgs: Vec<&str> = items
                            .iter()
                            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                            .collect();
                        (!msgs.is_empty()).then(|| msgs.join("; "))
                    }
                    _ => None,
                }
            })
        });

    from_body.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    })
}
