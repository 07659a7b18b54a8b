// Hostel REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, JSON response decoding,
// and server error extraction. Endpoint groups (public booking, admin
// dashboard, contact) are implemented as inherent methods in separate
// files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

/// Rejections come back either as plain text or as one of these JSON shapes.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the hostel backend.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct HostelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HostelClient {
    /// Create a client from a backend root URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, Self::normalize_base_url(base_url)?))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base path ends with `/` so relative joins keep it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path such as `api/user/rooms/available`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    /// GET for endpoints that answer `204 No Content` when there is nothing
    /// to return. A blank success body also maps to `None`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse_body(body).map(Some)
    }

    /// GET returning the raw JSON value, for endpoints whose shape is not trusted.
    pub(crate) async fn get_value(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, Error> {
        self.get_with_params(path, params).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url} params={params:?}");

        let resp = self.http.post(url).query(params).json(body).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url} params={params:?}");

        let mut builder = self.http.put(url).query(params);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn patch_no_response(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, path: &str, params: &[(&str, String)]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url} params={params:?}");

        let resp = self.http.delete(url).query(params).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            parse_body(resp.text().await?)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: extract_message(status, &raw),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Listing endpoints that answer 404 when the collection is empty.
pub(crate) fn empty_if_not_found<T>(
    result: Result<Vec<T>, Error>,
) -> Result<Vec<T>, Error> {
    match result {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Pull the human-readable rejection out of a response body.
///
/// JSON bodies contribute their `message` or `error` field; anything
/// else is taken verbatim. An empty body falls back to the status line.
pub(crate) fn extract_message(status: reqwest::StatusCode, raw: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(raw) {
        if let Some(msg) = err.message.or(err.error) {
            return msg;
        }
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        status.to_string()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn base_url_keeps_path_prefix() {
        let client =
            HostelClient::new("http://localhost:8080/backend", &TransportConfig::default())
                .unwrap();
        let url = client.url("api/admin/login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/backend/api/admin/login");
    }

    #[test]
    fn extract_message_prefers_json_fields() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(extract_message(status, r#"{"message":"Room full"}"#), "Room full");
        assert_eq!(extract_message(status, r#"{"error":"bad date"}"#), "bad date");
        assert_eq!(extract_message(status, "No beds available"), "No beds available");
        assert_eq!(extract_message(status, ""), "400 Bad Request");
        assert_eq!(extract_message(StatusCode::NOT_FOUND, "null"), "404 Not Found");
    }

    #[test]
    fn empty_if_not_found_only_swallows_404() {
        let missing: Result<Vec<u8>, Error> = Err(Error::Api {
            status: 404,
            message: "Beds not found".into(),
        });
        assert_eq!(empty_if_not_found(missing).unwrap(), Vec::<u8>::new());

        let failed: Result<Vec<u8>, Error> = Err(Error::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(empty_if_not_found(failed).is_err());
    }
}
