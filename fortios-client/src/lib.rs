//! FortiOS API Client for the Terraform Provider
//!
//! Talks to the FortiGate REST API: configuration objects under
//! `/api/v2/cmdb/<path>` and read-only device state under `/api/v2/monitor`.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, SET_COOKIE};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Authentication failed")]
    AuthFailed,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Response envelope returned by the FortiOS configuration API.
///
/// Every CMDB call answers with this shape; `results` carries the object
/// payload on reads and `mkey` the device-assigned identifier on writes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub http_status: Option<i64>,
    #[serde(default)]
    pub mkey: Option<serde_json::Value>,
    #[serde(default)]
    pub results: Option<serde_json::Value>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub vdom: Option<String>,
}

impl ApiResponse {
    /// The device-assigned identifier, stringified.
    ///
    /// FortiOS returns integer mkeys for id-keyed tables and strings for
    /// name-keyed ones; Terraform tracks both as strings.
    pub fn mkey_string(&self) -> Option<String> {
        match &self.mkey {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    fn check(self) -> Result<ApiResponse> {
        if let Some(status) = &self.status {
            if status != "success" {
                return Err(ClientError::Api {
                    status: self.http_status.unwrap_or(500) as u16,
                    message: format!("device returned status {status}"),
                });
            }
        }
        Ok(self)
    }
}

/// FortiOS API Client
#[derive(Clone)]
pub struct FortiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    csrf_token: Option<String>,
    insecure: bool,
    retries: u32,
}

impl FortiClient {
    /// Create a new client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Self::build_http_client(false),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            csrf_token: None,
            insecure: false,
            retries: 0,
        }
    }

    fn build_http_client(insecure: bool) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .danger_accept_invalid_certs(insecure)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Set API token authentication
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Skip TLS verification (self-signed device certificates)
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        if insecure != self.insecure {
            self.insecure = insecure;
            self.client = Self::build_http_client(insecure);
        }
        self
    }

    /// Number of additional attempts for transient failures
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Authenticate with username and password via `/logincheck`.
    ///
    /// The session cookie lands in the cookie store; the CSRF token must be
    /// echoed back as `X-CSRFTOKEN` on every mutating call.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/logincheck", self.base_url);
        let body = format!(
            "username={}&secretkey={}&ajax=1",
            urlencode(username),
            urlencode(password)
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::AuthFailed);
        }

        let csrf = extract_csrf_token(response.headers());
        let text = response.text().await?;
        // The device answers "1" on success, "0" on bad credentials.
        if !text.starts_with('1') {
            return Err(ClientError::AuthFailed);
        }

        self.csrf_token = csrf;
        Ok(())
    }

    /// Build headers for requests
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        if let Some(csrf) = &self.csrf_token {
            if let Ok(value) = HeaderValue::from_str(csrf) {
                headers.insert("X-CSRFTOKEN", value);
            }
        }

        headers
    }

    fn cmdb_url(&self, path: &str, mkey: Option<&str>, vdom: Option<&str>) -> String {
        let mut url = format!("{}/api/v2/cmdb/{}", self.base_url, path);
        // Singleton settings endpoints take no mkey segment.
        if let Some(mkey) = mkey.filter(|m| !m.is_empty()) {
            url.push('/');
            url.push_str(&urlencode(mkey));
        }
        if let Some(vdom) = vdom {
            url.push_str("?vdom=");
            url.push_str(&urlencode(vdom));
        }
        url
    }

    /// Send a request, retrying transient failures.
    ///
    /// Transport errors and 5xx answers are retried up to `retries` extra
    /// times; everything else is handed back to the caller as-is.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            let cloned = request.try_clone();
            let current = match cloned {
                Some(c) if attempt < self.retries => c,
                // Last attempt (or unclonable body): consume the original.
                _ => {
                    return request.send().await.map_err(ClientError::Http);
                }
            };

            match current.send().await {
                Ok(response) if response.status().is_server_error() => {
                    warn!(
                        status = response.status().as_u16(),
                        attempt, "server error, retrying"
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(error = %e, attempt, "transport error, retrying");
                }
            }
            attempt += 1;
        }
    }

    /// Handle API response
    async fn handle_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(ClientError::AuthFailed)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound("Resource not found".to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    // ========================================================================
    // CMDB operations
    // ========================================================================

    /// Create a configuration object.
    pub async fn create_object(
        &self,
        path: &str,
        body: &serde_json::Value,
        vdom: Option<&str>,
    ) -> Result<ApiResponse> {
        let url = self.cmdb_url(path, None, vdom);
        debug!("POST {url}");
        let request = self.client.post(&url).headers(self.headers()).json(body);
        let response = self.execute(request).await?;
        self.handle_response(response).await?.check()
    }

    /// Read a configuration object; `None` means it no longer exists.
    pub async fn read_object(
        &self,
        path: &str,
        mkey: &str,
        vdom: Option<&str>,
    ) -> Result<Option<serde_json::Value>> {
        let url = self.cmdb_url(path, Some(mkey), vdom);
        debug!("GET {url}");
        let request = self.client.get(&url).headers(self.headers());
        let response = self.execute(request).await?;

        let envelope = match self.handle_response(response).await {
            Ok(envelope) => envelope,
            Err(ClientError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        if let Some(status) = &envelope.status {
            if status != "success" {
                return Ok(None);
            }
        }

        // Reads come back as a one-element results array.
        match envelope.results {
            Some(serde_json::Value::Array(items)) => Ok(items.into_iter().next()),
            Some(serde_json::Value::Object(obj)) => Ok(Some(serde_json::Value::Object(obj))),
            _ => Ok(None),
        }
    }

    /// Update a configuration object in place.
    pub async fn update_object(
        &self,
        path: &str,
        mkey: &str,
        body: &serde_json::Value,
        vdom: Option<&str>,
    ) -> Result<ApiResponse> {
        let url = self.cmdb_url(path, Some(mkey), vdom);
        debug!("PUT {url}");
        let request = self.client.put(&url).headers(self.headers()).json(body);
        let response = self.execute(request).await?;
        self.handle_response(response).await?.check()
    }

    /// Delete a configuration object. A missing object is not an error.
    pub async fn delete_object(&self, path: &str, mkey: &str, vdom: Option<&str>) -> Result<()> {
        let url = self.cmdb_url(path, Some(mkey), vdom);
        debug!("DELETE {url}");
        let request = self.client.delete(&url).headers(self.headers());
        let response = self.execute(request).await?;

        match self.handle_response(response).await {
            Ok(_) => Ok(()),
            Err(ClientError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Detect the target device's firmware version.
    pub async fn update_device_version(&self) -> Result<String> {
        let url = format!("{}/api/v2/monitor/system/status", self.base_url);
        debug!("GET {url}");
        let request = self.client.get(&url).headers(self.headers());
        let response = self.execute(request).await?;
        let envelope = self.handle_response(response).await?;
        Ok(envelope.version.unwrap_or_default())
    }
}

/// Pull the `ccsrftoken` value out of the login response cookies.
fn extract_csrf_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(cookie) = value.to_str() else { continue };
        if let Some(rest) = cookie.trim_start().strip_prefix("ccsrftoken=") {
            let token = rest.split(';').next().unwrap_or("").trim_matches('"');
            if !token.is_empty() && token != "0%260" {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Minimal percent-encoding for path segments and query values.
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FortiClient::new("https://192.0.2.1/");
        assert!(client.token.is_none());
        assert_eq!(client.base_url, "https://192.0.2.1");
        assert_eq!(client.retries, 0);
    }

    #[test]
    fn test_client_with_token() {
        let client = FortiClient::new("https://192.0.2.1").with_token("test-token");
        assert_eq!(client.token, Some("test-token".to_string()));
    }

    #[test]
    fn test_cmdb_url_with_mkey_and_vdom() {
        let client = FortiClient::new("https://192.0.2.1");
        assert_eq!(
            client.cmdb_url("firewall/policy", Some("7"), Some("root")),
            "https://192.0.2.1/api/v2/cmdb/firewall/policy/7?vdom=root"
        );
        assert_eq!(
            client.cmdb_url("system.dhcp/server", None, None),
            "https://192.0.2.1/api/v2/cmdb/system.dhcp/server"
        );
        assert_eq!(
            client.cmdb_url("log.fortianalyzer/setting", Some(""), None),
            "https://192.0.2.1/api/v2/cmdb/log.fortianalyzer/setting"
        );
    }

    #[test]
    fn test_mkey_string() {
        let envelope: ApiResponse =
            serde_json::from_str(r#"{"status":"success","mkey":5}"#).unwrap();
        assert_eq!(envelope.mkey_string(), Some("5".to_string()));

        let envelope: ApiResponse =
            serde_json::from_str(r#"{"status":"success","mkey":"wan1"}"#).unwrap();
        assert_eq!(envelope.mkey_string(), Some("wan1".to_string()));

        let envelope: ApiResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(envelope.mkey_string(), None);
    }

    #[test]
    fn test_urlencode_mkey() {
        assert_eq!(urlencode("port1"), "port1");
        assert_eq!(urlencode("my policy/1"), "my%20policy%2F1");
    }

    #[test]
    fn test_extract_csrf_token() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("APSCOOKIE_123=\"sid\"; path=/; secure"),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("ccsrftoken=\"3A1B5C\"; path=/; secure"),
        );
        assert_eq!(extract_csrf_token(&headers), Some("3A1B5C".to_string()));
    }

    #[test]
    fn test_envelope_status_check() {
        let envelope: ApiResponse =
            serde_json::from_str(r#"{"status":"error","http_status":424}"#).unwrap();
        assert!(matches!(
            envelope.check(),
            Err(ClientError::Api { status: 424, .. })
        ));
    }
}
