//! Transport-abstracted HTTP layer for the Discord REST API.
//!
//! Everything above this module builds an [`ApiRequest`] and hands it to an
//! [`HttpTransport`]. The production transport is [`DiscordHttpClient`]
//! (behind the `io` feature), which owns auth headers, rate-limit back-off,
//! multipart encoding and error mapping. Tests plug in a recording mock.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::error::TransportError;

// ---------------------------------------------------------------------------
// Request model
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded alongside a message body.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl FileAttachment {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// Read a file from disk; the attachment is named after the file.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self { filename, data })
    }
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("filename", &self.filename)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// One REST call, independent of the HTTP backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the API base, without a leading slash.
    pub path: String,
    /// Template used for rate-limit bucketing, e.g. `POST /channels/{id}/messages`.
    pub route_key: String,
    pub body: Option<Value>,
    /// When non-empty the body is sent as `payload_json` in a multipart form.
    pub files: Vec<FileAttachment>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, route_key: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            route_key: route_key.into(),
            body: None,
            files: Vec::new(),
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn files(mut self, files: Vec<FileAttachment>) -> Self {
        self.files = files;
        self
    }

    /// `METHOD /path`, used in logs and error messages.
    pub fn describe(&self) -> String {
        format!("{} /{}", self.method, self.path)
    }
}

/// Anything that can execute an [`ApiRequest`].
///
/// Returns the parsed JSON response body, or `Value::Null` for empty
/// (`204 No Content`) responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

/// Build a multipart/form-data body as raw bytes.
///
/// Produces a `payload_json` part when a body is present, then one
/// `files[n]` part per attachment.
#[cfg_attr(not(feature = "io"), allow(dead_code))]
pub(crate) fn build_multipart(
    boundary: &str,
    payload: Option<&Value>,
    files: &[FileAttachment],
) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(payload) = payload {
        buf.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        buf.extend_from_slice(b"Content-Disposition: form-data; name=\"payload_json\"\r\n");
        buf.extend_from_slice(b"Content-Type: application/json\r\n\r\n");
        buf.extend_from_slice(payload.to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    for (index, file) in files.iter().enumerate() {
        buf.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files[{index}]\"; \
                 filename=\"{}\"\r\n",
                file.filename.replace('"', "'")
            )
            .as_bytes(),
        );
        buf.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        buf.extend_from_slice(&file.data);
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    buf
}

#[cfg_attr(not(feature = "io"), allow(dead_code))]
pub(crate) fn parse_body(bytes: &[u8]) -> Result<Value, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        let raw = String::from_utf8_lossy(bytes);
        let preview: String = raw.chars().take(200).collect();
        TransportError::Serde(format!("{e}: {preview}"))
    })
}

#[cfg(feature = "io")]
pub use client::DiscordHttpClient;

#[cfg(feature = "io")]
mod client {
    use async_lock::Mutex;
    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
    use reqwest::StatusCode;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tracing::{debug, warn};

    use super::{build_multipart, parse_body, ApiRequest, HttpMethod, HttpTransport};
    use crate::config::ClientConfig;
    use crate::error::TransportError;

    const MAX_BACKOFF: Duration = Duration::from_secs(60);

    // -----------------------------------------------------------------------
    // Rate-limit tracker (per-bucket)
    // -----------------------------------------------------------------------

    #[derive(Debug, Clone, Default)]
    struct RateLimitInfo {
        remaining: Option<u32>,
        reset_after: Option<f64>,
        bucket: Option<String>,
        is_global: bool,
    }

    #[derive(Debug, Clone)]
    struct BucketState {
        remaining: u32,
        resets_at: Instant,
    }

    #[derive(Debug, Clone, Default)]
    struct RateLimiter {
        /// Route-key → bucket id mapping.
        route_buckets: HashMap<String, String>,
        /// Bucket id → state.
        buckets: HashMap<String, BucketState>,
        /// No request may be sent before this instant.
        global_until: Option<Instant>,
    }

    impl RateLimiter {
        /// How long to wait before sending on `route_key`, if at all.
        fn delay_for(&self, route_key: &str) -> Option<Duration> {
            let now = Instant::now();
            if let Some(until) = self.global_until {
                if until > now {
                    return Some(until - now);
                }
            }

            let bucket_id = self.route_buckets.get(route_key)?;
            let state = self.buckets.get(bucket_id)?;
            (state.remaining == 0 && state.resets_at > now).then(|| state.resets_at - now)
        }

        fn update(&mut self, route_key: &str, info: &RateLimitInfo) {
            let reset_after = info.reset_after.map(|s| Duration::from_secs_f64(s.max(0.0)));

            if info.is_global {
                if let Some(reset_after) = reset_after {
                    self.global_until = Some(Instant::now() + reset_after);
                }
            }

            if let Some(bucket) = &info.bucket {
                self.route_buckets
                    .insert(route_key.to_string(), bucket.clone());
                self.buckets.insert(
                    bucket.clone(),
                    BucketState {
                        remaining: info.remaining.unwrap_or(1),
                        resets_at: Instant::now() + reset_after.unwrap_or(Duration::from_secs(1)),
                    },
                );
            }
        }
    }

    fn parse_rate_limit_headers(headers: &HeaderMap) -> RateLimitInfo {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        RateLimitInfo {
            remaining: header("x-ratelimit-remaining").and_then(|s| s.parse().ok()),
            reset_after: header("x-ratelimit-reset-after").and_then(|s| s.parse().ok()),
            bucket: header("x-ratelimit-bucket").map(str::to_string),
            is_global: header("x-ratelimit-global") == Some("true"),
        }
    }

    // -----------------------------------------------------------------------
    // DiscordHttpClient
    // -----------------------------------------------------------------------

    /// A rate-limit–aware HTTP client for the Discord REST API.
    ///
    /// Cheap to clone (internals are behind `Arc`).
    #[derive(Clone)]
    pub struct DiscordHttpClient {
        http: reqwest::Client,
        config: Arc<ClientConfig>,
        limiter: Arc<Mutex<RateLimiter>>,
    }

    impl DiscordHttpClient {
        pub fn new(config: ClientConfig) -> Self {
            Self {
                http: reqwest::Client::new(),
                config: Arc::new(config),
                limiter: Arc::new(Mutex::new(RateLimiter::default())),
            }
        }

        fn url(&self, path: &str) -> String {
            format!(
                "{}/{}",
                self.config.api_base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }

        fn build(&self, request: &ApiRequest) -> Result<reqwest::RequestBuilder, TransportError> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let builder = self
                .http
                .request(method, self.url(&request.path))
                .header(AUTHORIZATION, format!("Bot {}", self.config.token))
                .header(USER_AGENT, &self.config.user_agent);

            if !request.files.is_empty() {
                let boundary = format!("HelloComponents{:016x}", rand::random::<u64>());
                let body = build_multipart(&boundary, request.body.as_ref(), &request.files);
                return Ok(builder
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(body));
            }

            Ok(match &request.body {
                Some(json) => builder.json(json),
                None => builder,
            })
        }

        async fn wait_for_bucket(&self, route_key: &str) {
            let delay = self.limiter.lock().await.delay_for(route_key);
            if let Some(delay) = delay {
                let delay = delay.min(MAX_BACKOFF);
                debug!(
                    route = route_key,
                    delay_ms = delay.as_millis() as u64,
                    "rate-limit pre-emptive backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl HttpTransport for DiscordHttpClient {
        async fn request(&self, request: ApiRequest) -> Result<Value, TransportError> {
            let route_key = request.route_key.as_str();
            let max_retries = self.config.max_retries;

            for attempt in 0..=max_retries {
                self.wait_for_bucket(route_key).await;

                debug!(route = route_key, attempt, "sending {}", request.describe());
                let resp = self
                    .build(&request)?
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;

                let status = resp.status();
                let rl_info = parse_rate_limit_headers(resp.headers());
                self.limiter.lock().await.update(route_key, &rl_info);

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = rl_info.reset_after.unwrap_or(1.0);
                    let delay = Duration::from_secs_f64(retry_after.max(0.0)).min(MAX_BACKOFF);
                    warn!(
                        route = route_key,
                        attempt,
                        retry_after_s = retry_after,
                        global = rl_info.is_global,
                        "rate-limited by Discord, backing off"
                    );

                    if rl_info.is_global {
                        self.limiter.lock().await.global_until = Some(Instant::now() + delay);
                    }

                    if attempt < max_retries {
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }

                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;

                if status.is_success() {
                    return parse_body(&bytes);
                }

                return Err(TransportError::Api {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                    route: request.describe(),
                });
            }

            Err(TransportError::Api {
                status: 429,
                body: "rate-limited after max retries".to_string(),
                route: request.describe(),
            })
        }
    }

    impl fmt::Debug for DiscordHttpClient {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("DiscordHttpClient")
                .field("api_base", &self.config.api_base)
                .field("token", &"<redacted>")
                .finish()
        }
    }

}
