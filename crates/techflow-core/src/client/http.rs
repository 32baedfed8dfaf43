//! HTTP plumbing shared by the resource clients.

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// JSON-over-HTTP transport bound to one API root
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self::with_http_client(config, Client::new()))
    }

    /// Reuse an existing `reqwest::Client`
    pub fn with_http_client(config: &ApiConfig, http: Client) -> Self {
        Self {
            http,
            base_url: config.root().to_string(),
            token: config.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join percent-encoded path segments onto the base URL
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&utf8_percent_encode(segment, SEGMENT).to_string());
        }
        url
    }

    fn apply_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = self.endpoint(segments);
        debug!("GET {} {:?}", url, query);
        let body = self.execute(self.http.get(&url).query(query)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);
        let body = self.execute(self.http.request(method, &url).json(body)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// DELETE; any success body is ignored
    pub async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        let url = self.endpoint(segments);
        debug!("DELETE {}", url);
        self.execute(self.http.delete(&url)).await?;
        Ok(())
    }

    async fn execute(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = self.apply_auth(builder).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(ApiError::rejected(status.as_u16(), message));
        }
        Ok(body)
    }
}

/// Pull a readable message out of an error body.
///
/// Prefers a JSON `message` field (string or list of strings), then the
/// raw body text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("message") {
            Some(serde_json::Value::String(message)) => return Some(message.clone()),
            Some(serde_json::Value::Array(parts)) => {
                let joined = parts
                    .iter()
                    .filter_map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            _ => {}
        }
    }
    Some(body.to_string())
}
