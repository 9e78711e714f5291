use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::{Result, TuskError};
use crate::client::{ListQuery, MastodonApi, Page};
use crate::config::HttpConfig;
use crate::domain::{Conversation, Notification};

const NOTIFICATIONS_PATH: &str = "/api/v1/notifications";
const CONVERSATIONS_PATH: &str = "/api/v1/conversations";

/// reqwest-backed client for the Mastodon REST API.
pub struct HttpClient {
    client: Client,
    base_url: Url,
    instance: String,
    access_token: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: &str, access_token: Option<String>, http: &HttpConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let instance = match (base_url.host_str(), base_url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TuskError::Config(format!(
                    "Instance URL has no host: {}",
                    base_url
                )))
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(http.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            instance,
            access_token,
        })
    }

    fn build_url(&self, path: &str, query: &ListQuery) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            for kind in &query.types {
                pairs.append_pair("types[]", kind.as_str());
            }
            if let Some(since_id) = &query.since_id {
                pairs.append_pair("since_id", since_id);
            }
            if let Some(max_id) = &query.max_id {
                pairs.append_pair("max_id", max_id);
            }
        }
        Ok(url)
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Result<Page<T>> {
        let url = self.build_url(path, query)?;
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if is_unsupported_status(status) {
            return Err(TuskError::Unsupported(path.to_string()));
        }
        if !status.is_success() {
            return Err(TuskError::HttpStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let next_max_id = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_max_id);

        let body = response.bytes().await?;
        let entries: Vec<T> = serde_json::from_slice(&body)?;

        Ok(Page::new(entries, next_max_id))
    }
}

#[async_trait]
impl MastodonApi for HttpClient {
    fn instance(&self) -> &str {
        &self.instance
    }

    async fn list_notifications(&self, query: &ListQuery) -> Result<Page<Notification>> {
        self.list(NOTIFICATIONS_PATH, query).await
    }

    async fn list_conversations(&self, query: &ListQuery) -> Result<Page<Conversation>> {
        self.list(CONVERSATIONS_PATH, query).await
    }
}

/// Status codes servers answer with when an endpoint does not exist.
fn is_unsupported_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::NOT_FOUND
            | StatusCode::METHOD_NOT_ALLOWED
            | StatusCode::GONE
            | StatusCode::NOT_IMPLEMENTED
    )
}

/// Extract `max_id` from the `rel="next"` target of a `Link` header.
fn parse_next_max_id(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }

        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "max_id")
            .map(|(_, value)| value.into_owned())
    })
}
