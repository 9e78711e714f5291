pub mod http_client;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Conversation, Notification, NotificationType};

pub use http_client::HttpClient;

/// Query for a cursor-paginated listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub types: Vec<NotificationType>,
    pub since_id: Option<String>,
    pub max_id: Option<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn types(mut self, types: &[NotificationType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn since_id(mut self, since_id: Option<&str>) -> Self {
        self.since_id = since_id.map(String::from);
        self
    }

    pub fn max_id(mut self, max_id: Option<&str>) -> Self {
        self.max_id = max_id.map(String::from);
        self
    }
}

/// One page of a listing, in server order (newest first).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub entries: Vec<T>,
    /// `max_id` of the next (older) page, if the server advertised one.
    pub next_max_id: Option<String>,
}

impl<T> Page<T> {
    pub fn new(entries: Vec<T>, next_max_id: Option<String>) -> Self {
        Self {
            entries,
            next_max_id,
        }
    }
}

/// The subset of the Mastodon client API the mentions feed needs.
///
/// Implementations return [`TuskError::Unsupported`](crate::app::TuskError::Unsupported)
/// when the server does not implement an endpoint.
#[async_trait]
pub trait MastodonApi: Send + Sync {
    /// Host the statuses belong to, used as part of the cache key.
    fn instance(&self) -> &str;

    async fn list_notifications(&self, query: &ListQuery) -> Result<Page<Notification>>;

    async fn list_conversations(&self, query: &ListQuery) -> Result<Page<Conversation>>;
}
