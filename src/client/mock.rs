//! Scripted [`MastodonApi`] used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, TuskError};
use crate::client::{ListQuery, MastodonApi, Page};
use crate::domain::status::tests::make_status;
use crate::domain::{Account, Conversation, Notification, NotificationType, Visibility};

pub const INSTANCE: &str = "example.social";

/// Queued responses are served in order; an empty queue answers with an empty
/// page.
#[derive(Default)]
pub struct MockApi {
    notifications: Mutex<VecDeque<Result<Page<Notification>>>>,
    conversations: Mutex<VecDeque<Result<Page<Conversation>>>>,
    notification_queries: Mutex<Vec<ListQuery>>,
    conversation_queries: Mutex<Vec<ListQuery>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_notifications(&self, response: Result<Page<Notification>>) {
        self.notifications.lock().unwrap().push_back(response);
    }

    pub fn push_conversations(&self, response: Result<Page<Conversation>>) {
        self.conversations.lock().unwrap().push_back(response);
    }

    pub fn notification_queries(&self) -> Vec<ListQuery> {
        self.notification_queries.lock().unwrap().clone()
    }

    pub fn conversation_queries(&self) -> Vec<ListQuery> {
        self.conversation_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MastodonApi for MockApi {
    fn instance(&self) -> &str {
        INSTANCE
    }

    async fn list_notifications(&self, query: &ListQuery) -> Result<Page<Notification>> {
        self.notification_queries.lock().unwrap().push(query.clone());
        self.notifications
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::new(vec![], None)))
    }

    async fn list_conversations(&self, query: &ListQuery) -> Result<Page<Conversation>> {
        self.conversation_queries.lock().unwrap().push(query.clone());
        self.conversations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::new(vec![], None)))
    }
}

pub fn unsupported_conversations() -> TuskError {
    TuskError::Unsupported("/api/v1/conversations".into())
}

pub fn notification(id: &str, kind: NotificationType, visibility: Visibility) -> Notification {
    let status = match kind {
        NotificationType::Mention | NotificationType::Favourite | NotificationType::Reblog => {
            Some(make_status(&format!("s{id}"), visibility))
        }
        _ => None,
    };
    Notification {
        id: id.to_string(),
        kind,
        created_at: make_status(id, visibility).created_at,
        account: Account {
            id: "2".into(),
            username: "bob".into(),
            acct: "bob".into(),
            display_name: "Bob".into(),
        },
        status,
    }
}

pub fn mention(id: &str) -> Notification {
    notification(id, NotificationType::Mention, Visibility::Public)
}

pub fn direct_mention(id: &str) -> Notification {
    notification(id, NotificationType::Mention, Visibility::Direct)
}

pub fn conversation(id: &str, last_status_id: Option<&str>) -> Conversation {
    Conversation {
        id: id.to_string(),
        unread: false,
        accounts: vec![],
        last_status: last_status_id.map(|s| make_status(s, Visibility::Direct)),
    }
}
