use serde::{Deserialize, Serialize};

use super::conversation::Conversation;
use super::notification::{Notification, NotificationType};
use super::status::{Status, Visibility};

/// Which listing endpoint (and filter) a feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Mention notifications.
    Mentions,
    /// The dedicated conversations endpoint.
    Conversations,
    /// Mention notifications restricted to `direct` visibility, used when the
    /// server has no conversations endpoint.
    DirectMentions,
}

impl SourceKind {
    /// Notification types requested from the server, if the source is
    /// notification-backed.
    pub fn notification_types(&self) -> Option<&'static [NotificationType]> {
        match self {
            SourceKind::Mentions | SourceKind::DirectMentions => {
                Some(&[NotificationType::Mention])
            }
            SourceKind::Conversations => None,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            SourceKind::Mentions | SourceKind::DirectMentions => "/api/v1/notifications",
            SourceKind::Conversations => "/api/v1/conversations",
        }
    }
}

/// Entry as returned by a listing endpoint, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    Notification(Notification),
    Conversation(Conversation),
}

impl RawEntry {
    pub fn entry_id(&self) -> &str {
        match self {
            RawEntry::Notification(n) => &n.id,
            RawEntry::Conversation(c) => c.entry_id(),
        }
    }
}

/// A normalized feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Notification id, or the latest status id for conversations.
    pub id: String,
    pub status: Status,
    pub visibility: Visibility,
    pub source: SourceKind,
}

impl Item {
    pub fn new(id: impl Into<String>, status: Status, source: SourceKind) -> Self {
        Self {
            id: id.into(),
            visibility: status.visibility,
            status,
            source,
        }
    }

    pub fn status_id(&self) -> &str {
        &self.status.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::tests::make_status;

    #[test]
    fn test_item_takes_visibility_from_status() {
        let item = Item::new("n1", make_status("s1", Visibility::Direct), SourceKind::Mentions);
        assert_eq!(item.visibility, Visibility::Direct);
        assert_eq!(item.status_id(), "s1");
    }

    #[test]
    fn test_source_notification_types() {
        assert_eq!(
            SourceKind::DirectMentions.notification_types(),
            Some(&[NotificationType::Mention][..])
        );
        assert!(SourceKind::Conversations.notification_types().is_none());
    }
}
