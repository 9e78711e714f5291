use std::collections::HashSet;

use crate::domain::{
    Conversation, Item, Notification, NotificationType, RawEntry, SourceKind, Visibility,
};

/// Turns raw listing entries into feed [`Item`]s.
///
/// Servers do not always honour the `types[]` filter (GoToSocial returns every
/// notification type), so every entry is checked against the source it was
/// requested from.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, source: SourceKind, entries: Vec<RawEntry>) -> Vec<Item> {
        let mut seen = HashSet::new();

        entries
            .into_iter()
            .filter_map(|entry| self.normalize_entry(source, entry))
            .filter(|item| seen.insert(item.id.clone()))
            .collect()
    }

    fn normalize_entry(&self, source: SourceKind, entry: RawEntry) -> Option<Item> {
        match (source, entry) {
            (SourceKind::Mentions, RawEntry::Notification(n)) => mention(n, source),
            (SourceKind::DirectMentions, RawEntry::Notification(n)) => {
                mention(n, source).filter(|item| item.visibility == Visibility::Direct)
            }
            (SourceKind::Conversations, RawEntry::Conversation(c)) => conversation(c),
            (source, entry) => {
                tracing::warn!(
                    "Dropping entry {} that does not belong to {:?}",
                    entry.entry_id(),
                    source
                );
                None
            }
        }
    }
}

fn mention(notification: Notification, source: SourceKind) -> Option<Item> {
    if notification.kind != NotificationType::Mention {
        return None;
    }
    let Some(status) = notification.status else {
        tracing::debug!("Mention {} has no status", notification.id);
        return None;
    };
    Some(Item::new(notification.id, status, source))
}

fn conversation(conversation: Conversation) -> Option<Item> {
    let status = conversation.last_status?;
    Some(Item::new(status.id.clone(), status, SourceKind::Conversations))
}
