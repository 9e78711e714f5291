use serde::{Deserialize, Serialize};

use super::status::{Account, Status};

/// A direct-message thread from `/api/v1/conversations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub last_status: Option<Status>,
}

impl Conversation {
    /// Conversations are paginated by the id of their latest status, so that is
    /// the id the feed tracks.
    pub fn entry_id(&self) -> &str {
        self.last_status
            .as_ref()
            .map(|s| s.id.as_str())
            .unwrap_or(&self.id)
    }
}
