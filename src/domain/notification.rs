use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{Account, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "mention")]
    Mention,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "reblog")]
    Reblog,
    #[serde(rename = "follow")]
    Follow,
    #[serde(rename = "follow_request")]
    FollowRequest,
    #[serde(rename = "favourite")]
    Favourite,
    #[serde(rename = "poll")]
    Poll,
    #[serde(rename = "update")]
    Update,
    #[serde(rename = "admin.sign_up")]
    AdminSignUp,
    #[serde(rename = "admin.report")]
    AdminReport,
    /// Server-specific extensions (emoji reactions, moves, ...)
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Value used for the `types[]` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Mention => "mention",
            NotificationType::Status => "status",
            NotificationType::Reblog => "reblog",
            NotificationType::Follow => "follow",
            NotificationType::FollowRequest => "follow_request",
            NotificationType::Favourite => "favourite",
            NotificationType::Poll => "poll",
            NotificationType::Update => "update",
            NotificationType::AdminSignUp => "admin.sign_up",
            NotificationType::AdminReport => "admin.report",
            NotificationType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub created_at: DateTime<Utc>,
    pub account: Account,
    #[serde(default)]
    pub status: Option<Status>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENTION_JSON: &str = r#"{
        "id": "34975861",
        "type": "mention",
        "created_at": "2019-11-23T07:49:02.064Z",
        "account": {"id": "971724", "username": "zsc", "acct": "zsc", "display_name": "zsc"},
        "status": {
            "id": "103186126728896492",
            "created_at": "2019-11-23T07:49:01.940Z",
            "content": "<p>hi</p>",
            "visibility": "direct",
            "account": {"id": "971724", "username": "zsc", "acct": "zsc", "display_name": ""}
        }
    }"#;

    #[test]
    fn test_deserialize_mention() {
        let n: Notification = serde_json::from_str(MENTION_JSON).unwrap();
        assert_eq!(n.kind, NotificationType::Mention);
        let status = n.status.unwrap();
        assert_eq!(status.id, "103186126728896492");
        assert_eq!(status.visibility, super::super::Visibility::Direct);
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let json = r#"{
            "id": "1",
            "type": "pleroma:emoji_reaction",
            "created_at": "2019-11-23T07:49:02.064Z",
            "account": {"id": "2", "username": "bob", "acct": "bob"}
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationType::Unknown);
        assert!(n.status.is_none());
    }

    #[test]
    fn test_type_query_values() {
        assert_eq!(NotificationType::Mention.as_str(), "mention");
        assert_eq!(NotificationType::AdminSignUp.as_str(), "admin.sign_up");
    }
}
