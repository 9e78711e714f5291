use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
}

impl Account {
    pub fn display_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.acct
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub content: String,
    pub visibility: Visibility,
    pub account: Account,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
}

impl Status {
    /// Render the HTML `content` as plain text.
    ///
    /// Line breaks and paragraph ends become newlines, every other tag is
    /// dropped, and entities are decoded.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find('<') {
            out.push_str(&rest[..start]);
            let Some(len) = rest[start..].find('>') else {
                // Unterminated tag, keep the text verbatim
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let tag = &rest[start + 1..start + len];
            let closing = tag.starts_with('/');
            let name = tag
                .trim_start_matches('/')
                .split(|c: char| c.is_whitespace() || c == '/')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();

            match name.as_str() {
                "br" => out.push('\n'),
                "p" if closing => out.push_str("\n\n"),
                _ => {}
            }

            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);

        decode_html_entities(out.trim_end()).to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub fn make_status(id: &str, visibility: Visibility) -> Status {
        Status {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            content: format!("<p>status {id}</p>"),
            visibility,
            account: Account {
                id: "1".into(),
                username: "alice".into(),
                acct: "alice@example.social".into(),
                display_name: "Alice".into(),
            },
            url: None,
            spoiler_text: String::new(),
            in_reply_to_id: None,
        }
    }

    #[test]
    fn test_plain_text_strips_mention_markup() {
        let mut status = make_status("1", Visibility::Public);
        status.content = r#"<p>Hi <span class="h-card"><a href="https://example.social/@bob">@<span>bob</span></a></span> &amp; co</p>"#.into();
        assert_eq!(status.plain_text(), "Hi @bob & co");
    }

    #[test]
    fn test_plain_text_paragraphs_and_breaks() {
        let mut status = make_status("1", Visibility::Public);
        status.content = "<p>one<br>two<br />three</p><p>four</p>".into();
        assert_eq!(status.plain_text(), "one\ntwo\nthree\n\nfour");
    }

    #[test]
    fn test_plain_text_unterminated_tag() {
        let mut status = make_status("1", Visibility::Public);
        status.content = "a < b".into();
        assert_eq!(status.plain_text(), "a < b");
    }

    #[test]
    fn test_display_name_falls_back_to_acct() {
        let mut status = make_status("1", Visibility::Public);
        status.account.display_name = "  ".into();
        assert_eq!(status.account.display_name(), "alice@example.social");
    }

    #[test]
    fn test_unknown_visibility_deserializes() {
        let v: Visibility = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(v, Visibility::Unknown);
        let v: Visibility = serde_json::from_str("\"direct\"").unwrap();
        assert_eq!(v, Visibility::Direct);
    }
}
