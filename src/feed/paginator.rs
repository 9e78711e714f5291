use crate::app::Result;
use crate::client::{ListQuery, MastodonApi, Page};
use crate::domain::{RawEntry, SourceKind};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Raw entries of one page plus whether the listing has more.
#[derive(Debug)]
pub struct RawPage {
    pub entries: Vec<RawEntry>,
    pub done: bool,
}

/// Walks a listing endpoint from newest to oldest, one page per call.
pub struct Paginator {
    source: SourceKind,
    page_size: u32,
    cursor: Cursor,
}

impl Paginator {
    pub fn new(source: SourceKind, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            cursor: Cursor::Start,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Fetch the next page. Once the listing is exhausted this returns empty
    /// pages without contacting the server. On error the cursor is left as
    /// it was, so the same page can be retried.
    pub async fn next_page(&mut self, api: &dyn MastodonApi) -> Result<RawPage> {
        let max_id = match &self.cursor {
            Cursor::Exhausted => {
                return Ok(RawPage {
                    entries: vec![],
                    done: true,
                })
            }
            Cursor::Start => None,
            Cursor::Next(max_id) => Some(max_id.clone()),
        };

        let query = source_query(self.source, self.page_size).max_id(max_id.as_deref());
        let page = fetch_raw(api, self.source, &query).await?;

        self.cursor = match page.next_max_id {
            _ if page.entries.is_empty() => Cursor::Exhausted,
            Some(next) => Cursor::Next(next),
            // No Link header; keep paging from the oldest entry while pages are full
            None if page.entries.len() as u32 >= self.page_size => page
                .entries
                .last()
                .map(|e| Cursor::Next(e.entry_id().to_string()))
                .unwrap_or(Cursor::Exhausted),
            None => Cursor::Exhausted,
        };

        tracing::debug!(
            "{:?}: fetched {} entries, cursor {:?}",
            self.source,
            page.entries.len(),
            self.cursor
        );

        Ok(RawPage {
            entries: page.entries,
            done: self.is_exhausted(),
        })
    }
}

/// Base query for a source: page size plus the server-side type filter.
pub(crate) fn source_query(source: SourceKind, limit: u32) -> ListQuery {
    let query = ListQuery::new(limit);
    match source.notification_types() {
        Some(types) => query.types(types),
        None => query,
    }
}

/// Call the endpoint backing `source` and wrap its entries as [`RawEntry`].
pub(crate) async fn fetch_raw(
    api: &dyn MastodonApi,
    source: SourceKind,
    query: &ListQuery,
) -> Result<Page<RawEntry>> {
    match source {
        SourceKind::Mentions | SourceKind::DirectMentions => {
            let page = api.list_notifications(query).await?;
            Ok(Page::new(
                page.entries.into_iter().map(RawEntry::Notification).collect(),
                page.next_max_id,
            ))
        }
        SourceKind::Conversations => {
            let page = api.list_conversations(query).await?;
            Ok(Page::new(
                page.entries.into_iter().map(RawEntry::Conversation).collect(),
                page.next_max_id,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuskError;
    use crate::client::mock::{conversation, mention, MockApi};
    use crate::domain::NotificationType;

    #[test]
    fn test_follows_link_cursor() {
        let api = MockApi::new();
        api.push_notifications(Ok(Page::new(vec![mention("5"), mention("4")], Some("4".into()))));
        api.push_notifications(Ok(Page::new(vec![mention("3")], None)));

        let mut paginator = Paginator::new(SourceKind::Mentions, 20);
        tokio_test::block_on(async {
            let first = paginator.next_page(&api).await.unwrap();
            assert_eq!(first.entries.len(), 2);
            assert!(!first.done);

            let second = paginator.next_page(&api).await.unwrap();
            assert_eq!(second.entries.len(), 1);
            assert!(second.done);
        });

        let queries = api.notification_queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].limit, 20);
        assert_eq!(queries[0].types, vec![NotificationType::Mention]);
        assert_eq!(queries[0].max_id, None);
        assert_eq!(queries[1].max_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_exhausted_cursor_skips_network() {
        let api = MockApi::new();
        let mut paginator = Paginator::new(SourceKind::Mentions, 20);

        tokio_test::block_on(async {
            let page = paginator.next_page(&api).await.unwrap();
            assert!(page.entries.is_empty());
            assert!(page.done);

            let again = paginator.next_page(&api).await.unwrap();
            assert!(again.entries.is_empty());
        });

        assert_eq!(api.notification_queries().len(), 1);
        assert!(paginator.is_exhausted());
    }

    #[test]
    fn test_full_page_without_link_continues_from_last_entry() {
        let api = MockApi::new();
        api.push_conversations(Ok(Page::new(
            vec![conversation("c2", Some("20")), conversation("c1", Some("10"))],
            None,
        )));

        let mut paginator = Paginator::new(SourceKind::Conversations, 2);
        tokio_test::block_on(async {
            paginator.next_page(&api).await.unwrap();
            paginator.next_page(&api).await.unwrap();
        });

        let queries = api.conversation_queries();
        assert!(queries[0].types.is_empty());
        assert_eq!(queries[1].max_id.as_deref(), Some("10"));
    }

    #[test]
    fn test_error_keeps_cursor() {
        let api = MockApi::new();
        api.push_notifications(Err(TuskError::Other("timeout".into())));
        api.push_notifications(Ok(Page::new(vec![mention("1")], None)));

        let mut paginator = Paginator::new(SourceKind::Mentions, 20);
        tokio_test::block_on(async {
            assert!(paginator.next_page(&api).await.is_err());
            let page = paginator.next_page(&api).await.unwrap();
            assert_eq!(page.entries.len(), 1);
        });

        assert_eq!(api.notification_queries()[1].max_id, None);
    }
}
