use crate::app::Result;
use crate::client::MastodonApi;
use crate::domain::SourceKind;
use crate::feed::paginator::{fetch_raw, source_query};
use crate::feed::SourceResult;
use crate::normalizer::Normalizer;

/// Entries requested by an update probe.
pub const PROBE_LIMIT: u32 = 1;

/// Ask `source` whether anything is newer than `high_water_mark`.
///
/// Returns the id of the newer item, or `None`. The newest entry echoing the
/// high-water mark back means the server ignored `since_id`, which counts as
/// no update.
pub async fn probe(
    api: &dyn MastodonApi,
    normalizer: &Normalizer,
    source: SourceKind,
    high_water_mark: Option<&str>,
) -> Result<SourceResult<Option<String>>> {
    let query = source_query(source, PROBE_LIMIT).since_id(high_water_mark);

    let page = match fetch_raw(api, source, &query).await {
        Ok(page) => page,
        Err(e) if e.is_unsupported() => return Ok(SourceResult::Unsupported),
        Err(e) => return Err(e),
    };

    if let (Some(newest), Some(mark)) = (page.entries.first(), high_water_mark) {
        if newest.entry_id() == mark {
            tracing::debug!("{:?}: probe returned the high-water mark {}", source, mark);
            return Ok(SourceResult::Supported(None));
        }
    }

    let newer = normalizer
        .normalize(source, page.entries)
        .into_iter()
        .next()
        .map(|item| item.id)
        .filter(|id| Some(id.as_str()) != high_water_mark);

    Ok(SourceResult::Supported(newer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuskError;
    use crate::client::mock::{
        conversation, mention, notification, unsupported_conversations, MockApi,
    };
    use crate::client::Page;
    use crate::domain::{NotificationType, Visibility};

    #[tokio::test]
    async fn test_probe_query_shape() {
        let api = MockApi::new();
        probe(&api, &Normalizer::new(), SourceKind::Mentions, Some("5"))
            .await
            .unwrap();

        let query = &api.notification_queries()[0];
        assert_eq!(query.limit, 1);
        assert_eq!(query.since_id.as_deref(), Some("5"));
        assert_eq!(query.types, vec![NotificationType::Mention]);
    }

    #[tokio::test]
    async fn test_probe_ignored_since_id() {
        let api = MockApi::new();
        api.push_notifications(Ok(Page::new(vec![mention("5")], None)));

        let result = probe(&api, &Normalizer::new(), SourceKind::Mentions, Some("5"))
            .await
            .unwrap();
        assert_eq!(result, SourceResult::Supported(None));
    }

    #[tokio::test]
    async fn test_probe_newer_mention() {
        let api = MockApi::new();
        api.push_notifications(Ok(Page::new(vec![mention("6")], None)));

        let result = probe(&api, &Normalizer::new(), SourceKind::Mentions, Some("5"))
            .await
            .unwrap();
        assert_eq!(result, SourceResult::Supported(Some("6".to_string())));
    }

    #[tokio::test]
    async fn test_probe_filters_wrong_type() {
        let api = MockApi::new();
        api.push_notifications(Ok(Page::new(
            vec![notification("6", NotificationType::Favourite, Visibility::Public)],
            None,
        )));

        let result = probe(&api, &Normalizer::new(), SourceKind::Mentions, Some("5"))
            .await
            .unwrap();
        assert_eq!(result, SourceResult::Supported(None));
    }

    #[tokio::test]
    async fn test_probe_conversations_by_last_status() {
        let api = MockApi::new();
        api.push_conversations(Ok(Page::new(vec![conversation("c1", Some("30"))], None)));

        let result = probe(&api, &Normalizer::new(), SourceKind::Conversations, Some("30"))
            .await
            .unwrap();
        assert_eq!(result, SourceResult::Supported(None));
    }

    #[tokio::test]
    async fn test_probe_unsupported_and_errors() {
        let api = MockApi::new();
        api.push_conversations(Err(unsupported_conversations()));
        api.push_conversations(Err(TuskError::Other("reset".into())));

        let normalizer = Normalizer::new();
        let result = probe(&api, &normalizer, SourceKind::Conversations, None)
            .await
            .unwrap();
        assert_eq!(result, SourceResult::Unsupported);

        assert!(probe(&api, &normalizer, SourceKind::Conversations, None)
            .await
            .is_err());
    }
}
