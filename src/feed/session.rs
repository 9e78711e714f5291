use crate::app::Result;
use crate::client::MastodonApi;
use crate::domain::SourceKind;
use crate::feed::paginator::Paginator;
use crate::feed::update;
use crate::feed::{FeedPage, SourceResult};
use crate::normalizer::Normalizer;
use crate::store::StatusStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    FirstLoadPending,
    Loaded,
    UpdateAvailable,
}

/// Pagination cursor and high-water mark for one mode.
pub struct Session {
    source: SourceKind,
    page_size: u32,
    paginator: Option<Paginator>,
    high_water_mark: Option<String>,
    state: SessionState,
}

impl Session {
    pub fn new(source: SourceKind, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            paginator: None,
            high_water_mark: None,
            state: SessionState::Uninitialized,
        }
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn high_water_mark(&self) -> Option<&str> {
        self.high_water_mark.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn reset(&mut self) {
        self.paginator = None;
        self.high_water_mark = None;
        self.state = SessionState::Uninitialized;
    }

    /// Point the session at another source, discarding its cursor and mark.
    pub fn switch_source(&mut self, source: SourceKind) {
        self.source = source;
        self.reset();
    }

    pub async fn fetch(
        &mut self,
        api: &dyn MastodonApi,
        store: &dyn StatusStore,
        normalizer: &Normalizer,
        first_load: bool,
    ) -> Result<SourceResult<FeedPage>> {
        if self.paginator.is_none() {
            self.state = SessionState::FirstLoadPending;
        }

        // A reload pages from a fresh cursor and only replaces the current
        // cursor and mark once its first page has arrived.
        let (source, page_size) = (self.source, self.page_size);
        let restart = first_load || self.paginator.is_none();
        let mut fresh = Paginator::new(source, page_size);
        let paginator = match self.paginator.as_mut() {
            Some(current) if !restart => current,
            _ => &mut fresh,
        };

        let raw = match paginator.next_page(api).await {
            Ok(raw) => raw,
            Err(e) if e.is_unsupported() => return Ok(SourceResult::Unsupported),
            Err(e) => return Err(e),
        };

        let raw_count = raw.entries.len();
        let items = normalizer.normalize(source, raw.entries);

        for item in &items {
            store.save_status(&item.status, api.instance())?;
        }

        if restart {
            self.paginator = Some(fresh);
            self.high_water_mark = items.first().map(|item| item.id.clone());
            tracing::debug!(
                "{:?}: first load, high-water mark {:?}",
                source,
                self.high_water_mark
            );
            self.state = SessionState::Loaded;
        }

        Ok(SourceResult::Supported(FeedPage {
            items,
            raw_count,
            done: raw.done,
        }))
    }

    /// Probe for entries newer than the high-water mark, advancing the mark
    /// when one is found. The pagination cursor is left alone.
    pub async fn check_for_updates(
        &mut self,
        api: &dyn MastodonApi,
        normalizer: &Normalizer,
    ) -> Result<SourceResult<bool>> {
        let newer =
            match update::probe(api, normalizer, self.source, self.high_water_mark()).await? {
                SourceResult::Supported(newer) => newer,
                SourceResult::Unsupported => return Ok(SourceResult::Unsupported),
            };

        match newer {
            Some(id) => {
                tracing::info!("{:?}: new item {} available", self.source, id);
                self.high_water_mark = Some(id);
                self.state = SessionState::UpdateAvailable;
                Ok(SourceResult::Supported(true))
            }
            None => Ok(SourceResult::Supported(false)),
        }
    }
}
