//! The mentions feed: mode selection, paging and update detection.
//!
//! ```text
//! MentionsFeed ─┬─ Mode::Default → Session(Mentions)
//!               └─ Mode::Private → Session(Conversations | DirectMentions)
//! ```
//!
//! Each mode owns a [`Session`] holding its cursor and high-water mark.
//! When the server answers the conversations endpoint with "unsupported",
//! the private session is switched to direct mentions for the rest of the
//! feed's life.

pub mod paginator;
pub mod session;
pub mod update;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::app::{Result, TuskError};
use crate::client::MastodonApi;
use crate::domain::{Item, SourceKind};
use crate::normalizer::Normalizer;
use crate::store::StatusStore;

pub use paginator::DEFAULT_PAGE_SIZE;
pub use session::{Session, SessionState};

/// Outcome of asking a source for data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResult<T> {
    Supported(T),
    Unsupported,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every mention.
    #[default]
    Default,
    /// Private conversations only.
    Private,
}

impl Mode {
    /// Mode named by a `type` query value; anything but `private` is the
    /// default mode.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("private") => Mode::Private,
            _ => Mode::Default,
        }
    }
}

impl FromStr for Mode {
    type Err = TuskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "default" => Ok(Mode::Default),
            "private" => Ok(Mode::Private),
            other => Err(TuskError::Other(format!("Unknown mode: {}", other))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Default => write!(f, "all"),
            Mode::Private => write!(f, "private"),
        }
    }
}

/// One page of normalized items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub items: Vec<Item>,
    /// Entries the server sent before filtering.
    pub raw_count: usize,
    /// No older pages remain.
    pub done: bool,
}

/// What a timeline view needs to render the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub id: &'static str,
    pub title: String,
    pub empty_text: &'static str,
    pub error_text: &'static str,
    /// Items should be rendered from the status cache, looked up by
    /// [`Item::status_id`] rather than the entry id.
    pub use_item_id: bool,
}

pub struct MentionsFeed {
    api: Arc<dyn MastodonApi>,
    store: Arc<dyn StatusStore>,
    normalizer: Normalizer,
    mode: Mode,
    conversations_unsupported: bool,
    mentions: Session,
    private: Session,
}

impl MentionsFeed {
    pub fn new(api: Arc<dyn MastodonApi>, store: Arc<dyn StatusStore>, page_size: u32) -> Self {
        Self {
            api,
            store,
            normalizer: Normalizer::new(),
            mode: Mode::Default,
            conversations_unsupported: false,
            mentions: Session::new(SourceKind::Mentions, page_size),
            private: Session::new(SourceKind::Conversations, page_size),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Select a mode. The newly selected mode starts over from an
    /// uninitialized session.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!("Switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.session_mut(mode).reset();
    }

    /// Whether the server lacks the conversations endpoint.
    pub fn is_degraded(&self) -> bool {
        self.conversations_unsupported
    }

    pub fn source(&self) -> SourceKind {
        self.session().source()
    }

    pub fn high_water_mark(&self) -> Option<&str> {
        self.session().high_water_mark()
    }

    pub fn state(&self) -> SessionState {
        self.session().state()
    }

    pub fn view(&self) -> FeedView {
        let title = match self.mode {
            Mode::Default => "Mentions".to_string(),
            Mode::Private => "Mentions (Private)".to_string(),
        };
        let empty_text = if self.mode == Mode::Private && self.conversations_unsupported {
            "Conversation API is not implemented by this instance. No direct mentions found."
        } else {
            "No one mentioned you :("
        };

        FeedView {
            id: "mentions",
            title,
            empty_text,
            error_text: "Unable to load mentions.",
            use_item_id: true,
        }
    }

    /// Fetch the next page for the current mode, or the first page when
    /// `first_load` is set.
    ///
    /// Errors only surface on a first load; later pages degrade to an empty
    /// page so an already rendered timeline keeps working.
    pub async fn fetch_items(&mut self, first_load: bool) -> Result<FeedPage> {
        match self.fetch_with_fallback(first_load).await {
            Ok(page) => Ok(page),
            Err(e) if first_load => {
                tracing::warn!("Loading {} mentions failed: {}", self.mode, e);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("Loading more {} mentions failed: {}", self.mode, e);
                Ok(FeedPage::default())
            }
        }
    }

    /// Whether anything newer than the last seen item exists. Never fails;
    /// errors count as "no update".
    pub async fn check_for_updates(&mut self) -> bool {
        match self.active_session_check().await {
            Ok(SourceResult::Supported(found)) => found,
            Ok(SourceResult::Unsupported) => {
                self.fall_back();
                false
            }
            Err(e) => {
                tracing::debug!("Update check for {} mentions failed: {}", self.mode, e);
                false
            }
        }
    }

    async fn fetch_with_fallback(&mut self, first_load: bool) -> Result<FeedPage> {
        match self.active_session_fetch(first_load).await? {
            SourceResult::Supported(page) => return Ok(page),
            SourceResult::Unsupported => {
                if !self.fall_back() {
                    return Err(TuskError::Unsupported(self.source().endpoint().to_string()));
                }
            }
        }

        // The fallback source starts from scratch, so its first page also
        // seeds the high-water mark.
        match self.active_session_fetch(true).await? {
            SourceResult::Supported(page) => Ok(page),
            SourceResult::Unsupported => {
                Err(TuskError::Unsupported(self.source().endpoint().to_string()))
            }
        }
    }

    async fn active_session_fetch(&mut self, first_load: bool) -> Result<SourceResult<FeedPage>> {
        let session = match self.mode {
            Mode::Default => &mut self.mentions,
            Mode::Private => &mut self.private,
        };
        session
            .fetch(
                self.api.as_ref(),
                self.store.as_ref(),
                &self.normalizer,
                first_load,
            )
            .await
    }

    async fn active_session_check(&mut self) -> Result<SourceResult<bool>> {
        let session = match self.mode {
            Mode::Default => &mut self.mentions,
            Mode::Private => &mut self.private,
        };
        session
            .check_for_updates(self.api.as_ref(), &self.normalizer)
            .await
    }

    /// Route private mode to direct mentions for good. Returns false when
    /// there is nothing left to fall back to.
    fn fall_back(&mut self) -> bool {
        if self.mode != Mode::Private || self.conversations_unsupported {
            return false;
        }
        tracing::info!(
            "{} is not supported by {}, using direct mentions instead",
            SourceKind::Conversations.endpoint(),
            self.api.instance()
        );
        self.conversations_unsupported = true;
        self.private.switch_source(SourceKind::DirectMentions);
        true
    }

    fn session(&self) -> &Session {
        match self.mode {
            Mode::Default => &self.mentions,
            Mode::Private => &self.private,
        }
    }

    fn session_mut(&mut self, mode: Mode) -> &mut Session {
        match mode {
            Mode::Default => &mut self.mentions,
            Mode::Private => &mut self.private,
        }
    }
}
