use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, TuskError};
use crate::client::{HttpClient, MastodonApi};
use crate::config::Config;
use crate::feed::{MentionsFeed, Mode};
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub api: Arc<dyn MastodonApi>,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let api: Arc<dyn MastodonApi> = Arc::new(Self::http_client(&config)?);

        Ok(Self { config, store, api })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let api: Arc<dyn MastodonApi> = Arc::new(Self::http_client(&config)?);

        Ok(Self { config, store, api })
    }

    /// A fresh mentions feed in `mode`, sharing this context's client and cache.
    pub fn feed(&self, mode: Mode) -> MentionsFeed {
        MentionsFeed::new(
            self.api.clone(),
            self.store.clone(),
            self.config.feed.page_size,
        )
        .with_mode(mode)
    }

    fn http_client(config: &Config) -> Result<HttpClient> {
        HttpClient::new(
            &config.instance.url,
            config.instance.access_token.clone(),
            &config.http,
        )
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TuskError::Config("Could not find data directory".into()))?;
        let tusk_dir = data_dir.join("tusk");
        std::fs::create_dir_all(&tusk_dir)?;
        Ok(tusk_dir.join("cache.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::SessionState;

    #[test]
    fn test_feed_starts_in_requested_mode() {
        let mut config = Config::default();
        config.feed.page_size = 5;
        let ctx = AppContext::in_memory(config).unwrap();

        let feed = ctx.feed(Mode::Private);
        assert_eq!(feed.mode(), Mode::Private);
        assert_eq!(feed.state(), SessionState::Uninitialized);
        assert_eq!(ctx.api.instance(), "mastodon.social");
    }

    #[test]
    fn test_invalid_instance_url_rejected() {
        let mut config = Config::default();
        config.instance.url = "::not a url::".into();
        assert!(AppContext::in_memory(config).is_err());
    }

    #[test]
    fn test_new_with_explicit_db_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(Config::default(), Some(dir.path().join("cache.db"))).unwrap();
        assert!(dir.path().join("cache.db").exists());
        drop(ctx);
    }
}
