//! # tusk
//!
//! A terminal reader for the mentions timeline of Mastodon-compatible
//! servers (Mastodon, GoToSocial, Akkoma, ...).
//!
//! ## Architecture
//!
//! ```text
//! MastodonApi → Paginator → Normalizer → StatusStore
//!                    ↑
//!              MentionsFeed (mode, fallback, update probe) → CLI / watch
//! ```
//!
//! - [`client`]: listing API trait and its reqwest implementation
//! - [`feed`]: mode selection, paging and update detection
//! - [`normalizer`]: filters raw notifications/conversations into items
//! - [`store`]: SQLite status cache
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the latest mentions
//! tusk --instance https://mastodon.social --token $TOKEN mentions
//!
//! # Private mentions, three pages deep
//! tusk mentions --mode private --pages 3
//!
//! # Keep watching for new mentions
//! tusk watch --interval 1m
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the API client,
/// the status cache and the configuration.
pub mod app;

/// Command-line interface using clap.
///
/// - `mentions [--mode all|private] [--pages N]` - List mentions
/// - `check` - Load once, then probe for newer mentions
/// - `watch [--interval 1m]` - Poll until Ctrl-C
/// - `show <id>` - Show a cached status
pub mod cli;

/// Mastodon REST API access.
///
/// - [`MastodonApi`](client::MastodonApi): Async trait for the listing endpoints
/// - [`HttpClient`](client::HttpClient): reqwest-based implementation
pub mod client;

/// Configuration loaded from `~/.config/tusk/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Status`](domain::Status), [`Notification`](domain::Notification),
///   [`Conversation`](domain::Conversation): API payloads
/// - [`Item`](domain::Item): normalized feed entry
pub mod domain;

/// The mentions feed.
///
/// - [`MentionsFeed`](feed::MentionsFeed): routes by [`Mode`](feed::Mode),
///   falls back to direct mentions when conversations are unsupported
/// - [`Paginator`](feed::paginator::Paginator): cursor over a listing endpoint
/// - [`probe`](feed::update::probe): "anything newer?" check
pub mod feed;

/// Filtering of raw listing entries into [`Item`](domain::Item)s.
pub mod normalizer;

/// SQLite status cache.
///
/// - [`StatusStore`](store::StatusStore): Trait for the cache
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Interval polling for new mentions.
pub mod watch;
