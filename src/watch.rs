//! Live watching of the mentions feed.
//!
//! Probes for new mentions on a fixed interval and reloads the first page
//! whenever the probe reports something newer.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::app::Result;
use crate::domain::Item;
use crate::feed::MentionsFeed;

/// Parse interval strings like "30s", "5m", "1h", "1d" or raw seconds.
pub fn parse_interval(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        hours
            .parse::<u64>()
            .map_err(|_| format!("Invalid hours: {}", hours))?
            .checked_mul(3600)
            .ok_or_else(|| format!("Interval too large: {}", s))
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes
            .parse::<u64>()
            .map_err(|_| format!("Invalid minutes: {}", minutes))?
            .checked_mul(60)
            .ok_or_else(|| format!("Interval too large: {}", s))
    } else if let Some(days) = s.strip_suffix('d') {
        days.parse::<u64>()
            .map_err(|_| format!("Invalid days: {}", days))?
            .checked_mul(86400)
            .ok_or_else(|| format!("Interval too large: {}", s))
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map_err(|_| format!("Invalid seconds: {}", secs))
    } else {
        s.parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '5m', '1h'", s))
    }
}

/// Format interval for display
pub fn format_interval(secs: u64) -> String {
    if secs >= 86400 && secs.is_multiple_of(86400) {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs.is_multiple_of(3600) {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs.is_multiple_of(60) {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

pub struct Watcher {
    feed: MentionsFeed,
    seen: HashSet<String>,
}

impl Watcher {
    pub fn new(feed: MentionsFeed) -> Self {
        Self {
            feed,
            seen: HashSet::new(),
        }
    }

    pub fn feed(&self) -> &MentionsFeed {
        &self.feed
    }

    /// Initial load. Errors propagate so the caller can report them.
    pub async fn start(&mut self) -> Result<Vec<Item>> {
        let page = self.feed.fetch_items(true).await?;
        Ok(self.unseen(page.items))
    }

    /// One polling step: probe, and on an update reload the first page and
    /// return the items not shown before.
    pub async fn tick(&mut self) -> Vec<Item> {
        if !self.feed.check_for_updates().await {
            return vec![];
        }

        match self.feed.fetch_items(true).await {
            Ok(page) => self.unseen(page.items),
            Err(e) => {
                tracing::warn!("Reloading mentions failed: {}", e);
                vec![]
            }
        }
    }

    /// Poll every `period` until Ctrl-C, handing new items to `on_items`.
    pub async fn run<F>(&mut self, period: Duration, mut on_items: F) -> Result<()>
    where
        F: FnMut(&[Item]),
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let items = self.tick().await;
                    if !items.is_empty() {
                        on_items(&items);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping watch");
                    return Ok(());
                }
            }
        }
    }

    /// Items of a freshly loaded first page not shown before. Only the
    /// latest page is remembered.
    fn unseen(&mut self, items: Vec<Item>) -> Vec<Item> {
        let fresh = items
            .iter()
            .filter(|item| !self.seen.contains(&item.id))
            .cloned()
            .collect();
        self.seen = items.into_iter().map(|item| item.id).collect();
        fresh
    }
}
