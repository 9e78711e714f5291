use std::time::Duration;

use crate::app::{AppContext, Result, TuskError};
use crate::client::MastodonApi;
use crate::domain::{Item, Status, Visibility};
use crate::feed::{FeedView, Mode};
use crate::store::StatusStore;
use crate::watch::{self, Watcher};

pub async fn list_mentions(ctx: &AppContext, mode: Mode, pages: usize) -> Result<()> {
    let mut feed = ctx.feed(mode);
    let view = feed.view();

    let first = match feed.fetch_items(true).await {
        Ok(page) => page,
        Err(e) => {
            eprintln!("{} ({})", view.error_text, e);
            return Err(e);
        }
    };

    println!("{}", view.title);
    let mut shown = print_items(ctx, &first.items);
    let mut done = first.done;

    for _ in 1..pages {
        if done {
            break;
        }
        let page = feed.fetch_items(false).await?;
        shown += print_items(ctx, &page.items);
        done = page.done;
    }

    if shown == 0 {
        // Fallback may have happened during the load
        println!("{}", feed.view().empty_text);
    }

    Ok(())
}

pub async fn check_updates(ctx: &AppContext, mode: Mode) -> Result<()> {
    let mut feed = ctx.feed(mode);
    let view = feed.view();

    if let Err(e) = feed.fetch_items(true).await {
        eprintln!("{} ({})", view.error_text, e);
        return Err(e);
    }

    match feed.high_water_mark() {
        Some(mark) => println!("Latest {} mention: {}", mode, mark),
        None => println!("{}", feed.view().empty_text),
    }

    if feed.check_for_updates().await {
        println!("New mentions available");
    } else {
        println!("No new mentions");
    }

    Ok(())
}

pub async fn watch_mentions(ctx: &AppContext, mode: Mode, interval: Option<&str>) -> Result<()> {
    let interval = interval.unwrap_or(&ctx.config.feed.poll_interval);
    let secs = watch::parse_interval(interval).map_err(TuskError::Config)?;
    if secs == 0 {
        return Err(TuskError::Config("Poll interval must be positive".into()));
    }

    let mut watcher = Watcher::new(ctx.feed(mode));
    let view: FeedView = watcher.feed().view();

    let initial = match watcher.start().await {
        Ok(items) => items,
        Err(e) => {
            eprintln!("{} ({})", view.error_text, e);
            return Err(e);
        }
    };

    println!("{}", view.title);
    if print_items(ctx, &initial) == 0 {
        println!("{}", watcher.feed().view().empty_text);
    }
    println!(
        "Watching for new mentions every {} (Ctrl-C to stop)",
        watch::format_interval(secs)
    );

    watcher
        .run(Duration::from_secs(secs), |items| {
            print_items(ctx, items);
        })
        .await
}

pub fn show_status(ctx: &AppContext, id: &str) -> Result<()> {
    let status = ctx
        .store
        .get_status(id, ctx.api.instance())?
        .ok_or_else(|| TuskError::StatusNotFound(id.to_string()))?;

    print_status(&status);
    if let Some(url) = &status.url {
        println!("  {}", url);
    }
    Ok(())
}

/// Render items from the status cache, which is keyed by status id.
fn print_items(ctx: &AppContext, items: &[Item]) -> usize {
    for item in items {
        match ctx.store.get_status(item.status_id(), ctx.api.instance()) {
            Ok(Some(cached)) => print_status(&cached),
            Ok(None) => print_status(&item.status),
            Err(e) => {
                tracing::warn!("Reading status {} from cache failed: {}", item.status_id(), e);
                print_status(&item.status);
            }
        }
    }
    items.len()
}

fn print_status(status: &Status) {
    let marker = match status.visibility {
        Visibility::Direct => "✉",
        Visibility::Private => "🔒",
        _ => " ",
    };
    let date = status.created_at.format("%Y-%m-%d %H:%M");

    println!(
        "{} {} {} (@{}) [{}]",
        marker,
        date,
        status.account.display_name(),
        status.account.acct,
        status.id
    );

    if !status.spoiler_text.is_empty() {
        println!("  CW: {}", status.spoiler_text);
    }
    for line in status.plain_text().lines() {
        println!("  {}", line);
    }
}
