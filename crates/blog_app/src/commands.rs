use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use blog_core::{
    build_detail, build_listing, format_long, post_url, search, DetailLookup, SelectionOutcome,
    SiteConfig,
};
use blog_engine::{
    export_site, sync_posts, NotionSource, PostStore, ProgressSink, SourceSettings, SyncEvent,
};
use blog_logging::{blog_debug, blog_info, blog_warn};
use chrono::Utc;

use crate::cli::Command;

/// Forwards sync progress to the log.
struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: SyncEvent) {
        match event {
            SyncEvent::PagesListed { count } => blog_info!("Fetching {} page bodies", count),
            SyncEvent::PageFetched { page_id } => blog_debug!("Fetched page {}", page_id),
            SyncEvent::PageFailed { page_id, kind } => {
                blog_warn!("Page {} has no content ({})", page_id, kind)
            }
        }
    }
}

pub(crate) fn run(command: Command, config: &SiteConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Fetch { data_dir } => fetch(&data_dir, out),
        Command::Build { data_dir, out_dir } => build(&data_dir, &out_dir, config, out),
        Command::List { data_dir } => list(&data_dir, config, out),
        Command::Show { id, data_dir } => show(&data_dir, &id, config, out),
        Command::Search { query, data_dir } => find(&data_dir, &query, config, out),
    }
}

fn fetch(data_dir: &Path, out: &mut dyn Write) -> Result<()> {
    let settings = SourceSettings::from_env()?;
    let today = Arc::new(|| Utc::now().format("%Y-%m-%d").to_string());
    let source = NotionSource::new(settings, today)?;
    let store = PostStore::new(data_dir);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let fetched_utc = Utc::now().to_rfc3339();
    let summary = runtime.block_on(sync_posts(&source, &store, &fetched_utc, &LogSink))?;

    writeln!(
        out,
        "Saved {} posts ({} published) to {}",
        summary.post_count,
        summary.published_count,
        summary.path.display()
    )?;
    Ok(())
}

fn build(data_dir: &Path, out_dir: &Path, config: &SiteConfig, out: &mut dyn Write) -> Result<()> {
    let document = load_posts(data_dir)?;
    let summary = export_site(out_dir, &document.posts, config)
        .with_context(|| format!("exporting site to {}", out_dir.display()))?;
    writeln!(
        out,
        "Wrote {} and {} post pages",
        summary.index_path.display(),
        summary.post_paths.len()
    )?;
    Ok(())
}

fn list(data_dir: &Path, config: &SiteConfig, out: &mut dyn Write) -> Result<()> {
    let document = load_posts(data_dir)?;
    let listing = build_listing(document.posts, config);
    match listing.outcome {
        SelectionOutcome::Published => {}
        SelectionOutcome::FailOpen => {
            blog_warn!("No post is marked published; listing every post instead")
        }
        SelectionOutcome::Empty => writeln!(out, "No posts yet.")?,
    }
    for item in &listing.items {
        writeln!(
            out,
            "{}\t{}\t{}",
            item.formatted_date,
            item.title,
            post_url(&config.post_page, &item.id)
        )?;
    }
    Ok(())
}

fn show(data_dir: &Path, id: &str, config: &SiteConfig, out: &mut dyn Write) -> Result<()> {
    let document = load_posts(data_dir)?;
    match build_detail(&document.posts, id, config) {
        DetailLookup::Found(view) => {
            writeln!(out, "{}", view.title)?;
            writeln!(out, "{}", view.formatted_date)?;
            writeln!(out, "{}", view.html_body)?;
            Ok(())
        }
        DetailLookup::Unpublished(_) => bail!("post {id} is not published"),
        DetailLookup::NotFound => bail!("post {id} not found"),
    }
}

fn find(data_dir: &Path, query: &str, config: &SiteConfig, out: &mut dyn Write) -> Result<()> {
    let document = load_posts(data_dir)?;
    let hits = search(&document.posts, query);
    blog_debug!("Search {:?} matched {} posts", query, hits.len());
    for record in hits {
        writeln!(
            out,
            "{}\t{}\t{}",
            format_long(record.date.as_deref(), config.date_locale),
            record.title,
            record.id
        )?;
    }
    Ok(())
}

fn load_posts(data_dir: &Path) -> Result<blog_engine::PostsDocument> {
    let store = PostStore::new(data_dir);
    store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))
}
