use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blog_core::{
    build_listing, detail_view, find_by_id, ContentRecord, DetailView, ListingItem,
    SelectionOutcome, SiteConfig, TagColor,
};
use blog_logging::{blog_debug, blog_info, blog_warn};

use crate::filename::page_filename;
use crate::store::{AtomicFileWriter, PersistError};

pub const INDEX_FILENAME: &str = "index.html";
pub const POSTS_DIR: &str = "posts";
const EMPTY_MESSAGE: &str = "No posts have been published yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub index_path: PathBuf,
    pub post_paths: Vec<PathBuf>,
    pub outcome: SelectionOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Write `index.html` plus one page per listed record under `posts/`.
///
/// Pages under `posts/` left over from earlier exports are removed, so only
/// listed records have a detail page afterwards.
pub fn export_site(
    output_dir: &Path,
    records: &[ContentRecord],
    config: &SiteConfig,
) -> Result<SiteSummary, ExportError> {
    let listing = build_listing(records.to_vec(), config);
    if listing.outcome == SelectionOutcome::FailOpen {
        blog_warn!(
            "No published posts among {} records; listing all of them",
            records.len()
        );
    }

    let root = AtomicFileWriter::new(output_dir.to_path_buf());
    let posts = AtomicFileWriter::new(output_dir.join(POSTS_DIR));

    let mut cards = Vec::with_capacity(listing.items.len());
    let mut post_paths = Vec::with_capacity(listing.items.len());
    let mut written = HashSet::with_capacity(listing.items.len());
    for item in &listing.items {
        let Some(record) = find_by_id(records, &item.id) else {
            continue;
        };
        let filename = page_filename(&record.title, &record.id);
        let page = render_post_page(&detail_view(record, config), config);
        post_paths.push(posts.write(&filename, &page)?);
        cards.push(render_card(item, &format!("{POSTS_DIR}/{filename}")));
        written.insert(filename);
    }

    let index = render_index(&cards, config);
    let index_path = root.write(INDEX_FILENAME, &index)?;
    let removed = remove_stale_pages(posts.dir(), &written)?;
    blog_info!(
        "Exported {} posts to {} ({} stale pages removed)",
        post_paths.len(),
        output_dir.display(),
        removed
    );

    Ok(SiteSummary {
        index_path,
        post_paths,
        outcome: listing.outcome,
    })
}

fn remove_stale_pages(dir: &Path, keep: &HashSet<String>) -> Result<usize, PersistError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let is_page = path.extension().is_some_and(|ext| ext == "html");
        let kept = entry.file_name().to_str().is_some_and(|name| keep.contains(name));
        if is_page && !kept && entry.file_type()?.is_file() {
            fs::remove_file(&path)?;
            blog_debug!("Removed stale page {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

fn render_tags(tags: &[TagColor]) -> String {
    tags.iter()
        .map(|tag| {
            format!(
                r#"<span class="tag" style="background-color: {}">{}</span>"#,
                tag.color, tag.label
            )
        })
        .collect()
}

fn render_card(item: &ListingItem, href: &str) -> String {
    format!(
        r#"<a class="post-card" href="{href}">
  <h2>{title}</h2>
  <div class="post-preview">{preview}</div>
  <div class="post-meta">
    <span>{date}</span>
    <div class="tags">{tags}</div>
  </div>
</a>"#,
        title = item.title,
        preview = item.html_preview,
        date = item.formatted_date,
        tags = render_tags(&item.tag_colors),
    )
}

fn render_index(cards: &[String], config: &SiteConfig) -> String {
    let body = if cards.is_empty() {
        format!(r#"<div class="message">{EMPTY_MESSAGE}</div>"#)
    } else {
        format!(r#"<div id="posts-container">{}</div>"#, cards.join("\n"))
    };
    page_shell(
        &config.blog_title,
        &format!(
            "<header><h1>{}</h1><p>{}</p></header>\n<main>{body}</main>",
            config.blog_title, config.blog_description
        ),
    )
}

fn render_post_page(view: &DetailView, config: &SiteConfig) -> String {
    page_shell(
        &format!("{} - {}", view.title, config.blog_title),
        &format!(
            r#"<article id="post-content">
<h1 id="post-title-main">{title}</h1>
<div class="post-meta"><span id="post-date">{date}</span><div id="post-tags">{tags}</div></div>
<div id="post-body">{body}</div>
</article>
<p><a href="../{INDEX_FILENAME}">{blog}</a></p>"#,
            title = view.title,
            date = view.formatted_date,
            tags = render_tags(&view.tag_colors),
            body = view.html_body,
            blog = config.blog_title,
        ),
    )
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
