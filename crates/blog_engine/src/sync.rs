use std::path::PathBuf;

use blog_logging::blog_info;

use crate::ingest::PostsDocument;
use crate::notion::ContentSource;
use crate::store::{PersistError, PostStore};
use crate::{ProgressSink, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("content source failed: {0}")]
    Source(#[from] SourceError),
    #[error("could not store posts: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub post_count: usize,
    pub published_count: usize,
    pub path: PathBuf,
}

/// Pull every record from `source` and replace the stored posts document.
pub async fn sync_posts(
    source: &dyn ContentSource,
    store: &PostStore,
    fetched_utc: &str,
    sink: &dyn ProgressSink,
) -> Result<SyncSummary, SyncError> {
    let posts = source.fetch_records(sink).await?;
    let published_count = posts.iter().filter(|p| p.published).count();
    let document = PostsDocument {
        last_updated: Some(fetched_utc.to_string()),
        posts,
    };
    let path = store.save(&document)?;
    blog_info!(
        "Saved {} posts ({} published) to {}",
        document.posts.len(),
        published_count,
        path.display()
    );
    Ok(SyncSummary {
        post_count: document.posts.len(),
        published_count,
        path,
    })
}
