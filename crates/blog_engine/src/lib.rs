//! Blog engine: content source, ingestion, persistence and static export.
mod blocks;
mod export;
mod filename;
mod ingest;
mod notion;
mod store;
mod sync;
mod types;

pub use blocks::{block_to_text, blocks_to_markup, rich_text_to_markup, Annotations, RichText};
pub use export::{export_site, ExportError, SiteSummary, INDEX_FILENAME, POSTS_DIR};
pub use filename::page_filename;
pub use ingest::{
    normalize_record, parse_posts_document, posts_document_from_value, IngestError, PostsDocument,
};
pub use notion::{
    ContentSource, NotionSource, SourceSettings, TodayFn, DEFAULT_API_URL, NOTION_VERSION,
};
pub use store::{ensure_output_dir, AtomicFileWriter, PersistError, PostStore, POSTS_FILENAME};
pub use sync::{sync_posts, SyncError, SyncSummary};
pub use types::{FailureKind, NullSink, ProgressSink, SourceError, SyncEvent};
