//! Blog core: pure content pipeline.
//!
//! Record model, publish-flag normalization, pseudo-markup rendering,
//! publication selection and the view models derived from them. Nothing here
//! performs I/O or fails; malformed input degrades to safe defaults.
mod config;
mod date;
mod link;
mod markup;
mod preview;
mod record;
mod select;
mod tags;
mod view_model;

pub use config::SiteConfig;
pub use date::{format_long, parse_date, sort_key, DateLocale};
pub use link::post_url;
pub use markup::{render, MarkupTransformer};
pub use preview::{truncate, DEFAULT_PREVIEW_LENGTH};
pub use record::{ContentRecord, PublishedFlag};
pub use select::{
    find_by_id, search, select, select_with_outcome, sort_by_recency, Selection,
    SelectionOutcome,
};
pub use tags::{TagColor, TagPalette, DEFAULT_TAG_COLORS};
pub use view_model::{
    build_detail, build_listing, detail_view, DetailLookup, DetailView, Listing, ListingItem,
};
