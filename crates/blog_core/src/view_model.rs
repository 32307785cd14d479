use rayon::prelude::*;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::date::format_long;
use crate::markup;
use crate::preview::truncate;
use crate::record::ContentRecord;
use crate::select::{find_by_id, select_with_outcome, SelectionOutcome};
use crate::tags::TagColor;

/// One card in the listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingItem {
    pub id: String,
    pub title: String,
    /// Truncated raw body, inserted into the card as markup.
    pub html_preview: String,
    pub formatted_date: String,
    pub tag_colors: Vec<TagColor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<ListingItem>,
    pub outcome: SelectionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub html_body: String,
    pub formatted_date: String,
    pub tag_colors: Vec<TagColor>,
}

/// Result of looking up a single record for the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLookup {
    Found(DetailView),
    /// The record exists but is not published; the caller decides whether to show it.
    Unpublished(DetailView),
    NotFound,
}

/// Select, order and project records into listing cards.
///
/// Cards are built in parallel; the selected order is preserved.
pub fn build_listing(records: Vec<ContentRecord>, config: &SiteConfig) -> Listing {
    let selection = select_with_outcome(records);
    let palette = config.palette();
    let items = selection
        .records
        .par_iter()
        .map(|record| ListingItem {
            id: record.id.clone(),
            title: record.title.clone(),
            html_preview: truncate(Some(record.body.as_str()), config.preview_length),
            formatted_date: format_long(record.date.as_deref(), config.date_locale),
            tag_colors: palette.assign(&record.tags),
        })
        .collect();
    Listing {
        items,
        outcome: selection.outcome,
    }
}

pub fn build_detail(records: &[ContentRecord], id: &str, config: &SiteConfig) -> DetailLookup {
    let Some(record) = find_by_id(records, id) else {
        return DetailLookup::NotFound;
    };
    let view = detail_view(record, config);
    if record.published {
        DetailLookup::Found(view)
    } else {
        DetailLookup::Unpublished(view)
    }
}

pub fn detail_view(record: &ContentRecord, config: &SiteConfig) -> DetailView {
    DetailView {
        title: record.title.clone(),
        html_body: markup::render(&record.body),
        formatted_date: format_long(record.date.as_deref(), config.date_locale),
        tag_colors: config.palette().assign(&record.tags),
    }
}
