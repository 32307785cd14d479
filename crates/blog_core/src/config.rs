use serde::{Deserialize, Serialize};

use crate::date::DateLocale;
use crate::preview::DEFAULT_PREVIEW_LENGTH;
use crate::tags::{TagPalette, DEFAULT_TAG_COLORS};

/// Presentation settings for the blog.
///
/// Every field has a default, so a partial config file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub blog_title: String,
    pub blog_description: String,
    /// Characters of raw body kept in listing previews.
    pub preview_length: usize,
    pub tag_colors: Vec<String>,
    pub date_locale: DateLocale,
    /// Detail page that receives the `id` query parameter.
    pub post_page: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            blog_title: "My Notion Blog".to_string(),
            blog_description: "A personal blog managed in Notion".to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            tag_colors: DEFAULT_TAG_COLORS.iter().map(|c| c.to_string()).collect(),
            date_locale: DateLocale::default(),
            post_page: "post.html".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn palette(&self) -> TagPalette {
        TagPalette::new(self.tag_colors.clone())
    }
}
