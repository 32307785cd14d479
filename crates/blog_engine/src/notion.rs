use std::sync::Arc;
use std::time::Duration;

use blog_core::{ContentRecord, PublishedFlag};
use blog_logging::{blog_debug, blog_info, blog_warn};
use futures_util::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde_json::{json, Value};

use crate::blocks::{blocks_to_markup, rich_text_from_value, rich_text_to_markup};
use crate::{FailureKind, ProgressSink, SourceError, SyncEvent};

pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

const TITLE_PROPERTIES: &[&str] = &["Title", "Name", "제목"];
const DATE_PROPERTIES: &[&str] = &["Date", "날짜"];
const TAG_PROPERTIES: &[&str] = &["Tags", "태그"];
const PUBLISHED_PROPERTIES: &[&str] = &["Published", "공개"];

/// Date used for pages whose date property is empty.
pub type TodayFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct SourceSettings {
    pub api_url: String,
    pub api_key: String,
    pub database_id: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Page bodies fetched at the same time.
    pub max_concurrent_pages: usize,
}

impl SourceSettings {
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            database_id: database_id.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_concurrent_pages: 8,
        }
    }

    /// Read `NOTION_API_KEY`, `NOTION_DATABASE_ID` and optional `NOTION_API_URL`.
    pub fn from_env() -> Result<Self, SourceError> {
        let api_key = required_env("NOTION_API_KEY")?;
        let database_id = required_env("NOTION_DATABASE_ID")?;
        let mut settings = Self::new(api_key, database_id);
        if let Ok(api_url) = std::env::var("NOTION_API_URL") {
            settings.api_url = api_url;
        }
        Ok(settings)
    }
}

fn required_env(variable: &'static str) -> Result<String, SourceError> {
    match std::env::var(variable) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SourceError::new(
            FailureKind::MissingCredentials { variable },
            format!("{variable} environment variable is not set"),
        )),
    }
}

#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_records(
        &self,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ContentRecord>, SourceError>;
}

pub struct NotionSource {
    settings: SourceSettings,
    client: reqwest::Client,
    today: TodayFn,
}

impl NotionSource {
    pub fn new(settings: SourceSettings, today: TodayFn) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|err| SourceError::new(FailureKind::InvalidCredentials, err.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| SourceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            client,
            today,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        let base = self.settings.api_url.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| SourceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Database rows as records with empty bodies, newest first.
    pub async fn query_database(&self) -> Result<Vec<ContentRecord>, SourceError> {
        let url = self.endpoint(&format!("databases/{}/query", self.settings.database_id))?;
        let body = json!({
            "sorts": [{ "property": "Date", "direction": "descending" }]
        });
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let data = read_json(response).await?;

        let results = data
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| SourceError::new(FailureKind::InvalidResponse, "missing results"))?;

        Ok(results
            .iter()
            .filter_map(|page| page_to_record(page, &self.today))
            .collect())
    }

    /// Page body converted to pseudo-markup.
    pub async fn page_content(&self, page_id: &str) -> Result<String, SourceError> {
        let url = self.endpoint(&format!("blocks/{page_id}/children"))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let data = read_json(response).await?;
        let blocks = data
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(blocks_to_markup(blocks))
    }
}

#[async_trait::async_trait]
impl ContentSource for NotionSource {
    async fn fetch_records(
        &self,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ContentRecord>, SourceError> {
        let pages = self.query_database().await?;
        blog_info!("Found {} pages in the Notion database", pages.len());
        sink.emit(SyncEvent::PagesListed { count: pages.len() });

        let limit = self.settings.max_concurrent_pages.max(1);
        let mut records = Vec::with_capacity(pages.len());
        let mut remaining = pages.into_iter();
        loop {
            let batch: Vec<ContentRecord> = remaining.by_ref().take(limit).collect();
            if batch.is_empty() {
                break;
            }
            let fetches = batch
                .into_iter()
                .map(|record| self.with_body(record, sink));
            records.extend(join_all(fetches).await);
        }
        Ok(records)
    }
}

impl NotionSource {
    /// Fill in the record body; a failed fetch keeps the record with no content.
    async fn with_body(
        &self,
        mut record: ContentRecord,
        sink: &dyn ProgressSink,
    ) -> ContentRecord {
        match self.page_content(&record.id).await {
            Ok(body) => {
                blog_debug!("Fetched body of page {} ({} chars)", record.id, body.len());
                sink.emit(SyncEvent::PageFetched {
                    page_id: record.id.clone(),
                });
                record.body = body;
            }
            Err(err) => {
                blog_warn!("Could not fetch body of page {}: {}", record.id, err);
                sink.emit(SyncEvent::PageFailed {
                    page_id: record.id.clone(),
                    kind: err.kind,
                });
            }
        }
        record
    }
}

fn page_to_record(page: &Value, today: &TodayFn) -> Option<ContentRecord> {
    let id = page.get("id").and_then(Value::as_str)?;
    let properties = page.get("properties");

    let title = property(properties, TITLE_PROPERTIES)
        .map(|p| rich_text_to_markup(&rich_text_from_value(p.get("title"))))
        .unwrap_or_default();
    let date = property(properties, DATE_PROPERTIES)
        .and_then(|p| p.pointer("/date/start"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| today());
    let tags = property(properties, TAG_PROPERTIES)
        .and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|tag| tag.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let published = PublishedFlag::from_value(
        property(properties, PUBLISHED_PROPERTIES).and_then(|p| p.get("checkbox")),
    )
    .is_published();

    Some(ContentRecord {
        id: id.to_string(),
        title,
        body: String::new(),
        date: Some(date),
        tags,
        published,
        url: page.get("url").and_then(Value::as_str).map(str::to_string),
    })
}

fn property<'a>(properties: Option<&'a Value>, names: &[&str]) -> Option<&'a Value> {
    let properties = properties?;
    names.iter().find_map(|name| properties.get(*name))
}

async fn read_json(response: reqwest::Response) -> Result<Value, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let text = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&text)
        .map_err(|err| SourceError::new(FailureKind::InvalidResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::new(FailureKind::Timeout, err.to_string());
    }
    SourceError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_today() -> TodayFn {
        Arc::new(|| "2024-05-05".to_string())
    }

    #[test]
    fn page_properties_map_onto_record() {
        let page = json!({
            "id": "page-1",
            "url": "https://www.notion.so/page-1",
            "properties": {
                "Title": {"title": [{"plain_text": "Hello", "annotations": {"bold": true}}]},
                "Date": {"date": {"start": "2024-01-15"}},
                "Tags": {"multi_select": [{"name": "rust"}, {"name": "blog"}]},
                "Published": {"checkbox": true}
            }
        });
        let record = page_to_record(&page, &fixed_today()).unwrap();
        assert_eq!(record.id, "page-1");
        assert_eq!(record.title, "**Hello**");
        assert_eq!(record.date.as_deref(), Some("2024-01-15"));
        assert_eq!(record.tags, vec!["rust", "blog"]);
        assert!(record.published);
        assert_eq!(record.url.as_deref(), Some("https://www.notion.so/page-1"));
    }

    #[test]
    fn missing_properties_use_defaults() {
        let page = json!({"id": "page-2", "properties": {"Date": {"date": null}}});
        let record = page_to_record(&page, &fixed_today()).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.date.as_deref(), Some("2024-05-05"));
        assert!(record.tags.is_empty());
        assert!(!record.published);
    }

    #[test]
    fn pages_without_id_are_dropped() {
        assert!(page_to_record(&json!({"properties": {}}), &fixed_today()).is_none());
    }
}
