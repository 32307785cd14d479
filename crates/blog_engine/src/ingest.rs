//! Posts document ingestion.
//!
//! Turns the stored JSON document into canonical [`ContentRecord`]s. The
//! document is either `{ "lastUpdated": ..., "posts": [...] }` or a bare list,
//! and field names vary between exports, so keys are matched against alias
//! lists before the core ever sees a record.

use blog_core::{ContentRecord, PublishedFlag};
use blog_logging::blog_warn;
use serde::Serialize;
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["id"];
const TITLE_KEYS: &[&str] = &["title", "name", "제목"];
const BODY_KEYS: &[&str] = &["content", "body", "내용"];
const DATE_KEYS: &[&str] = &["date", "날짜", "published_at"];
const TAG_KEYS: &[&str] = &["tags", "태그"];
const PUBLISHED_KEYS: &[&str] = &["published", "공개"];
const URL_KEYS: &[&str] = &["url"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PostsDocument {
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub posts: Vec<ContentRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a list of posts, found {found}")]
    NotAList { found: &'static str },
}

pub fn parse_posts_document(text: &str) -> Result<PostsDocument, IngestError> {
    let value: Value = serde_json::from_str(text)?;
    posts_document_from_value(value)
}

pub fn posts_document_from_value(value: Value) -> Result<PostsDocument, IngestError> {
    let (last_updated, list) = match value {
        Value::Object(mut map) if map.contains_key("posts") => {
            let last_updated = map
                .remove("lastUpdated")
                .and_then(|v| v.as_str().map(str::to_string));
            let posts = map.remove("posts").unwrap_or(Value::Null);
            (last_updated, posts)
        }
        other => (None, other),
    };

    let entries = match list {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            return Err(IngestError::NotAList {
                found: value_kind(&other),
            })
        }
    };

    let posts = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match normalize_record(&entry) {
            Ok(record) => Some(record),
            Err(reason) => {
                blog_warn!("Skipping post #{}: {}", index, reason);
                None
            }
        })
        .collect();

    Ok(PostsDocument {
        last_updated,
        posts,
    })
}

/// Map one loosely-shaped entry onto the canonical record.
pub fn normalize_record(entry: &Value) -> Result<ContentRecord, &'static str> {
    let Value::Object(fields) = entry else {
        return Err("entry is not an object");
    };

    let id = match lookup(fields, ID_KEYS) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err("missing id"),
    };

    Ok(ContentRecord {
        id,
        title: text_field(fields, TITLE_KEYS).unwrap_or_default(),
        body: text_field(fields, BODY_KEYS).unwrap_or_default(),
        date: text_field(fields, DATE_KEYS),
        tags: lookup(fields, TAG_KEYS).map(tag_list).unwrap_or_default(),
        published: PublishedFlag::from_value(lookup(fields, PUBLISHED_KEYS)).is_published(),
        url: text_field(fields, URL_KEYS),
    })
}

/// First alias present with a non-null value; keys compare case-insensitively.
fn lookup<'a>(fields: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        fields
            .iter()
            .find(|(key, value)| !value.is_null() && key.to_lowercase() == *alias)
            .map(|(_, value)| value)
    })
}

fn text_field(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    match lookup(fields, aliases)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Tags arrive as strings or as `{ "name": ... }` objects; anything else is dropped.
fn tag_list(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn wrapped_document_keeps_timestamp() {
        let doc = parse_posts_document(
            r#"{"lastUpdated": "2024-01-01T00:00:00Z", "posts": [{"id": "a", "published": true}]}"#,
        )
        .unwrap();
        assert_eq!(doc.last_updated.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(doc.posts.len(), 1);
        assert!(doc.posts[0].published);
    }

    #[test]
    fn bare_list_is_accepted() {
        let doc = parse_posts_document(r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(doc.last_updated, None);
        assert_eq!(doc.posts.len(), 2);
    }

    #[test]
    fn null_posts_field_is_empty() {
        let doc = parse_posts_document(r#"{"posts": null}"#).unwrap();
        assert!(doc.posts.is_empty());
    }

    #[test]
    fn object_without_posts_is_rejected() {
        let err = parse_posts_document(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, IngestError::NotAList { found: "an object" }));
        assert!(matches!(
            parse_posts_document("not json").unwrap_err(),
            IngestError::Json(_)
        ));
    }

    #[test]
    fn aliases_and_casing_are_normalized() {
        let record = normalize_record(&json!({
            "ID": 42,
            "Title": "Hello",
            "내용": "body text",
            "Date": "2024-03-01",
            "태그": ["a", {"name": "b"}, 3],
            "Published": "true",
            "url": "https://notion.so/page"
        }))
        .unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.title, "Hello");
        assert_eq!(record.body, "body text");
        assert_eq!(record.date.as_deref(), Some("2024-03-01"));
        assert_eq!(record.tags, vec!["a", "b"]);
        assert!(record.published);
        assert_eq!(record.url.as_deref(), Some("https://notion.so/page"));
    }

    #[test]
    fn first_alias_wins_and_null_is_absent() {
        let record = normalize_record(&json!({
            "id": "x",
            "title": null,
            "name": "fallback",
            "content": "from content",
            "body": "from body"
        }))
        .unwrap();
        assert_eq!(record.title, "fallback");
        assert_eq!(record.body, "from content");
        assert!(!record.published);
    }

    #[test]
    fn entries_without_id_are_skipped() {
        let doc = parse_posts_document(r#"[{"title": "no id"}, "junk", {"id": ""}, {"id": "ok"}]"#)
            .unwrap();
        let ids: Vec<_> = doc.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }
}
