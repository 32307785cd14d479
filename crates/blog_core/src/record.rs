use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::date::{parse_date, sort_key};

/// One content item as handed to the core by the ingestion layer.
///
/// Field names are already canonical here; alias handling happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    /// Opaque identifier assigned by the content source.
    pub id: String,
    pub title: String,
    /// Raw pseudo-markup. Stored as `content` in the posts document.
    #[serde(rename = "content")]
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    /// Page URL at the content source, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            body: String::new(),
            date: None,
            tags: Vec::new(),
            published: false,
            url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Parsed date, `None` when missing or malformed.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Ordering key; malformed or missing dates collapse to the epoch.
    pub fn sort_key(&self) -> NaiveDateTime {
        sort_key(self.date.as_deref())
    }
}

/// Representation of the upstream "published" field before normalization.
///
/// The source hands over booleans, strings and numbers for the same concept.
/// Only `true`, `"true"` and `1` count as published.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishedFlag {
    Bool(bool),
    Text(String),
    Number(f64),
    Missing,
    Other,
}

impl PublishedFlag {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => PublishedFlag::Missing,
            Some(Value::Bool(b)) => PublishedFlag::Bool(*b),
            Some(Value::String(s)) => PublishedFlag::Text(s.clone()),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) => PublishedFlag::Number(f),
                None => PublishedFlag::Other,
            },
            Some(_) => PublishedFlag::Other,
        }
    }

    pub fn is_published(&self) -> bool {
        match self {
            PublishedFlag::Bool(b) => *b,
            PublishedFlag::Text(s) => s == "true",
            PublishedFlag::Number(n) => *n == 1.0,
            PublishedFlag::Missing | PublishedFlag::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentRecord, PublishedFlag};
    use serde_json::json;

    #[test]
    fn only_three_representations_count_as_published() {
        let published = [json!(true), json!("true"), json!(1), json!(1.0)];
        for value in &published {
            assert!(
                PublishedFlag::from_value(Some(value)).is_published(),
                "{value} should be published"
            );
        }

        let unpublished = [
            json!(false),
            json!("yes"),
            json!("TRUE"),
            json!(0),
            json!(2),
            json!(null),
            json!([true]),
            json!({"checkbox": true}),
        ];
        for value in &unpublished {
            assert!(
                !PublishedFlag::from_value(Some(value)).is_published(),
                "{value} should not be published"
            );
        }
        assert!(!PublishedFlag::from_value(None).is_published());
    }

    #[test]
    fn record_serializes_body_as_content() {
        let record = ContentRecord::new("a").with_body("hi").with_published(true);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["content"], "hi");
        assert_eq!(value["published"], true);
        assert!(value.get("date").is_none());
    }
}
