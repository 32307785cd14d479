use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The database query returned this many pages.
    PagesListed { count: usize },
    PageFetched { page_id: String },
    /// Body retrieval failed; the page is kept with empty content.
    PageFailed { page_id: String, kind: FailureKind },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: SyncEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: SyncEvent) {}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: FailureKind,
    pub message: String,
}

impl SourceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredentials { variable: &'static str },
    InvalidCredentials,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredentials { variable } => {
                write!(f, "missing credentials ({variable} is not set)")
            }
            FailureKind::InvalidCredentials => write!(f, "invalid credentials"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response body"),
        }
    }
}
