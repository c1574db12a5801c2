use std::io;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use thiserror::Error;

pub mod frontmatter;
pub mod record;
pub mod source;
pub mod store;

pub use store::{ContentStore, SiteContent};

/// Which content tree a record came from. Posts and thoughts share the
/// chronological timeline; talks live on their own listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Thought,
    Talk,
}

impl ContentKind {
    pub fn subdir(&self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Thought => "thoughts",
            ContentKind::Talk => "talks",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub slug: String,
    /// Set for posts and talks, never for thoughts.
    pub title: Option<String>,
    pub date: DateTime<Utc>,
    /// Post body up to the excerpt marker, empty when there is none.
    pub excerpt: String,
    /// Raw markdown body. Rendering to HTML happens in the view layer.
    pub content: String,
    pub tags: Vec<String>,
    pub draft: bool,
}

impl ContentItem {
    /// The UTC calendar day this item belongs to.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn date_iso(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Errors raised while loading the content tree. All of them abort the
/// whole load: a broken content file must not produce a partial site.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid date {value:?} - file={}", .path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("Malformed metadata ({reason}) - file={}", .path.display())]
    MalformedMetadata { path: PathBuf, reason: String },

    #[error("Error reading {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}
