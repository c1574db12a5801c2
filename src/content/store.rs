use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use spdlog::info;
use tokio::sync::OnceCell;

use crate::content::frontmatter::FrontmatterOptions;
use crate::content::record::build_record;
use crate::content::source::{ContentSource, DiskSource};
use crate::content::{ContentError, ContentItem, ContentKind};

/// The three public content lists, each sorted newest first with drafts
/// already dropped. Built once, then shared read-only.
pub struct SiteContent {
    pub posts: Vec<Arc<ContentItem>>,
    pub thoughts: Vec<Arc<ContentItem>>,
    pub talks: Vec<Arc<ContentItem>>,
}

impl SiteContent {
    /// Posts and thoughts merged into one list, newest first. Talks stay
    /// on their own surface and are not part of the timeline.
    pub fn timeline(&self) -> Vec<Arc<ContentItem>> {
        let mut items: Vec<Arc<ContentItem>> = self
            .posts
            .iter()
            .chain(self.thoughts.iter())
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<Arc<ContentItem>> {
        self.posts
            .iter()
            .chain(self.thoughts.iter())
            .chain(self.talks.iter())
            .find(|item| item.slug == slug)
            .cloned()
    }
}

/// Loads and caches every record under the content root. The scan runs at
/// most once per store, even with concurrent first callers; afterwards all
/// callers share the same immutable lists. A failed scan leaves the cache
/// unpopulated so the next call starts over from a clean slate.
pub struct ContentStore<S: ContentSource = DiskSource> {
    root: PathBuf,
    options: FrontmatterOptions,
    source: S,
    cache: OnceCell<Arc<SiteContent>>,
}

impl ContentStore<DiskSource> {
    pub fn new(root: PathBuf, options: FrontmatterOptions) -> Self {
        Self::with_source(root, options, DiskSource)
    }
}

impl<S: ContentSource> ContentStore<S> {
    pub fn with_source(root: PathBuf, options: FrontmatterOptions, source: S) -> Self {
        ContentStore {
            root,
            options,
            source,
            cache: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<Arc<SiteContent>, ContentError> {
        self.cache
            .get_or_try_init(|| async { self.scan().map(Arc::new) })
            .await
            .map(|content| content.clone())
    }

    fn scan(&self) -> Result<SiteContent, ContentError> {
        let posts = self.load_kind(ContentKind::Post)?;
        let thoughts = self.load_kind(ContentKind::Thought)?;
        let talks = self.load_kind(ContentKind::Talk)?;
        info!(
            "Content loaded: {} posts, {} thoughts, {} talks",
            posts.len(),
            thoughts.len(),
            talks.len()
        );

        Ok(SiteContent {
            posts,
            thoughts,
            talks,
        })
    }

    fn load_kind(&self, kind: ContentKind) -> Result<Vec<Arc<ContentItem>>, ContentError> {
        let dir = self.root.join(kind.subdir());
        let files = self
            .source
            .list_files(&dir)
            .map_err(|e| ContentError::Io {
                path: dir.clone(),
                source: e,
            })?;

        let mut items = vec![];
        for path in files {
            let raw = match self.source.read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // The file vanished between enumeration and read
                    return Err(ContentError::FileNotFound { path });
                }
                Err(e) => return Err(ContentError::Io { path, source: e }),
            };

            let item = build_record(&path, kind, &raw, &self.options)?;
            if item.draft {
                continue;
            }
            items.push(Arc::new(item));
        }

        // Stable sort: same-timestamp items keep enumeration order
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }
}
