use std::path::Path;

use serde::Deserialize;

use crate::content::frontmatter::{split_document, split_excerpt, FrontmatterOptions};
use crate::content::{ContentError, ContentItem, ContentKind};
use crate::text_utils::parse_date_time;

#[derive(Deserialize)]
struct RawHeader {
    title: Option<String>,
    date: Option<toml::Value>,
    tags: Option<Vec<String>>,
    draft: Option<bool>,
}

/// Builds one typed record from a content file's raw text. The slug is the
/// file base name without extension. Defaults are applied here, once:
/// missing `tags` becomes an empty list, missing `draft` becomes false.
pub fn build_record(
    path: &Path,
    kind: ContentKind,
    raw: &str,
    options: &FrontmatterOptions,
) -> Result<ContentItem, ContentError> {
    let slug = slug_from_path(path);

    let doc = match split_document(raw, &options.fence) {
        Some(doc) => doc,
        None => {
            return Err(ContentError::MalformedMetadata {
                path: path.to_path_buf(),
                reason: format!("missing {} metadata block", options.fence),
            });
        }
    };

    let header: RawHeader =
        toml::from_str(doc.metadata.trim()).map_err(|e| ContentError::MalformedMetadata {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;

    // TOML allows the date both as a quoted string and as a bare datetime
    let date_value = match header.date {
        Some(toml::Value::String(s)) => s,
        Some(toml::Value::Datetime(dt)) => dt.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let date = parse_date_time(&date_value).map_err(|_| ContentError::InvalidDate {
        path: path.to_path_buf(),
        value: date_value.clone(),
    })?;

    let title = match kind {
        ContentKind::Post | ContentKind::Talk => match header.title {
            Some(title) => Some(title),
            None => {
                return Err(ContentError::MalformedMetadata {
                    path: path.to_path_buf(),
                    reason: "missing title".to_string(),
                });
            }
        },
        // A title key on a thought is ignored, not an error
        ContentKind::Thought => None,
    };

    let (excerpt, content) = match kind {
        ContentKind::Post => split_excerpt(doc.body, &options.excerpt_marker),
        ContentKind::Thought | ContentKind::Talk => (String::new(), doc.body.to_string()),
    };

    Ok(ContentItem {
        kind,
        slug,
        title,
        date,
        excerpt,
        content,
        tags: header.tags.unwrap_or_default(),
        draft: header.draft.unwrap_or(false),
    })
}

fn slug_from_path(path: &Path) -> String {
    match path.file_stem() {
        Some(stem) => stem.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test_data::{POST_DATA, THOUGHT_DATA};

    use super::*;

    fn options() -> FrontmatterOptions {
        FrontmatterOptions::default()
    }

    #[test]
    fn test_build_post() {
        let path = PathBuf::from("content/posts/20-years.md");
        let post = build_record(&path, ContentKind::Post, POST_DATA, &options()).unwrap();

        assert_eq!(post.kind, ContentKind::Post);
        assert_eq!(post.slug, "20-years");
        assert_eq!(
            post.title.as_deref(),
            Some("What I learned after 20 years of software development")
        );
        assert_eq!(post.date_iso(), "2022-04-02T12:05:00Z");
        assert_eq!(post.tags, ["career", "software"]);
        assert!(!post.draft);

        // Excerpt stops at the marker, content keeps the whole body
        assert!(post.excerpt.ends_with("I came up with a list of what I try to do myself.\n\n"));
        assert!(!post.content.contains("<!-- more -->"));
        assert!(post.content.contains("Have an honest image of yourself."));
    }

    #[test]
    fn test_build_thought() {
        let path = PathBuf::from("content/thoughts/on-naming.md");
        let thought = build_record(&path, ContentKind::Thought, THOUGHT_DATA, &options()).unwrap();

        assert_eq!(thought.kind, ContentKind::Thought);
        assert_eq!(thought.slug, "on-naming");
        assert_eq!(thought.title, None);
        assert_eq!(thought.excerpt, "");
        assert!(thought.content.starts_with("Naming things is the only hard problem"));
    }

    #[test]
    fn test_missing_tags_and_draft_default() {
        let raw = "+++\ndate = \"2024-01-02 03:04:05\"\n+++\nA thought.\n";
        let path = PathBuf::from("content/thoughts/minimal.md");
        let item = build_record(&path, ContentKind::Thought, raw, &options()).unwrap();

        assert_eq!(item.tags, Vec::<String>::new());
        assert!(!item.draft);
    }

    #[test]
    fn test_bare_toml_datetime() {
        let raw = "+++\ntitle = \"Talk\"\ndate = 2024-05-06T07:08:09Z\n+++\nSlides.\n";
        let path = PathBuf::from("content/talks/conf.md");
        let talk = build_record(&path, ContentKind::Talk, raw, &options()).unwrap();

        assert_eq!(talk.date_iso(), "2024-05-06T07:08:09Z");
        // Talks never split an excerpt
        assert_eq!(talk.excerpt, "");
        assert_eq!(talk.content, "Slides.\n");
    }

    #[test]
    fn test_excerpt_split_exact() {
        let raw = "+++\ntitle = \"T\"\ndate = \"2024-01-02\"\n+++\nbefore<!-- more -->after";
        let path = PathBuf::from("content/posts/split.md");
        let post = build_record(&path, ContentKind::Post, raw, &options()).unwrap();

        assert_eq!(post.excerpt, "before");
        assert_eq!(post.content, "beforeafter");
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let raw = "+++\ntitle = \"T\"\ndate = \"someday\"\n+++\nbody";
        let path = PathBuf::from("content/posts/bad.md");
        let err = build_record(&path, ContentKind::Post, raw, &options()).unwrap_err();
        match err {
            ContentError::InvalidDate { value, .. } => assert_eq!(value, "someday"),
            other => panic!("expected InvalidDate, got {}", other),
        }
    }

    #[test]
    fn test_missing_date_is_fatal() {
        let raw = "+++\ntitle = \"T\"\n+++\nbody";
        let path = PathBuf::from("content/posts/no-date.md");
        let err = build_record(&path, ContentKind::Post, raw, &options()).unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
    }

    #[test]
    fn test_missing_metadata_block() {
        let raw = "Just a body, no fences.";
        let path = PathBuf::from("content/posts/plain.md");
        let err = build_record(&path, ContentKind::Post, raw, &options()).unwrap_err();
        assert!(matches!(err, ContentError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_unparsable_metadata_block() {
        let raw = "+++\ntitle = \n+++\nbody";
        let path = PathBuf::from("content/posts/broken.md");
        let err = build_record(&path, ContentKind::Post, raw, &options()).unwrap_err();
        assert!(matches!(err, ContentError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_post_requires_title() {
        let raw = "+++\ndate = \"2024-01-02\"\n+++\nbody";
        let path = PathBuf::from("content/posts/untitled.md");
        let err = build_record(&path, ContentKind::Post, raw, &options()).unwrap_err();
        assert!(matches!(err, ContentError::MalformedMetadata { .. }));

        // The same file is a perfectly fine thought
        let thought = build_record(&path, ContentKind::Thought, raw, &options()).unwrap();
        assert_eq!(thought.title, None);
    }
}
