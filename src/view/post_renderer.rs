use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::text_utils::format_date_time;
use crate::view::markdown;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    titled: bool,
    title: &'a str,
    tags: &'a Vec<ViewTag<'a>>,
    date: &'a str,
    time: &'a str,
    content: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing post view template: {}", e),
                ));
            }
        };

        Ok(PostRenderer { template })
    }

    pub fn render(&self, item: &ContentItem) -> io::Result<String> {
        let ref tags: Vec<ViewTag> = item.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let (date, time) = format_date_time(&item.date);
        let content = markdown::to_html(&item.content)?;

        Ok(self.template.render(&ViewItem {
            titled: item.title.is_some(),
            title: item.title.as_deref().unwrap_or(""),
            tags,
            date: date.as_str(),
            time: time.as_str(),
            content: content.as_str(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::content::{ContentItem, ContentKind};

    use super::*;

    #[test]
    fn test_render_view() {
        let template_src = r##"
TITLE=[{{#titled}}{{{title}}}{{/titled}}]
DATE=[{{date}}]
TIME=[{{time}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
CONTENT=[{{{content}}}]
"##;
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let item = ContentItem {
            kind: ContentKind::Post,
            slug: "a-post".to_string(),
            title: Some("<post-title>".to_string()),
            date: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveTime::from_hms_opt(3, 4, 5).unwrap(),
            )
            .and_utc(),
            excerpt: String::new(),
            content: "Plain paragraph.".to_string(),
            tags: vec!["<rust>".to_string(), "programming".to_string()],
            draft: false,
        };

        let res = post_renderer.render(&item).unwrap();
        assert_eq!(
            res,
            r##"
TITLE=[<post-title>]
DATE=[2024-01-02]
TIME=[03:04:05]
TAGS=[(&lt;rust&gt;)(programming)]
CONTENT=[<p>Plain paragraph.</p>]"##
        );
    }

    #[test]
    fn test_render_untitled_thought() {
        let template_src = r##"{{#titled}}<h1>{{title}}</h1>{{/titled}}{{{content}}}"##;
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let item = ContentItem {
            kind: ContentKind::Thought,
            slug: "t".to_string(),
            title: None,
            date: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveTime::from_hms_opt(3, 4, 5).unwrap(),
            )
            .and_utc(),
            excerpt: String::new(),
            content: "A thought.".to_string(),
            tags: vec![],
            draft: false,
        };

        let res = post_renderer.render(&item).unwrap();
        assert_eq!(res, "<p>A thought.</p>");
    }
}
