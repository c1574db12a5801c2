use std::io;
use std::io::ErrorKind;
use std::sync::Arc;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
struct TalksPage<'a> {
    site_title: &'a str,
    talks: Vec<TalkItem>,
}

#[derive(ramhorns::Content)]
struct TalkItem {
    link: String,
    date: String,
    title: String,
}

/// Renders the talks index, a flat titled list kept off the main timeline.
pub struct TalksRenderer<'a> {
    pub template: Template<'a>,
}

impl TalksRenderer<'_> {
    pub fn new(talks_tpl_src: &str) -> io::Result<TalksRenderer> {
        let template = match Template::new(talks_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing talks template: {}", e),
                ));
            }
        };

        Ok(TalksRenderer { template })
    }

    pub fn render(&self, site_title: &str, talks: &[Arc<ContentItem>]) -> String {
        let mut talk_list = vec![];
        for talk in talks {
            let (date, _time) = format_date_time(&talk.date);
            talk_list.push(TalkItem {
                link: format!("/post/{}", talk.slug),
                date,
                title: talk.title.clone().unwrap_or_default(),
            });
        }

        self.template.render(&TalksPage {
            site_title,
            talks: talk_list,
        })
    }
}
