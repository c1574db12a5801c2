use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::day_groups::DayGroups;
use crate::text_utils::format_date_time;
use crate::view::markdown;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_title: &'a str,
    days: Vec<DaySection>,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct DaySection {
    date: String,
    items: Vec<ListItem>,
}

#[derive(ramhorns::Content)]
struct ListItem {
    link: String,
    time: String,
    titled: bool,
    title: String,
    summary: String,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

/// Renders the day-grouped timeline: one section per calendar day, newest
/// day first. Posts show their title and excerpt, thoughts their whole
/// body.
pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing list template: {}", e),
                ));
            }
        };

        Ok(ListRenderer { template })
    }

    pub fn render(
        &self,
        site_title: &str,
        groups: &DayGroups,
        tags: Vec<String>,
    ) -> io::Result<String> {
        let mut days = vec![];
        for day in groups.sorted_dates.iter() {
            let mut items = vec![];
            if let Some(day_items) = groups.days.get(day) {
                for item in day_items {
                    let (_date, time) = format_date_time(&item.date);
                    let summary_src = match item.title {
                        Some(_) => item.excerpt.as_str(),
                        None => item.content.as_str(),
                    };
                    items.push(ListItem {
                        link: format!("/post/{}", item.slug),
                        time,
                        titled: item.title.is_some(),
                        title: item.title.clone().unwrap_or_default(),
                        summary: markdown::to_html(summary_src)?,
                    });
                }
            }
            days.push(DaySection {
                date: day.format("%Y-%m-%d").to_string(),
                items,
            });
        }

        let tags: Vec<ViewTag> = tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        Ok(self.template.render(&ListPage {
            site_title,
            days,
            tags,
        }))
    }
}
