use std::io::Cursor;
use std::sync::Arc;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::ContentItem;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>My blog</title>
  <subtitle>Blog posts and random thoughts</subtitle>
  <id>https://example.com</id>
  <link href="https://example.com"/>
  <updated>2024-01-02T10:00:00Z</updated>
  <author><name>Someone</name></author>
  <entry>
    <title>What I learned</title>
    <id>what-i-learned</id>
    <link href="https://example.com/post/what-i-learned"/>
    <updated>2024-01-02T10:00:00Z</updated>
    <content type="text"><![CDATA[How to be a great software engineer?]]></content>
  </entry>
</feed>
*/

pub struct AtomFeed<'a> {
    pub feed_title: &'a str,
    pub site_url: &'a str,
    pub feed_desc: &'a str,
    pub author: &'a str,
}

impl<'a> AtomFeed<'a> {
    pub fn render(&self, items: &[Arc<ContentItem>]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <feed xmlns="http://www.w3.org/2005/Atom">
        let mut feed = BytesStart::new("feed");
        feed.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(feed))?;

        push_text(&mut writer, "title", self.feed_title)?;
        push_text(&mut writer, "subtitle", self.feed_desc)?;

        // The site URL doubles as the feed id
        push_text(&mut writer, "id", self.site_url)?;

        let mut link = BytesStart::new("link");
        link.push_attribute(("href", self.site_url));
        writer.write_event(Event::Empty(link))?;

        // The feed is as fresh as its newest entry
        if let Some(updated) = items.iter().map(|item| item.date).max() {
            let updated = updated.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
            push_text(&mut writer, "updated", updated.as_str())?;
        }

        writer.write_event(Event::Start(BytesStart::new("author")))?;
        push_text(&mut writer, "name", self.author)?;
        writer.write_event(Event::End(BytesEnd::new("author")))?;

        for item in items {
            // <entry>
            writer.write_event(Event::Start(BytesStart::new("entry")))?;

            // Thoughts have no title; the element stays, empty
            let title = item.title.as_deref().unwrap_or("");
            push_text(&mut writer, "title", title)?;

            // The slug is the entry id
            push_text(&mut writer, "id", item.slug.as_str())?;

            let mut link = BytesStart::new("link");
            let href = full_link(self.site_url, item.slug.as_str());
            link.push_attribute(("href", href.as_str()));
            writer.write_event(Event::Empty(link))?;

            push_text(&mut writer, "updated", item.date_iso().as_str())?;

            let mut content = BytesStart::new("content");
            content.push_attribute(("type", "text"));
            writer.write_event(Event::Start(content))?;
            push_cdata_body(&mut writer, item.content.as_str())?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;

            // </entry>
            writer.write_event(Event::End(BytesEnd::new("entry")))?;
        }

        // </feed>
        writer.write_event(Event::End(BytesEnd::new("feed")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, slug: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{}/post/{}", base_url, slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata_body(writer: &mut Writer<Cursor<Vec<u8>>>, text: &str) -> quick_xml::Result<()> {
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;
    use std::sync::Arc;

    use crate::content::{ContentItem, ContentKind};
    use crate::text_utils::parse_date_time;

    use super::*;

    fn create_post(slug: &str) -> Arc<ContentItem> {
        Arc::new(ContentItem {
            kind: ContentKind::Post,
            slug: slug.to_string(),
            title: Some(format!("title-of-{}", slug)),
            date: parse_date_time("2024-01-02 05:06:07").unwrap(),
            excerpt: String::new(),
            content: format!("body-of-{}", slug),
            tags: vec![],
            draft: false,
        })
    }

    fn create_thought(slug: &str) -> Arc<ContentItem> {
        Arc::new(ContentItem {
            kind: ContentKind::Thought,
            slug: slug.to_string(),
            title: None,
            date: parse_date_time("2024-01-01 08:09:10").unwrap(),
            excerpt: String::new(),
            content: format!("thought-{}", slug),
            tags: vec![],
            draft: false,
        })
    }

    #[test]
    fn test_render_feed() {
        let items = vec![create_post("first"), create_thought("second")];

        let feed = AtomFeed {
            feed_title: "my feed",
            site_url: "https://example.com",
            feed_desc: "My blog feed",
            author: "Someone",
        };
        let xml = feed.render(&items).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://www.w3.org/2005/Atom"><title>my feed</title><subtitle>My blog feed</subtitle><id>https://example.com</id><link href="https://example.com"/><updated>2024-01-02T05:06:07Z</updated><author><name>Someone</name></author><entry><title>title-of-first</title><id>first</id><link href="https://example.com/post/first"/><updated>2024-01-02T05:06:07Z</updated><content type="text"><![CDATA[body-of-first]]></content></entry><entry><title></title><id>second</id><link href="https://example.com/post/second"/><updated>2024-01-01T08:09:10Z</updated><content type="text"><![CDATA[thought-second]]></content></entry></feed>"##;
}
