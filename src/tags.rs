use std::collections::HashMap;
use std::sync::Arc;

use crate::content::ContentItem;

/// Keeps the items carrying an exact, case sensitive match for `tag`,
/// preserving their relative order. The caller decides what an empty
/// result means.
pub fn filter_by_tag(items: &[Arc<ContentItem>], tag: &str) -> Vec<Arc<ContentItem>> {
    items
        .iter()
        .filter(|item| item.tags.iter().any(|t| t == tag))
        .cloned()
        .collect()
}

/// Tag census over a list of items: every distinct tag, most used first.
/// Ties break alphabetically so the order is stable.
pub fn collect_tags(items: &[Arc<ContentItem>]) -> Vec<String> {
    let mut tag_map: HashMap<String, u32> = HashMap::new();
    for item in items {
        for tag in item.tags.iter() {
            *tag_map.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tag_list: Vec<(String, u32)> = tag_map.into_iter().collect();
    tag_list.sort_by(|a, b| {
        let (ta, va) = a;
        let (tb, vb) = b;
        vb.cmp(va).then(ta.cmp(tb))
    });
    tag_list.into_iter().map(|(tag, _count)| tag).collect()
}
