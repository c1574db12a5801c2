use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::content::ContentItem;

/// Items bucketed by UTC calendar day, plus the distinct days in
/// newest-first order.
pub struct DayGroups {
    pub days: HashMap<NaiveDate, Vec<Arc<ContentItem>>>,
    pub sorted_dates: Vec<NaiveDate>,
}

/// Groups items by the UTC day of their timestamp. Items keep their input
/// order inside each bucket, so a date-sorted input stays newest-first
/// within every day. Pure function, recomputed per request.
pub fn group_by_day(items: &[Arc<ContentItem>]) -> DayGroups {
    let mut days: HashMap<NaiveDate, Vec<Arc<ContentItem>>> = HashMap::new();
    for item in items {
        days.entry(item.day()).or_default().push(item.clone());
    }

    let mut sorted_dates: Vec<NaiveDate> = days.keys().copied().collect();
    sorted_dates.sort_by(|a, b| b.cmp(a));

    DayGroups { days, sorted_dates }
}
