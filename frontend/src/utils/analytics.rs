use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::api::PageVisit;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitorSummary {
    pub total_visits: usize,
    pub unique_sessions: usize,
    /// Most visited first; ties by path.
    pub top_pages: Vec<(String, usize)>,
    pub visits_per_day: BTreeMap<NaiveDate, usize>,
}

/// Admin pages are not visitor traffic.
pub fn is_tracked_path(path: &str) -> bool {
    !(path == "/admin" || path.starts_with("/admin/"))
}

pub fn summarize_visits(visits: &[PageVisit], top_n: usize) -> VisitorSummary {
    let mut sessions = HashSet::new();
    let mut per_page: HashMap<&str, usize> = HashMap::new();
    let mut per_day = BTreeMap::new();

    for visit in visits {
        sessions.insert(visit.session_id.as_str());
        *per_page.entry(visit.path.as_str()).or_default() += 1;
        if let Some(created) = visit.created_date {
            *per_day.entry(created.date_naive()).or_default() += 1;
        }
    }

    let mut top_pages: Vec<(String, usize)> = per_page
        .into_iter()
        .map(|(path, count)| (path.to_string(), count))
        .collect();
    top_pages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_pages.truncate(top_n);

    VisitorSummary {
        total_visits: visits.len(),
        unique_sessions: sessions.len(),
        top_pages,
        visits_per_day: per_day,
    }
}
