use leptos::*;

use super::repository::fetch_recent;
use crate::{
    api::ApiClient,
    components::{
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
    },
    utils::analytics::{summarize_visits, VisitorSummary},
};

const TOP_PAGES: usize = 10;

#[component]
fn StatCard(#[prop(into)] label: String, value: usize) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated rounded-lg shadow p-4">
            <p class="text-xs uppercase tracking-wide text-fg-muted">{label}</p>
            <p class="mt-1 text-2xl font-semibold text-fg">{value}</p>
        </div>
    }
}

#[component]
pub fn VisitorSummaryView(summary: VisitorSummary) -> impl IntoView {
    if summary.total_visits == 0 {
        return view! { <EmptyState title="No visits recorded yet" /> }.into_view();
    }
    let busiest = summary.visits_per_day.values().copied().max().unwrap_or(1).max(1);
    view! {
        <div class="space-y-6">
            <div class="grid gap-4 sm:grid-cols-3">
                <StatCard label="Visits" value=summary.total_visits />
                <StatCard label="Sessions" value=summary.unique_sessions />
                <StatCard label="Days with traffic" value=summary.visits_per_day.len() />
            </div>
            <div class="grid gap-6 md:grid-cols-2">
                <div class="bg-surface-elevated rounded-lg shadow p-4">
                    <h2 class="font-semibold text-fg mb-2">"Top pages"</h2>
                    <ol class="space-y-1 text-sm">
                        {summary.top_pages.into_iter().map(|(path, count)| view! {
                            <li class="flex justify-between">
                                <span class="text-fg">{path}</span>
                                <span class="text-fg-muted">{count}</span>
                            </li>
                        }).collect_view()}
                    </ol>
                </div>
                <div class="bg-surface-elevated rounded-lg shadow p-4">
                    <h2 class="font-semibold text-fg mb-2">"Visits per day"</h2>
                    <ul class="space-y-1 text-sm">
                        {summary.visits_per_day.into_iter().rev().map(|(day, count)| {
                            let width = format!("width: {}%", count * 100 / busiest);
                            view! {
                                <li class="flex items-center gap-2">
                                    <span class="w-24 text-fg-muted">{day.format("%Y-%m-%d").to_string()}</span>
                                    <span class="h-2 rounded bg-action-primary-bg" style=width></span>
                                    <span class="text-fg">{count}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </div>
            </div>
        </div>
    }
    .into_view()
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let visits = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { fetch_recent(&api).await }
        },
    );

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Visitor analytics"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Traffic on the public site from the most recent visits."</p>
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || visits.get().map(|result| match result {
                    Ok(list) => view! {
                        <VisitorSummaryView summary=summarize_visits(&list, TOP_PAGES) />
                    }
                    .into_view(),
                    Err(err) => view! { <ErrorMessage message=err.error /> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::PageVisit;
    use crate::test_support::ssr::render_to_string;
    use chrono::{TimeZone, Utc};

    fn visit(path: &str, session: &str) -> PageVisit {
        PageVisit {
            id: String::new(),
            path: path.into(),
            session_id: session.into(),
            referrer: None,
            created_date: Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()),
        }
    }

    #[test]
    fn summary_lists_top_pages() {
        let visits = vec![visit("/", "a"), visit("/fitness", "a"), visit("/", "b")];
        let html = render_to_string(move || {
            view! { <VisitorSummaryView summary=summarize_visits(&visits, 5) /> }
        });
        assert!(html.contains("Top pages"));
        // text nodes escape '/' as &#x2f;
        assert!(html.contains("&#x2f;fitness") || html.contains("&#x2F;fitness"));
        assert!(html.contains("2026-03-02"));
    }

    #[test]
    fn empty_summary_shows_placeholder() {
        let html = render_to_string(move || {
            view! { <VisitorSummaryView summary=VisitorSummary::default() /> }
        });
        assert!(html.contains("No visits recorded yet"));
    }
}
