use leptos::*;

use crate::{
    access::AdminPage,
    components::layout::LoadingSpinner,
    state::{auth::use_auth, permissions::use_permissions},
};

pub fn page_blurb(page: AdminPage) -> &'static str {
    match page {
        AdminPage::Classes => "Class catalog and display order",
        AdminPage::Clubs => "Club locations and details",
        AdminPage::Packages => "Membership packages and pricing",
        AdminPage::Banners => "Home page banners",
        AdminPage::Schedules => "Weekly class timetable",
        AdminPage::Bookings => "Confirm or cancel class bookings",
        AdminPage::Inquiries => "Contact form messages",
        AdminPage::Content => "Blog posts and cover images",
        AdminPage::Analytics => "Public site traffic",
        AdminPage::UserRoles => "Staff roles and page access",
    }
}

#[component]
fn PageCard(page: AdminPage) -> impl IntoView {
    view! {
        <a
            href=page.path()
            class="block bg-surface-elevated rounded-lg shadow p-5 hover:shadow-md border border-border"
        >
            <h2 class="font-semibold text-fg">{page.label()}</h2>
            <p class="mt-1 text-sm text-fg-muted">{page_blurb(page)}</p>
        </a>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let permissions = use_permissions();
    let greeting = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|u| format!("Welcome back, {}", u.display_name()))
                .unwrap_or_else(|| "Welcome".to_string())
        })
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">{greeting}</h1>
                <p class="mt-1 text-sm text-fg-muted">"Pick an area to manage."</p>
            </div>
            {move || {
                if permissions.loading() {
                    return view! { <LoadingSpinner /> }.into_view();
                }
                let pages = permissions.state.with(|s| s.permissions.permitted_pages());
                if pages.is_empty() {
                    view! {
                        <div class="bg-surface-elevated shadow rounded-lg p-6">
                            <p class="text-sm text-fg">
                                "Your account has no admin access yet. Ask a super admin to assign you a role."
                            </p>
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                            {pages.into_iter().map(|page| view! { <PageCard page=page /> }).collect_view()}
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, provide_permissions};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn lists_only_permitted_pages() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(Some(Role::Editor), &["schedules", "bookings"], false);
            view! { <AdminDashboardPage /> }
        });
        assert!(html.contains("Welcome back, Staff Member"));
        assert!(html.contains("/admin/schedules"));
        assert!(html.contains("/admin/bookings"));
        assert!(!html.contains("/admin/clubs"));
    }

    #[test]
    fn explains_missing_access() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(None, &[], false);
            view! { <AdminDashboardPage /> }
        });
        assert!(html.contains("no admin access yet"));
    }

    #[test]
    fn waits_for_role() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(None, &[], true);
            view! { <AdminDashboardPage /> }
        });
        assert!(html.contains("animate-spin"));
    }
}
