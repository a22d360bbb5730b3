use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    access::{AdminPage, DASHBOARD_PATH},
    api::ApiClient,
    components::{
        guard::RequirePermission,
        layout::{AdminLayout, PublicLayout},
    },
    pages::{
        AdminDashboardPage, AnalyticsPage, BannersPage, BookingsPage, ClassesPage, ClubsPage,
        ContactPage, ContentPage, FitnessPage, HomePage, InquiriesPage, PackagesPage,
        SchedulesPage, UserRolesPage,
    },
    state::{auth::AuthProvider, permissions::PermissionProvider, permissions::RoleCache},
};

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/fitness", "/contact"];

pub const ADMIN_PAGE_ROUTE: &str = "/admin/:page";

/// Every concrete path the app serves.
pub fn route_paths() -> Vec<String> {
    PUBLIC_ROUTE_PATHS
        .iter()
        .map(|path| path.to_string())
        .chain(std::iter::once(DASHBOARD_PATH.to_string()))
        .chain(AdminPage::ALL.iter().map(AdminPage::path))
        .collect()
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_context(RoleCache::default());
    provide_meta_context();
    view! {
        <Title formatter=|text| format!("{} | Ironhall", text) />
        <AuthProvider>
            <PermissionProvider>
                <Router>
                    <Routes>
                        <Route path="/" view=PublicHome/>
                        <Route path="/fitness" view=PublicFitness/>
                        <Route path="/contact" view=PublicContact/>
                        <Route path=DASHBOARD_PATH view=AdminDashboardRoute/>
                        <Route path=ADMIN_PAGE_ROUTE view=AdminPageRoute/>
                    </Routes>
                </Router>
            </PermissionProvider>
        </AuthProvider>
    }
}

#[component]
fn PublicHome() -> impl IntoView {
    view! { <PublicLayout><Title text="Welcome"/><HomePage/></PublicLayout> }
}

#[component]
fn PublicFitness() -> impl IntoView {
    view! { <PublicLayout><Title text="Fitness calculator"/><FitnessPage/></PublicLayout> }
}

#[component]
fn PublicContact() -> impl IntoView {
    view! { <PublicLayout><Title text="Contact"/><ContactPage/></PublicLayout> }
}

#[component]
fn AdminDashboardRoute() -> impl IntoView {
    view! {
        <Title text="Admin"/>
        <RequirePermission>
            <AdminLayout><AdminDashboardPage/></AdminLayout>
        </RequirePermission>
    }
}

pub fn admin_page_view(page: AdminPage) -> View {
    match page {
        AdminPage::Classes => view! { <ClassesPage/> }.into_view(),
        AdminPage::Clubs => view! { <ClubsPage/> }.into_view(),
        AdminPage::Packages => view! { <PackagesPage/> }.into_view(),
        AdminPage::Banners => view! { <BannersPage/> }.into_view(),
        AdminPage::Schedules => view! { <SchedulesPage/> }.into_view(),
        AdminPage::Bookings => view! { <BookingsPage/> }.into_view(),
        AdminPage::Inquiries => view! { <InquiriesPage/> }.into_view(),
        AdminPage::Content => view! { <ContentPage/> }.into_view(),
        AdminPage::Analytics => view! { <AnalyticsPage/> }.into_view(),
        AdminPage::UserRoles => view! { <UserRolesPage/> }.into_view(),
    }
}

/// `/admin/:page`; unknown keys fall back to the dashboard.
#[component]
fn AdminPageRoute() -> impl IntoView {
    let params = use_params_map();
    let page = create_memo(move |_| {
        params.with(|p| p.get("page").and_then(|key| AdminPage::from_key(key)))
    });

    move || match page.get() {
        Some(page) => view! {
            <Title text=page.label()/>
            <RequirePermission page=page>
                <AdminLayout>{admin_page_view(page)}</AdminLayout>
            </RequirePermission>
        }
        .into_view(),
        None => {
            log::warn!("unknown admin page, returning to dashboard");
            view! { <Redirect path=DASHBOARD_PATH/> }.into_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_admin_page_has_a_route() {
        let paths = route_paths();
        for page in AdminPage::ALL {
            assert!(paths.contains(&page.path()), "missing route for {:?}", page);
        }
        assert!(paths.contains(&"/admin/user_roles".to_string()));
    }

    #[test]
    fn public_routes_stay_outside_admin() {
        for path in PUBLIC_ROUTE_PATHS {
            assert!(!path.starts_with(DASHBOARD_PATH));
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let paths = route_paths();
        let unique: HashSet<&String> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }
}
