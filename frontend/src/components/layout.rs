use crate::{
    access::{AdminPage, PermissionSet, DASHBOARD_PATH},
    api::{auth::current_path, ApiClient},
    pages::admin_analytics::repository as analytics_repository,
    state::{
        auth::{self, use_auth},
        permissions::use_permissions,
    },
    utils::analytics::is_tracked_path,
};
use leptos::*;

const NAV_LINK: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

pub fn nav_pages(permissions: &PermissionSet) -> Vec<AdminPage> {
    permissions.permitted_pages()
}

#[component]
pub fn AdminHeader() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let permissions = use_permissions();
    let pages = create_memo(move |_| permissions.state.with(|s| nav_pages(&s.permissions)));
    let user_label = move || {
        auth.get()
            .user
            .as_ref()
            .map(|user| user.display_name().to_string())
            .unwrap_or_default()
    };
    let role_label = move || {
        permissions
            .state
            .get()
            .permissions
            .role()
            .map(|role| role.label())
            .unwrap_or("No role")
    };

    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch("/".to_string());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href=DASHBOARD_PATH class="text-xl font-semibold text-fg">
                        "Ironhall Admin"
                    </a>
                    <div class="flex items-center gap-3 text-sm text-fg-muted">
                        <span>{user_label}</span>
                        <span class="rounded bg-surface-muted px-2 py-0.5 text-xs">{role_label}</span>
                        <button
                            on:click=on_logout
                            class=NAV_LINK
                            disabled=move || logout_pending.get()
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
                <nav class="flex flex-wrap gap-1 pb-3">
                    <a href=DASHBOARD_PATH class=NAV_LINK>"Dashboard"</a>
                    <For
                        each=move || pages.get()
                        key=|page| page.key()
                        children=move |page| {
                            view! { <a href=page.path() class=NAV_LINK>{page.label()}</a> }
                        }
                    />
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <AdminHeader/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8 space-y-6">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    create_effect(move |_| {
        let path = current_path();
        if !is_tracked_path(&path) {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            if let Err(err) = analytics_repository::record_visit(&api, &path).await {
                log::warn!("failed to record visit to {}: {}", path, err);
            }
        });
    });

    view! {
        <div class="min-h-screen bg-surface">
            <header class="bg-surface-elevated border-b border-border">
                <nav class="max-w-7xl mx-auto px-4 flex items-center gap-2 h-16">
                    <a href="/" class="text-xl font-semibold text-fg mr-4">"Ironhall"</a>
                    <a href="/fitness" class=NAV_LINK>"Fitness tools"</a>
                    <a href="/contact" class=NAV_LINK>"Contact"</a>
                </nav>
            </header>
            <main class="max-w-5xl mx-auto py-8 px-4">{children()}</main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
