use crate::{
    access::{AdminPage, DASHBOARD_PATH},
    api::{
        auth::{current_path, navigate_to},
        ApiClient,
    },
    components::layout::LoadingSpinner,
    state::{
        auth::{use_auth, AuthState},
        permissions::{use_permissions, PermissionState},
    },
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth or role still loading; render a spinner, never redirect.
    Pending,
    Allow,
    /// Just logged out; `logout` is already navigating, so stay put.
    SignedOut,
    RedirectToLogin,
    RedirectToDashboard,
}

/// `page = None` only requires a signed-in user.
pub fn evaluate_access(
    auth: &AuthState,
    permissions: &PermissionState,
    page: Option<AdminPage>,
) -> GuardDecision {
    if auth.loading {
        return GuardDecision::Pending;
    }
    if !auth.is_authenticated {
        return if auth.signed_out {
            GuardDecision::SignedOut
        } else {
            GuardDecision::RedirectToLogin
        };
    }
    let Some(page) = page else {
        return GuardDecision::Allow;
    };
    if permissions.loading {
        GuardDecision::Pending
    } else if permissions.permissions.can_open(page) {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToDashboard
    }
}

#[component]
pub fn RequirePermission(
    #[prop(optional)] page: Option<AdminPage>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth, _) = use_auth();
    let permissions = use_permissions();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let decision = create_memo(move |_| {
        auth.with(|a| permissions.state.with(|p| evaluate_access(a, p, page)))
    });

    // one redirect per mount
    let redirected = store_value(false);
    create_effect(move |_| {
        let next = decision.get();
        if !matches!(
            next,
            GuardDecision::RedirectToLogin | GuardDecision::RedirectToDashboard
        ) || redirected.get_value()
        {
            return;
        }
        redirected.set_value(true);
        if next == GuardDecision::RedirectToDashboard {
            log::warn!("no permission for {:?}, returning to dashboard", page);
            navigate_to(DASHBOARD_PATH);
        } else {
            let api = api.clone();
            spawn_local(async move {
                api.redirect_to_login(&current_path()).await;
            });
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Allow
            fallback=move || {
                if decision.get() == GuardDecision::Pending {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::PermissionSet;
    use crate::api::{Role, UserRole};
    use crate::test_support::helpers::staff_user;

    fn auth(is_authenticated: bool, loading: bool) -> AuthState {
        AuthState {
            user: is_authenticated.then(|| staff_user("staff@example.com")),
            is_authenticated,
            loading,
            signed_out: false,
        }
    }

    fn perms(role: Option<Role>, keys: &[&str], loading: bool) -> PermissionState {
        let record = role.map(|role| UserRole {
            id: "r1".into(),
            user_email: "staff@example.com".into(),
            role,
            permissions: keys.iter().map(|k| k.to_string()).collect(),
            is_active: true,
            created_by_email: None,
        });
        PermissionState {
            email: Some("staff@example.com".into()),
            permissions: PermissionSet::from_record(record.as_ref()),
            loading,
        }
    }

    #[test]
    fn loading_never_redirects() {
        let none = perms(None, &[], true);
        assert_eq!(
            evaluate_access(&auth(false, true), &none, Some(AdminPage::Classes)),
            GuardDecision::Pending
        );
        assert_eq!(
            evaluate_access(&auth(true, false), &none, Some(AdminPage::Classes)),
            GuardDecision::Pending
        );
    }

    #[test]
    fn signed_out_users_go_to_login() {
        assert_eq!(
            evaluate_access(&auth(false, false), &perms(None, &[], false), None),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn signing_out_does_not_trigger_a_login_redirect() {
        let after_logout = AuthState {
            signed_out: true,
            ..auth(false, false)
        };
        for page in [None, Some(AdminPage::Classes)] {
            assert_eq!(
                evaluate_access(&after_logout, &perms(None, &[], false), page),
                GuardDecision::SignedOut
            );
        }
    }

    #[test]
    fn dashboard_only_needs_a_session() {
        assert_eq!(
            evaluate_access(&auth(true, false), &perms(None, &[], true), None),
            GuardDecision::Allow
        );
    }

    #[test]
    fn missing_permission_returns_to_dashboard() {
        let editor = perms(Some(Role::Editor), &["content"], false);
        assert_eq!(
            evaluate_access(&auth(true, false), &editor, Some(AdminPage::Content)),
            GuardDecision::Allow
        );
        assert_eq!(
            evaluate_access(&auth(true, false), &editor, Some(AdminPage::Bookings)),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(
            evaluate_access(
                &auth(true, false),
                &perms(None, &[], false),
                Some(AdminPage::Content)
            ),
            GuardDecision::RedirectToDashboard
        );
    }

    #[test]
    fn roles_manager_needs_super_admin_even_when_listed() {
        let admin = perms(Some(Role::Admin), &["user_roles", "classes"], false);
        assert_eq!(
            evaluate_access(&auth(true, false), &admin, Some(AdminPage::UserRoles)),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(
            evaluate_access(&auth(true, false), &admin, Some(AdminPage::Classes)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn super_admin_is_allowed_everywhere() {
        let root = perms(Some(Role::SuperAdmin), &[], false);
        for page in AdminPage::ALL {
            assert_eq!(
                evaluate_access(&auth(true, false), &root, Some(page)),
                GuardDecision::Allow
            );
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequirePermission;
    use crate::access::AdminPage;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, provide_permissions};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn renders_children_when_permitted() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(Some(Role::Editor), &["classes"], false);
            view! {
                <RequirePermission page=AdminPage::Classes>
                    {|| view! { <div>"classes-manager"</div> }}
                </RequirePermission>
            }
        });
        assert!(html.contains("classes-manager"));
    }

    #[test]
    fn hides_children_without_permission() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(Some(Role::Editor), &["classes"], false);
            view! {
                <RequirePermission page=AdminPage::Bookings>
                    {|| view! { <div>"bookings-manager"</div> }}
                </RequirePermission>
            }
        });
        assert!(!html.contains("bookings-manager"));
        assert!(!html.contains("animate-spin"));
    }

    #[test]
    fn shows_spinner_while_role_is_loading() {
        let html = render_to_string(move || {
            provide_auth(true, false);
            provide_permissions(None, &[], true);
            view! {
                <RequirePermission page=AdminPage::Bookings>
                    {|| view! { <div>"bookings-manager"</div> }}
                </RequirePermission>
            }
        });
        assert!(!html.contains("bookings-manager"));
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn hides_everything_when_signed_out() {
        let html = render_to_string(move || {
            provide_auth(false, false);
            provide_permissions(None, &[], false);
            view! {
                <RequirePermission>
                    {|| view! { <div>"dashboard"</div> }}
                </RequirePermission>
            }
        });
        assert!(!html.contains("dashboard"));
    }
}
