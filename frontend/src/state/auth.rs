use crate::{
    api::{ApiClient, ApiError, CurrentUser},
    state::permissions::RoleCache,
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub is_authenticated: bool,
    pub loading: bool,
    /// Set by `logout`, which owns the navigation away from the page.
    pub signed_out: bool,
}

impl AuthState {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });

    let api_client = use_context::<ApiClient>().unwrap_or_default();
    spawn_local(async move {
        match check_auth_status(&api_client).await {
            Ok(user) => set_auth_state.update(|state| {
                log::info!("signed in as {}", user.email);
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            }),
            Err(err) => set_auth_state.update(|state| {
                if !err.is_unauthorized() {
                    log::error!("failed to load current user: {}", err);
                }
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            }),
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

async fn check_auth_status(api_client: &ApiClient) -> Result<CurrentUser, ApiError> {
    api_client.me().await
}

/// Drops the session, the cached role, and navigates to `return_path`.
pub async fn logout(
    api_client: &ApiClient,
    role_cache: &RoleCache,
    return_path: &str,
    set_auth_state: WriteSignal<AuthState>,
) {
    role_cache.invalidate();
    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
        state.signed_out = true;
    });
    api_client.logout(Some(return_path)).await;
}

pub fn use_logout_action() -> Action<String, ()> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let cache = use_context::<RoleCache>().unwrap_or_default();

    create_action(move |return_path: &String| {
        let api = api.clone();
        let cache = cache.clone();
        let path = return_path.clone();
        async move { logout(&api, &cache, &path, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
            assert!(snapshot.email().is_none());
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{Role, UserRole};
    use crate::test_support::helpers::staff_user;

    #[tokio::test]
    async fn logout_clears_auth_state_and_role_cache() {
        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState {
            user: Some(staff_user("coach@example.com")),
            is_authenticated: true,
            loading: false,
            signed_out: false,
        });
        let cache = RoleCache::default();
        cache.store(
            "coach@example.com",
            Some(UserRole {
                id: "r1".into(),
                user_email: "coach@example.com".into(),
                role: Role::Editor,
                permissions: vec![],
                is_active: true,
                created_by_email: None,
            }),
        );
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9").with_app_id("app");

        logout(&api, &cache, "/", set_state).await;

        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(snapshot.signed_out);
        assert!(cache.lookup("coach@example.com").is_none());
        runtime.dispose();
    }
}
