use std::{cell::RefCell, rc::Rc};

use leptos::*;
use serde_json::json;

use crate::{
    access::{AdminPage, PermissionSet},
    api::{ApiClient, ApiError, UserRole},
    state::auth::use_auth,
};

#[derive(Debug, Clone)]
struct CachedRole {
    email: String,
    role: Option<UserRole>,
}

/// Session-scoped read-through cache of the signed-in user's role record.
///
/// Holds at most one entry, keyed by email. Cleared on logout and whenever the
/// roles manager changes a record for the cached email. Failed lookups are not
/// stored, so the next resolve retries.
#[derive(Clone, Default)]
pub struct RoleCache {
    inner: Rc<RefCell<Option<CachedRole>>>,
}

impl RoleCache {
    /// `Some(None)` is a cached "no role record".
    pub fn lookup(&self, email: &str) -> Option<Option<UserRole>> {
        self.inner
            .borrow()
            .as_ref()
            .filter(|cached| cached.email.eq_ignore_ascii_case(email))
            .map(|cached| cached.role.clone())
    }

    pub fn store(&self, email: &str, role: Option<UserRole>) {
        *self.inner.borrow_mut() = Some(CachedRole {
            email: email.to_string(),
            role,
        });
    }

    pub fn invalidate(&self) {
        self.inner.borrow_mut().take();
    }

    /// Returns true when the cached entry belonged to `email`.
    pub fn invalidate_for(&self, email: &str) -> bool {
        let matches = self.lookup(email).is_some();
        if matches {
            self.invalidate();
        }
        matches
    }

    pub async fn resolve(
        &self,
        api: &ApiClient,
        email: &str,
    ) -> Result<Option<UserRole>, ApiError> {
        if let Some(hit) = self.lookup(email) {
            return Ok(hit);
        }
        let role = fetch_active_role(api, email).await?;
        self.store(email, role.clone());
        Ok(role)
    }
}

/// First active `UserRole` for `email`, if any.
pub async fn fetch_active_role(
    api: &ApiClient,
    email: &str,
) -> Result<Option<UserRole>, ApiError> {
    let matches: Vec<UserRole> = api
        .filter(&json!({ "user_email": email, "is_active": true }), None, Some(1))
        .await?;
    Ok(matches.into_iter().find(|record| record.is_active))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionState {
    pub email: Option<String>,
    pub permissions: PermissionSet,
    pub loading: bool,
}

#[derive(Clone, Copy)]
pub struct PermissionContext {
    pub state: ReadSignal<PermissionState>,
    revision: RwSignal<u32>,
}

impl PermissionContext {
    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn has_permission(&self, page: AdminPage) -> bool {
        self.state.with(|s| s.permissions.has_permission(page))
    }

    pub fn is_super_admin(&self) -> bool {
        self.state.with(|s| s.permissions.is_super_admin())
    }

    /// Re-resolves the role, e.g. after the cache was invalidated.
    pub fn reload(&self) {
        self.revision.update(|r| *r = r.wrapping_add(1));
    }
}

pub fn permission_context_from(state: ReadSignal<PermissionState>) -> PermissionContext {
    PermissionContext {
        state,
        revision: create_rw_signal(0),
    }
}

#[component]
pub fn PermissionProvider(children: Children) -> impl IntoView {
    let (auth, _) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let cache = use_context::<RoleCache>().unwrap_or_else(|| {
        let cache = RoleCache::default();
        provide_context(cache.clone());
        cache
    });

    let (state, set_state) = create_signal(PermissionState {
        loading: true,
        ..PermissionState::default()
    });
    let ctx = permission_context_from(state);
    let revision = ctx.revision;

    create_effect(move |_| {
        let auth_state = auth.get();
        let current_revision = revision.get();
        if auth_state.loading {
            set_state.update(|s| s.loading = true);
            return;
        }
        let Some(email) = auth_state.email().map(str::to_string) else {
            set_state.set(PermissionState::default());
            return;
        };
        if let Some(hit) = cache.lookup(&email) {
            set_state.set(resolved_state(&email, hit.as_ref()));
            return;
        }
        set_state.update(|s| s.loading = true);
        let api = api.clone();
        let cache = cache.clone();
        spawn_local(async move {
            let next = match cache.resolve(&api, &email).await {
                Ok(role) => {
                    log::info!(
                        "role resolved for {}: {:?}",
                        email,
                        role.as_ref().map(|r| r.role)
                    );
                    resolved_state(&email, role.as_ref())
                }
                Err(err) => {
                    log::warn!("role lookup failed, continuing without permissions: {}", err);
                    resolved_state(&email, None)
                }
            };
            if revision.get_untracked() == current_revision {
                set_state.set(next);
            }
        });
    });

    provide_context(ctx);
    view! { <>{children()}</> }
}

fn resolved_state(email: &str, role: Option<&UserRole>) -> PermissionState {
    PermissionState {
        email: Some(email.to_string()),
        permissions: PermissionSet::from_record(role),
        loading: false,
    }
}

pub fn use_permissions() -> PermissionContext {
    use_context::<PermissionContext>().unwrap_or_else(|| {
        let (state, _) = create_signal(PermissionState::default());
        permission_context_from(state)
    })
}

pub fn use_role_cache() -> RoleCache {
    use_context::<RoleCache>().unwrap_or_default()
}
