#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::access::PermissionSet;
    use crate::api::{CurrentUser, Role, UserRole};
    use crate::state::auth::AuthState;
    use crate::state::permissions::{permission_context_from, PermissionState};
    use leptos::*;

    pub fn staff_user(email: &str) -> CurrentUser {
        CurrentUser {
            id: format!("u-{}", email),
            email: email.into(),
            full_name: Some("Staff Member".into()),
            role: Some("user".into()),
        }
    }

    pub fn role_record(email: &str, role: Role, keys: &[&str]) -> UserRole {
        UserRole {
            id: format!("role-{}", email),
            user_email: email.into(),
            role,
            permissions: keys.iter().map(|k| k.to_string()).collect(),
            is_active: true,
            created_by_email: Some("root@example.com".into()),
        }
    }

    pub fn provide_auth(
        is_authenticated: bool,
        loading: bool,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            user: is_authenticated.then(|| staff_user("staff@example.com")),
            is_authenticated,
            loading,
            signed_out: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn provide_permissions(role: Option<Role>, keys: &[&str], loading: bool) {
        let record = role.map(|role| role_record("staff@example.com", role, keys));
        let (state, _) = create_signal(PermissionState {
            email: Some("staff@example.com".into()),
            permissions: PermissionSet::from_record(record.as_ref()),
            loading,
        });
        provide_context(permission_context_from(state));
    }
}
