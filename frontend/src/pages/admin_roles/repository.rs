use std::rc::Rc;

use serde_json::json;

use crate::{
    api::{ApiClient, ApiError, UserRole},
    state::permissions::RoleCache,
};

/// Role records plus the session cache that must forget any record the
/// signed-in user's permissions were resolved from.
#[derive(Clone)]
pub struct RolesRepository {
    client: Rc<ApiClient>,
    cache: RoleCache,
}

impl RolesRepository {
    pub fn new_with_client(client: Rc<ApiClient>, cache: RoleCache) -> Self {
        Self { client, cache }
    }

    pub async fn fetch_roles(&self) -> Result<Vec<UserRole>, ApiError> {
        self.client.list(Some("user_email"), None).await
    }

    /// Creates or updates depending on whether `record` carries an id.
    /// Returns the saved record and whether the cached role was dropped.
    pub async fn save(&self, record: &UserRole) -> Result<(UserRole, bool), ApiError> {
        let saved = if record.id.is_empty() {
            self.client.create(record).await?
        } else {
            self.client
                .update::<UserRole, _>(
                    &record.id,
                    &json!({
                        "user_email": record.user_email,
                        "role": record.role,
                        "permissions": record.permissions,
                        "is_active": record.is_active,
                    }),
                )
                .await?
        };
        let invalidated = self.cache.invalidate_for(&saved.user_email);
        Ok((saved, invalidated))
    }

    pub async fn set_active(&self, record: &UserRole, is_active: bool) -> Result<bool, ApiError> {
        self.client
            .update::<UserRole, _>(&record.id, &json!({ "is_active": is_active }))
            .await?;
        Ok(self.cache.invalidate_for(&record.user_email))
    }

    pub async fn delete(&self, record: &UserRole) -> Result<bool, ApiError> {
        self.client.delete::<UserRole>(&record.id).await?;
        Ok(self.cache.invalidate_for(&record.user_email))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::role_record;
    use httpmock::prelude::*;

    fn repository(server: &MockServer, cache: RoleCache) -> RolesRepository {
        let client = ApiClient::new_with_base_url(server.url("/api"))
            .with_app_id("gym")
            .with_token("t");
        RolesRepository::new_with_client(Rc::new(client), cache)
    }

    #[tokio::test]
    async fn editing_the_cached_users_record_invalidates_the_cache() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/apps/gym/entities/UserRole/r1")
                    .json_body_partial(r#"{ "role": "admin", "permissions": ["bookings"] }"#);
                then.status(200).json_body(json!({
                    "id": "r1",
                    "user_email": "coach@example.com",
                    "role": "admin",
                    "permissions": ["bookings"],
                    "is_active": true
                }));
            })
            .await;

        let cache = RoleCache::default();
        let mut cached = role_record("coach@example.com", Role::Editor, &["classes"]);
        cached.id = "r1".into();
        cache.store("coach@example.com", Some(cached.clone()));

        let mut edited = cached;
        edited.role = Role::Admin;
        edited.permissions = vec!["bookings".into()];
        let (saved, invalidated) = repository(&server, cache.clone())
            .save(&edited)
            .await
            .unwrap();

        assert_eq!(saved.role, Role::Admin);
        assert!(invalidated);
        assert!(cache.lookup("coach@example.com").is_none());
        update.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn other_users_changes_keep_the_cache() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/apps/gym/entities/UserRole/r2");
                then.status(204);
            })
            .await;

        let cache = RoleCache::default();
        cache.store("root@example.com", None);
        let mut desk = role_record("desk@example.com", Role::Editor, &[]);
        desk.id = "r2".into();
        let invalidated = repository(&server, cache.clone())
            .delete(&desk)
            .await
            .unwrap();

        assert!(!invalidated);
        assert!(cache.lookup("root@example.com").is_some());
    }
}
