use std::{marker::PhantomData, rc::Rc};

use serde_json::{json, Map, Value};

use super::utils::CatalogItem;
use crate::{
    api::{ApiClient, ApiError},
    utils::ordering::{
        next_order, plan_move, plan_renumber, sort_by_order, MoveDirection, OrderUpdate,
    },
};

pub struct CatalogRepository<T> {
    client: Rc<ApiClient>,
    _marker: PhantomData<T>,
}

impl<T> Clone for CatalogRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            _marker: PhantomData,
        }
    }
}

impl<T: CatalogItem> CatalogRepository<T> {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// Whole collection in display order.
    pub async fn fetch_sorted(&self) -> Result<Vec<T>, ApiError> {
        let mut items: Vec<T> = self.client.list(Some(T::ORDER_FIELD), None).await?;
        sort_by_order(&mut items);
        Ok(items)
    }

    /// Writes each order update in turn, then re-reads the collection.
    /// Stops at the first failed write.
    pub async fn apply_updates(&self, updates: &[OrderUpdate]) -> Result<Vec<T>, ApiError> {
        for update in updates {
            let mut patch = Map::new();
            patch.insert(T::ORDER_FIELD.to_string(), Value::from(update.order));
            self.client
                .update::<T, _>(&update.id, &Value::Object(patch))
                .await?;
        }
        self.fetch_sorted().await
    }

    /// `None` when the move is out of bounds; nothing is written then.
    pub async fn move_item(
        &self,
        items: &[T],
        index: usize,
        direction: MoveDirection,
    ) -> Option<Result<Vec<T>, ApiError>> {
        let plan = plan_move(items, index, direction)?;
        log::info!("reordering {} ({:?} from {})", T::NAME, direction, index);
        Some(self.apply_updates(&plan.updates).await)
    }

    /// Returns the refreshed list and how many records changed.
    pub async fn renumber(&self, items: &[T]) -> Result<(Vec<T>, usize), ApiError> {
        let plan = plan_renumber(items);
        let changed = plan.updates.len();
        if changed == 0 {
            return Ok((plan.items, 0));
        }
        Ok((self.apply_updates(&plan.updates).await?, changed))
    }

    pub async fn quick_add(&self, title: &str, items: &[T]) -> Result<T, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("A name is required"));
        }
        self.client.create(&T::draft(title, next_order(items))).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<T, ApiError> {
        self.client
            .update::<T, _>(id, &json!({ "is_active": is_active }))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<T>(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{GymClass, SiteBanner};
    use httpmock::prelude::*;
    use serde_json::json;

    fn repository<T: CatalogItem>(server: &MockServer) -> CatalogRepository<T> {
        let client = ApiClient::new_with_base_url(server.url("/api"))
            .with_app_id("gym")
            .with_token("test-token");
        CatalogRepository::new_with_client(Rc::new(client))
    }

    fn class(id: &str, order: i64) -> GymClass {
        let mut class = GymClass::draft(&id.to_uppercase(), order);
        class.id = id.to_string();
        class
    }

    #[tokio::test]
    async fn moving_middle_item_writes_two_orders_then_refetches() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/apps/gym/entities/Class/a")
                    .json_body(json!({ "order": 1 }));
                then.status(200)
                    .json_body(json!({ "id": "a", "name": "A", "order": 1 }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/apps/gym/entities/Class/b")
                    .json_body(json!({ "order": 0 }));
                then.status(200)
                    .json_body(json!({ "id": "b", "name": "B", "order": 0 }));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/apps/gym/entities/Class")
                    .query_param("sort", "order");
                then.status(200).json_body(json!([
                    { "id": "c", "name": "C", "order": 2 },
                    { "id": "a", "name": "A", "order": 1 },
                    { "id": "b", "name": "B", "order": 0 }
                ]));
            })
            .await;

        let items = vec![class("a", 0), class("b", 1), class("c", 2)];
        let refreshed = repository::<GymClass>(&server)
            .move_item(&items, 1, MoveDirection::Up)
            .await
            .unwrap()
            .unwrap();

        first.assert_hits_async(1).await;
        second.assert_hits_async(1).await;
        list.assert_hits_async(1).await;
        let ids: Vec<&str> = refreshed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn out_of_bounds_move_makes_no_calls() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.path_contains("/entities/");
                then.status(200).json_body(json!([]));
            })
            .await;

        let items = vec![class("a", 0), class("b", 1)];
        let repo = repository::<GymClass>(&server);
        assert!(repo.move_item(&items, 0, MoveDirection::Up).await.is_none());
        assert!(repo.move_item(&items, 1, MoveDirection::Down).await.is_none());
        any.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn banners_write_position_field() {
        let server = MockServer::start_async().await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/apps/gym/entities/SiteBanner/b2")
                    .json_body(json!({ "position": 1 }));
                then.status(200)
                    .json_body(json!({ "id": "b2", "title": "Two", "position": 1 }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/apps/gym/entities/SiteBanner");
                then.status(200).json_body(json!([]));
            })
            .await;

        let updates = vec![OrderUpdate {
            id: "b2".into(),
            order: 1,
        }];
        repository::<SiteBanner>(&server)
            .apply_updates(&updates)
            .await
            .unwrap();
        put.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn failed_write_stops_the_sequence() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/apps/gym/entities/Class/a");
                then.status(500).json_body(json!({ "message": "write failed" }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/apps/gym/entities/Class/b");
                then.status(200).json_body(json!({ "id": "b", "name": "B" }));
            })
            .await;

        let items = vec![class("a", 0), class("b", 1)];
        let err = repository::<GymClass>(&server)
            .move_item(&items, 1, MoveDirection::Up)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(err.error, "write failed");
        second.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn quick_add_appends_after_highest_order() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/apps/gym/entities/Class")
                    .json_body_partial(r#"{ "name": "Boxing", "order": 8, "is_active": true }"#);
                then.status(201)
                    .json_body(json!({ "id": "n1", "name": "Boxing", "order": 8 }));
            })
            .await;

        let items = vec![class("a", 3), class("b", 7)];
        let created = repository::<GymClass>(&server)
            .quick_add("  Boxing ", &items)
            .await
            .unwrap();
        assert_eq!(created.id, "n1");
        create.assert_hits_async(1).await;

        let err = repository::<GymClass>(&server)
            .quick_add("   ", &items)
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn renumber_skips_calls_when_already_contiguous() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.path_contains("/entities/");
                then.status(200).json_body(json!([]));
            })
            .await;

        let items = vec![class("a", 0), class("b", 1)];
        let (list, changed) = repository::<GymClass>(&server)
            .renumber(&items)
            .await
            .unwrap();
        assert_eq!(changed, 0);
        assert_eq!(list.len(), 2);
        any.assert_hits_async(0).await;
    }
}
