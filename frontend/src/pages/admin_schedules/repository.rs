use std::rc::Rc;

use super::utils::{ScheduleForm, ScheduleLookups};
use crate::{
    api::{ApiClient, ApiError, ClassSchedule, Club, GymClass},
    utils::ordering::sort_by_order,
};

#[derive(Clone)]
pub struct SchedulesRepository {
    client: Rc<ApiClient>,
}

impl SchedulesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_schedules(&self) -> Result<Vec<ClassSchedule>, ApiError> {
        self.client.list(Some("day_of_week"), None).await
    }

    pub async fn fetch_lookups(&self) -> Result<ScheduleLookups, ApiError> {
        let mut classes: Vec<GymClass> = self.client.list(Some("order"), None).await?;
        let mut clubs: Vec<Club> = self.client.list(Some("order"), None).await?;
        sort_by_order(&mut classes);
        sort_by_order(&mut clubs);
        Ok(ScheduleLookups { classes, clubs })
    }

    pub async fn create(&self, form: &ScheduleForm) -> Result<ClassSchedule, ApiError> {
        let schedule = form.to_schedule().map_err(ApiError::validation)?;
        self.client.create(&schedule).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<ClassSchedule>(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn repository(server: &MockServer) -> SchedulesRepository {
        let client = ApiClient::new_with_base_url(server.url("/api"))
            .with_app_id("gym")
            .with_token("test-token");
        SchedulesRepository::new_with_client(Rc::new(client))
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/apps/gym/entities/ClassSchedule");
                then.status(201).json_body(json!({}));
            })
            .await;

        let err = repository(&server)
            .create(&ScheduleForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.error, "Choose a class");
        create.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn creates_schedule_from_form() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/apps/gym/entities/ClassSchedule")
                    .json_body_partial(
                        r#"{ "class_id": "c1", "club_id": "k1", "day_of_week": 3, "start_time": "18:00", "end_time": "19:00" }"#,
                    );
                then.status(201).json_body(json!({
                    "id": "s1", "class_id": "c1", "club_id": "k1",
                    "day_of_week": 3, "start_time": "18:00", "end_time": "19:00"
                }));
            })
            .await;

        let form = ScheduleForm {
            class_id: "c1".into(),
            club_id: "k1".into(),
            day_of_week: "3".into(),
            start_time: "18:00".into(),
            end_time: "19:00".into(),
            ..ScheduleForm::default()
        };
        let created = repository(&server).create(&form).await.unwrap();
        assert_eq!(created.id, "s1");
        create.assert_hits_async(1).await;
    }
}
