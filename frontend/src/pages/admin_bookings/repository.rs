use std::rc::Rc;

use serde_json::json;

use crate::api::{ApiClient, ApiError, Booking, BookingStatus};

/// Newest bookings loaded per visit.
pub const BOOKING_LIMIT: u32 = 200;

#[derive(Clone)]
pub struct BookingsRepository {
    client: Rc<ApiClient>,
}

impl BookingsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_recent(&self) -> Result<Vec<Booking>, ApiError> {
        self.client
            .list(Some("-created_date"), Some(BOOKING_LIMIT))
            .await
    }

    pub async fn set_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ApiError> {
        self.client
            .update::<Booking, _>(id, &json!({ "status": status }))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<Booking>(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn confirm_sends_status_patch() {
        let server = MockServer::start_async().await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/apps/gym/entities/Booking/b1")
                    .json_body(json!({ "status": "confirmed" }));
                then.status(200).json_body(json!({
                    "id": "b1",
                    "member_name": "Sam",
                    "member_email": "sam@example.com",
                    "status": "confirmed"
                }));
            })
            .await;

        let client = ApiClient::new_with_base_url(server.url("/api"))
            .with_app_id("gym")
            .with_token("t");
        let repo = BookingsRepository::new_with_client(Rc::new(client));
        let booking = repo.set_status("b1", BookingStatus::Confirmed).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        patch.assert_hits_async(1).await;
    }
}
