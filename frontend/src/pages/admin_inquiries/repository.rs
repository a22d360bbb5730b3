use std::rc::Rc;

use serde_json::json;

use crate::api::{ApiClient, ApiError, Inquiry, InquiryStatus};

#[derive(Clone)]
pub struct InquiriesRepository {
    client: Rc<ApiClient>,
}

impl InquiriesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_recent(&self) -> Result<Vec<Inquiry>, ApiError> {
        self.client.list(Some("-created_date"), Some(200)).await
    }

    pub async fn set_status(&self, id: &str, status: InquiryStatus) -> Result<Inquiry, ApiError> {
        self.client
            .update::<Inquiry, _>(id, &json!({ "status": status }))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<Inquiry>(id).await
    }
}
