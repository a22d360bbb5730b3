use crate::{
    api::{ApiClient, ApiError, PageVisit},
    utils::storage::visitor_session_id,
};

/// Visits summarized on the analytics page.
pub const RECENT_VISITS: u32 = 1000;

#[cfg(target_arch = "wasm32")]
fn referrer() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.referrer())
        .filter(|r| !r.is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn referrer() -> Option<String> {
    None
}

pub async fn record_visit(api: &ApiClient, path: &str) -> Result<PageVisit, ApiError> {
    let visit = PageVisit {
        id: String::new(),
        path: path.to_string(),
        session_id: visitor_session_id(),
        referrer: referrer(),
        created_date: None,
    };
    api.create(&visit).await
}

pub async fn fetch_recent(api: &ApiClient) -> Result<Vec<PageVisit>, ApiError> {
    api.list(Some("-created_date"), Some(RECENT_VISITS)).await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn visit_carries_path_and_session() {
        let server = MockServer::start_async().await;
        let session = visitor_session_id();
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/apps/gym/entities/PageVisit")
                    .json_body_partial(
                        json!({ "path": "/fitness", "session_id": session }).to_string(),
                    );
                then.status(201).json_body(json!({
                    "id": "v1",
                    "path": "/fitness",
                    "session_id": session,
                    "created_date": "2026-03-02T10:00:00Z"
                }));
            })
            .await;

        let api = ApiClient::new_with_base_url(server.url("/api")).with_app_id("gym");
        let visit = record_visit(&api, "/fitness").await.unwrap();
        assert_eq!(visit.id, "v1");
        assert!(visit.created_date.is_some());
        create.assert_hits_async(1).await;
    }
}
