use super::*;
use crate::utils::storage as storage_utils;
use httpmock::prelude::*;
use serde_json::json;

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api"))
        .with_app_id("gym")
        .with_token("test-token")
}

fn class_json(id: &str, name: &str, order: i64) -> serde_json::Value {
    json!({ "id": id, "name": name, "is_active": true, "order": order })
}

#[tokio::test]
async fn entity_crud_hits_app_scoped_paths() {
    let server = MockServer::start_async().await;

    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/apps/gym/entities/Class")
                .query_param("sort", "-order")
                .query_param("limit", "5")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(json!([class_json("c2", "Spin", 2), class_json("c1", "Yoga", 1)]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/apps/gym/entities/Class")
                .json_body_partial(r#"{"name":"Boxing","order":3}"#);
            then.status(200).json_body(class_json("c3", "Boxing", 3));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/apps/gym/entities/Class/c3")
                .json_body(json!({ "is_active": false }));
            then.status(200)
                .json_body(json!({ "id": "c3", "name": "Boxing", "is_active": false, "order": 3 }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/apps/gym/entities/Class/c3");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = api_client(&server);
    let classes: Vec<GymClass> = client.list(Some("-order"), Some(5)).await.unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].name, "Spin");

    let draft = GymClass {
        id: String::new(),
        name: "Boxing".into(),
        description: None,
        category: None,
        duration_minutes: None,
        intensity: None,
        image_url: None,
        is_active: true,
        order: 3,
    };
    let created = client.create(&draft).await.unwrap();
    assert_eq!(created.id, "c3");

    let updated: GymClass = client
        .update(&created.id, &json!({ "is_active": false }))
        .await
        .unwrap();
    assert!(!updated.is_active);

    client.delete::<GymClass>(&created.id).await.unwrap();

    list.assert_hits_async(1).await;
    create.assert_hits_async(1).await;
    update.assert_hits_async(1).await;
    delete.assert_hits_async(1).await;
}

#[tokio::test]
async fn record_ids_are_encoded_into_one_path_segment() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path_contains("/api/apps/gym/entities/UserRole/")
                .path_contains("coach");
            then.status(200).json_body(json!({}));
        })
        .await;

    api_client(&server)
        .delete::<UserRole>("coach@example.com/x")
        .await
        .unwrap();
    delete.assert_hits_async(1).await;
}

#[tokio::test]
async fn filter_sends_matcher_as_json_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/apps/gym/entities/Booking")
                .query_param("q", r#"{"status":"pending"}"#);
            then.status(200).json_body(json!([{
                "id": "b1",
                "member_name": "Sam",
                "member_email": "sam@example.com",
                "status": "pending"
            }]));
        })
        .await;

    let bookings: Vec<Booking> = api_client(&server)
        .filter(&json!({ "status": "pending" }), None, None)
        .await
        .unwrap();
    assert_eq!(bookings[0].status, BookingStatus::Pending);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn updates_and_deletes_without_id_never_leave_the_client() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.path_contains("/entities/");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = api_client(&server);
    let err = client
        .update::<Club, _>("", &json!({ "order": 1 }))
        .await
        .unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert!(client.delete::<Club>("").await.is_err());
    any.assert_hits_async(0).await;
}

#[tokio::test]
async fn error_bodies_are_mapped_to_api_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/apps/gym/entities/Club");
            then.status(422).json_body(json!({
                "message": "name is required",
                "details": { "name": "missing" }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/apps/gym/entities/Club");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let client = api_client(&server);
    let draft = Club {
        id: String::new(),
        name: String::new(),
        address: None,
        phone: None,
        opening_hours: None,
        image_url: None,
        is_active: true,
        order: 1,
    };
    let err = client.create(&draft).await.unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(err.error, "name is required");
    assert!(err.details.is_some());

    let err = client.list::<Club>(None, None).await.unwrap_err();
    assert_eq!(err.code, "REQUEST_FAILED");
    assert_eq!(err.error, "upstream unavailable");
}

#[tokio::test]
async fn me_returns_current_user() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/apps/gym/entities/User/me")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "id": "u1",
                "email": "coach@example.com",
                "full_name": "Casey Coach"
            }));
        })
        .await;

    let client = api_client(&server);
    let me = client.me().await.unwrap();
    assert_eq!(me.email, "coach@example.com");
    assert_eq!(me.display_name(), "Casey Coach");
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn stored_token_is_dropped_on_401() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/apps/gym/entities/User/me");
            then.status(401).json_body(json!({ "message": "token expired" }));
        })
        .await;

    storage_utils::write_access_token("stale-token").unwrap();
    let client = ApiClient::new_with_base_url(server.url("/api")).with_app_id("gym");
    let err = client.me().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(storage_utils::read_access_token().is_none());
}

#[tokio::test]
async fn login_url_carries_encoded_return_path() {
    let client = ApiClient::new_with_base_url("https://backend.example/api/").with_app_id("gym");
    let url = client.login_url("/admin/classes").await;
    assert_eq!(
        url,
        "https://backend.example/api/apps/gym/login?from_url=%2Fadmin%2Fclasses"
    );
}

#[tokio::test]
async fn integrations_post_to_core_endpoints() {
    let server = MockServer::start_async().await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/apps/gym/integration-endpoints/Core/UploadFile")
                .body_contains("cover.png");
            then.status(200)
                .json_body(json!({ "file_url": "https://cdn.example/cover.png" }));
        })
        .await;
    let email = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/apps/gym/integration-endpoints/Core/SendEmail")
                .json_body_partial(r#"{"to":"sam@example.com","subject":"Hi"}"#);
            then.status(200).json_body(json!({}));
        })
        .await;
    let llm = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/apps/gym/integration-endpoints/Core/InvokeLLM")
                .json_body(json!({ "prompt": "Say hi" }));
            then.status(200).json_body(json!("hi"));
        })
        .await;

    let client = api_client(&server);
    let uploaded = client
        .upload_file("cover.png", "image/png", vec![1, 2, 3])
        .await
        .unwrap();
    assert_eq!(uploaded.file_url, "https://cdn.example/cover.png");

    client
        .send_email(&SendEmailRequest {
            to: "sam@example.com".into(),
            subject: "Hi".into(),
            body: "Welcome".into(),
            from_name: None,
        })
        .await
        .unwrap();

    let answer = client
        .invoke_llm(&InvokeLlmRequest {
            prompt: "Say hi".into(),
            response_json_schema: None,
        })
        .await
        .unwrap();
    assert_eq!(answer, json!("hi"));

    upload.assert_hits_async(1).await;
    email.assert_hits_async(1).await;
    llm.assert_hits_async(1).await;
}

#[tokio::test]
async fn integrations_validate_before_sending() {
    let client = ApiClient::new_with_base_url("http://127.0.0.1:9/api").with_app_id("gym");
    assert!(client.upload_file("empty.png", "image/png", vec![]).await.is_err());
    let err = client
        .send_email(&SendEmailRequest {
            to: " ".into(),
            subject: "Hi".into(),
            body: String::new(),
            from_name: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");
    let err = client
        .invoke_llm(&InvokeLlmRequest {
            prompt: String::new(),
            response_json_schema: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");
}
