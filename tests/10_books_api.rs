mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{admin_token, sample_book_payload, TestApp};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn list_is_empty_before_any_create() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/books").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_returns_input_fields_plus_id() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let (status, body) = app
        .post("/books", Some(&token), sample_book_payload())
        .await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);

    assert_eq!(body["title"], "X");
    assert_eq!(body["author"], "Y");
    assert_eq!(body["publisher"], "Z");
    assert_eq!(body["publication_year"], 2020);
    assert_eq!(body["genre"], "Fiction");
    assert_eq!(body["summary"], "S");
    assert_eq!(body["contents"], "C");
    assert!(body["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert_eq!(body["comments"], json!([]));
    Ok(())
}

#[tokio::test]
async fn create_missing_fields_lists_every_violation() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let mut payload = sample_book_payload();
    payload.as_object_mut().unwrap().remove("title");
    payload.as_object_mut().unwrap().remove("summary");

    let (status, body) = app.post("/books", Some(&token), payload).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["title"], "This field is required");
    assert_eq!(body["field_errors"]["summary"], "This field is required");

    // Nothing was persisted
    let (_, books) = app.get("/books").await?;
    assert_eq!(books, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_then_get_roundtrips() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let (_, created) = app
        .post("/books", Some(&token), sample_book_payload())
        .await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = app.get(&format!("/books/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_404_with_message() -> Result<()> {
    let app = TestApp::new();
    let bad_id = Uuid::new_v4();

    let (status, body) = app.get(&format!("/books/{}", bad_id)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("not found"), "message: {}", message);
    assert!(message.contains(&bad_id.to_string()));
    Ok(())
}

#[tokio::test]
async fn get_malformed_id_is_also_404() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/books/not-a-uuid").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
    Ok(())
}

#[tokio::test]
async fn update_merges_partial_fields() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let (_, created) = app
        .post("/books", Some(&token), sample_book_payload())
        .await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .put(
            &format!("/books/{}", id),
            Some(&token),
            json!({"genre": "History", "publication_year": 2021}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["genre"], "History");
    assert_eq!(updated["publication_year"], 2021);
    // Untouched fields survive the merge
    assert_eq!(updated["title"], "X");
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_404() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let (status, _) = app
        .put(
            &format!("/books/{}", Uuid::new_v4()),
            Some(&token),
            json!({"genre": "History"}),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_returns_prior_state_and_is_not_repeatable() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let (_, created) = app
        .post("/books", Some(&token), sample_book_payload())
        .await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, removed) = app.delete(&format!("/books/{}", id), Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, created);

    // Repeating the delete never succeeds
    let (status, _) = app.delete(&format!("/books/{}", id), Some(&token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_all_reports_count_affected() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    for _ in 0..3 {
        app.post("/books", Some(&token), sample_book_payload())
            .await?;
    }

    let (status, summary) = app.delete("/books", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["deleted_count"], 3);

    let (_, books) = app.get("/books").await?;
    assert_eq!(books, json!([]));
    Ok(())
}

#[tokio::test]
async fn list_preserves_creation_order() -> Result<()> {
    let app = TestApp::new();
    let token = admin_token(Uuid::new_v4());

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let mut payload = sample_book_payload();
        payload["title"] = json!(title);
        let (_, created) = app.post("/books", Some(&token), payload).await?;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let (_, books) = app.get("/books").await?;
    let listed: Vec<_> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, ids);
    Ok(())
}
