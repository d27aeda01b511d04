pub mod rest;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    create_pack_handler, delete_all_packs_handler, delete_pack_handler, generate_pack_handler,
    get_pack_handler, list_packs_handler,
};
use state::AppState;

/// Builds the pack routes over the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/packs",
            get(list_packs_handler)
                .post(create_pack_handler)
                .delete(delete_all_packs_handler),
        )
        .route("/packs/generate", post(generate_pack_handler))
        .route(
            "/packs/{id}",
            get(get_pack_handler).delete(delete_pack_handler),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use study_pack_core::{HeuristicGenerator, MemoryBlobStore};
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = AppState::open(
            Arc::new(MemoryBlobStore::new()),
            Arc::new(HeuristicGenerator),
            "packs",
        )
        .await;
        router(Arc::new(state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_generate_then_list() {
        let app = app().await;

        let (status, pack) = send(
            &app,
            "POST",
            "/packs/generate",
            Some(json!({
                "title": "Cats",
                "notes": "Cats are mammals. Cats sleep a lot. Cats are independent."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(pack["quizQuestions"].as_array().unwrap().len(), 3);

        let (status, list) = send(&app, "GET", "/packs", None).await;
        assert_eq!(status, StatusCode::OK);
        let view = &list[0];
        assert_eq!(view["title"], "Cats");
        assert_eq!(view["keyPointCount"], 3);
        assert_eq!(view["flashcardCount"], 3);
        assert_eq!(view["quizQuestionCount"], 3);
        assert_eq!(view["exampleQuestion"], "What is an important fact about Cats?");
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let app = app().await;

        let (status, _) = send(&app, "POST", "/packs", Some(json!({"title": "  ", "notes": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/packs/generate",
            Some(json!({"title": "Biology", "notes": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = send(&app, "GET", "/packs", None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_pack_and_missing_pack() {
        let app = app().await;
        let (_, pack) = send(&app, "POST", "/packs", Some(json!({"title": "Manual"}))).await;
        let id = pack["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/packs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Manual");
        assert!(fetched["flashcards"].as_array().unwrap().is_empty());

        let (status, _) = send(
            &app,
            "GET",
            "/packs/00000000-0000-4000-8000-000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deletes_require_confirmation() {
        let app = app().await;
        let (_, pack) = send(&app, "POST", "/packs", Some(json!({"title": "One"}))).await;
        send(&app, "POST", "/packs", Some(json!({"title": "Two"}))).await;
        let id = pack["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, "DELETE", &format!("/packs/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "DELETE", &format!("/packs/{id}?confirm=true"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, list) = send(&app, "GET", "/packs", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", "/packs?confirm=false", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "DELETE", "/packs?confirm=true", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, list) = send(&app, "GET", "/packs", None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_uuid_ids_are_addressable() {
        let blob = r#"[{"id": "1700000000000", "title": "Legacy", "createdAt": "2023-11-14T22:13:20.000Z"}]"#;
        let state = AppState::open(
            Arc::new(MemoryBlobStore::with_blob("packs", blob)),
            Arc::new(HeuristicGenerator),
            "packs",
        )
        .await;
        let app = router(Arc::new(state));

        let (status, fetched) = send(&app, "GET", "/packs/1700000000000", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Legacy");
        assert_eq!(fetched["summary"], "");

        let (_, list) = send(&app, "GET", "/packs", None).await;
        assert_eq!(list[0]["summary"], "No summary yet.");

        let (status, _) = send(&app, "DELETE", "/packs/1700000000000?confirm=true", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", "/packs/1700000000000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
