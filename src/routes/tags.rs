use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::tag::{CreateTagRequest, Tag},
    AppState,
};

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    state.tags.list().await.map(Json).map_err(|e| {
        tracing::error!("failed to read tags: {e}");
        ApiError::internal("TAG_READ_FAILED", "Error fetching tags.", e)
    })
}

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let req: CreateTagRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request("INVALID_REQUEST_BODY", "Invalid request data", e))?;

    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("INVALID_TAG", "Tag name is required", "empty tag name"));
    }

    state
        .tags
        .create(&req)
        .await
        .map(|tag| (StatusCode::CREATED, Json(tag)))
        .map_err(|e| {
            tracing::error!("failed to create tag: {e}");
            ApiError::internal("TAG_CREATE_FAILED", "Error creating tag", e)
        })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        services::{focus::MockFocusModeStore, tags::MockTagStore},
        test_support::app_with,
    };

    #[tokio::test]
    async fn test_list_tags() {
        let mut tags = MockTagStore::new();
        tags.expect_list().times(1).returning(|| {
            Ok(vec![
                Tag { id: 2, name: "email".into(), color: None },
                Tag { id: 1, name: "work".into(), color: Some("#336699".into()) },
            ])
        });

        let app = app_with(MockFocusModeStore::new(), tags);
        let response = app
            .oneshot(Request::builder().uri("/tags").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body[0]["name"], "email");
        assert_eq!(body[1]["color"], "#336699");
    }

    #[tokio::test]
    async fn test_create_tag_requires_name() {
        let mut tags = MockTagStore::new();
        tags.expect_create().never();

        let app = app_with(MockFocusModeStore::new(), tags);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/tags")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"   "}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_tag() {
        let mut tags = MockTagStore::new();
        tags.expect_create()
            .withf(|req| req.name == "focus" && req.color.is_none())
            .times(1)
            .returning(|req| Ok(Tag { id: 8, name: req.name.clone(), color: None }));

        let app = app_with(MockFocusModeStore::new(), tags);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/tags")
            .body(Body::from(r#"{"name":"focus"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], 8);
    }
}
