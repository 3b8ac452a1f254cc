//! Member API integration tests over the embedded database.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use directory_server::api::build_app;
use directory_server::db::repository::{CategoryRepository, TagRepository};
use directory_server::{Config, ServerState};

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

async fn test_state(tmp: &tempfile::TempDir) -> ServerState {
    let db_path = tmp.path().join("db");
    let config = Config::with_overrides(db_path.to_str().unwrap(), 0, TEST_SECRET);
    ServerState::initialize(&config).await.unwrap()
}

fn app(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

fn admin_token(state: &ServerState) -> String {
    state
        .jwt_service
        .generate_token("user:admin1", "Admin", "admin", "admin")
        .unwrap()
}

/// Build a multipart/form-data body from text fields.
fn multipart_body(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let boundary = "------------------------test1234";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seed one category and one tag, returning their record ids.
async fn seed_refs(state: &ServerState) -> (String, String) {
    let category = CategoryRepository::new(state.db.clone())
        .create("Tech")
        .await
        .unwrap();
    let tag = TagRepository::new(state.db.clone())
        .create("Rust")
        .await
        .unwrap();
    (
        category.id.unwrap().to_string(),
        tag.id.unwrap().to_string(),
    )
}

fn long_body() -> String {
    "Acme Corp supplies reliable widgets to distributors nationwide. ".repeat(5)
}

async fn create_member(
    state: &ServerState,
    cname: &str,
    category_id: &str,
    tag_id: &str,
) -> axum::response::Response {
    let body_text = long_body();
    let fields = [
        ("cname", cname),
        ("contact", "Jane Smith"),
        ("mobile", "555-0100"),
        ("address", "1 Main Street"),
        ("email", "jane@acme.example"),
        ("location", "Springfield"),
        ("body", body_text.as_str()),
        ("categories", category_id),
        ("tags", tag_id),
    ];
    let (content_type, body) = multipart_body(&fields);

    app(state)
        .oneshot(
            Request::post("/api/member")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token(state)))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn create_then_read_expands_references() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;

    let response = create_member(&state, "Acme Corp", &category_id, &tag_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["slug"], "acme-corp");
    assert_eq!(created["categories"][0]["name"], "Tech");
    assert_eq!(created["tags"][0]["slug"], "rust");
    assert_eq!(created["postedBy"]["username"], "admin");
    assert!(created["excerpt"].as_str().unwrap().starts_with("Acme Corp"));

    let response = app(&state)
        .oneshot(
            Request::get("/api/member/Acme-Corp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let read = json_body(response).await;
    assert_eq!(read["cname"], "Acme Corp");
    assert_eq!(read["body"], long_body());
}

#[tokio::test]
async fn create_rejects_fields_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let token = admin_token(&state);

    // No cname: first check fires even though everything else is missing too
    let (content_type, body) = multipart_body(&[("contact", "Jane")]);
    let response = app(&state)
        .oneshot(
            Request::post("/api/member")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Company name is required");

    // 199-char body fails, even with all other fields present
    let short = "x".repeat(199);
    let fields = [
        ("cname", "Acme Corp"),
        ("contact", "Jane Smith"),
        ("mobile", "555-0100"),
        ("address", "1 Main Street"),
        ("email", "jane@acme.example"),
        ("location", "Springfield"),
        ("body", short.as_str()),
    ];
    let (content_type, body) = multipart_body(&fields);
    let response = app(&state)
        .oneshot(
            Request::post("/api/member")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Content is too short");

    // 200-char body passes the length check and hits the categories check
    let ok_body = "x".repeat(200);
    let fields = [
        ("cname", "Acme Corp"),
        ("contact", "Jane Smith"),
        ("mobile", "555-0100"),
        ("address", "1 Main Street"),
        ("email", "jane@acme.example"),
        ("location", "Springfield"),
        ("body", ok_body.as_str()),
    ];
    let (content_type, body) = multipart_body(&fields);
    let response = app(&state)
        .oneshot(
            Request::post("/api/member")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "At least one category is required"
    );
}

#[tokio::test]
async fn create_requires_admin() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (content_type, body) = multipart_body(&[("cname", "Acme Corp")]);

    // No token
    let response = app(&state)
        .oneshot(
            Request::post("/api/member")
                .header(header::CONTENT_TYPE, content_type.clone())
                .body(Body::from(body.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Non-admin token
    let token = state
        .jwt_service
        .generate_token("user:bob1", "Bob", "bob", "subscriber")
        .unwrap();
    let response = app(&state)
        .oneshot(
            Request::post("/api/member")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;

    let first = create_member(&state, "Acme Corp", &category_id, &tag_id).await;
    assert_eq!(first.status(), StatusCode::OK);

    // Same name, different case: same slug
    let second = create_member(&state, "ACME corp", &category_id, &tag_id).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let error = json_body(second).await["error"].to_string();
    assert!(error.contains("acme-corp"));
}

#[tokio::test]
async fn punctuation_only_name_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;

    // "!!!" passes the length check but slugifies to nothing; such a
    // record would be unreachable through the slug routes
    let response = create_member(&state, "!!!", &category_id, &tag_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Company name must contain letters or numbers"
    );

    // Nothing was persisted, so a second punctuation-only name gets the
    // same validation error rather than a slug conflict
    let response = create_member(&state, "- - -", &category_id, &tag_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Company name must contain letters or numbers"
    );
}

#[tokio::test]
async fn update_merges_fields_and_preserves_slug() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    let (content_type, body) = multipart_body(&[("cname", "Acme Corporation")]);
    let response = app(&state)
        .oneshot(
            Request::put("/api/member/acme-corp")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token(&state)))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;

    // Renaming never moves the resource
    assert_eq!(updated["slug"], "acme-corp");
    assert_eq!(updated["cname"], "Acme Corporation");
    // Untouched fields persist
    assert_eq!(updated["contact"], "Jane Smith");
    assert_eq!(updated["categories"][0]["name"], "Tech");
}

#[tokio::test]
async fn update_with_empty_body_leaves_body_and_excerpt_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    // An empty body part counts as absent, not as a new body
    let (content_type, body) = multipart_body(&[("contact", "Joe Bloggs"), ("body", "")]);
    let response = app(&state)
        .oneshot(
            Request::put("/api/member/acme-corp")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token(&state)))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state)
        .oneshot(
            Request::get("/api/member/acme-corp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let read = json_body(response).await;
    assert_eq!(read["contact"], "Joe Bloggs");
    assert_eq!(read["body"], long_body());
    assert!(read["excerpt"].as_str().unwrap().starts_with("Acme Corp"));
}

#[tokio::test]
async fn update_of_missing_member_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let (content_type, body) = multipart_body(&[("cname", "Ghost Inc")]);
    let response = app(&state)
        .oneshot(
            Request::put("/api/member/nobody-here")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token(&state)))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_always_reports_success() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    for _ in 0..2 {
        let response = app(&state)
            .oneshot(
                Request::delete("/api/member/acme-corp")
                    .header(
                        header::AUTHORIZATION,
                        format!("Bearer {}", admin_token(&state)),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["message"],
            "Member deleted successfully"
        );
    }
}

#[tokio::test]
async fn search_without_term_returns_empty_list() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    let response = app(&state)
        .oneshot(
            Request::get("/api/members/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;
    create_member(&state, "Globex", &category_id, &tag_id).await;

    let response = app(&state)
        .oneshot(
            Request::get("/api/members/search?search=ACME")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hits = json_body(response).await;
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["slug"], "acme-corp");
    // Search projection carries no body
    assert!(hits[0].get("body").is_none());
}

#[tokio::test]
async fn missing_photo_is_a_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    let response = app(&state)
        .oneshot(
            Request::get("/api/member/photo/acme-corp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn paged_listing_includes_all_categories_and_tags() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;
    create_member(&state, "Globex", &category_id, &tag_id).await;

    // Empty body: defaults limit=10, skip=0
    let response = app(&state)
        .oneshot(
            Request::post("/api/members-categories-tags")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = json_body(response).await;
    assert_eq!(page["size"], 2);
    assert_eq!(page["categories"].as_array().unwrap().len(), 1);
    assert_eq!(page["tags"].as_array().unwrap().len(), 1);

    // limit=1 pages down
    let response = app(&state)
        .oneshot(
            Request::post("/api/members-categories-tags")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"limit": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let page = json_body(response).await;
    assert_eq!(page["size"], 1);
    // Newest first
    assert_eq!(page["members"][0]["slug"], "globex");
}

#[tokio::test]
async fn related_members_share_a_category() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;

    let created = json_body(create_member(&state, "Acme Corp", &category_id, &tag_id).await).await;
    create_member(&state, "Globex", &category_id, &tag_id).await;

    let params = serde_json::json!({
        "member": {
            "id": created["id"],
            "categories": [category_id],
        }
    });
    let response = app(&state)
        .oneshot(
            Request::post("/api/members/related")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(params.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let related = json_body(response).await;
    let related = related.as_array().unwrap().to_vec();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["slug"], "globex");
}

#[tokio::test]
async fn lists_members_by_user() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;
    let (category_id, tag_id) = seed_refs(&state).await;
    create_member(&state, "Acme Corp", &category_id, &tag_id).await;

    let response = app(&state)
        .oneshot(
            Request::get("/api/members/by-user/admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let members = json_body(response).await;
    assert_eq!(members.as_array().unwrap().len(), 1);

    let response = app(&state)
        .oneshot(
            Request::get("/api/members/by-user/nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
