//! Route-level guard behavior: the public ring, the bearer-token guard
//! and the superadmin ring.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use sea_orm::EntityTrait;
use tower::ServiceExt;

use agro_catalog::routes::create_routes;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn public_reads_need_no_token() {
    let (state, _storage) = common::test_state().await;
    let router = create_routes(state);

    for uri in ["/countries", "/units", "/products", "/categories", "/carousel", "/dashboard/summary"] {
        let response = router.clone().oneshot(get(uri, None)).await.expect("call");
        assert_eq!(response.status(), StatusCode::OK, "expected 200 for {uri}");
    }
}

#[tokio::test]
async fn mutations_require_a_token() {
    let (state, _storage) = common::test_state().await;
    let router = create_routes(state);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/countries")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Uzbekistan"}"#))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router.oneshot(get("/admin", None)).await.expect("call");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_a_working_token() {
    let (state, _storage) = common::test_state().await;
    let router = create_routes(state);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"superadmin","password":"admin123"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["accessToken"].as_str().expect("accessToken").to_string();

    // Superadmin ring accepts the token.
    let response = router
        .oneshot(get("/admin", Some(&token)))
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let (state, _storage) = common::test_state().await;
    let router = create_routes(state);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"superadmin","password":"nope"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn plain_admins_are_kept_out_of_the_superadmin_ring() {
    let (state, _storage) = common::test_state().await;
    let actor = common::plain_admin(&state, "editor", "editor-pass-1").await;
    let model = entity::Admins::find_by_id(actor.id)
        .one(state.db.as_ref())
        .await
        .expect("query")
        .expect("admin row");
    let token = state.jwt.issue(&model).expect("issue");
    let router = create_routes(state);

    let response = router
        .clone()
        .oneshot(get("/admin", Some(&token)))
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The authenticated (non-super) ring still works.
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/countries")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Kazakhstan"}"#))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tokens_for_deleted_admins_stop_working() {
    let (state, _storage) = common::test_state().await;
    let actor = common::plain_admin(&state, "ghost", "ghost-pass-1").await;
    let model = entity::Admins::find_by_id(actor.id)
        .one(state.db.as_ref())
        .await
        .expect("query")
        .expect("admin row");
    let token = state.jwt.issue(&model).expect("issue");
    let router = create_routes(state.clone());

    // The token works while the account exists.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/countries")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Turkmenistan"}"#))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::OK);

    entity::Admins::delete_by_id(actor.id)
        .exec(state.db.as_ref())
        .await
        .expect("delete admin");

    // The signature is still valid but the account is gone.
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/countries")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Tajikistan"}"#))
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
