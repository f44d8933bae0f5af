//! GET save callback integration tests.
//!
//! Run with: `cargo test -p pixlr-api --test save_callback_get_test`

mod helpers;

use axum::http::StatusCode;
use helpers::{fixtures, serve_image, setup_test_app, setup_test_app_with, SAVE_PATH};
use pixlr_core::{Config, ImageState, ImageType};

#[tokio::test]
async fn test_get_populates_fields() {
    let app = setup_test_app();

    let response = app
        .client()
        .get(SAVE_PATH)
        .add_query_param("title", "Sunset")
        .add_query_param("type", "jpg")
        .add_query_param("state", "replace")
        .add_query_param("user_id", "42")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let saves = app.saves();
    assert_eq!(saves.len(), 1);
    let save = &saves[0];
    assert_eq!(save.title.as_deref(), Some("Sunset"));
    assert_eq!(save.image_type, ImageType::Jpg);
    assert_eq!(save.state, ImageState::Replace);
    assert!(save.image.is_none());
    assert_eq!(save.additional_parameters.len(), 1);
    assert_eq!(save.additional_parameters["user_id"], "42");
}

#[tokio::test]
async fn test_get_without_parameters_still_invokes_handler() {
    let app = setup_test_app();

    let response = app.client().get(SAVE_PATH).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let saves = app.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].image_type, ImageType::Unknown);
    assert_eq!(saves[0].state, ImageState::Unknown);
    assert!(saves[0].additional_parameters.is_empty());
}

#[tokio::test]
async fn test_get_type_parsing() {
    let cases = [
        ("jpg", ImageType::Jpg),
        ("PNG", ImageType::Png),
        ("Bmp", ImageType::Bmp),
        ("pxd", ImageType::Pxd),
        ("gif", ImageType::Unknown),
        ("", ImageType::Unknown),
    ];

    for (literal, expected) in cases {
        let app = setup_test_app();
        app.client()
            .get(SAVE_PATH)
            .add_query_param("type", literal)
            .await
            .assert_status_ok();

        let saves = app.saves();
        assert_eq!(saves[0].image_type, expected, "type={literal}");
        assert!(saves[0].additional_parameters.is_empty());
    }
}

#[tokio::test]
async fn test_get_unknown_state_does_not_fail() {
    let app = setup_test_app();

    app.client()
        .get(SAVE_PATH)
        .add_query_param("state", "overwritten")
        .await
        .assert_status_ok();

    assert_eq!(app.saves()[0].state, ImageState::Unknown);
}

#[tokio::test]
async fn test_get_repeated_parameter_keeps_first_value() {
    let app = setup_test_app();

    app.client()
        .get(SAVE_PATH)
        .add_query_params(&[("tag", "first"), ("tag", "second"), ("title", "a"), ("title", "b")])
        .await
        .assert_status_ok();

    let save = &app.saves()[0];
    assert_eq!(save.additional_parameters["tag"], "first");
    assert_eq!(save.title.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_get_image_url_is_streamed_to_handler() {
    let png = fixtures::minimal_png();
    let addr = serve_image("/pic.png", png.clone(), "image/png").await;
    let app = setup_test_app();

    let response = app
        .client()
        .get(SAVE_PATH)
        .add_query_param("image", format!("http://{}/pic.png", addr))
        .add_query_param("type", "png")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let saves = app.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].image.as_deref(), Some(&png[..]));
    assert_eq!(saves[0].image_content_type.as_deref(), Some("image/png"));
    assert!(!saves[0].additional_parameters.contains_key("image"));
}

#[tokio::test]
async fn test_get_unreachable_image_fails_without_handler() {
    let addr = serve_image("/pic.png", fixtures::minimal_png(), "image/png").await;
    let app = setup_test_app();

    let response = app
        .client()
        .get(SAVE_PATH)
        .add_query_param("image", format!("http://{}/missing.png", addr))
        .add_query_param("title", "lost")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "IMAGE_FETCH_ERROR");
    assert!(app.saves().is_empty());
}

#[tokio::test]
async fn test_get_rejects_non_http_image_url() {
    let app = setup_test_app();

    let response = app
        .client()
        .get(SAVE_PATH)
        .add_query_param("image", "file:///etc/passwd")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.saves().is_empty());
}

#[tokio::test]
async fn test_get_enforces_image_host_allowlist() {
    let addr = serve_image("/pic.png", fixtures::minimal_png(), "image/png").await;
    let app = setup_test_app_with(Config {
        image_url_allowlist: Some(vec!["pixlr.com".to_string()]),
        ..Config::default()
    });

    let response = app
        .client()
        .get(SAVE_PATH)
        .add_query_param("image", format!("http://{}/pic.png", addr))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.saves().is_empty());
}
