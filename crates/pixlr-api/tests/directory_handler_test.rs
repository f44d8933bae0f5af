//! End-to-end test of the directory save handler behind the HTTP endpoint.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use helpers::{fixtures, SAVE_PATH};
use pixlr_api::services::directory_handler::SavedImageRecord;
use pixlr_core::{Config, ImageState, ImageType};

#[tokio::test]
async fn test_post_callback_is_saved_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        save_directory: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let (_state, router) = pixlr_api::setup::initialize_app(config).await.unwrap();
    let server = TestServer::new(router).unwrap();

    let png = fixtures::minimal_png();
    let form = MultipartForm::new()
        .add_text("title", "Harbour")
        .add_text("type", "png")
        .add_text("state", "new")
        .add_text("album", "summer")
        .add_part(
            "image",
            Part::bytes(png.clone())
                .file_name("harbour.png")
                .mime_type("image/png"),
        );

    server.post(SAVE_PATH).multipart(form).await.assert_status_ok();

    let mut records = Vec::new();
    for entry in std::fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let record: SavedImageRecord =
                serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
            records.push(record);
        }
    }

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title.as_deref(), Some("Harbour"));
    assert_eq!(record.image_type, ImageType::Png);
    assert_eq!(record.state, ImageState::New);
    assert_eq!(record.additional_parameters["album"], "summer");
    assert_eq!(record.image_bytes, Some(png.len() as u64));

    let saved = std::fs::read(dir.path().join(record.image_file.as_ref().unwrap())).unwrap();
    assert_eq!(saved, png);
}
