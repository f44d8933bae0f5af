//! Test helpers: build the router around a recording save handler.
//!
//! Run from workspace root: `cargo test -p pixlr-api`.

pub mod fixtures;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{http::header, routing::get, Router};
use axum_test::TestServer;
use bytes::Bytes;
use pixlr_api::setup::{build_state, routes::setup_routes};
use pixlr_core::{Config, ImageState, ImageType, SaveResult, SaveResultHandler};

pub const SAVE_PATH: &str = pixlr_api::constants::SAVE_PATH;

/// Everything a handler observed for one callback, with the image drained
#[derive(Debug, Clone)]
pub struct RecordedSave {
    pub title: Option<String>,
    pub image_type: ImageType,
    pub state: ImageState,
    pub image: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub additional_parameters: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct RecordingHandler {
    saves: Arc<Mutex<Vec<RecordedSave>>>,
}

impl RecordingHandler {
    pub fn saves(&self) -> Vec<RecordedSave> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveResultHandler for RecordingHandler {
    async fn handle_save_result(&self, mut result: SaveResult) -> anyhow::Result<()> {
        let (image, image_content_type) = match result.take_image() {
            Some(image) => {
                let content_type = image.content_type().map(str::to_string);
                (Some(image.read_to_end().await?.to_vec()), content_type)
            }
            None => (None, None),
        };

        let recorded = RecordedSave {
            title: result.title().map(str::to_string),
            image_type: result.image_type(),
            state: result.state(),
            image,
            image_content_type,
            additional_parameters: result.additional_parameters().clone(),
        };
        self.saves.lock().unwrap().push(recorded);
        Ok(())
    }
}

/// Test application: server plus the handler it reports to.
pub struct TestApp {
    pub server: TestServer,
    pub handler: RecordingHandler,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn saves(&self) -> Vec<RecordedSave> {
        self.handler.saves()
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Config::default())
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let handler = RecordingHandler::default();
    let state = build_state(config, Arc::new(handler.clone())).expect("build state");
    let server = TestServer::new(setup_routes(state)).expect("start test server");
    TestApp { server, handler }
}

/// Test server around an arbitrary save handler
pub fn server_with_handler(handler: Arc<dyn SaveResultHandler>) -> TestServer {
    let state = build_state(Config::default(), handler).expect("build state");
    TestServer::new(setup_routes(state)).expect("start test server")
}

/// Serve `body` at `path` on a local port, standing in for Pixlr's image host
pub async fn serve_image(path: &'static str, body: Vec<u8>, content_type: &'static str) -> SocketAddr {
    let body = Bytes::from(body);
    let app = Router::new().route(
        path,
        get(move || {
            let body = body.clone();
            async move { ([(header::CONTENT_TYPE, content_type)], body) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind image server");
    let addr = listener.local_addr().expect("image server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("image server");
    });
    addr
}
