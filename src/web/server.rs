// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::FileStore;
use crate::web::get::home_handler;
use crate::web::get::list_handler;
use crate::web::get::result_handler;
use crate::web::get::test_handler;
use crate::web::post::add_word_handler;
use crate::web::post::cancel_test_handler;
use crate::web::post::create_list_handler;
use crate::web::post::delete_list_handler;
use crate::web::post::delete_word_handler;
use crate::web::post::import_handler;
use crate::web::post::retry_handler;
use crate::web::post::retry_incorrect_handler;
use crate::web::post::start_test_handler;
use crate::web::post::submit_answer_handler;
use crate::web::post::update_metadata_handler;
use crate::web::post::update_word_handler;
use crate::web::state::AppState;
use crate::web::state::ServerState;

pub async fn start_server(store_path: PathBuf, port: u16) -> Fallible<()> {
    let store = FileStore::new(store_path);
    let collection = Collection::open(Box::new(store))?;
    log::debug!("Collection loaded with {} lists", collection.lists().len());

    let state = ServerState {
        mutable: Arc::new(Mutex::new(AppState {
            collection,
            test: None,
            outcome: None,
        })),
    };
    let app = Router::new();
    let app = app.route("/", get(home_handler));
    let app = app.route("/lists", post(create_list_handler));
    let app = app.route("/lists/{id}", get(list_handler));
    let app = app.route("/lists/{id}/delete", post(delete_list_handler));
    let app = app.route("/lists/{id}/metadata", post(update_metadata_handler));
    let app = app.route("/lists/{id}/words", post(add_word_handler));
    let app = app.route("/lists/{id}/words/{word_id}", post(update_word_handler));
    let app = app.route(
        "/lists/{id}/words/{word_id}/delete",
        post(delete_word_handler),
    );
    let app = app.route("/lists/{id}/test", post(start_test_handler));
    let app = app.route("/test", get(test_handler));
    let app = app.route("/test", post(submit_answer_handler));
    let app = app.route("/test/cancel", post(cancel_test_handler));
    let app = app.route("/result", get(result_handler));
    let app = app.route("/result/retry", post(retry_handler));
    let app = app.route("/result/retry-incorrect", post(retry_incorrect_handler));
    let app = app.route("/import", post(import_handler));
    let app = app.route("/export.json", get(export_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{port}");

    // Start a separate task to open the browser.
    let url = format!("http://{bind}/");
    let probe = bind.clone();
    tokio::spawn(async move {
        loop {
            if let Ok(stream) = TcpStream::connect(&probe).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        let _ = open::that(url);
    });

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn export_handler(
    State(state): State<ServerState>,
) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    let mutable = state.mutable.lock().unwrap();
    match mutable.collection.export_json() {
        Ok(json) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], json),
        Err(e) => {
            log::error!("error exporting lists: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain")],
                "export failed".to_string(),
            )
        }
    }
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
