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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::error::{Fallible, KotobaError};
    use crate::web::server::start_server;

    impl From<reqwest::Error> for KotobaError {
        fn from(error: reqwest::Error) -> Self {
            KotobaError::Custom(error.to_string())
        }
    }

    /// Boot a server over a fresh store file on an unused port, and wait
    /// until it accepts connections.
    async fn boot() -> (String, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("kotoba.json");
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(store_path, port).await });
        let bind = format!("0.0.0.0:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        (format!("http://{bind}"), dir)
    }

    /// Create a list through the web form and return its id, extracted from
    /// the redirect to the list detail page.
    async fn create_list(base: &str, title: &str, description: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("{base}/lists"))
            .form(&[("title", title), ("description", description)])
            .send()
            .await?;
        assert!(response.status().is_success());
        let path = response.url().path().to_string();
        let id = path.strip_prefix("/lists/").unwrap().to_string();
        Ok(id)
    }

    async fn add_word(
        base: &str,
        list_id: &str,
        term: &str,
        reading: &str,
        meaning: &str,
    ) -> Fallible<()> {
        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{list_id}/words"))
            .form(&[("term", term), ("reading", reading), ("meaning", meaning)])
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_static_endpoints() -> Fallible<()> {
        let (base, _dir) = boot().await;

        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("No word lists yet."));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_word_crud() -> Fallible<()> {
        let (base, _dir) = boot().await;

        let id = create_list(&base, "JLPT N5", "Basic verbs").await?;
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("JLPT N5"));

        add_word(&base, &id, "食べる", "たべる", "먹다").await?;
        add_word(&base, &id, "飲む", "のむ", "마시다").await?;
        let html = reqwest::get(format!("{base}/lists/{id}"))
            .await?
            .text()
            .await?;
        assert!(html.contains("食べる"));
        assert!(html.contains("飲む"));

        // A word with an empty reading is rejected without changing the list.
        add_word(&base, &id, "走る", "  ", "달리다").await?;
        let html = reqwest::get(format!("{base}/lists/{id}"))
            .await?
            .text()
            .await?;
        assert!(!html.contains("走る"));
        // Deleting a word asks for confirmation.
        assert!(html.contains("Delete this word?"));

        // Edit a word in place. New words sit at the front, so the first
        // exported word is the most recently added one.
        let export: serde_json::Value = reqwest::get(format!("{base}/export.json"))
            .await?
            .json()
            .await?;
        assert_eq!(export[0]["words"][0]["term"], "飲む");
        let word_id = export[0]["words"][0]["id"].as_str().unwrap().to_string();
        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/words/{word_id}"))
            .form(&[("term", "飲む"), ("reading", "のむ"), ("meaning", "to drink")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("to drink"));
        assert!(!html.contains("마시다"));

        // Update the metadata.
        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/metadata"))
            .form(&[("title", "N5 verbs"), ("description", "")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("N5 verbs"));

        // Export carries the full shape, including the edit.
        let export: serde_json::Value = reqwest::get(format!("{base}/export.json"))
            .await?
            .json()
            .await?;
        assert_eq!(export[0]["title"], "N5 verbs");
        assert_eq!(export[0]["words"][0]["term"], "飲む");
        assert_eq!(export[0]["words"][0]["meaning"], "to drink");
        assert_eq!(export[0]["words"][1]["term"], "食べる");
        assert!(export[0]["createdAt"].is_i64());

        // Delete the list.
        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/delete"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("No word lists yet."));

        Ok(())
    }

    #[tokio::test]
    async fn test_perfect_session() -> Fallible<()> {
        let (base, _dir) = boot().await;
        let id = create_list(&base, "One word", "").await?;
        add_word(&base, &id, "食べる", "たべる", "먹다").await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/test"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("食べる"));
        assert!(html.contains("1 / 1"));

        // Padded answers still count: comparison trims.
        let response = reqwest::Client::new()
            .post(format!("{base}/test"))
            .form(&[("reading", " たべる "), ("meaning", "먹다")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("1 of 1 correct."));
        assert!(html.contains("Perfect score."));
        assert!(!html.contains("Retry incorrect"));

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_session_and_retry_incorrect() -> Fallible<()> {
        let (base, _dir) = boot().await;
        let id = create_list(&base, "Two words", "").await?;
        add_word(&base, &id, "食べる", "たべる", "먹다").await?;
        add_word(&base, &id, "飲む", "のむ", "마시다").await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/test"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("1 / 2"));
        // Cancelling asks for confirmation.
        assert!(html.contains("Cancel this test?"));

        // An incomplete answer does not advance the session.
        let response = reqwest::Client::new()
            .post(format!("{base}/test"))
            .form(&[("reading", ""), ("meaning", "x")])
            .send()
            .await?;
        assert!(response.text().await?.contains("1 / 2"));

        // Answer both words wrongly.
        let response = reqwest::Client::new()
            .post(format!("{base}/test"))
            .form(&[("reading", "x"), ("meaning", "x")])
            .send()
            .await?;
        assert!(response.text().await?.contains("2 / 2"));
        let response = reqwest::Client::new()
            .post(format!("{base}/test"))
            .form(&[("reading", "x"), ("meaning", "x")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(html.contains("0 of 2 correct."));
        assert!(html.contains("Retry incorrect (2)"));

        // Retry only the incorrect words: a fresh session over both.
        let response = reqwest::Client::new()
            .post(format!("{base}/result/retry-incorrect"))
            .send()
            .await?;
        assert!(response.text().await?.contains("1 / 2"));

        // Cancel it; no result is produced.
        let response = reqwest::Client::new()
            .post(format!("{base}/test/cancel"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = reqwest::get(format!("{base}/test")).await?.text().await?;
        assert!(html.contains("No test in progress."));

        Ok(())
    }

    #[tokio::test]
    async fn test_start_test_on_empty_list() -> Fallible<()> {
        let (base, _dir) = boot().await;
        let id = create_list(&base, "Empty", "").await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/lists/{id}/test"))
            .send()
            .await?;
        assert!(response.status().is_success());
        // Back on the list page; no session was created.
        assert_eq!(response.url().path(), format!("/lists/{id}"));
        let html = reqwest::get(format!("{base}/test")).await?.text().await?;
        assert!(html.contains("No test in progress."));

        Ok(())
    }

    #[tokio::test]
    async fn test_import() -> Fallible<()> {
        let (base, _dir) = boot().await;

        let payload = r#"[{"id": "l1", "title": "Imported", "words": [], "createdAt": 0}]"#;
        let response = reqwest::Client::new()
            .post(format!("{base}/import"))
            .form(&[("payload", payload)])
            .send()
            .await?;
        assert!(response.status().is_success());
        assert!(response.text().await?.contains("Imported"));

        // A malformed payload changes nothing.
        let response = reqwest::Client::new()
            .post(format!("{base}/import"))
            .form(&[("payload", "{\"not\": \"an array\"}")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let export: serde_json::Value = reqwest::get(format!("{base}/export.json"))
            .await?
            .json()
            .await?;
        assert_eq!(export.as_array().unwrap().len(), 1);

        Ok(())
    }
}
