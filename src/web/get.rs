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

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::web::state::ServerState;
use crate::web::template::page_template;

/// The dashboard: every list, newest first, plus create/import/export.
pub async fn home_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let lists = mutable.collection.lists();
    let table: Markup = if lists.is_empty() {
        html! {
            p.empty { "No word lists yet. Create your first one below." }
        }
    } else {
        html! {
            table.lists {
                thead {
                    tr {
                        th { "Title" }
                        th { "Words" }
                        th { "Created" }
                        th { "" }
                    }
                }
                tbody {
                    @for list in lists {
                        tr {
                            td {
                                a href=(format!("/lists/{}", list.id)) { (list.title) }
                            }
                            td { (list.words.len()) }
                            td { (list.created_at.local_date_string()) }
                            td.actions {
                                form action=(format!("/lists/{}/test", list.id)) method="post" {
                                    input type="submit" value="Test";
                                }
                                form action=(format!("/lists/{}/delete", list.id)) method="post" {
                                    input type="submit" value="Delete";
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    let body = html! {
        div.dashboard {
            h2 { "Word lists" }
            (table)
            section.create {
                h3 { "New list" }
                form action="/lists" method="post" {
                    input type="text" name="title" placeholder="Title" required;
                    input type="text" name="description" placeholder="Description";
                    input type="submit" value="Create";
                }
            }
            section.transfer {
                h3 { "Import / export" }
                form action="/import" method="post" {
                    textarea name="payload" rows="4" placeholder="Paste exported JSON here" {}
                    input type="submit" value="Import";
                }
                a href="/export.json" { "Export as JSON" }
            }
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

/// One list: its words, word entry form, metadata form, and the test button.
pub async fn list_handler(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let list = match mutable.collection.find(&list_id) {
        Some(list) => list,
        None => {
            // The list was deleted elsewhere; fall back to the dashboard.
            let body = html! {
                p { "List not found." }
                a href="/" { "Back to the dashboard" }
            };
            return (
                StatusCode::NOT_FOUND,
                Html(page_template(body).into_string()),
            );
        }
    };
    let words: Markup = if list.words.is_empty() {
        html! {
            p.empty { "No words yet." }
        }
    } else {
        html! {
            table.words {
                thead {
                    tr {
                        th { "Term" }
                        th { "Reading" }
                        th { "Meaning" }
                        th { "" }
                    }
                }
                tbody {
                    @for word in &list.words {
                        tr {
                            td { (word.term) }
                            td { (word.reading) }
                            td { (word.meaning) }
                            td.actions {
                                form.edit action=(format!("/lists/{}/words/{}", list.id, word.id)) method="post" {
                                    input type="text" name="term" value=(word.term) required;
                                    input type="text" name="reading" value=(word.reading) required;
                                    input type="text" name="meaning" value=(word.meaning) required;
                                    input type="submit" value="Save";
                                }
                                form action=(format!("/lists/{}/words/{}/delete", list.id, word.id)) method="post" onsubmit="return confirm('Delete this word?')" {
                                    input type="submit" value="Delete";
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    let body = html! {
        div.list-detail {
            h2 { (list.title) }
            @if !list.description.is_empty() {
                p.description { (list.description) }
            }
            form.start action=(format!("/lists/{}/test", list.id)) method="post" {
                @if list.words.is_empty() {
                    input type="submit" value="Start test" disabled;
                } @else {
                    input type="submit" value="Start test";
                }
            }
            (words)
            section.add-word {
                h3 { "Add a word" }
                form action=(format!("/lists/{}/words", list.id)) method="post" {
                    input type="text" name="term" placeholder="Term" required;
                    input type="text" name="reading" placeholder="Reading" required;
                    input type="text" name="meaning" placeholder="Meaning" required;
                    input type="submit" value="Add";
                }
            }
            section.metadata {
                h3 { "Edit list" }
                form action=(format!("/lists/{}/metadata", list.id)) method="post" {
                    input type="text" name="title" value=(list.title) required;
                    input type="text" name="description" value=(list.description);
                    input type="submit" value="Save";
                }
            }
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

/// The active prompt: the term, the two answer fields, progress, cancel.
pub async fn test_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let test = match &mutable.test {
        Some(test) => test,
        None => {
            let body = html! {
                p { "No test in progress." }
                a href="/" { "Back to the dashboard" }
            };
            return (StatusCode::OK, Html(page_template(body).into_string()));
        }
    };
    let session = &test.session;
    let word = match session.current_word() {
        Some(word) => word,
        None => {
            let body = html! {
                p { "No test in progress." }
                a href="/" { "Back to the dashboard" }
            };
            return (StatusCode::OK, Html(page_template(body).into_string()));
        }
    };
    let progress = format!("{} / {}", session.position() + 1, session.len());
    let last = session.position() + 1 == session.len();
    let body = html! {
        div.test {
            div.header {
                h2 { (test.list_title) }
                div.progress { (progress) }
            }
            div.prompt {
                h1.term { (word.term) }
            }
            form.answer action="/test" method="post" {
                input type="text" name="reading" placeholder="Reading" autofocus autocomplete="off";
                input type="text" name="meaning" placeholder="Meaning" autocomplete="off";
                @if last {
                    input type="submit" value="Finish";
                } @else {
                    input type="submit" value="Next";
                }
            }
            form.cancel action="/test/cancel" method="post" onsubmit="return confirm('Cancel this test? Progress will be lost.')" {
                input type="submit" value="Cancel test";
            }
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

/// The scored result of the last finished session, with the incorrect-word
/// review table and the retry controls.
pub async fn result_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let outcome = match &mutable.outcome {
        Some(outcome) => outcome,
        None => {
            let body = html! {
                p { "No test result to show." }
                a href="/" { "Back to the dashboard" }
            };
            return (StatusCode::OK, Html(page_template(body).into_string()));
        }
    };
    let evaluation = &outcome.evaluation;
    let incorrect: Vec<_> = evaluation
        .entries
        .iter()
        .filter(|e| !e.total_correct())
        .collect();
    let review: Markup = if incorrect.is_empty() {
        html! {
            p.perfect { "Perfect score. Nothing to review." }
        }
    } else {
        html! {
            table.review {
                thead {
                    tr {
                        th { "Term" }
                        th { "Your reading" }
                        th { "Expected reading" }
                        th { "Your meaning" }
                        th { "Expected meaning" }
                    }
                }
                tbody {
                    @for entry in &incorrect {
                        tr {
                            td { (entry.word.term) }
                            @if entry.reading_correct {
                                td.correct { (entry.answer.user_reading) }
                                td { "-" }
                            } @else {
                                td.wrong { (entry.answer.user_reading) }
                                td { (entry.word.reading) }
                            }
                            @if entry.meaning_correct {
                                td.correct { (entry.answer.user_meaning) }
                                td { "-" }
                            } @else {
                                td.wrong { (entry.answer.user_meaning) }
                                td { (entry.word.meaning) }
                            }
                        }
                    }
                }
            }
        }
    };
    let body = html! {
        div.result {
            h2 { (format!("Result: {}", outcome.list_title)) }
            div.score {
                span.number { (evaluation.score) }
                span.label { "score" }
            }
            p.summary {
                (format!("{} of {} correct.", evaluation.correct_count, evaluation.total()))
            }
            div.controls {
                form action="/result/retry" method="post" {
                    input type="submit" value="Retry all";
                }
                @if !incorrect.is_empty() {
                    form action="/result/retry-incorrect" method="post" {
                        input type="submit" value=(format!("Retry incorrect ({})", incorrect.len()));
                    }
                }
                a href="/" { "Back to the dashboard" }
            }
            h3 { "Review" }
            (review)
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}
