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

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::KotobaError;
use crate::scoring::evaluate;
use crate::session::TestSession;
use crate::types::word::Word;
use crate::web::state::ActiveTest;
use crate::web::state::ServerState;
use crate::web::state::TestOutcome;

#[derive(Deserialize)]
pub struct ListForm {
    title: String,
    #[serde(default)]
    description: String,
}

pub async fn create_list_handler(
    State(state): State<ServerState>,
    Form(form): Form<ListForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    match mutable.collection.create_list(&form.title, &form.description) {
        Ok(id) => Redirect::to(&format!("/lists/{id}")),
        Err(e) => {
            log::error!("error creating list: {e}");
            Redirect::to("/")
        }
    }
}

pub async fn delete_list_handler(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Err(e) = mutable.collection.delete_list(&list_id) {
        log::error!("error deleting list: {e}");
    }
    Redirect::to("/")
}

pub async fn update_metadata_handler(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
    Form(form): Form<ListForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Err(e) = mutable
        .collection
        .update_metadata(&list_id, &form.title, &form.description)
    {
        log::error!("error updating list: {e}");
    }
    Redirect::to(&format!("/lists/{list_id}"))
}

#[derive(Deserialize)]
pub struct WordForm {
    term: String,
    reading: String,
    meaning: String,
}

pub async fn add_word_handler(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
    Form(form): Form<WordForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Err(e) = mutable
        .collection
        .add_word(&list_id, &form.term, &form.reading, &form.meaning)
    {
        // Recoverable: the page re-renders and the user tries again.
        log::error!("error adding word: {e}");
    }
    Redirect::to(&format!("/lists/{list_id}"))
}

pub async fn update_word_handler(
    State(state): State<ServerState>,
    Path((list_id, word_id)): Path<(String, String)>,
    Form(form): Form<WordForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Err(e) = mutable.collection.update_word(
        &list_id,
        &word_id,
        &form.term,
        &form.reading,
        &form.meaning,
    ) {
        log::error!("error updating word: {e}");
    }
    Redirect::to(&format!("/lists/{list_id}"))
}

pub async fn delete_word_handler(
    State(state): State<ServerState>,
    Path((list_id, word_id)): Path<(String, String)>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Err(e) = mutable.collection.delete_word(&list_id, &word_id) {
        log::error!("error deleting word: {e}");
    }
    Redirect::to(&format!("/lists/{list_id}"))
}

pub async fn start_test_handler(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    let (list_id, list_title, words) = match mutable.collection.find(&list_id) {
        Some(list) => (list.id.clone(), list.title.clone(), list.words.clone()),
        None => {
            log::error!("cannot start test: no list with id {list_id}");
            return Redirect::to("/");
        }
    };
    match begin_test(list_id.clone(), list_title, words) {
        Ok(test) => {
            mutable.test = Some(test);
            mutable.outcome = None;
            Redirect::to("/test")
        }
        Err(e) => {
            log::error!("cannot start test: {e}");
            Redirect::to(&format!("/lists/{list_id}"))
        }
    }
}

fn begin_test(list_id: String, list_title: String, words: Vec<Word>) -> Fallible<ActiveTest> {
    let session = TestSession::start(&words, &mut rand::rng())?;
    Ok(ActiveTest {
        list_id,
        list_title,
        session,
    })
}

#[derive(Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    reading: String,
    #[serde(default)]
    meaning: String,
}

pub async fn submit_answer_handler(
    State(state): State<ServerState>,
    Form(form): Form<AnswerForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    let mut test = match mutable.test.take() {
        Some(test) => test,
        None => {
            log::error!("answer submitted with no test in progress");
            return Redirect::to("/");
        }
    };
    match test.session.submit_answer(&form.reading, &form.meaning) {
        Ok(()) => {}
        Err(KotobaError::IncompleteAnswer) => {
            // Both fields are mandatory; the session is untouched and the
            // page re-prompts for the same word.
            mutable.test = Some(test);
            return Redirect::to("/test");
        }
        Err(e) => {
            log::error!("error submitting answer: {e}");
            mutable.test = Some(test);
            return Redirect::to("/test");
        }
    }
    if test.session.is_completed() {
        let evaluation = match evaluate(test.session.presentation_order(), test.session.answers()) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                log::error!("error scoring session: {e}");
                return Redirect::to("/");
            }
        };
        log::debug!(
            "Session scored: {}/{} correct, score {}",
            evaluation.correct_count,
            evaluation.total(),
            evaluation.score
        );
        mutable.outcome = Some(TestOutcome {
            list_id: test.list_id,
            list_title: test.list_title,
            evaluation,
        });
        return Redirect::to("/result");
    }
    mutable.test = Some(test);
    Redirect::to("/test")
}

pub async fn cancel_test_handler(State(state): State<ServerState>) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    match mutable.test.take() {
        // Discarded entirely: no scoring, no record.
        Some(mut test) => {
            if let Err(e) = test.session.cancel() {
                log::error!("error cancelling test: {e}");
            }
        }
        None => {
            log::error!("cancel requested with no test in progress");
        }
    }
    Redirect::to("/")
}

pub async fn retry_handler(State(state): State<ServerState>) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    let list_id = match &mutable.outcome {
        Some(outcome) => outcome.list_id.clone(),
        None => {
            log::error!("retry requested with no test result");
            return Redirect::to("/");
        }
    };
    let (list_title, words) = match mutable.collection.find(&list_id) {
        Some(list) => (list.title.clone(), list.words.clone()),
        None => {
            log::error!("cannot retry: no list with id {list_id}");
            return Redirect::to("/");
        }
    };
    match begin_test(list_id, list_title, words) {
        Ok(test) => {
            mutable.test = Some(test);
            mutable.outcome = None;
            Redirect::to("/test")
        }
        Err(e) => {
            log::error!("cannot retry: {e}");
            Redirect::to("/")
        }
    }
}

pub async fn retry_incorrect_handler(State(state): State<ServerState>) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    let (list_id, list_title, words) = match &mutable.outcome {
        Some(outcome) => (
            outcome.list_id.clone(),
            outcome.list_title.clone(),
            outcome.evaluation.incorrect_words(),
        ),
        None => {
            log::error!("retry requested with no test result");
            return Redirect::to("/");
        }
    };
    match begin_test(list_id, list_title, words) {
        Ok(test) => {
            mutable.test = Some(test);
            mutable.outcome = None;
            Redirect::to("/test")
        }
        Err(e) => {
            // A perfect score leaves nothing to retry; the result page does
            // not offer the button in that case, so this is a caller error.
            log::error!("cannot retry incorrect words: {e}");
            Redirect::to("/result")
        }
    }
}

#[derive(Deserialize)]
pub struct ImportForm {
    payload: String,
}

pub async fn import_handler(
    State(state): State<ServerState>,
    Form(form): Form<ImportForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    match mutable.collection.import(&form.payload) {
        Ok(count) => {
            log::debug!("Imported {count} lists");
        }
        Err(e) => {
            log::error!("error importing lists: {e}");
        }
    }
    Redirect::to("/")
}
