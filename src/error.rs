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

use thiserror::Error;

pub type Fallible<T> = Result<T, KotobaError>;

#[derive(Error, Debug)]
pub enum KotobaError {
    /// Starting a test over zero words. Recoverable: the caller re-prompts.
    #[error("cannot start a test without any words")]
    EmptySelection,

    /// A submitted answer with an empty reading or meaning. Recoverable: the
    /// session is left untouched and the caller re-prompts.
    #[error("both a reading and a meaning are required")]
    IncompleteAnswer,

    /// A session operation outside the `InProgress` state. Caller bug.
    #[error("the test session is not in progress")]
    InvalidState,

    /// Presentation order and collected answers differ in length. Caller bug.
    #[error("presentation order has {words} words but {answers} answers were collected")]
    LengthMismatch { words: usize, answers: usize },

    /// Scoring over zero words. Unreachable through the session state
    /// machine, which rejects empty selections at start.
    #[error("cannot score a session with zero words")]
    DivisionByZero,

    /// An import payload that fails structural validation.
    #[error("malformed import payload: {0}")]
    MalformedImport(String),

    /// A CRUD operation against a list id that does not exist.
    #[error("no list with id {0}")]
    ListNotFound(String),

    /// A word created or updated with an empty field.
    #[error("word fields must be non-empty")]
    EmptyWordField,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error: {0}")]
    Custom(String),
}

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(KotobaError::Custom(message.into()))
}
