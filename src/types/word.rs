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

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Fallible;
use crate::error::KotobaError;

/// A vocabulary entry: the term shown as the prompt, its expected phonetic
/// reading, and its expected meaning. The id is opaque and stable across
/// edits to the textual fields.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning: String,
}

impl Word {
    /// Build a word from user input, trimming each field. Empty fields are
    /// rejected here, at the CRUD boundary, so the test engine never has to
    /// revalidate them.
    pub fn new(term: &str, reading: &str, meaning: &str) -> Fallible<Self> {
        let term = term.trim();
        let reading = reading.trim();
        let meaning = meaning.trim();
        if term.is_empty() || reading.is_empty() || meaning.is_empty() {
            return Err(KotobaError::EmptyWordField);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            term: term.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
        })
    }
}
