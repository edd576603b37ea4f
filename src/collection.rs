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

use serde_json::Value;

use crate::error::Fallible;
use crate::error::KotobaError;
use crate::error::fail;
use crate::store::Store;
use crate::types::list::VocabList;
use crate::types::word::Word;

/// The vocabulary store: every list the user owns, loaded once from the
/// backing store and written back after each mutation. The test engine only
/// ever receives word snapshots from here; it never mutates a list.
pub struct Collection {
    store: Box<dyn Store>,
    lists: Vec<VocabList>,
}

impl Collection {
    pub fn open(store: Box<dyn Store>) -> Fallible<Self> {
        let lists = store.load()?;
        Ok(Self { store, lists })
    }

    pub fn lists(&self) -> &[VocabList] {
        &self.lists
    }

    pub fn find(&self, id: &str) -> Option<&VocabList> {
        self.lists.iter().find(|l| l.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Fallible<&mut VocabList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| KotobaError::ListNotFound(id.to_string()))
    }

    /// Create a new empty list and place it at the front, newest first.
    pub fn create_list(&mut self, title: &str, description: &str) -> Fallible<String> {
        let title = title.trim();
        if title.is_empty() {
            return fail("list title must be non-empty");
        }
        let list = VocabList::new(title, description);
        let id = list.id.clone();
        self.lists.insert(0, list);
        self.persist()?;
        Ok(id)
    }

    pub fn delete_list(&mut self, id: &str) -> Fallible<()> {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != id);
        if self.lists.len() == before {
            return Err(KotobaError::ListNotFound(id.to_string()));
        }
        self.persist()
    }

    pub fn update_metadata(&mut self, id: &str, title: &str, description: &str) -> Fallible<()> {
        let title = title.trim();
        if title.is_empty() {
            return fail("list title must be non-empty");
        }
        let description = description.trim().to_string();
        let list = self.find_mut(id)?;
        list.title = title.to_string();
        list.description = description;
        self.persist()
    }

    /// Replace a list's words wholesale.
    pub fn update_words(&mut self, id: &str, words: Vec<Word>) -> Fallible<()> {
        let list = self.find_mut(id)?;
        list.words = words;
        self.persist()
    }

    pub fn add_word(
        &mut self,
        list_id: &str,
        term: &str,
        reading: &str,
        meaning: &str,
    ) -> Fallible<()> {
        let word = Word::new(term, reading, meaning)?;
        let list = self.find_mut(list_id)?;
        // Newest first, like lists themselves.
        list.words.insert(0, word);
        self.persist()
    }

    /// Edit a word in place, keeping its id. An unknown word id leaves the
    /// list unchanged.
    pub fn update_word(
        &mut self,
        list_id: &str,
        word_id: &str,
        term: &str,
        reading: &str,
        meaning: &str,
    ) -> Fallible<()> {
        let term = term.trim();
        let reading = reading.trim();
        let meaning = meaning.trim();
        if term.is_empty() || reading.is_empty() || meaning.is_empty() {
            return Err(KotobaError::EmptyWordField);
        }
        let list = self
            .find(list_id)
            .ok_or_else(|| KotobaError::ListNotFound(list_id.to_string()))?;
        let words: Vec<Word> = list
            .words
            .iter()
            .map(|w| {
                if w.id == word_id {
                    Word {
                        id: w.id.clone(),
                        term: term.to_string(),
                        reading: reading.to_string(),
                        meaning: meaning.to_string(),
                    }
                } else {
                    w.clone()
                }
            })
            .collect();
        self.update_words(list_id, words)
    }

    pub fn delete_word(&mut self, list_id: &str, word_id: &str) -> Fallible<()> {
        let list = self.find_mut(list_id)?;
        list.words.retain(|w| w.id != word_id);
        self.persist()
    }

    /// Import lists from an exported JSON document, prepending them to the
    /// collection. Validation is structural only: the payload must be an
    /// array whose elements carry a non-empty id, a non-empty title, and an
    /// array-typed `words`. Deeper word shape is not checked; missing
    /// fields default.
    pub fn import(&mut self, json: &str) -> Fallible<usize> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| KotobaError::MalformedImport(e.to_string()))?;
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return Err(KotobaError::MalformedImport(
                    "payload must be an array of lists".to_string(),
                ));
            }
        };
        for item in items {
            let id = item.get("id").and_then(Value::as_str).unwrap_or("");
            let title = item.get("title").and_then(Value::as_str).unwrap_or("");
            let words_ok = item.get("words").is_some_and(Value::is_array);
            if id.is_empty() || title.is_empty() || !words_ok {
                return Err(KotobaError::MalformedImport(
                    "every list needs an id, a title, and a words array".to_string(),
                ));
            }
        }
        let imported: Vec<VocabList> = serde_json::from_value(value)
            .map_err(|e| KotobaError::MalformedImport(e.to_string()))?;
        let count = imported.len();
        log::debug!("Importing {count} lists");
        self.lists.splice(0..0, imported);
        self.persist()?;
        Ok(count)
    }

    /// The whole collection, serialized verbatim and pretty-printed. This is
    /// the same shape `import` accepts.
    pub fn export_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string_pretty(&self.lists)?)
    }

    fn persist(&self) -> Fallible<()> {
        self.store.save(&self.lists)
    }
}
