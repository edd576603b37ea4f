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

use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// A named, ordered collection of words. Lists are owned by the store; the
/// test engine only ever sees a snapshot of a list's words.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabList {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl VocabList {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            words: Vec::new(),
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_shape() {
        let mut list = VocabList::new("JLPT N5", "Verbs");
        list.created_at = Timestamp::new(1700000000000);
        list.words.push(Word {
            id: "w1".to_string(),
            term: "食べる".to_string(),
            reading: "たべる".to_string(),
            meaning: "먹다".to_string(),
        });
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["title"], "JLPT N5");
        assert_eq!(json["createdAt"], 1700000000000i64);
        assert_eq!(json["words"][0]["term"], "食べる");
    }

    #[test]
    fn test_deserialize_defaults() {
        // Imported lists may omit everything but id and title.
        let json = r#"{"id": "l1", "title": "Bare", "words": []}"#;
        let list: VocabList = serde_json::from_str(json).unwrap();
        assert_eq!(list.description, "");
        assert_eq!(list.created_at, Timestamp::new(0));
        assert!(list.words.is_empty());
    }
}
