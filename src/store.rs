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

use std::fs;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::types::list::VocabList;

/// Persistence seam for the list collection. The collection reads the whole
/// blob once at startup and writes the whole blob after each mutation, so
/// the rest of the application never observes a torn list.
pub trait Store: Send {
    fn load(&self) -> Fallible<Vec<VocabList>>;
    fn save(&self, lists: &[VocabList]) -> Fallible<()>;
}

/// Stores the collection as a pretty-printed JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Store for FileStore {
    fn load(&self) -> Fallible<Vec<VocabList>> {
        if !self.path.exists() {
            log::debug!("No store file at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let lists: Vec<VocabList> = serde_json::from_str(&contents)?;
        log::debug!("Loaded {} lists from {:?}", lists.len(), self.path);
        Ok(lists)
    }

    fn save(&self, lists: &[VocabList]) -> Fallible<()> {
        let json = serde_json::to_string_pretty(lists)?;
        // Write-then-rename so a crash mid-write cannot leave a torn file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
pub struct MemoryStore {
    lists: std::sync::Mutex<Vec<VocabList>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            lists: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl Store for MemoryStore {
    fn load(&self) -> Fallible<Vec<VocabList>> {
        Ok(self.lists.lock().unwrap().clone())
    }

    fn save(&self, lists: &[VocabList]) -> Fallible<()> {
        *self.lists.lock().unwrap() = lists.to_vec();
        Ok(())
    }
}
