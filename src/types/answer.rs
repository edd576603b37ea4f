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

/// The answer pair a user submitted for one presented word. `word_id` is a
/// back-reference to the word it was collected against.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Answer {
    pub word_id: String,
    pub user_reading: String,
    pub user_meaning: String,
}
