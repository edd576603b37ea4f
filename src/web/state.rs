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

use std::sync::Arc;
use std::sync::Mutex;

use crate::collection::Collection;
use crate::scoring::Evaluation;
use crate::session::TestSession;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<AppState>>,
}

/// Everything behind the mutex: the list collection, at most one active
/// test session, and the result of the most recently finished one.
pub struct AppState {
    pub collection: Collection,
    pub test: Option<ActiveTest>,
    pub outcome: Option<TestOutcome>,
}

/// A running session, tagged with the list it was started from so the
/// result view and retries can refer back to it.
pub struct ActiveTest {
    pub list_id: String,
    pub list_title: String,
    pub session: TestSession,
}

/// The scored result of the last finished session. Held only until the next
/// session starts; never persisted.
pub struct TestOutcome {
    pub list_id: String,
    pub list_title: String,
    pub evaluation: Evaluation,
}
