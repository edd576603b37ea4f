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

use rand::Rng;

use crate::error::Fallible;
use crate::error::KotobaError;
use crate::shuffle::shuffle;
use crate::types::answer::Answer;
use crate::types::word::Word;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    InProgress,
    Completed,
    Cancelled,
}

/// One self-test over a snapshot of words. The session fixes a shuffled
/// presentation order at start, then collects one answer per word until the
/// last word completes it.
///
/// Invariants: `answers[i].word_id == order[i].id` for every collected
/// answer; `answers.len() == position` between calls; `position` never
/// decreases; a completed or cancelled session rejects all mutation.
pub struct TestSession {
    order: Vec<Word>,
    position: usize,
    answers: Vec<Answer>,
    state: SessionState,
}

impl TestSession {
    /// Start a session over the given words. The words are shuffled once,
    /// with the caller's random source, and the first word in the shuffled
    /// order becomes the active prompt.
    pub fn start<R: Rng>(words: &[Word], rng: &mut R) -> Fallible<Self> {
        if words.is_empty() {
            return Err(KotobaError::EmptySelection);
        }
        let order = shuffle(words, rng);
        log::debug!("Starting test session over {} words", order.len());
        Ok(Self {
            order,
            position: 0,
            answers: Vec::new(),
            state: SessionState::InProgress,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// The word currently being prompted, or None once the session is over.
    pub fn current_word(&self) -> Option<&Word> {
        match self.state {
            SessionState::InProgress => self.order.get(self.position),
            _ => None,
        }
    }

    /// 0-based position of the active prompt.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The fixed shuffled order, aligned position-by-position with
    /// `answers`. Together they are the input to scoring.
    pub fn presentation_order(&self) -> &[Word] {
        &self.order
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Record the answer pair for the active word and advance. Fails without
    /// mutating on an empty (post-trim) reading or meaning, so the caller
    /// can simply re-prompt and call again.
    pub fn submit_answer(&mut self, reading: &str, meaning: &str) -> Fallible<()> {
        if self.state != SessionState::InProgress {
            return Err(KotobaError::InvalidState);
        }
        let reading = reading.trim();
        let meaning = meaning.trim();
        if reading.is_empty() || meaning.is_empty() {
            return Err(KotobaError::IncompleteAnswer);
        }
        let word = &self.order[self.position];
        self.answers.push(Answer {
            word_id: word.id.clone(),
            user_reading: reading.to_string(),
            user_meaning: meaning.to_string(),
        });
        self.position += 1;
        if self.position == self.order.len() {
            log::debug!("Test session completed");
            self.state = SessionState::Completed;
        }
        Ok(())
    }

    /// Abandon the session. No scoring is performed and no record is kept;
    /// the caller must start a fresh session to test again.
    pub fn cancel(&mut self) -> Fallible<()> {
        if self.state != SessionState::InProgress {
            return Err(KotobaError::InvalidState);
        }
        log::debug!("Test session cancelled at position {}", self.position);
        self.state = SessionState::Cancelled;
        Ok(())
    }
}
