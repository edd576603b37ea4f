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

use crate::error::Fallible;
use crate::error::KotobaError;
use crate::types::answer::Answer;
use crate::types::word::Word;

/// The scored comparison for one presented word.
#[derive(Clone, Debug)]
pub struct WordEvaluation {
    pub word: Word,
    pub answer: Answer,
    pub reading_correct: bool,
    pub meaning_correct: bool,
}

impl WordEvaluation {
    pub fn total_correct(&self) -> bool {
        self.reading_correct && self.meaning_correct
    }
}

/// The scored result of a completed session. Derived once when a session
/// finishes; consumed by the result view and the retry selector, never
/// persisted.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Per-word results, in presentation order.
    pub entries: Vec<WordEvaluation>,
    pub correct_count: usize,
    /// Percentage score, rounded half up.
    pub score: u32,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// The words answered incorrectly, in their canonical form and in the
    /// order they were presented. Feeding these back into a new session is
    /// how "retry incorrect only" works.
    pub fn incorrect_words(&self) -> Vec<Word> {
        self.entries
            .iter()
            .filter(|e| !e.total_correct())
            .map(|e| e.word.clone())
            .collect()
    }
}

/// Score a finished session: the canonical words in presentation order
/// against the answers collected in the same order.
///
/// Comparison is exact string equality after trimming leading and trailing
/// whitespace. No case folding, no Unicode normalization, no partial
/// credit: in this domain any deviation from the expected reading or
/// meaning is wrong.
pub fn evaluate(order: &[Word], answers: &[Answer]) -> Fallible<Evaluation> {
    if order.len() != answers.len() {
        return Err(KotobaError::LengthMismatch {
            words: order.len(),
            answers: answers.len(),
        });
    }
    if order.is_empty() {
        // Unreachable through the session state machine, which rejects
        // empty selections at start.
        return Err(KotobaError::DivisionByZero);
    }
    let entries: Vec<WordEvaluation> = order
        .iter()
        .zip(answers.iter())
        .map(|(word, answer)| WordEvaluation {
            reading_correct: answer.user_reading.trim() == word.reading.trim(),
            meaning_correct: answer.user_meaning.trim() == word.meaning.trim(),
            word: word.clone(),
            answer: answer.clone(),
        })
        .collect();
    let correct_count = entries.iter().filter(|e| e.total_correct()).count();
    let score = ((correct_count * 100) as f64 / entries.len() as f64).round() as u32;
    Ok(Evaluation {
        entries,
        correct_count,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(id: &str, term: &str, reading: &str, meaning: &str) -> Word {
        Word {
            id: id.to_string(),
            term: term.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
        }
    }

    fn answer(word_id: &str, reading: &str, meaning: &str) -> Answer {
        Answer {
            word_id: word_id.to_string(),
            user_reading: reading.to_string(),
            user_meaning: meaning.to_string(),
        }
    }

    #[test]
    fn test_perfect_session() {
        // Scenario A: one word, answered exactly.
        let order = vec![word("w1", "食べる", "たべる", "먹다")];
        let answers = vec![answer("w1", "たべる", "먹다")];
        let eval = evaluate(&order, &answers).unwrap();
        assert_eq!(eval.score, 100);
        assert_eq!(eval.correct_count, 1);
        assert!(eval.incorrect_words().is_empty());
    }

    #[test]
    fn test_wrong_meaning_only() {
        // Scenario B: two words, one wrong meaning. Half right, score 50,
        // and the retry subset carries the canonical word.
        let order = vec![
            word("w1", "食べる", "たべる", "먹다"),
            word("w2", "飲む", "のむ", "마시다"),
        ];
        let answers = vec![
            answer("w1", "たべる", "먹다"),
            answer("w2", "のむ", "달리다"),
        ];
        let eval = evaluate(&order, &answers).unwrap();
        assert_eq!(eval.correct_count, 1);
        assert_eq!(eval.score, 50);
        assert!(eval.entries[1].reading_correct);
        assert!(!eval.entries[1].meaning_correct);
        let incorrect = eval.incorrect_words();
        assert_eq!(incorrect, vec![order[1].clone()]);
    }

    #[test]
    fn test_whitespace_is_trimmed_case_is_not() {
        let order = vec![
            word("w1", "食べる", "たべる", "to eat"),
            word("w2", "走る", "Hashiru", "to run"),
        ];
        let answers = vec![
            answer("w1", " たべる ", "to eat"),
            answer("w2", "hashiru", "to run"),
        ];
        let eval = evaluate(&order, &answers).unwrap();
        assert!(eval.entries[0].total_correct());
        assert!(!eval.entries[1].reading_correct);
    }

    #[test]
    fn test_incorrect_subset_preserves_presentation_order() {
        let order = vec![
            word("w1", "a", "r1", "m1"),
            word("w2", "b", "r2", "m2"),
            word("w3", "c", "r3", "m3"),
        ];
        let answers = vec![
            answer("w1", "wrong", "m1"),
            answer("w2", "r2", "m2"),
            answer("w3", "r3", "wrong"),
        ];
        let eval = evaluate(&order, &answers).unwrap();
        let incorrect = eval.incorrect_words();
        let ids: Vec<&str> = incorrect.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w3"]);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 1 of 3 correct: 33.33 rounds to 33. 2 of 3: 66.67 rounds to 67.
        let order = vec![
            word("w1", "a", "r1", "m1"),
            word("w2", "b", "r2", "m2"),
            word("w3", "c", "r3", "m3"),
        ];
        let one = vec![
            answer("w1", "r1", "m1"),
            answer("w2", "x", "x"),
            answer("w3", "x", "x"),
        ];
        assert_eq!(evaluate(&order, &one).unwrap().score, 33);
        let two = vec![
            answer("w1", "r1", "m1"),
            answer("w2", "r2", "m2"),
            answer("w3", "x", "x"),
        ];
        assert_eq!(evaluate(&order, &two).unwrap().score, 67);
    }

    #[test]
    fn test_length_mismatch() {
        let order = vec![word("w1", "a", "r", "m")];
        let result = evaluate(&order, &[]);
        assert!(matches!(
            result,
            Err(KotobaError::LengthMismatch {
                words: 1,
                answers: 0
            })
        ));
    }

    #[test]
    fn test_empty_session_fails_fast() {
        let result = evaluate(&[], &[]);
        assert!(matches!(result, Err(KotobaError::DivisionByZero)));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let order = vec![word("w1", "a", "r", "m")];
        let answers = vec![answer("w1", "r", "x")];
        let a = evaluate(&order, &answers).unwrap();
        let b = evaluate(&order, &answers).unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.correct_count, b.correct_count);
        assert_eq!(
            a.entries[0].total_correct(),
            b.entries[0].total_correct()
        );
    }
}
