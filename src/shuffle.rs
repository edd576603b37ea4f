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
use rand::seq::SliceRandom;

use crate::types::word::Word;

/// Produce the presentation order for a test session: an unbiased
/// Fisher-Yates permutation of the input. The random source is injected so
/// sessions are reproducible under test with a seeded generator.
///
/// Called exactly once per session; the order is fixed thereafter, because
/// collected answers are aligned with presentation positions.
pub fn shuffle<R: Rng>(words: &[Word], rng: &mut R) -> Vec<Word> {
    let mut order: Vec<Word> = words.to_vec();
    order.shuffle(rng);
    order
}
