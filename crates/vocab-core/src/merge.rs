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

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::types::vocabulary::Vocabulary;

/// Collapse records whose Japanese forms are the same set into one record
/// carrying the union of their translations.
///
/// The surviving record keeps the Japanese forms of the first record in its
/// group, and groups appear in the order their first member appears in the
/// input. Translations are ordered by first appearance as well, so the output
/// is deterministic for a given input order.
pub fn merge_same_japanese(records: &[Vocabulary]) -> Vec<Vocabulary> {
    let mut out: Vec<Vocabulary> = Vec::new();
    let mut groups: HashMap<BTreeSet<&str>, usize> = HashMap::new();
    for record in records {
        match groups.get(&record.japanese_key()) {
            Some(&index) => {
                let merged = &mut out[index];
                for translation in record.translations() {
                    merged.add_translation(translation);
                }
            }
            None => {
                groups.insert(record.japanese_key(), out.len());
                out.push(record.clone());
            }
        }
    }
    out
}
