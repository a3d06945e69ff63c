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
use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::Fallible;
use crate::error::fail;

/// One bilingual flashcard entry: a group of equivalent Japanese forms and
/// the translations any of which is an acceptable answer.
///
/// Both sides are non-empty. Storage order is the order the forms were read
/// in; comparisons between records look at the Japanese side as a set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    japanese: Vec<String>,
    translations: Vec<String>,
}

/// Which side of a [`Vocabulary`] is shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Japanese,
    Translation,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Japanese => Side::Translation,
            Side::Translation => Side::Japanese,
        }
    }
}

impl Vocabulary {
    /// Construct a record. Fails if either side is empty.
    pub fn new(japanese: Vec<String>, translations: Vec<String>) -> Fallible<Self> {
        if japanese.is_empty() {
            return fail("vocabulary must have at least one Japanese form");
        }
        if translations.is_empty() {
            return fail("vocabulary must have at least one translation");
        }
        Ok(Self {
            japanese,
            translations,
        })
    }

    pub fn japanese(&self) -> &[String] {
        &self.japanese
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Japanese => &self.japanese,
            Side::Translation => &self.translations,
        }
    }

    /// The Japanese forms as a sorted set, used to decide whether two
    /// records describe the same word.
    pub fn japanese_key(&self) -> BTreeSet<&str> {
        self.japanese.iter().map(String::as_str).collect()
    }

    pub fn same_japanese(&self, other: &Vocabulary) -> bool {
        self.japanese_key() == other.japanese_key()
    }

    /// Append a Japanese form unless it is already present. Returns whether
    /// it was added.
    pub(crate) fn add_japanese(&mut self, form: &str) -> bool {
        push_unique(&mut self.japanese, form)
    }

    /// Append a translation unless it is already present. Returns whether it
    /// was added.
    pub(crate) fn add_translation(&mut self, translation: &str) -> bool {
        push_unique(&mut self.translations, translation)
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    if values.iter().any(|v| v == value) {
        false
    } else {
        values.push(value.to_string());
        true
    }
}

impl Display for Vocabulary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} : {}",
            self.japanese.join(", "),
            self.translations.join(", ")
        )
    }
}
