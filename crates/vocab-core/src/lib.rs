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

//! vocab-core: Core library for the vocab-trainer flashcard program.
//!
//! This library provides the I/O-agnostic parts of the trainer:
//! - Parsing vocabulary sources (standard, lesson CSV and counter formats)
//! - Merging records that share the same Japanese forms
//! - The lesson/category index and the vocabulary set builder
//! - The interactive quiz session engine

pub mod builder;
pub mod console;
pub mod error;
pub mod index;
pub mod merge;
pub mod parser;
pub mod quiz;
pub mod rng;
pub mod source;
pub mod types;

// Re-exports for convenience
pub use builder::{LoadWarning, Selection, SetBuilder};
pub use console::Console;
pub use error::{ErrorReport, Fallible, fail};
pub use index::{Category, Index, Lesson, Source};
pub use merge::merge_same_japanese;
pub use quiz::{DefaultRounds, Outcome, QuizConfig, Score, run_quiz};
pub use rng::{RandomSource, TinyRng};
pub use source::{LineSource, MemorySource};
pub use types::vocabulary::{Side, Vocabulary};
