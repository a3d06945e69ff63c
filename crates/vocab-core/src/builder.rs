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

//! The vocabulary set builder: accumulates records from lessons, lesson
//! ranges and categories into one working list.
//!
//! Problems with the sources never abort a load. They are collected as
//! [`LoadWarning`]s and the offending unit contributes nothing, so that
//! loading lessons `3 99 5` still yields lessons 3 and 5.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::index::Index;
use crate::index::Source;
use crate::merge::merge_same_japanese;
use crate::parser::ParseWarning;
use crate::source::LineSource;
use crate::types::vocabulary::Vocabulary;

/// Something that was skipped while loading.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// A line of a source did not parse.
    Line { file: String, warning: ParseWarning },
    /// A source could not be read at all.
    Unreadable { file: String, reason: String },
    UnknownLesson(i64),
    UnknownCategory(String),
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::Line { file, warning } => write!(f, "{file}: {warning}"),
            LoadWarning::Unreadable { file, reason } => {
                write!(f, "{file}: could not be read ({reason})")
            }
            LoadWarning::UnknownLesson(id) => write!(f, "lesson {id} does not exist"),
            LoadWarning::UnknownCategory(name) => write!(f, "category '{name}' does not exist"),
        }
    }
}

/// A unit of vocabulary that can be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    AllLessons,
    Lesson(i64),
    Lessons(Vec<i64>),
    /// Lessons `lower..=upper`; without an upper bound, up to the highest
    /// known lesson.
    Range { lower: i64, upper: Option<i64> },
    Category(String),
    Categories(Vec<String>),
}

pub struct SetBuilder<'a> {
    index: &'a Index,
    source: &'a dyn LineSource,
    records: Vec<Vocabulary>,
    warnings: Vec<LoadWarning>,
}

impl<'a> SetBuilder<'a> {
    pub fn new(index: &'a Index, source: &'a dyn LineSource) -> Self {
        SetBuilder {
            index,
            source,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn load(&mut self, selection: &Selection) -> &mut Self {
        match selection {
            Selection::AllLessons => self.load_all_lessons(),
            Selection::Lesson(id) => self.load_lesson(*id),
            Selection::Lessons(ids) => {
                for id in ids {
                    self.load_lesson(*id);
                }
                self
            }
            Selection::Range { lower, upper } => self.load_range(*lower, *upper),
            Selection::Category(name) => self.load_category(name),
            Selection::Categories(names) => {
                for name in names {
                    self.load_category(name);
                }
                self
            }
        }
    }

    pub fn load_all_lessons(&mut self) -> &mut Self {
        let ids: Vec<u32> = self.index.lesson_ids().collect();
        for id in ids {
            self.append_lesson(id);
        }
        self
    }

    pub fn load_lesson(&mut self, id: i64) -> &mut Self {
        match u32::try_from(id) {
            Ok(id) if self.index.lesson(id).is_some() => self.append_lesson(id),
            _ => self.warn(LoadWarning::UnknownLesson(id)),
        }
        self
    }

    /// Load every known lesson in `lower..=upper`. Ids without vocabulary are
    /// skipped, and a range that covers no lesson contributes nothing.
    pub fn load_range(&mut self, lower: i64, upper: Option<i64>) -> &mut Self {
        let Some(max) = self.index.max_lesson_id() else {
            return self;
        };
        let upper = upper.unwrap_or(i64::from(max));
        let ids: Vec<u32> = self
            .index
            .lesson_ids()
            .filter(|id| (lower..=upper).contains(&i64::from(*id)))
            .collect();
        for id in ids {
            self.append_lesson(id);
        }
        self
    }

    pub fn load_category(&mut self, name: &str) -> &mut Self {
        match self.category_records(name) {
            Some(records) => self.records.extend(records),
            None => self.warn(LoadWarning::UnknownCategory(name.to_string())),
        }
        self
    }

    /// Remove every record whose Japanese forms match one of `records`.
    pub fn cut(&mut self, records: &[Vocabulary]) -> &mut Self {
        self.records
            .retain(|r| !records.iter().any(|c| c.same_japanese(r)));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.records.clear();
        self
    }

    /// An independent copy of the working list.
    pub fn collect(&self) -> Vec<Vocabulary> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<LoadWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: LoadWarning) {
        log::debug!("Skipped: {warning}");
        self.warnings.push(warning);
    }

    fn append_lesson(&mut self, id: u32) {
        let source = self.index.lesson(id).and_then(|l| l.source());
        if let Some(source) = source {
            let records = self.read_source(&source);
            log::debug!("Lesson {id}: {} records", records.len());
            self.records.extend(records);
        }
    }

    fn category_records(&mut self, name: &str) -> Option<Vec<Vocabulary>> {
        let index = self.index;
        let category = index.category(name)?;
        let mut records = Vec::new();
        for source in &category.sources {
            records.extend(self.read_source(source));
        }
        for include in &category.includes {
            match self.category_records(include) {
                Some(included) => records.extend(included),
                None => self.warn(LoadWarning::UnknownCategory(include.clone())),
            }
        }
        if category.merge {
            records = merge_same_japanese(&records);
        }
        log::debug!("Category '{name}': {} records", records.len());
        Some(records)
    }

    fn read_source(&mut self, source: &Source) -> Vec<Vocabulary> {
        let file = source.file();
        let lines = match self.source.read_lines(file) {
            Ok(lines) => lines,
            Err(e) => {
                self.warn(LoadWarning::Unreadable {
                    file: file.to_string(),
                    reason: e.to_string(),
                });
                return Vec::new();
            }
        };
        let parsed = source.parse(&lines);
        for warning in parsed.warnings {
            self.warn(LoadWarning::Line {
                file: file.to_string(),
                warning,
            });
        }
        parsed.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::index::Category;
    use crate::index::Lesson;
    use crate::source::MemorySource;

    fn lesson(id: u32, file: Option<String>) -> Lesson {
        Lesson { id, file }
    }

    fn category(name: &str, merge: bool, includes: &[&str], files: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            group: None,
            merge,
            includes: includes.iter().map(|s| s.to_string()).collect(),
            sources: files
                .iter()
                .map(|f| Source::Standard {
                    file: f.to_string(),
                })
                .collect(),
        }
    }

    /// Lessons 0..=12; 8, 10 and 12 have vocabulary, 9 has a broken file and
    /// 11 is missing its file.
    fn make_index() -> Fallible<Index> {
        let lessons = (0..=12)
            .map(|id| match id {
                8..=12 => lesson(id, Some(format!("l{id}.csv"))),
                _ => lesson(id, None),
            })
            .collect();
        let categories = vec![
            category("own", false, &[], &["own.csv"]),
            category("other", false, &[], &["other.csv"]),
            category("families", true, &["own", "other"], &[]),
        ];
        Index::new(lessons, categories)
    }

    fn make_source() -> MemorySource {
        MemorySource::new()
            .with("l8.csv", "1,taberu,eat\n2,nomu,drink")
            .with("l9.csv", "x,broken,line")
            .with("l10.csv", "1,iku,go")
            .with("l12.csv", "1,kuru,come\n2,miru,see")
            .with("own.csv", "haha:mother\nchichi:father")
            .with("other.csv", "okaasan:mother\nhaha:Mutter")
    }

    fn japanese(records: &[Vocabulary]) -> Vec<String> {
        records.iter().map(|r| r.japanese().join("/")).collect()
    }

    #[test]
    fn test_load_lessons_in_order() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let records = SetBuilder::new(&index, &source)
            .load_lesson(10)
            .load_lesson(8)
            .collect();
        assert_eq!(japanese(&records), ["iku", "taberu", "nomu"]);
        Ok(())
    }

    #[test]
    fn test_unknown_lesson_contributes_nothing() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let mut builder = SetBuilder::new(&index, &source);
        builder
            .load(&Selection::Lessons(vec![8, 99, -3, 10]))
            .load_lesson(3);
        assert_eq!(japanese(&builder.collect()), ["taberu", "nomu", "iku"]);
        assert_eq!(
            builder.warnings(),
            [LoadWarning::UnknownLesson(99), LoadWarning::UnknownLesson(-3)]
        );
        Ok(())
    }

    #[test]
    fn test_open_range_runs_to_last_lesson() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let mut builder = SetBuilder::new(&index, &source);
        builder.load_range(8, None);
        assert_eq!(
            japanese(&builder.collect()),
            ["taberu", "nomu", "iku", "kuru", "miru"]
        );
        // Lesson 9's broken line and lesson 11's missing file.
        assert_eq!(builder.warnings().len(), 2);
        assert!(matches!(
            &builder.warnings()[1],
            LoadWarning::Unreadable { file, .. } if file == "l11.csv"
        ));
        Ok(())
    }

    #[test]
    fn test_closed_and_out_of_range() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let closed = SetBuilder::new(&index, &source).load_range(0, Some(8)).collect();
        assert_eq!(japanese(&closed), ["taberu", "nomu"]);
        let past_end = SetBuilder::new(&index, &source).load_range(13, None).collect();
        assert!(past_end.is_empty());
        let negative = SetBuilder::new(&index, &source).load_range(-5, Some(-1)).collect();
        assert!(negative.is_empty());
        let inverted = SetBuilder::new(&index, &source).load_range(12, Some(8)).collect();
        assert!(inverted.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_lessons() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let mut builder = SetBuilder::new(&index, &source);
        builder.load(&Selection::AllLessons);
        assert_eq!(builder.len(), 5);
        Ok(())
    }

    #[test]
    fn test_category_union_is_merged() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let records = SetBuilder::new(&index, &source)
            .load_category("families")
            .collect();
        assert_eq!(japanese(&records), ["haha", "chichi", "okaasan"]);
        assert_eq!(records[0].translations(), ["mother", "Mutter"]);
        Ok(())
    }

    #[test]
    fn test_plain_categories_keep_duplicates() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let records = SetBuilder::new(&index, &source)
            .load(&Selection::Categories(vec![
                "own".to_string(),
                "other".to_string(),
            ]))
            .collect();
        assert_eq!(japanese(&records), ["haha", "chichi", "okaasan", "haha"]);
        Ok(())
    }

    #[test]
    fn test_unknown_category_is_a_warning() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let mut builder = SetBuilder::new(&index, &source);
        builder.load_category("nope").load_category("own");
        assert_eq!(builder.len(), 2);
        assert_eq!(
            builder.take_warnings(),
            [LoadWarning::UnknownCategory("nope".to_string())]
        );
        assert!(builder.warnings().is_empty());
        Ok(())
    }

    #[test]
    fn test_cut_removes_by_japanese() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let lesson_8 = SetBuilder::new(&index, &source).load_lesson(8).collect();
        let mut builder = SetBuilder::new(&index, &source);
        builder.load_range(8, Some(10)).cut(&lesson_8);
        assert_eq!(japanese(&builder.collect()), ["iku"]);
        Ok(())
    }

    #[test]
    fn test_collect_is_independent() -> Fallible<()> {
        let index = make_index()?;
        let source = make_source();
        let mut builder = SetBuilder::new(&index, &source);
        builder.load_lesson(8);
        let mut copy = builder.collect();
        copy.clear();
        assert_eq!(builder.len(), 2);
        builder.clear();
        assert!(builder.is_empty());
        Ok(())
    }
}
