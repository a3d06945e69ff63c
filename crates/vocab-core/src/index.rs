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

//! The lesson/category index: which sources make up each lesson and each
//! thematic category. Built once at start-up and read-only afterwards.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::parser::CounterFormat;
use crate::parser::Parsed;
use crate::parser::parse_counter;
use crate::parser::parse_lesson_csv;
use crate::parser::parse_standard;

/// One source file and the format it is written in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Source {
    Standard {
        file: String,
    },
    LessonCsv {
        file: String,
    },
    Counter {
        file: String,
        count: u32,
        #[serde(default)]
        question: bool,
        #[serde(default)]
        suffix: String,
    },
}

impl Source {
    pub fn file(&self) -> &str {
        match self {
            Source::Standard { file } => file,
            Source::LessonCsv { file } => file,
            Source::Counter { file, .. } => file,
        }
    }

    /// Turn the raw lines of this source's file into records.
    pub fn parse(&self, lines: &[String]) -> Parsed {
        match self {
            Source::Standard { .. } => parse_standard(lines),
            Source::LessonCsv { .. } => parse_lesson_csv(lines),
            Source::Counter {
                count,
                question,
                suffix,
                ..
            } => {
                let format = CounterFormat {
                    count: *count,
                    question: *question,
                    suffix: suffix.clone(),
                };
                parse_counter(lines, &format)
            }
        }
    }
}

/// A numbered lesson. A lesson without a file is known but empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
    pub id: u32,
    #[serde(default)]
    pub file: Option<String>,
}

impl Lesson {
    pub fn source(&self) -> Option<Source> {
        self.file
            .as_ref()
            .map(|file| Source::LessonCsv { file: file.clone() })
    }
}

/// A named thematic category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    /// The parent theme this category is listed under.
    #[serde(default)]
    pub group: Option<String>,
    /// Merge records that share the same Japanese forms after loading.
    #[serde(default)]
    pub merge: bool,
    /// Other categories loaded as part of this one.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// The on-disk manifest format (`index.toml`).
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    lesson: Vec<Lesson>,
    #[serde(default)]
    category: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct Index {
    lessons: BTreeMap<u32, Lesson>,
    categories: BTreeMap<String, Category>,
}

impl Index {
    /// Build an index, checking that ids and names are unique, that every
    /// referenced category exists, and that includes are acyclic.
    pub fn new(lessons: Vec<Lesson>, categories: Vec<Category>) -> Fallible<Self> {
        let mut lesson_map = BTreeMap::new();
        for lesson in lessons {
            let id = lesson.id;
            if lesson_map.insert(id, lesson).is_some() {
                return fail(format!("lesson {id} is defined twice"));
            }
        }
        let mut category_map = BTreeMap::new();
        for category in categories {
            let name = category.name.clone();
            if category_map.insert(name.clone(), category).is_some() {
                return fail(format!("category '{name}' is defined twice"));
            }
        }
        let index = Index {
            lessons: lesson_map,
            categories: category_map,
        };
        index.validate()?;
        log::debug!(
            "Index built with {} lessons and {} categories",
            index.lessons.len(),
            index.categories.len()
        );
        Ok(index)
    }

    /// Parse an `index.toml` manifest.
    pub fn from_toml(text: &str) -> Fallible<Self> {
        let manifest: Manifest = toml::from_str(text)?;
        Self::new(manifest.lesson, manifest.category)
    }

    fn validate(&self) -> Fallible<()> {
        for category in self.categories.values() {
            if let Some(group) = &category.group {
                if !self.categories.contains_key(group) {
                    return fail(format!(
                        "category '{}' is listed under unknown group '{group}'",
                        category.name
                    ));
                }
            }
            for include in &category.includes {
                if !self.categories.contains_key(include) {
                    return fail(format!(
                        "category '{}' includes unknown category '{include}'",
                        category.name
                    ));
                }
            }
        }
        for name in self.categories.keys() {
            let mut path = Vec::new();
            self.check_cycle(name, &mut path)?;
        }
        Ok(())
    }

    fn check_cycle<'a>(&'a self, name: &'a str, path: &mut Vec<&'a str>) -> Fallible<()> {
        if path.contains(&name) {
            return fail(format!("category '{name}' includes itself"));
        }
        path.push(name);
        if let Some(category) = self.categories.get(name) {
            for include in &category.includes {
                self.check_cycle(include, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    /// The lesson ids, ascending.
    pub fn lesson_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.lessons.keys().copied()
    }

    pub fn max_lesson_id(&self) -> Option<u32> {
        self.lessons.keys().next_back().copied()
    }

    pub fn lesson(&self, id: u32) -> Option<&Lesson> {
        self.lessons.get(&id)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// All categories, sorted by name.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Categories that are not listed under another one.
    pub fn themes(&self) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.group.is_none())
            .collect()
    }

    /// Categories listed under the given theme.
    pub fn children(&self, name: &str) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.group.as_deref() == Some(name))
            .collect()
    }

    /// Every file some lesson or category reads.
    pub fn files(&self) -> BTreeSet<&str> {
        let lessons = self.lessons.values().filter_map(|l| l.file.as_deref());
        let categories = self
            .categories
            .values()
            .flat_map(|c| c.sources.iter().map(Source::file));
        lessons.chain(categories).collect()
    }

    /// The index matching the layout of the bundled vocabulary directory.
    pub fn standard() -> Self {
        let lessons = (0..=12)
            .map(|id| Lesson {
                id,
                file: (id >= 6).then(|| format!("lessons/l{id}.csv")),
            })
            .collect();

        let mut categories = Vec::new();
        let counters = [
            "book",
            "floors_of_buildings",
            "frequency",
            "general",
            "glasses_cups",
            "long_slender",
            "machines_vehicles",
            "order",
            "people",
            "small",
            "thin_flat",
        ];
        categories.push(parent("counter", true, &counters));
        for name in counters {
            categories.push(leaf(
                name,
                Some("counter"),
                Source::Counter {
                    file: format!("themes/counter/{name}.csv"),
                    count: 11,
                    question: true,
                    suffix: name.replace('_', " "),
                },
            ));
        }

        categories.push(parent("days", false, &["month", "weekdays"]));
        categories.push(leaf(
            "month",
            Some("days"),
            Source::Counter {
                file: "themes/days/month.csv".to_string(),
                count: 32,
                question: true,
                suffix: String::new(),
            },
        ));
        categories.push(leaf(
            "weekdays",
            Some("days"),
            standard_file("themes/days/week.csv"),
        ));

        categories.push(leaf(
            "positions",
            None,
            standard_file("themes/positions/positions.csv"),
        ));
        categories.push(leaf(
            "directions",
            None,
            standard_file("themes/positions/directions.csv"),
        ));

        categories.push(parent("families", true, &["own_family", "other_family"]));
        categories.push(leaf(
            "own_family",
            Some("families"),
            standard_file("themes/social_relations/ownFamily.csv"),
        ));
        categories.push(leaf(
            "other_family",
            Some("families"),
            standard_file("themes/social_relations/otherFamily.csv"),
        ));

        Index {
            lessons: lessons_by_id(lessons),
            categories: categories
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }
}

fn lessons_by_id(lessons: Vec<Lesson>) -> BTreeMap<u32, Lesson> {
    lessons.into_iter().map(|l| (l.id, l)).collect()
}

fn standard_file(file: &str) -> Source {
    Source::Standard {
        file: file.to_string(),
    }
}

fn parent(name: &str, merge: bool, includes: &[&str]) -> Category {
    Category {
        name: name.to_string(),
        group: None,
        merge,
        includes: includes.iter().map(|s| s.to_string()).collect(),
        sources: Vec::new(),
    }
}

fn leaf(name: &str, group: Option<&str>, source: Source) -> Category {
    Category {
        name: name.to_string(),
        group: group.map(str::to_string),
        merge: false,
        includes: Vec::new(),
        sources: vec![source],
    }
}
