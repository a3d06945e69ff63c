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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;
use vocab_core::Fallible;
use vocab_core::Index;
use vocab_core::LineSource;
use vocab_core::Selection;
use vocab_core::SetBuilder;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum ListFormat {
    /// One line per lesson and category.
    Text,
    /// A JSON document.
    Json,
}

impl Display for ListFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Text => write!(f, "text"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct Listing {
    lessons: Vec<LessonEntry>,
    categories: Vec<CategoryEntry>,
}

#[derive(Serialize)]
struct LessonEntry {
    id: u32,
    file: Option<String>,
    records: usize,
}

#[derive(Serialize)]
struct CategoryEntry {
    name: String,
    group: Option<String>,
    records: usize,
}

pub fn list_collection(directory: Option<String>, format: ListFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let listing = make_listing(&collection.index, &collection.source);
    let text = match format {
        ListFormat::Text => render_text(&listing),
        ListFormat::Json => serde_json::to_string_pretty(&listing)?,
    };
    println!("{text}");
    Ok(())
}

fn make_listing(index: &Index, source: &dyn LineSource) -> Listing {
    let count = |selection: Selection| {
        let mut builder = SetBuilder::new(index, source);
        builder.load(&selection).len()
    };
    let lessons = index
        .lesson_ids()
        .filter_map(|id| index.lesson(id))
        .map(|lesson| LessonEntry {
            id: lesson.id,
            file: lesson.file.clone(),
            records: count(Selection::Lesson(i64::from(lesson.id))),
        })
        .collect();
    let categories = index
        .categories()
        .map(|category| CategoryEntry {
            name: category.name.clone(),
            group: category.group.clone(),
            records: count(Selection::Category(category.name.clone())),
        })
        .collect();
    Listing {
        lessons,
        categories,
    }
}

fn render_text(listing: &Listing) -> String {
    let mut lines = vec!["Lessons:".to_string()];
    for lesson in &listing.lessons {
        lines.push(format!("  {:>3}  {} records", lesson.id, lesson.records));
    }
    lines.push("Categories:".to_string());
    for category in &listing.categories {
        let name = match &category.group {
            Some(group) => format!("{group}/{}", category.name),
            None => category.name.clone(),
        };
        lines.push(format!("  {name}  {} records", category.records));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection_directory;

    #[test]
    fn test_listing() -> Fallible<()> {
        let dir = create_tmp_collection_directory()?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let listing = make_listing(&collection.index, &collection.source);
        let lessons: Vec<(u32, usize)> =
            listing.lessons.iter().map(|l| (l.id, l.records)).collect();
        assert_eq!(lessons, vec![(6, 2), (7, 2), (8, 0)]);
        let counter = listing
            .categories
            .iter()
            .find(|c| c.name == "counter")
            .map(|c| c.records);
        assert_eq!(counter, Some(24));
        let text = render_text(&listing);
        assert!(text.contains("counter/book  11 records"));
        assert!(text.contains("    6  2 records"));
        Ok(())
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let dir = create_tmp_collection_directory()?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let listing = make_listing(&collection.index, &collection.source);
        let value = serde_json::to_value(&listing)?;
        assert_eq!(value["lessons"][0]["id"], 6);
        assert_eq!(value["lessons"][0]["file"], "lessons/l6.csv");
        assert_eq!(value["lessons"][2]["file"], serde_json::Value::Null);
        Ok(())
    }
}
