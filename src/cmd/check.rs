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

use std::path::Path;

use vocab_core::Fallible;
use vocab_core::Index;
use vocab_core::LineSource;
use vocab_core::LoadWarning;
use vocab_core::Selection;
use vocab_core::SetBuilder;
use vocab_core::fail;
use walkdir::WalkDir;

use crate::collection::Collection;

/// Problems found in a data root.
#[derive(Debug, Default)]
struct Report {
    warnings: Vec<LoadWarning>,
    /// Vocabulary files no lesson or category reads, relative to the root.
    orphans: Vec<String>,
}

impl Report {
    fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.orphans.is_empty()
    }
}

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let report = make_report(&collection.root, &collection.index, &collection.source)?;
    for warning in &report.warnings {
        println!("{warning}");
    }
    for orphan in &report.orphans {
        println!("{orphan}: not referenced by the index");
    }
    if !report.is_clean() {
        return fail(format!(
            "found {} warnings and {} unreferenced files.",
            report.warnings.len(),
            report.orphans.len()
        ));
    }
    println!("No problems found.");
    Ok(())
}

fn make_report(root: &Path, index: &Index, source: &dyn LineSource) -> Fallible<Report> {
    let mut builder = SetBuilder::new(index, source);
    builder.load(&Selection::AllLessons);
    let names: Vec<String> = index.categories().map(|c| c.name.clone()).collect();
    for name in names {
        builder.clear().load_category(&name);
    }
    // A file shared by several categories is read once per category.
    let mut warnings: Vec<LoadWarning> = Vec::new();
    for warning in builder.take_warnings() {
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }

    let referenced = index.files();
    let mut orphans = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !referenced.contains(relative.as_str()) {
                orphans.push(relative);
            }
        }
    }
    Ok(Report { warnings, orphans })
}
