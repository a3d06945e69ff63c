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

use std::io::BufRead;
use std::io::Write;

use vocab_core::Category;
use vocab_core::Console;
use vocab_core::Fallible;
use vocab_core::RandomSource;
use vocab_core::Selection;
use vocab_core::merge_same_japanese;
use vocab_core::quiz::EXIT_COMMAND;
use vocab_core::quiz::HELP_COMMAND;

use crate::cmd::train::Trainer;
use crate::cmd::train::bare;

const SELECT_THEME: &str = "\
Select the theme, e.g. '$counter'.
Type '$ls' to list the themes and '$help' for more information.
";

const SELECT_PARTS_HELP: &str = "\
Type the names of the parts separated by spaces, e.g. '$book $frequency'.
Type '$all' (or nothing) for every part, '$ls' to list the parts and '$exit' to go back.
";

const SELECT_THEME_HELP: &str = "\
A theme is selected by its name, with or without a leading '$'.
Some themes are made of smaller ones. For those you are asked which parts to practice.
Type '$exit' to go back.
";

impl<G: RandomSource> Trainer<'_, G> {
    pub(super) fn themes<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Fallible<()> {
        loop {
            console.prompt(SELECT_THEME)?;
            let Some(line) = console.read_line()? else {
                return Ok(());
            };
            match line.as_str() {
                EXIT_COMMAND => return Ok(()),
                HELP_COMMAND => console.write(SELECT_THEME_HELP)?,
                "$ls" => {
                    let names = names(&self.index.themes());
                    console.write(&format!("Known themes: {}\n", names.join(", ")))?;
                }
                _ => {
                    let index = self.index;
                    let theme = index
                        .category(bare(&line))
                        .filter(|c| c.group.is_none());
                    match theme {
                        None => console.write(&format!("Unexpected value: {line}\n"))?,
                        Some(theme) if index.children(&theme.name).is_empty() => {
                            self.leaf(console, theme)?
                        }
                        Some(theme) => self.group(console, theme)?,
                    }
                }
            }
        }
    }

    fn leaf<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        theme: &Category,
    ) -> Fallible<()> {
        let mut builder = self.builder();
        builder.load_category(&theme.name);
        let pool = builder.collect();
        let warnings = builder.take_warnings();
        if pool.is_empty() {
            for warning in warnings {
                log::warn!("{warning}");
            }
            console.write(&format!("The theme '{}' has no vocabulary.\n", theme.name))?;
            return Ok(());
        }
        self.quiz(console, pool, warnings, None)?;
        Ok(())
    }

    /// Ask which parts of a composite theme to practice, then quiz on them.
    fn group<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        theme: &Category,
    ) -> Fallible<()> {
        let children = self.index.children(&theme.name);
        let known = names(&children);
        let prompt = format!(
            "Select the parts of '{}' separated by spaces, or type '$all' (or nothing) for everything.\nType '$ls' to list them.\n",
            theme.name
        );
        let (selection, selected) = loop {
            console.prompt(&prompt)?;
            let Some(line) = console.read_line()? else {
                return Ok(());
            };
            match line.as_str() {
                EXIT_COMMAND => return Ok(()),
                HELP_COMMAND => console.write(SELECT_PARTS_HELP)?,
                "" | "$all" => break (Selection::Category(theme.name.clone()), known.clone()),
                "$ls" => console.write(&format!("[{}]\n", known.join(", ")))?,
                _ => {
                    let wanted: Vec<String> =
                        line.split_whitespace().map(|t| bare(t).to_string()).collect();
                    match wanted.iter().find(|w| !known.contains(w)) {
                        Some(unknown) => {
                            console.write(&format!("Unexpected value: {unknown}\n"))?
                        }
                        None => break (Selection::Categories(wanted.clone()), wanted),
                    }
                }
            }
        };

        let mut builder = self.builder();
        builder.load(&selection);
        let mut pool = builder.collect();
        if theme.merge && matches!(selection, Selection::Categories(_)) {
            pool = merge_same_japanese(&pool);
        }
        let warnings = builder.take_warnings();
        if pool.is_empty() {
            for warning in warnings {
                log::warn!("{warning}");
            }
            console.write("No vocabulary was selected.\n")?;
            return Ok(());
        }
        let help = format!("The categories are [{}]\n", selected.join(", "));
        self.quiz(console, pool, warnings, Some(help))?;
        Ok(())
    }
}

fn names(categories: &[&Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}
