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

use vocab_core::Console;
use vocab_core::Fallible;
use vocab_core::RandomSource;
use vocab_core::Selection;
use vocab_core::quiz::EXIT_COMMAND;
use vocab_core::quiz::HELP_COMMAND;

use crate::cmd::train::Trainer;

const SELECT_LESSON: &str = "\
Select the number of the lesson.
Type '$help' to display information about possible commands and inputs.
";

const SELECT_LESSON_HELP: &str = "\
Type '$all' (or nothing) for all lessons.
Type '$range' for a range of lessons. '$range 1 7' will yield all vocabularies from lesson 1 to 7.
'$range 8' will yield all vocabularies from lesson 8 to the latest lesson.
Typing '1 2 3 8' will yield the vocabularies of the lessons 1, 2, 3, and 8.
Append '$cut' and lesson numbers to leave those lessons out, e.g. '$range 1 7 $cut 3'.
Type '$ls' to list the known lessons and '$exit' to go back.
";

const CUT_COMMAND: &str = "$cut";

/// What the user typed at the lesson prompt.
#[derive(Debug, PartialEq)]
enum LessonCommand {
    Exit,
    Help,
    List,
    Select {
        selection: Selection,
        cut: Vec<i64>,
    },
    Invalid(&'static str),
}

impl LessonCommand {
    fn read(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (head, cut) = match tokens.iter().position(|t| *t == CUT_COMMAND) {
            Some(at) => (&tokens[..at], lesson_ids(&tokens[at + 1..])),
            None => (&tokens[..], Vec::new()),
        };
        let selection = match head.first().copied() {
            None | Some("$all") => Selection::AllLessons,
            Some(EXIT_COMMAND) => return LessonCommand::Exit,
            Some(HELP_COMMAND) => return LessonCommand::Help,
            Some("$ls") => return LessonCommand::List,
            Some("$range") => match lesson_ids(&head[1..])[..] {
                [] => return LessonCommand::Invalid("The range was not specified.\n"),
                [lower] => Selection::Range { lower, upper: None },
                [lower, upper, ..] => Selection::Range {
                    lower,
                    upper: Some(upper),
                },
            },
            Some(_) => {
                let ids = lesson_ids(head);
                if ids.is_empty() {
                    return LessonCommand::Invalid("There weren't any valid numbers.\n");
                }
                Selection::Lessons(ids)
            }
        };
        LessonCommand::Select { selection, cut }
    }
}

/// The tokens that are integers. The rest are skipped.
fn lesson_ids(tokens: &[&str]) -> Vec<i64> {
    tokens
        .iter()
        .filter_map(|t| match t.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                log::info!("Couldn't parse {t}");
                None
            }
        })
        .collect()
}

impl<G: RandomSource> Trainer<'_, G> {
    pub(super) fn lessons<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Fallible<()> {
        loop {
            console.prompt(SELECT_LESSON)?;
            let Some(line) = console.read_line()? else {
                return Ok(());
            };
            match LessonCommand::read(&line) {
                LessonCommand::Exit => return Ok(()),
                LessonCommand::Help => console.write(SELECT_LESSON_HELP)?,
                LessonCommand::List => {
                    let ids: Vec<String> =
                        self.index.lesson_ids().map(|id| id.to_string()).collect();
                    console.write(&format!("Known lessons: {}\n", ids.join(" ")))?;
                }
                LessonCommand::Invalid(message) => console.write(message)?,
                LessonCommand::Select { selection, cut } => {
                    let mut builder = self.builder();
                    builder.load(&selection);
                    if !cut.is_empty() {
                        let removed = self.builder().load(&Selection::Lessons(cut)).collect();
                        builder.cut(&removed);
                    }
                    let pool = builder.collect();
                    let warnings = builder.take_warnings();
                    if pool.is_empty() {
                        for warning in warnings {
                            log::warn!("{warning}");
                        }
                        console.write("No vocabulary was selected.\n")?;
                        continue;
                    }
                    console.write("Successfully selected lessons!\n")?;
                    self.quiz(console, pool, warnings, None)?;
                }
            }
        }
    }
}
