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

//! The interactive trainer: mode, lesson and theme menus on top of the quiz
//! engine.

mod lessons;
mod themes;

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use vocab_core::Console;
use vocab_core::DefaultRounds;
use vocab_core::Fallible;
use vocab_core::Index;
use vocab_core::LineSource;
use vocab_core::LoadWarning;
use vocab_core::Outcome;
use vocab_core::QuizConfig;
use vocab_core::RandomSource;
use vocab_core::SetBuilder;
use vocab_core::TinyRng;
use vocab_core::Vocabulary;
use vocab_core::quiz::EXIT_COMMAND;
use vocab_core::run_quiz;

use crate::collection::Collection;

const INTRO: &str = "Welcome to the VocabTrainer!\n";

const SELECT_MODE: &str =
    "Select the mode. You can choose between lessons (type '$lessons') or themes (type '$theme').\n";

pub struct TrainConfig {
    pub directory: Option<String>,
    pub seed: Option<u64>,
    pub default_rounds: DefaultRounds,
}

pub fn train(config: TrainConfig) -> Fallible<()> {
    let collection = Collection::new(config.directory)?;
    let rng = match config.seed {
        Some(seed) => TinyRng::from_seed(seed),
        None => TinyRng::from_clock(),
    };
    let mut trainer = Trainer::new(
        &collection.index,
        &collection.source,
        config.default_rounds,
        rng,
    );
    let mut console = Console::new(stdin().lock(), stdout().lock());
    trainer.run(&mut console)
}

/// Menu state shared by the lesson and theme selectors.
pub struct Trainer<'a, G: RandomSource> {
    index: &'a Index,
    source: &'a dyn LineSource,
    default_rounds: DefaultRounds,
    rng: G,
}

impl<'a, G: RandomSource> Trainer<'a, G> {
    pub fn new(
        index: &'a Index,
        source: &'a dyn LineSource,
        default_rounds: DefaultRounds,
        rng: G,
    ) -> Self {
        Self {
            index,
            source,
            default_rounds,
            rng,
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Fallible<()> {
        console.write(INTRO)?;
        loop {
            console.prompt(SELECT_MODE)?;
            let Some(mode) = console.read_line()? else {
                return Ok(());
            };
            match mode.as_str() {
                EXIT_COMMAND => return Ok(()),
                "$lessons" => self.lessons(console)?,
                "$theme" => self.themes(console)?,
                _ => console.write(&format!("Unexpected value: {mode}\n\n"))?,
            }
        }
    }

    /// A fresh builder for one selection.
    fn builder(&self) -> SetBuilder<'a> {
        SetBuilder::new(self.index, self.source)
    }

    /// Quiz the user on `pool`. Source problems collected while building it
    /// are logged first.
    fn quiz<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        pool: Vec<Vocabulary>,
        warnings: Vec<LoadWarning>,
        help_text: Option<String>,
    ) -> Fallible<Outcome> {
        for warning in warnings {
            log::warn!("{warning}");
        }
        let mut config = QuizConfig {
            default_rounds: self.default_rounds,
            ..QuizConfig::default()
        };
        if help_text.is_some() {
            config.help_text = help_text;
        }
        run_quiz(console, &pool, &config, &mut self.rng)
    }
}

/// Strip the command marker from a name, so `$month` and `month` are the
/// same.
fn bare(token: &str) -> &str {
    token.strip_prefix('$').unwrap_or(token)
}
