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

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use vocab_core::DefaultRounds;
use vocab_core::Fallible;

use crate::cmd::check::check_collection;
use crate::cmd::list::ListFormat;
use crate::cmd::list::list_collection;
use crate::cmd::train::TrainConfig;
use crate::cmd::train::train;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Practice vocabulary interactively. This is the default command.
    Train {
        /// Path to the vocabulary directory. Default is `vocabularies` in the current working directory.
        #[arg(long)]
        data: Option<String>,
        /// Seed for the random number generator. By default, the clock is used.
        #[arg(long)]
        seed: Option<u64>,
        /// How many rounds to play when the round prompt is left empty.
        #[arg(long, default_value_t = RoundsDefault::Pool)]
        default_rounds: RoundsDefault,
    },
    /// List the lessons and categories with their number of vocabularies.
    List {
        /// Path to the vocabulary directory. Default is `vocabularies` in the current working directory.
        #[arg(long)]
        data: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Check the vocabulary files for lines that cannot be read.
    Check {
        /// Path to the vocabulary directory. Default is `vocabularies` in the current working directory.
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum RoundsDefault {
    /// One round per vocabulary in the selection.
    Pool,
    /// Half as many rounds as vocabularies in the selection.
    Half,
}

impl Display for RoundsDefault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundsDefault::Pool => write!(f, "pool"),
            RoundsDefault::Half => write!(f, "half"),
        }
    }
}

impl From<RoundsDefault> for DefaultRounds {
    fn from(value: RoundsDefault) -> Self {
        match value {
            RoundsDefault::Pool => DefaultRounds::PoolSize,
            RoundsDefault::Half => DefaultRounds::HalfPool,
        }
    }
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Train {
        data: None,
        seed: None,
        default_rounds: RoundsDefault::Pool,
    });
    match command {
        Command::Train {
            data,
            seed,
            default_rounds,
        } => train(TrainConfig {
            directory: data,
            seed,
            default_rounds: default_rounds.into(),
        }),
        Command::List { data, format } => list_collection(data, format),
        Command::Check { data } => check_collection(data),
    }
}
