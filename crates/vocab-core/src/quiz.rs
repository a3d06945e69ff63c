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

//! The quiz session: pick a random record, show one side, grade the answer
//! against the other side, repeat for the requested number of rounds.

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::BufRead;
use std::io::Write;

use crate::console::Console;
use crate::error::Fallible;
use crate::rng::RandomSource;
use crate::types::vocabulary::Side;
use crate::types::vocabulary::Vocabulary;

pub const EXIT_COMMAND: &str = "$exit";
pub const HELP_COMMAND: &str = "$help";
pub const DEFAULT_HELP: &str = "Only god can help you.\n";

/// Multiple answers are separated by exactly this string.
pub const ANSWER_SPLIT: &str = ", ";

const ROUNDS_PROMPT: &str =
    "Please define how many rounds you want to do. Must be a single number.\n";

const INSTRUCTIONS: &str = "\
In the following random vocabularies that you selected beforehand will be questioned.
If it shows a Japanese word you need to answer with the corresponding English or German word.
Otherwise, answer with the corresponding Japanese word.
Typing one of the possible solutions is sufficient. However, you can type multiple.
They need to be separated by a comma and a space. 'a, b' is valid 'a b' or 'a,b' are not.
You can exit by typing '$exit'.

";

const SEPARATOR: &str = "------------------------------------\n\n";

/// How many rounds an empty answer to the round prompt means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultRounds {
    /// One round per record in the pool.
    #[default]
    PoolSize,
    /// Half the pool, at least one round.
    HalfPool,
}

impl DefaultRounds {
    pub fn rounds(self, pool: usize) -> usize {
        match self {
            DefaultRounds::PoolSize => pool,
            DefaultRounds::HalfPool => (pool / 2).max(1),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizConfig {
    pub default_rounds: DefaultRounds,
    /// Shown when the user types `$help` instead of an answer. Without it,
    /// `$help` is graded like any other answer.
    pub help_text: Option<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            default_rounds: DefaultRounds::default(),
            help_text: Some(DEFAULT_HELP.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub played: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You got {} out of {} right. That's {:.1} percent!",
            self.correct,
            self.total,
            self.percent()
        )
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to ask; the user was never prompted.
    EmptyPool,
    /// The user typed the exit command (or the input ended).
    Exited(Score),
    /// All rounds were played.
    Finished(Score),
}

enum State {
    AwaitingRoundCount,
    Questioning(Score),
    Exit(Score),
    RoundsExhausted(Score),
}

enum Answer {
    Exit,
    Graded(bool),
}

/// An answer is correct iff it is non-empty and every submitted token is an
/// accepted answer. Not every accepted answer has to be given.
pub fn grade(accepted: &[String], submitted: &[String]) -> bool {
    !submitted.is_empty() && submitted.iter().all(|s| accepted.contains(s))
}

/// Run one quiz session over `pool`.
pub fn run_quiz<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &[Vocabulary],
    config: &QuizConfig,
    rng: &mut impl RandomSource,
) -> Fallible<Outcome> {
    if pool.is_empty() {
        return Ok(Outcome::EmptyPool);
    }
    let mut state = State::AwaitingRoundCount;
    loop {
        state = match state {
            State::AwaitingRoundCount => {
                console.prompt(ROUNDS_PROMPT)?;
                let default = config.default_rounds.rounds(pool.len());
                match read_rounds(console, default)? {
                    None => State::Exit(Score {
                        correct: 0,
                        played: 0,
                        total: 0,
                    }),
                    Some(total) => {
                        log::debug!("Quiz over {} records for {total} rounds", pool.len());
                        console.write(&format!(
                            "The list of vocabularies contains {} vocabularies.\nPlaying for {total} rounds!\n\n",
                            pool.len()
                        ))?;
                        console.write(INSTRUCTIONS)?;
                        State::Questioning(Score {
                            correct: 0,
                            played: 0,
                            total,
                        })
                    }
                }
            }
            State::Questioning(score) if score.played == score.total => {
                State::RoundsExhausted(score)
            }
            State::Questioning(mut score) => match ask(console, pool, config, rng)? {
                Answer::Exit => State::Exit(score),
                Answer::Graded(correct) => {
                    if correct {
                        score.correct += 1;
                    }
                    score.played += 1;
                    State::Questioning(score)
                }
            },
            State::Exit(score) => return Ok(Outcome::Exited(score)),
            State::RoundsExhausted(score) => {
                console.write(&format!("{score}\n\n"))?;
                return Ok(Outcome::Finished(score));
            }
        };
    }
}

/// Read the number of rounds. `None` means the user wants to leave.
fn read_rounds<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    default: usize,
) -> Fallible<Option<usize>> {
    loop {
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(default));
        }
        if line == EXIT_COMMAND {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(n) if n > 0 => return Ok(Some(n)),
            _ => console.write(&format!(
                "Invalid value for {line}. Write the number again!\n"
            ))?,
        }
    }
}

/// Play a single round.
fn ask<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &[Vocabulary],
    config: &QuizConfig,
    rng: &mut impl RandomSource,
) -> Fallible<Answer> {
    console.write("Next vocabulary:\n")?;
    let record = &pool[rng.pick(pool.len())];
    let shown = if rng.flip() {
        Side::Japanese
    } else {
        Side::Translation
    };
    let solution: Vec<String> = record
        .side(shown.opposite())
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    console.prompt(&record.side(shown).join(", "))?;

    let correct = loop {
        let Some(tokens) = console.read_split(ANSWER_SPLIT)? else {
            return Ok(Answer::Exit);
        };
        let first = tokens.first().map(String::as_str);
        if first == Some(EXIT_COMMAND) {
            return Ok(Answer::Exit);
        }
        if first == Some(HELP_COMMAND) {
            if let Some(help) = &config.help_text {
                console.write(help)?;
                continue;
            }
        }
        break grade(&solution, &tokens);
    };

    console.write(if correct { "Correct!\n" } else { "Incorrect!\n" })?;
    console.write(&format!("The solution was [{}]\n", solution.join(", ")))?;
    console.write(SEPARATOR)?;
    Ok(Answer::Graded(correct))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;

    use super::*;
    use crate::error::fail;

    /// Replays a fixed sequence of random numbers.
    struct Scripted {
        values: VecDeque<u32>,
    }

    impl Scripted {
        fn new(values: &[u32]) -> Self {
            Scripted {
                values: values.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn below(&mut self, max: u32) -> u32 {
            let value = self.values.pop_front().expect("script ran out");
            assert!(value < max);
            value
        }
    }

    /// Japanese shown for a flip of 1, translation shown for 0.
    const JAPANESE_SHOWN: u32 = 1;
    const TRANSLATION_SHOWN: u32 = 0;

    fn vocab(japanese: &[&str], translations: &[&str]) -> Fallible<Vocabulary> {
        Vocabulary::new(
            japanese.iter().map(|s| s.to_string()).collect(),
            translations.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn make_pool() -> Fallible<Vec<Vocabulary>> {
        Ok(vec![
            vocab(&["taberu"], &["eat", "essen"])?,
            vocab(&["nomu"], &["drink", "trinken"])?,
            vocab(&["sake", "osake"], &["alcohol"])?,
            vocab(&["kirei", "kirei na"], &["beautiful", "schön"])?,
        ])
    }

    fn play(
        input: &str,
        pool: &[Vocabulary],
        config: &QuizConfig,
        rng: &mut Scripted,
    ) -> Fallible<(Outcome, String)> {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let outcome = run_quiz(&mut console, pool, config, rng)?;
        let (_, out) = console.into_inner();
        Ok((outcome, String::from_utf8(out)?))
    }

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grade_multiple_answers() {
        let accepted = tokens(&["eat", "essen"]);
        assert!(grade(&accepted, &tokens(&["eat"])));
        assert!(grade(&accepted, &tokens(&["eat", "essen"])));
        assert!(!grade(&accepted, &tokens(&["eat", "drink"])));
        assert!(!grade(&accepted, &[]));
        assert!(!grade(&accepted, &tokens(&[""])));
    }

    #[test]
    fn test_all_correct() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[
            0,
            JAPANESE_SHOWN,
            1,
            TRANSLATION_SHOWN,
            2,
            TRANSLATION_SHOWN,
            3,
            JAPANESE_SHOWN,
        ]);
        let input = "4\nessen\nnomu\nosake, sake\nSchön, beautiful\n";
        let (outcome, out) = play(input, &pool, &QuizConfig::default(), &mut rng)?;
        let score = Score {
            correct: 4,
            played: 4,
            total: 4,
        };
        assert_eq!(outcome, Outcome::Finished(score));
        assert!(out.contains("Playing for 4 rounds!"));
        assert!(out.contains("You got 4 out of 4 right. That's 100.0 percent!"));
        assert!(!out.contains("Incorrect!"));
        Ok(())
    }

    #[test]
    fn test_mixed_results_and_solution_report() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[0, JAPANESE_SHOWN, 0, JAPANESE_SHOWN]);
        let input = "2\neat, drink\neat,essen\n";
        let (outcome, out) = play(input, &pool, &QuizConfig::default(), &mut rng)?;
        let Outcome::Finished(score) = outcome else {
            return fail("session did not finish");
        };
        assert_eq!(score.correct, 0);
        assert_eq!(score.played, 2);
        assert!(out.contains("The solution was [eat, essen]"));
        assert!(out.contains("You got 0 out of 2 right. That's 0.0 percent!"));
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_answer_is_graded() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[0, TRANSLATION_SHOWN, 0, TRANSLATION_SHOWN]);
        let mut input: Vec<u8> = b"2\n".to_vec();
        input.extend([0xff, 0xfe, b'\n']);
        input.extend(b"taberu\n");
        let mut console = Console::new(Cursor::new(input), Vec::new());
        let outcome = run_quiz(&mut console, &pool, &QuizConfig::default(), &mut rng)?;
        let score = Score {
            correct: 1,
            played: 2,
            total: 2,
        };
        assert_eq!(outcome, Outcome::Finished(score));
        Ok(())
    }

    #[test]
    fn test_trailing_separator_is_accepted() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[0, JAPANESE_SHOWN]);
        let (outcome, _) = play("1\neat, \n", &pool, &QuizConfig::default(), &mut rng)?;
        let score = Score {
            correct: 1,
            played: 1,
            total: 1,
        };
        assert_eq!(outcome, Outcome::Finished(score));
        Ok(())
    }

    #[test]
    fn test_exit_at_round_prompt() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[]);
        let (outcome, out) = play("$EXIT\n", &pool, &QuizConfig::default(), &mut rng)?;
        assert!(matches!(outcome, Outcome::Exited(score) if score.played == 0));
        assert!(!out.contains("You got"));
        assert!(!out.contains("Next vocabulary"));
        Ok(())
    }

    #[test]
    fn test_empty_pool_asks_nothing() -> Fallible<()> {
        let mut rng = Scripted::new(&[]);
        let (outcome, out) = play("3\n", &[], &QuizConfig::default(), &mut rng)?;
        assert_eq!(outcome, Outcome::EmptyPool);
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_round_count_reprompts() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[1, TRANSLATION_SHOWN]);
        let input = "abc\n0\n-2\n1\nnomu\n";
        let (outcome, out) = play(input, &pool, &QuizConfig::default(), &mut rng)?;
        assert!(matches!(outcome, Outcome::Finished(score) if score.correct == 1));
        assert_eq!(out.matches("Write the number again!").count(), 3);
        Ok(())
    }

    #[test]
    fn test_empty_round_count_uses_default() -> Fallible<()> {
        let pool = make_pool()?;
        let script = [0, 0, 1, 0, 2, 0, 3, 0];

        let mut rng = Scripted::new(&script);
        // The input ends during the first round, so only the total is known.
        let (outcome, _) = play("\n", &pool, &QuizConfig::default(), &mut rng)?;
        assert!(matches!(outcome, Outcome::Exited(score) if score.total == 4));

        let config = QuizConfig {
            default_rounds: DefaultRounds::HalfPool,
            help_text: None,
        };
        let mut rng = Scripted::new(&script);
        let (outcome, _) = play("\n", &pool, &config, &mut rng)?;
        assert!(matches!(outcome, Outcome::Exited(score) if score.total == 2));
        Ok(())
    }

    #[test]
    fn test_help_does_not_consume_a_round() -> Fallible<()> {
        let pool = make_pool()?;
        let config = QuizConfig {
            default_rounds: DefaultRounds::PoolSize,
            help_text: Some("Try harder.\n".to_string()),
        };
        let mut rng = Scripted::new(&[2, JAPANESE_SHOWN]);
        let input = "1\n$help\n$HELP\nalcohol\n";
        let (outcome, out) = play(input, &pool, &config, &mut rng)?;
        let score = Score {
            correct: 1,
            played: 1,
            total: 1,
        };
        assert_eq!(outcome, Outcome::Finished(score));
        assert_eq!(out.matches("Try harder.").count(), 2);
        assert_eq!(out.matches("Next vocabulary:").count(), 1);
        Ok(())
    }

    #[test]
    fn test_help_without_text_is_graded() -> Fallible<()> {
        let pool = make_pool()?;
        let config = QuizConfig {
            default_rounds: DefaultRounds::PoolSize,
            help_text: None,
        };
        let mut rng = Scripted::new(&[2, JAPANESE_SHOWN]);
        let (outcome, out) = play("1\n$help\n", &pool, &config, &mut rng)?;
        assert!(matches!(outcome, Outcome::Finished(score) if score.correct == 0));
        assert!(out.contains("Incorrect!"));
        Ok(())
    }

    #[test]
    fn test_exit_mid_session_keeps_partial_score() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[0, TRANSLATION_SHOWN, 1, TRANSLATION_SHOWN]);
        let input = "3\ntaberu\n$exit\n";
        let (outcome, out) = play(input, &pool, &QuizConfig::default(), &mut rng)?;
        let score = Score {
            correct: 1,
            played: 1,
            total: 3,
        };
        assert_eq!(outcome, Outcome::Exited(score));
        assert!(!out.contains("You got"));
        Ok(())
    }

    #[test]
    fn test_end_of_input_exits() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[0, TRANSLATION_SHOWN]);
        let (outcome, _) = play("2\n", &pool, &QuizConfig::default(), &mut rng)?;
        assert!(matches!(outcome, Outcome::Exited(score) if score.played == 0));
        Ok(())
    }

    #[test]
    fn test_same_record_may_repeat() -> Fallible<()> {
        let pool = make_pool()?;
        let mut rng = Scripted::new(&[3, TRANSLATION_SHOWN, 3, TRANSLATION_SHOWN]);
        let input = "2\nkirei na\nkirei, kirei na\n";
        let (outcome, _) = play(input, &pool, &QuizConfig::default(), &mut rng)?;
        assert!(matches!(outcome, Outcome::Finished(score) if score.correct == 2));
        Ok(())
    }
}
