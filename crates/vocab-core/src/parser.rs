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

//! Parsers for the three vocabulary source formats.
//!
//! - Standard: `jp[,jp...]:translation[,translation...]`, one record per line.
//! - Lesson CSV: `id,jp,translation[,translation...]`; lines sharing an id
//!   are folded into one record.
//! - Counter: a fixed number of bare Japanese groups paired with the numbers
//!   `1..count`, optionally followed by one standard-format question line.
//!
//! Parsing never fails as a whole. Lines that do not fit the format are
//! reported as [`ParseWarning`]s next to the records that did parse.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::vocabulary::Vocabulary;

const LANGUAGE_SPLIT: char = ':';
const MEANINGS_SPLIT: char = ',';

static JAPANESE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?:[-' ][A-Za-z]+)*$").unwrap());

static TRANSLATION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-zäöüÄÖÜß]+(?:[-' ][0-9A-Za-zäöüÄÖÜß]+)*[?!.]?$").unwrap()
});

/// A line that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    pub message: String,
    pub line: String,
    /// Zero-based.
    pub line_num: usize,
}

impl ParseWarning {
    fn new(message: impl Into<String>, line: &str, line_num: usize) -> Self {
        ParseWarning {
            message: message.into(),
            line: line.to_string(),
            line_num,
        }
    }
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Line {}: '{}'",
            self.message,
            self.line_num + 1,
            self.line
        )
    }
}

impl Error for ParseWarning {}

/// The outcome of parsing a whole source.
#[derive(Debug, Default)]
pub struct Parsed {
    pub records: Vec<Vocabulary>,
    pub warnings: Vec<ParseWarning>,
}

impl Parsed {
    fn push(&mut self, result: Result<Vocabulary, ParseWarning>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(warning) => self.warnings.push(warning),
        }
    }
}

/// Parameters of the counter format.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFormat {
    /// Numbered lines cover `1..count`.
    pub count: u32,
    /// Whether to read the trailing question line.
    pub question: bool,
    /// Text appended to each number, e.g. `book` for `3 book`.
    pub suffix: String,
}

enum Token {
    Japanese,
    Translation,
}

impl Token {
    fn is_valid(&self, token: &str) -> bool {
        match self {
            Token::Japanese => JAPANESE_TOKEN.is_match(token),
            Token::Translation => TRANSLATION_TOKEN.is_match(token),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Token::Japanese => "Japanese",
            Token::Translation => "translation",
        }
    }
}

/// Split a comma-separated group and check every member.
fn meanings(group: &str, kind: Token) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    for token in group.split(MEANINGS_SPLIT) {
        let token = token.trim();
        if !kind.is_valid(token) {
            return Err(format!("Invalid {} meaning '{token}'.", kind.describe()));
        }
        out.push(token.to_string());
    }
    Ok(out)
}

/// Parse one line of the standard format.
pub fn parse_standard_line(line: &str, line_num: usize) -> Result<Vocabulary, ParseWarning> {
    let (japanese, translations) = line
        .split_once(LANGUAGE_SPLIT)
        .ok_or_else(|| ParseWarning::new("Missing ':' separator.", line, line_num))?;
    if translations.contains(LANGUAGE_SPLIT) {
        return Err(ParseWarning::new("More than one ':' separator.", line, line_num));
    }
    let japanese =
        meanings(japanese, Token::Japanese).map_err(|m| ParseWarning::new(m, line, line_num))?;
    let translations = meanings(translations, Token::Translation)
        .map_err(|m| ParseWarning::new(m, line, line_num))?;
    Vocabulary::new(japanese, translations)
        .map_err(|e| ParseWarning::new(e.to_string(), line, line_num))
}

/// Parse a source in the standard format. Blank lines are ignored.
pub fn parse_standard<I, S>(lines: I) -> Parsed
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Parsed::default();
    for (line_num, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        parsed.push(parse_standard_line(line, line_num));
    }
    parsed
}

/// Parse a lesson CSV source. Records come out in the order their id was
/// first seen.
pub fn parse_lesson_csv<I, S>(lines: I) -> Parsed
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Parsed::default();
    let mut by_id: HashMap<u32, usize> = HashMap::new();
    for (line_num, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(MEANINGS_SPLIT).map(str::trim).collect();
        let id: u32 = match fields[0].parse() {
            Ok(id) => id,
            Err(_) => {
                parsed
                    .warnings
                    .push(ParseWarning::new("Malformed id.", line, line_num));
                continue;
            }
        };
        let japanese = fields.get(1).copied().unwrap_or_default();
        let translations: Vec<&str> = fields
            .iter()
            .skip(2)
            .copied()
            .filter(|t| !t.is_empty())
            .collect();
        if japanese.is_empty() || translations.is_empty() {
            parsed.warnings.push(ParseWarning::new(
                "Expected 'id,japanese,translation,...'.",
                line,
                line_num,
            ));
            continue;
        }
        match by_id.get(&id) {
            Some(&index) => {
                let record = &mut parsed.records[index];
                record.add_japanese(japanese);
                for translation in translations {
                    record.add_translation(translation);
                }
            }
            None => {
                let record = Vocabulary::new(
                    vec![japanese.to_string()],
                    translations.iter().map(|t| t.to_string()).collect(),
                );
                match record {
                    Ok(record) => {
                        by_id.insert(id, parsed.records.len());
                        parsed.records.push(record);
                    }
                    Err(e) => parsed
                        .warnings
                        .push(ParseWarning::new(e.to_string(), line, line_num)),
                }
            }
        }
    }
    parsed
}

/// Parse a counter source: `count - 1` numbered lines, then optionally a
/// standard-format question line.
pub fn parse_counter<I, S>(lines: I, format: &CounterFormat) -> Parsed
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Parsed::default();
    let mut lines = lines.into_iter();
    for n in 1..format.count {
        let line_num = (n - 1) as usize;
        let Some(line) = lines.next() else {
            parsed.warnings.push(ParseWarning::new(
                format!("Source ended before number {n}."),
                "",
                line_num,
            ));
            return parsed;
        };
        let line = line.as_ref().trim();
        let translation = number_translation(n, &format.suffix);
        let result = meanings(line, Token::Japanese)
            .map_err(|m| ParseWarning::new(m, line, line_num))
            .and_then(|japanese| {
                Vocabulary::new(japanese, vec![translation])
                    .map_err(|e| ParseWarning::new(e.to_string(), line, line_num))
            });
        parsed.push(result);
    }
    if format.question {
        if let Some(line) = lines.next() {
            let line = line.as_ref().trim();
            if !line.is_empty() {
                let line_num = format.count.saturating_sub(1) as usize;
                parsed.push(parse_standard_line(line, line_num));
            }
        }
    }
    parsed
}

fn number_translation(n: u32, suffix: &str) -> String {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        n.to_string()
    } else {
        format!("{n} {suffix}")
    }
}
