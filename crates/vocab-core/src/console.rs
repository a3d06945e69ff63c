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

use crate::error::Fallible;

const WAITING_FOR_INPUT: &str = "\nWaiting for input...\n";

/// The user's side of the conversation: one reader, one writer.
///
/// Every read needs `&mut self`, so reads through one console can never
/// interleave. For the terminal, wrap a locked `stdin`.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one line, lowercased, without its terminator. Bytes that are not
    /// UTF-8 become replacement characters. Returns `None` at the end of the
    /// input.
    fn read_raw(&mut self) -> Fallible<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_lowercase()))
    }

    /// Read one line, trimmed and lowercased. Returns `None` at the end of
    /// the input.
    pub fn read_line(&mut self) -> Fallible<Option<String>> {
        Ok(self.read_raw()?.map(|line| line.trim().to_string()))
    }

    /// Read one line and split it on `delimiter`. Tokens are trimmed and
    /// trailing empty tokens are dropped, so `"eat, "` is just `eat`.
    pub fn read_split(&mut self, delimiter: &str) -> Fallible<Option<Vec<String>>> {
        let Some(line) = self.read_raw()? else {
            return Ok(None);
        };
        let mut tokens: Vec<String> = line
            .split(delimiter)
            .map(|token| token.trim().to_string())
            .collect();
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }
        Ok(Some(tokens))
    }

    pub fn write(&mut self, text: &str) -> Fallible<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write `text` and tell the user that input is expected.
    pub fn prompt(&mut self, text: &str) -> Fallible<()> {
        self.write(text)?;
        self.write(WAITING_FOR_INPUT)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
