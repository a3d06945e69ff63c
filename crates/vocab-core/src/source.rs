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

use std::collections::HashMap;

use crate::error::Fallible;
use crate::error::fail;

/// Where vocabulary text comes from. Names are relative, `/`-separated paths
/// such as `lessons/l6.csv`.
pub trait LineSource {
    fn read_lines(&self, name: &str) -> Fallible<Vec<String>>;
}

/// An in-memory [`LineSource`].
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.files.insert(name.to_string(), text.to_string());
    }
}

impl LineSource for MemorySource {
    fn read_lines(&self, name: &str) -> Fallible<Vec<String>> {
        match self.files.get(name) {
            Some(text) => Ok(text.lines().map(str::to_string).collect()),
            None => fail(format!("no such source: {name}")),
        }
    }
}
