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

use std::fs::read_to_string;
use std::path::Component;
use std::path::PathBuf;

use vocab_core::Fallible;
use vocab_core::LineSource;
use vocab_core::fail;

/// Reads vocabulary files relative to the data root.
///
/// Names come from the index manifest, so they are checked to stay inside
/// the root: absolute paths, `..` components and symbolic links are
/// rejected.
pub struct DirectorySource {
    /// Absolute path to the data root.
    root: PathBuf,
}

/// Reasons a name does not resolve to a readable file.
#[derive(Debug, PartialEq)]
pub enum SourcePathError {
    Absolute,
    NotFound,
    NotFile,
    SymbolicLink,
    ParentComponent,
}

impl DirectorySource {
    pub fn new(root: PathBuf) -> Self {
        assert!(root.is_absolute());
        Self { root }
    }

    /// Check that `name` is a file inside the data root.
    pub fn validate(&self, name: &str) -> Result<PathBuf, SourcePathError> {
        let path: PathBuf = PathBuf::from(name);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(SourcePathError::ParentComponent);
        }
        if path.is_absolute() {
            return Err(SourcePathError::Absolute);
        }
        let path: PathBuf = self.root.join(path);
        if !path.exists() {
            return Err(SourcePathError::NotFound);
        }
        if path.is_symlink() {
            return Err(SourcePathError::SymbolicLink);
        }
        if !path.is_file() {
            return Err(SourcePathError::NotFile);
        }
        Ok(path)
    }
}

impl LineSource for DirectorySource {
    fn read_lines(&self, name: &str) -> Fallible<Vec<String>> {
        let path = match self.validate(name) {
            Ok(path) => path,
            Err(e) => return fail(format!("cannot open '{name}': {e:?}")),
        };
        let text = read_to_string(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
