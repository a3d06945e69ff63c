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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::PathBuf;

use vocab_core::Fallible;
use vocab_core::Index;
use vocab_core::fail;

use crate::source::DirectorySource;

/// Name of the optional index manifest in the data root.
pub const MANIFEST: &str = "index.toml";

/// Default data root, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "vocabularies";

/// A data root together with the index describing it.
pub struct Collection {
    pub root: PathBuf,
    pub index: Index,
    pub source: DirectorySource,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory = directory.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let root: PathBuf = current_dir()?.join(directory);
        if !root.exists() {
            return fail("directory does not exist.");
        }
        let root = root.canonicalize()?;
        let manifest = root.join(MANIFEST);
        let index = if manifest.is_file() {
            log::debug!("Reading index from {}", manifest.display());
            Index::from_toml(&read_to_string(&manifest)?)?
        } else {
            log::debug!("No {MANIFEST} in {}, using the standard index", root.display());
            Index::standard()
        };
        let source = DirectorySource::new(root.clone());
        Ok(Self {
            root,
            index,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_data_directory;

    #[test]
    fn test_missing_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.to_string(), "error: directory does not exist.");
        }
    }

    #[test]
    fn test_standard_index_without_manifest() -> Fallible<()> {
        let dir = create_tmp_data_directory()?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        assert_eq!(collection.index.max_lesson_id(), Some(12));
        assert!(collection.index.category("counter").is_some());
        Ok(())
    }

    #[test]
    fn test_manifest_overrides_standard_index() -> Fallible<()> {
        let dir = create_tmp_data_directory()?;
        write(
            dir.join(MANIFEST),
            "[[lesson]]\nid = 1\nfile = \"lessons/l6.csv\"\n",
        )?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        assert_eq!(collection.index.lesson_ids().collect::<Vec<_>>(), [1]);
        assert!(collection.index.category("counter").is_none());
        Ok(())
    }

    #[test]
    fn test_broken_manifest_is_an_error() -> Fallible<()> {
        let dir = create_tmp_data_directory()?;
        write(dir.join(MANIFEST), "[[lesson]]\nid = \"one\"\n")?;
        assert!(Collection::new(Some(dir.display().to_string())).is_err());
        Ok(())
    }
}
