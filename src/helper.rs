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

use std::fs::create_dir_all;
use std::fs::write;
use std::path::PathBuf;

use tempfile::tempdir;
use vocab_core::Fallible;

/// The files of a small data root, laid out like the bundled vocabulary.
const FILES: &[(&str, &str)] = &[
    (
        "lessons/l6.csv",
        "1,taberu,eat,essen\n2,nomu,drink\n2,nomimasu,trinken\n",
    ),
    ("lessons/l7.csv", "1,iku,go\n2,kuru,come\n"),
    (
        "themes/positions/positions.csv",
        "ue:above,oben\nshita:below,unten\n",
    ),
    (
        "themes/positions/directions.csv",
        "kita:north,Norden\nminami:south,Süden\n",
    ),
    (
        "themes/counter/book.csv",
        "issatsu\nnisatsu\nsansatsu\nyonsatsu\ngosatsu\nrokusatsu\nnanasatsu\nhassatsu\nkyuusatsu\njussatsu\nnan-satsu:how many books\n",
    ),
    (
        "themes/counter/frequency.csv",
        "ikkai\nnikai\nsankai\nyonkai\ngokai\nrokkai\nnanakai\nhachikai\nkyuukai\njukkai\nnan-kai:how often\n",
    ),
    (
        "themes/counter/floors_of_buildings.csv",
        "ikkai\nnikai\nsangai\nyonkai\ngokai\nrokkai\nnanakai\nhachikai\nkyuukai\njukkai\nnan-gai:which floor\n",
    ),
];

/// An index covering exactly [`FILES`], plus an empty lesson 8.
const MANIFEST: &str = r#"
[[lesson]]
id = 6
file = "lessons/l6.csv"

[[lesson]]
id = 7
file = "lessons/l7.csv"

[[lesson]]
id = 8

[[category]]
name = "positions"
sources = [{ format = "standard", file = "themes/positions/positions.csv" }]

[[category]]
name = "directions"
sources = [{ format = "standard", file = "themes/positions/directions.csv" }]

[[category]]
name = "counter"
merge = true
includes = ["book", "frequency", "floors_of_buildings"]

[[category]]
name = "book"
group = "counter"
sources = [{ format = "counter", file = "themes/counter/book.csv", count = 11, question = true, suffix = "book" }]

[[category]]
name = "frequency"
group = "counter"
sources = [{ format = "counter", file = "themes/counter/frequency.csv", count = 11, question = true, suffix = "times" }]

[[category]]
name = "floors_of_buildings"
group = "counter"
sources = [{ format = "counter", file = "themes/counter/floors_of_buildings.csv", count = 11, question = true, suffix = "floor" }]
"#;

/// Create a temporary data root with the sample files but no manifest.
pub fn create_tmp_data_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep().canonicalize()?;
    for (name, text) in FILES {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        write(path, text)?;
    }
    Ok(dir)
}

/// Create a temporary data root with the sample files and a manifest that
/// describes them.
pub fn create_tmp_collection_directory() -> Fallible<PathBuf> {
    let dir = create_tmp_data_directory()?;
    write(dir.join(crate::collection::MANIFEST), MANIFEST)?;
    Ok(dir)
}
