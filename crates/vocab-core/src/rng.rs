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

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Anything the quiz can draw random numbers from. Production code uses
/// [`TinyRng`]; tests script the sequence.
pub trait RandomSource {
    /// Generate a random number in the range [0, max). `max` must be
    /// positive.
    fn below(&mut self, max: u32) -> u32;

    /// A fair coin.
    fn flip(&mut self) -> bool {
        self.below(2) == 1
    }

    /// Pick an index into a collection of `len` elements, with replacement.
    fn pick(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty collection");
        let max = u32::try_from(len).unwrap_or(u32::MAX);
        self.below(max) as usize
    }
}

/// A minimal, zero-dependency, completely insecure PRNG to pick the
/// vocabulary.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Initialize the RNG from the system clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(C);
        Self::from_seed(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }
}

impl RandomSource for TinyRng {
    fn below(&mut self, max: u32) -> u32 {
        assert!(max > 0, "upper bound must be positive");
        self.next_u32() % max
    }
}
