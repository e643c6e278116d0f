// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Pair coverage of a plan.

use serde::Serialize;

/// How many of the possible participant pairs have shared a table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Coverage {
    /// Number of distinct pairs that met.
    pub encountered: usize,
    /// Number of distinct pairs that exist, `C(n, 2)`.
    pub possible: usize,
}

impl Coverage {
    #[inline]
    pub const fn new(encountered: usize, possible: usize) -> Self {
        Self {
            encountered,
            possible,
        }
    }

    /// Returns `true` if every possible pair met.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.encountered >= self.possible
    }

    /// Returns the number of pairs that never met.
    #[inline]
    pub const fn missing(&self) -> usize {
        self.possible.saturating_sub(self.encountered)
    }

    /// Returns the covered fraction in `[0, 1]`. Without any possible pair the
    /// coverage is trivially complete and the ratio is `1.0`.
    #[inline]
    pub fn ratio(&self) -> f64 {
        if self.possible == 0 {
            return 1.0;
        }
        self.encountered as f64 / self.possible as f64
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} pairs ({:.1}%)",
            self.encountered,
            self.possible,
            self.ratio() * 100.0
        )
    }
}
