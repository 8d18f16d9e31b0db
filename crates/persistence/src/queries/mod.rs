// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All queries use Diesel DSL against a `SqliteConnection`.

pub mod berths;
pub mod port_calls;
pub mod vessels;

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number, starting at 1.
    pub number: u32,
    /// Rows per page.
    pub size: u32,
}

impl Page {
    /// Creates a page; a zero page number is treated as the first page.
    #[must_use]
    pub const fn new(number: u32, size: u32) -> Self {
        Self {
            number: if number == 0 { 1 } else { number },
            size,
        }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}
