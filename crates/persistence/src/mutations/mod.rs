// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Inserts return the stored row read back by its new id, updates return
//! `Ok(None)` when the id does not exist, and deletes report whether a row
//! was removed.

pub mod berths;
pub mod port_calls;
pub mod vessels;
