// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database mutations.
//!
//! Every mutation that depends on current state runs inside a single
//! transaction: it re-reads the rows it needs, re-validates through
//! the rules crate, and writes with a precondition on the state it
//! read. Nothing here trusts a status the caller saw earlier.

pub mod audit;
pub mod bootstrap;
pub mod missions;
pub mod participants;
pub mod tracking;
