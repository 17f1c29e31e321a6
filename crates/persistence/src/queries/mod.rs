// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only database queries.
//!
//! Every function here takes a connection and returns fully
//! reconstructed domain values; raw rows never leave this crate.

pub mod audit;
pub mod missions;
pub mod participants;
pub mod roles;
pub mod scopes;
pub mod tracking;
pub mod users;
