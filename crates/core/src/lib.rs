// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod command;
mod error;
mod participant;
mod state;
mod transition;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::CoreError;
pub use participant::{
    CHECK_IN_DISTANCE_WARN_KM, check_in, confirm_participation, record_ping,
};
pub use state::{CheckInResult, ConfirmOutcome, TransitionResult, snapshot};
pub use transition::{
    AuthzContext, Guard, TRANSITIONS, Transition, apply_transition, can_access_mission,
};
