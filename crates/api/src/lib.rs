// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Sala mission platform.
//!
//! Handlers here sit between the HTTP server and the inner crates:
//! they parse boundary input, enforce who may do what, translate inner
//! errors into the API contract, and shape responses. The server crate
//! owns HTTP concerns; nothing in this crate knows about status codes
//! or routing.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

pub mod coordinates;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use coordinates::CoordinateError;
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_operation_error,
    translate_persistence_error,
};
