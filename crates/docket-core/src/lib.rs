//! Core types and trait definitions for the Docket assessment calendar.
//!
//! This crate is deliberately free of HTTP, filesystem, and database
//! dependencies. All other crates depend on it; it depends on nothing
//! proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assessment;
pub mod calendar;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod persist;
pub mod role;
pub mod store;

pub use error::{Error, Result};
