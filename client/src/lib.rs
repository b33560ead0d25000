//! HTTP executor for stress-bench
//!
//! This crate provides the reqwest-backed implementation of the
//! [`RequestExecutor`](stress_bench_core::RequestExecutor) trait. Every
//! response with a status line counts as a success regardless of its code;
//! transport failures are classified into an
//! [`ErrorKind`](stress_bench_core::ErrorKind).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod classify;
mod executor;

pub use classify::classify_reqwest_error;
pub use executor::{ClientConfig, ClientError, HttpExecutor};
