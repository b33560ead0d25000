//! Orchestrator for session lifecycle management
//!
//! The Orchestrator coordinates a complete stress session:
//! - Running each repeat strictly after the previous one finished
//! - Giving every run its own [`ResultAggregator`]
//! - Timing each run's worker pool from spawn to join
//! - Combining the runs into session totals
//!
//! # Example
//!
//! ```ignore
//! use stress_bench_core::{OrchestratorBuilder, RequestSpec};
//!
//! let orchestrator = OrchestratorBuilder::new()
//!     .request(RequestSpec::parse("http://localhost:8080/")?)
//!     .total_requests(1000)
//!     .worker_count(10)
//!     .executor(executor)
//!     .build()?;
//!
//! let result = orchestrator.run_session().await?;
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::ResultAggregator;
pub use builder::OrchestratorBuilder;
pub use executor::Orchestrator;
