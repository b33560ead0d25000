//! Worker module for executing requests
//!
//! The Worker is the core execution unit, responsible for the simple but
//! critical loop: **claim -> execute -> record -> repeat**.
//!
//! Each Worker is a tokio task that:
//!
//! 1. Claims the next unit of work from a shared atomic counter
//! 2. Executes the request via a [`RequestExecutor`](crate::RequestExecutor)
//! 3. Records the outcome into the run's
//!    [`ResultAggregator`](crate::orchestrator::ResultAggregator)
//! 4. Repeats until the counter reaches the run's request total
//!
//! The [`WorkerPool`] spawns a fixed number of workers for one run and joins
//! them all before returning.
//!
//! # Example
//!
//! ```ignore
//! use stress_bench_core::worker::WorkerPool;
//!
//! let pool = WorkerPool::new(executor);
//! let sink = Arc::new(ResultAggregator::new());
//! let stats = pool.run(200, 10, spec, Arc::clone(&sink)).await?;
//! println!("Recorded: {}", sink.snapshot().total);
//! ```

mod builder;
mod executor;
mod pool;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use pool::WorkerPool;
pub use stats::WorkerStats;

#[cfg(test)]
mod tests;
