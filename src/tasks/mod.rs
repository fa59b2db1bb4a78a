//! Background Tasks Module
//!
//! # Tasks
//! - Cache population: detached, bounded writes after a settings cache miss
//! - TTL sweeper: purges expired entries from the in-memory cache

mod cleanup;
mod populate;

pub use cleanup::spawn_cleanup_task;
pub use populate::{spawn_populate_worker, PopulateConfig, PopulateJob, PopulateQueue};
