//! Fair resource allocation library
//!
//! This library divides a fixed pool of divisible resources (CPU, memory, ...)
//! among competing virtual machines, either by exact Shapley value over a
//! resource-sharing game or by a plain proportional split of demand.

pub mod characteristic;
pub mod coalition;
pub mod error;
pub mod metrics;
pub mod proportional;
pub mod shapley;
pub mod types;
mod utils;
pub mod validation;

// Re-export main types and functions
pub use characteristic::ResourceGame;
pub use coalition::{Coalition, CoalitionEnumerator};
pub use error::{AllocationError, Result};
pub use metrics::{ComparisonRow, average_satisfaction, compare, satisfaction};
pub use proportional::{ProportionalAllocator, ProportionalAllocatorBuilder};
pub use shapley::{ShapleyAllocator, ShapleyAllocatorBuilder};
pub use types::{Allocation, AllocationMapping, AllocationWarning, Consumer, ConsumerId, Consumers};

#[cfg(feature = "serde")]
pub use types::{consumers_from_csv, consumers_from_reader};
