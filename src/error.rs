use crate::{proportional::ProportionalAllocatorBuilderError, shapley::ShapleyAllocatorBuilderError};
use thiserror::Error;

/// Error types for the allocation system
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Demand below zero
    #[error("Consumer {consumer} has a negative demand ({demand}); demands must be non-negative.")]
    NegativeDemand { consumer: String, demand: f64 },

    /// Demand is NaN or infinite
    #[error("Consumer {consumer} has a non-finite demand.")]
    NonFiniteDemand { consumer: String },

    /// Pool is zero, negative or not a number
    #[error("The resource pool must be a positive finite number, got {0}.")]
    InvalidPool(f64),

    /// Same identifier appears twice
    #[error("There are duplicated consumers in the list: {0}")]
    DuplicateConsumer(String),

    /// No consumers where at least one is required
    #[error("There must be at least one consumer.")]
    EmptyConsumers,

    /// Too many consumers for exact enumeration
    #[error("There are too many consumers ({count}); exact enumeration is limited to {limit}.")]
    TooManyConsumers { count: usize, limit: usize },

    #[error("Shapley allocator configuration build error: {0}")]
    ShapleyBuild(#[from] ShapleyAllocatorBuilderError),

    #[error("Proportional allocator configuration build error: {0}")]
    ProportionalBuild(#[from] ProportionalAllocatorBuilderError),

    /// CSV input error
    #[cfg(feature = "serde")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for allocation operations
pub type Result<T> = std::result::Result<T, AllocationError>;
