use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

#[cfg(feature = "serde")]
use {
    serde::{Deserialize, Serialize},
    tabled::Tabled,
};

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

// For clarity
pub type ConsumerId = String;

/// Allocated amount per consumer
pub type AllocationMapping = BTreeMap<ConsumerId, f64>;

pub type Consumers = Vec<Consumer>;

/// A virtual machine competing for the pool
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, Tabled))]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct Consumer {
    #[cfg_attr(feature = "serde", serde(rename = "Id"))]
    pub id: ConsumerId,
    /// Quantity the consumer would use if unconstrained
    #[cfg_attr(feature = "serde", serde(rename = "Demand"))]
    pub demand: f64,
}

impl Consumer {
    pub fn new(id: impl Into<ConsumerId>, demand: f64) -> Self {
        Self {
            id: id.into(),
            demand,
        }
    }
}

impl Display for Consumer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Consumer(id={}, demand={})", self.id, self.demand)
    }
}

/// Non-fatal conditions raised while computing an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub enum AllocationWarning {
    /// Raw Shapley values summed to zero; every consumer received zero
    DegenerateShapleySum,
    /// Total demand is zero; every consumer received zero
    ZeroTotalDemand,
}

impl Display for AllocationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationWarning::DegenerateShapleySum => {
                write!(f, "raw Shapley values sum to zero, allocating nothing")
            }
            AllocationWarning::ZeroTotalDemand => {
                write!(f, "total demand is zero, allocating nothing")
            }
        }
    }
}

/// Output of one allocation policy
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct Allocation {
    pub shares: AllocationMapping,
    pub warnings: Vec<AllocationWarning>,
}

impl Allocation {
    pub(crate) fn new(shares: AllocationMapping) -> Self {
        Self {
            shares,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warning(mut self, warning: AllocationWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Amount allocated to a consumer
    pub fn get(&self, id: &str) -> Option<f64> {
        self.shares.get(id).copied()
    }

    /// Sum of all allocated amounts
    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(feature = "serde")]
mod csv_support {
    use super::*;
    use crate::error::Result;
    use std::{io::Read, path::Path};

    /// Read consumers from a CSV file with an `Id,Demand` header
    pub fn consumers_from_csv<P: AsRef<Path>>(path: P) -> Result<Consumers> {
        let reader = csv::Reader::from_path(path)?;
        collect_consumers(reader)
    }

    /// Read consumers from any CSV source with an `Id,Demand` header
    pub fn consumers_from_reader<R: Read>(rdr: R) -> Result<Consumers> {
        collect_consumers(csv::Reader::from_reader(rdr))
    }

    fn collect_consumers<R: Read>(mut reader: csv::Reader<R>) -> Result<Consumers> {
        let mut consumers = Vec::new();
        for record in reader.deserialize() {
            let consumer: Consumer = record?;
            consumers.push(consumer);
        }
        Ok(consumers)
    }
}

#[cfg(feature = "serde")]
pub use csv_support::{consumers_from_csv, consumers_from_reader};
