use crate::{
    error::{AllocationError, Result},
    types::Consumer,
};
use std::collections::HashSet;

/// Validate consumers and pool once, at the allocator entry point
pub(crate) fn check_inputs(consumers: &[Consumer], pool: f64) -> Result<()> {
    if !pool.is_finite() || pool <= 0.0 {
        return Err(AllocationError::InvalidPool(pool));
    }

    for consumer in consumers {
        if !consumer.demand.is_finite() {
            return Err(AllocationError::NonFiniteDemand {
                consumer: consumer.id.clone(),
            });
        }
        if consumer.demand < 0.0 {
            return Err(AllocationError::NegativeDemand {
                consumer: consumer.id.clone(),
                demand: consumer.demand,
            });
        }
    }

    // Check there are no duplicate consumers
    let mut seen = HashSet::with_capacity(consumers.len());
    for consumer in consumers {
        if !seen.insert(consumer.id.as_str()) {
            return Err(AllocationError::DuplicateConsumer(consumer.id.clone()));
        }
    }

    Ok(())
}

/// Reject an empty consumer list where the caller needs at least one
pub fn require_consumers(consumers: &[Consumer]) -> Result<()> {
    if consumers.is_empty() {
        return Err(AllocationError::EmptyConsumers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_consumers() -> Vec<Consumer> {
        vec![Consumer::new("vm-1", 10.0), Consumer::new("vm-2", 20.0)]
    }

    #[test]
    fn test_valid_inputs() {
        assert!(check_inputs(&basic_consumers(), 45.0).is_ok());
        assert!(check_inputs(&[], 1.0).is_ok());
    }

    #[test]
    fn test_invalid_pool() {
        for pool in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = check_inputs(&basic_consumers(), pool);
            assert!(matches!(result, Err(AllocationError::InvalidPool(_))));
        }
    }

    #[test]
    fn test_negative_demand() {
        let consumers = vec![Consumer::new("vm-1", 1.0), Consumer::new("vm-2", -0.5)];
        let result = check_inputs(&consumers, 10.0);
        assert!(matches!(
            result,
            Err(AllocationError::NegativeDemand { consumer, .. }) if consumer == "vm-2"
        ));
    }

    #[test]
    fn test_non_finite_demand() {
        let consumers = vec![Consumer::new("vm-1", f64::NAN)];
        let result = check_inputs(&consumers, 10.0);
        assert!(matches!(result, Err(AllocationError::NonFiniteDemand { .. })));
    }

    #[test]
    fn test_duplicate_consumers() {
        let consumers = vec![Consumer::new("vm-1", 1.0), Consumer::new("vm-1", 2.0)];
        let result = check_inputs(&consumers, 10.0);
        assert!(matches!(result, Err(AllocationError::DuplicateConsumer(_))));
    }

    #[test]
    fn test_require_consumers() {
        assert!(matches!(
            require_consumers(&[]),
            Err(AllocationError::EmptyConsumers)
        ));
        assert!(require_consumers(&basic_consumers()).is_ok());
    }
}
