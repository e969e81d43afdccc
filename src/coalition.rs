//! Coalition bitmasks and their enumeration.
//!
//! Consumer `i` of the input order is bit `i` of a [`Coalition`]. Every
//! enumeration walks masks in ascending order, so results are deterministic
//! and can be used directly as indices into per-coalition value tables.

use crate::error::{AllocationError, Result};
use std::collections::HashSet;

/// Widest consumer set a u64 mask can enumerate
pub const MAX_ENUMERABLE: usize = 63;

/// A subset of consumers, one bit per consumer index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coalition(u64);

impl Coalition {
    pub const EMPTY: Coalition = Coalition(0);

    pub fn from_bits(bits: u64) -> Self {
        Coalition(bits)
    }

    /// Coalition of all `n` consumers
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than 64.
    pub fn grand(n: usize) -> Self {
        Coalition(full_mask(n))
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// Position of this coalition in a table of all 2^n coalitions
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// # Panics
    ///
    /// Panics if `member` is 64 or more.
    pub fn contains(self, member: usize) -> bool {
        self.0 & bit(member) != 0
    }

    /// # Panics
    ///
    /// Panics if `member` is 64 or more.
    pub fn with(self, member: usize) -> Self {
        Coalition(self.0 | bit(member))
    }

    /// # Panics
    ///
    /// Panics if `member` is 64 or more.
    pub fn without(self, member: usize) -> Self {
        Coalition(self.0 & !bit(member))
    }

    pub fn size(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending order
    pub fn members(self) -> Members {
        Members { rest: self.0 }
    }
}

/// Iterator over the member indices of a coalition
#[derive(Debug, Clone)]
pub struct Members {
    rest: u64,
}

impl Iterator for Members {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.rest == 0 {
            return None;
        }
        let member = self.rest.trailing_zeros() as usize;
        self.rest &= self.rest - 1;
        Some(member)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Members {}

fn bit(member: usize) -> u64 {
    assert!(
        member < u64::BITS as usize,
        "consumer index {member} does not fit in a coalition mask"
    );
    1 << member
}

fn full_mask(n: usize) -> u64 {
    assert!(
        n <= u64::BITS as usize,
        "{n} consumers do not fit in a coalition mask"
    );
    if n == 0 { 0 } else { u64::MAX >> (64 - n) }
}

/// Enumerates coalitions over a validated set of consumer identifiers
#[derive(Debug, Clone, Copy)]
pub struct CoalitionEnumerator {
    n: usize,
}

impl CoalitionEnumerator {
    /// Build an enumerator for the given identifiers, rejecting duplicates
    pub fn new<S: AsRef<str>>(ids: &[S]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_ref()) {
                return Err(AllocationError::DuplicateConsumer(id.as_ref().to_string()));
            }
        }
        Self::with_size(ids.len())
    }

    /// Build an enumerator over `n` anonymous consumers
    pub fn with_size(n: usize) -> Result<Self> {
        if n > MAX_ENUMERABLE {
            return Err(AllocationError::TooManyConsumers {
                count: n,
                limit: MAX_ENUMERABLE,
            });
        }
        Ok(Self { n })
    }

    pub fn consumer_count(&self) -> usize {
        self.n
    }

    /// Number of coalitions, 2^n
    pub fn coalition_count(&self) -> usize {
        1usize << self.n
    }

    /// Every subset of the consumers, including the empty and grand coalitions
    pub fn all(&self) -> Coalitions {
        Coalitions {
            next: 0,
            end: 1u64 << self.n,
            focal: None,
            include_focal: false,
        }
    }

    /// Every subset of the other n - 1 consumers
    ///
    /// # Panics
    ///
    /// Panics if `focal` is not below [`consumer_count`](Self::consumer_count).
    pub fn excluding(&self, focal: usize) -> Coalitions {
        self.around(focal, false)
    }

    /// Every subset that contains the focal consumer
    ///
    /// # Panics
    ///
    /// Panics if `focal` is not below [`consumer_count`](Self::consumer_count).
    pub fn including(&self, focal: usize) -> Coalitions {
        self.around(focal, true)
    }

    fn around(&self, focal: usize, include_focal: bool) -> Coalitions {
        assert!(
            focal < self.n,
            "focal consumer {focal} out of range for {} consumers",
            self.n
        );
        Coalitions {
            next: 0,
            end: 1u64 << (self.n - 1),
            focal: Some(focal),
            include_focal,
        }
    }
}

/// Lazy, restartable sequence of coalitions in ascending mask order
#[derive(Debug, Clone)]
pub struct Coalitions {
    next: u64,
    end: u64,
    focal: Option<usize>,
    include_focal: bool,
}

impl Coalitions {
    // Spreads a compact (n - 1)-bit counter around the focal bit
    fn expand(&self, compact: u64) -> Coalition {
        match self.focal {
            None => Coalition(compact),
            Some(focal) => {
                let low = compact & ((1u64 << focal) - 1);
                let high = (compact >> focal) << (focal + 1);
                let coalition = Coalition(low | high);
                if self.include_focal {
                    coalition.with(focal)
                } else {
                    coalition
                }
            }
        }
    }
}

impl Iterator for Coalitions {
    type Item = Coalition;

    fn next(&mut self) -> Option<Coalition> {
        if self.next >= self.end {
            return None;
        }
        let coalition = self.expand(self.next);
        self.next += 1;
        Some(coalition)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coalitions {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_all_coalitions() {
        let enumerator = CoalitionEnumerator::new(&["a", "b", "c"][..]).unwrap();
        let all: Vec<u64> = enumerator.all().map(Coalition::bits).collect();
        assert_eq!(all, (0..8).collect::<Vec<_>>());
        assert_eq!(enumerator.coalition_count(), 8);
    }

    #[test]
    fn test_excluding_focal() {
        let enumerator = CoalitionEnumerator::with_size(4).unwrap();
        for focal in 0..4 {
            let subsets: BTreeSet<Coalition> = enumerator.excluding(focal).collect();
            assert_eq!(subsets.len(), 8);
            assert!(subsets.iter().all(|c| !c.contains(focal)));
            assert!(subsets.contains(&Coalition::EMPTY));
            assert!(subsets.contains(&Coalition::grand(4).without(focal)));
        }
    }

    #[test]
    fn test_including_focal() {
        let enumerator = CoalitionEnumerator::with_size(3).unwrap();
        let subsets: Vec<u64> = enumerator.including(1).map(Coalition::bits).collect();
        assert_eq!(subsets, vec![0b010, 0b011, 0b110, 0b111]);
    }

    #[test]
    fn test_excluding_and_including_partition_all() {
        let enumerator = CoalitionEnumerator::with_size(5).unwrap();
        let mut union: BTreeSet<Coalition> = enumerator.excluding(2).collect();
        union.extend(enumerator.including(2));
        let all: BTreeSet<Coalition> = enumerator.all().collect();
        assert_eq!(union, all);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let enumerator = CoalitionEnumerator::with_size(3).unwrap();
        let iter = enumerator.excluding(0);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(enumerator.excluding(0).len(), 4);
    }

    #[test]
    fn test_empty_set() {
        let enumerator = CoalitionEnumerator::with_size(0).unwrap();
        let all: Vec<_> = enumerator.all().collect();
        assert_eq!(all, vec![Coalition::EMPTY]);
        assert_eq!(Coalition::grand(0), Coalition::EMPTY);
    }

    #[test]
    fn test_single_consumer() {
        let enumerator = CoalitionEnumerator::with_size(1).unwrap();
        let excluding: Vec<_> = enumerator.excluding(0).collect();
        assert_eq!(excluding, vec![Coalition::EMPTY]);
        let including: Vec<_> = enumerator.including(0).collect();
        assert_eq!(including, vec![Coalition::from_bits(1)]);
    }

    #[test]
    fn test_duplicate_identifiers_rejected() {
        let result = CoalitionEnumerator::new(&["vm-1", "vm-2", "vm-1"][..]);
        assert!(matches!(
            result,
            Err(AllocationError::DuplicateConsumer(id)) if id == "vm-1"
        ));
    }

    #[test]
    fn test_too_wide() {
        let result = CoalitionEnumerator::with_size(64);
        assert!(matches!(
            result,
            Err(AllocationError::TooManyConsumers { count: 64, limit: 63 })
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_focal_out_of_range_panics() {
        let enumerator = CoalitionEnumerator::with_size(3).unwrap();
        let _ = enumerator.excluding(3);
    }

    #[test]
    #[should_panic(expected = "does not fit in a coalition mask")]
    fn test_member_beyond_mask_panics() {
        let _ = Coalition::EMPTY.with(64);
    }

    #[test]
    #[should_panic(expected = "do not fit in a coalition mask")]
    fn test_grand_beyond_mask_panics() {
        let _ = Coalition::grand(65);
    }

    #[test]
    fn test_widest_masks() {
        assert_eq!(Coalition::grand(64).bits(), u64::MAX);
        assert!(Coalition::EMPTY.with(63).contains(63));
    }

    #[test]
    fn test_members() {
        let coalition = Coalition::from_bits(0b1011);
        let members: Vec<usize> = coalition.members().collect();
        assert_eq!(members, vec![0, 1, 3]);
        assert_eq!(coalition.size(), 3);
        assert_eq!(coalition.members().len(), 3);
        assert!(coalition.contains(3));
        assert!(!coalition.contains(2));
        assert_eq!(coalition.without(1).bits(), 0b1001);
        assert_eq!(Coalition::grand(4).bits(), 0b1111);
    }
}
