//! Cooling interval buckets and their success/failure transition tables.
//!
//! Intervals are expressed in minutes. A table only knows the buckets of
//! its chain; asking it about any other value is treated as corrupt data.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

pub const ONE_DAY: u32 = 60 * 24;

static SHORT: LazyLock<IntervalTable> =
    LazyLock::new(|| IntervalTable::new(&[0, ONE_DAY, 2 * ONE_DAY]));

static LONG: LazyLock<IntervalTable> = LazyLock::new(|| {
    IntervalTable::new(&[0, ONE_DAY, 2 * ONE_DAY, 4 * ONE_DAY, 8 * ONE_DAY])
});

/// The two bucket chains a policy can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketChain {
    /// 0 → 1 day → 2 days
    Short,
    /// 0 → 1 day → 2 days → 4 days → 8 days
    Long,
}

impl BucketChain {
    pub fn table(self) -> &'static IntervalTable {
        match self {
            BucketChain::Short => &SHORT,
            BucketChain::Long => &LONG,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntervalTable {
    on_success: BTreeMap<u32, u32>,
    on_failure: BTreeMap<u32, u32>,
    max: u32,
}

impl IntervalTable {
    /// Builds both tables from an ascending chain that starts at 0.
    ///
    /// The failure table is the success table read backwards, plus a
    /// self-loop at 0. The top bucket maps to itself on success; noticing
    /// that saturation is up to the caller.
    pub fn new(chain: &[u32]) -> Self {
        debug_assert_eq!(chain.first(), Some(&0));
        debug_assert!(chain.windows(2).all(|w| w[0] < w[1]));

        let steps: Vec<(u32, u32)> = chain.windows(2).map(|w| (w[0], w[1])).collect();
        let max = chain.last().copied().unwrap_or(0);

        let mut on_success: BTreeMap<u32, u32> = steps.iter().copied().collect();
        on_success.insert(max, max);

        let mut on_failure: BTreeMap<u32, u32> =
            steps.iter().map(|&(lower, upper)| (upper, lower)).collect();
        on_failure.insert(0, 0);

        IntervalTable {
            on_success,
            on_failure,
            max,
        }
    }

    pub fn next_interval_on_success(&self, current: u32) -> Result<u32> {
        self.on_success
            .get(&current)
            .copied()
            .ok_or(Error::UnknownInterval { minutes: current })
    }

    pub fn previous_interval_on_failure(&self, current: u32) -> Result<u32> {
        self.on_failure
            .get(&current)
            .copied()
            .ok_or(Error::UnknownInterval { minutes: current })
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.on_success.contains_key(&minutes)
    }

    pub fn buckets(&self) -> impl Iterator<Item = u32> + '_ {
        self.on_success.keys().copied()
    }

    /// Largest bucket that does not exceed `minutes`.
    pub fn clamp(&self, minutes: u32) -> u32 {
        self.on_success
            .range(..=minutes)
            .next_back()
            .map_or(0, |(&bucket, _)| bucket)
    }
}
