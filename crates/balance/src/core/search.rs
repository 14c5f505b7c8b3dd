use alloy::primitives::{Address, U256};
use futures::{stream, StreamExt};
use slot20_common::{
    constants::{DEFAULT_CONCURRENCY, DEFAULT_SLOT_LIMIT},
    utils::hex::ToLowerHex,
};
use tracing::{debug, trace};

use crate::{
    core::{convention::LayoutConvention, key::derive_key, probe::StorageReader},
    error::Error,
    interfaces::{MissReason, Reporter, SearchResult},
};

/// The index of a top-level storage slot a mapping could be declared at.
pub type SlotIndex = u64;

/// Bounds of a slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// The highest slot index to try, inclusive.
    pub max_slot: SlotIndex,
    /// How many storage reads may be in flight at once. Values below 1 are treated as 1.
    pub concurrency: usize,
}

impl SearchOptions {
    /// Create new search options.
    pub fn new(max_slot: SlotIndex, concurrency: usize) -> Self {
        Self { max_slot, concurrency: concurrency.max(1) }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_LIMIT, DEFAULT_CONCURRENCY)
    }
}

/// Every `(convention, slot)` pair a search tries, in the order it tries them.
///
/// All slots `0..=max_slot` under [`LayoutConvention::KeyThenSlot`] come first, followed by the
/// same range under [`LayoutConvention::SlotThenKey`].
pub fn candidates(
    max_slot: SlotIndex,
) -> impl Iterator<Item = (LayoutConvention, SlotIndex)> + Clone {
    LayoutConvention::ALL
        .into_iter()
        .flat_map(move |convention| (0..=max_slot).map(move |slot| (convention, slot)))
}

/// Find the slot of the mapping that stores `holder`'s `balance` in `token`'s storage.
///
/// Candidates are tried in [`candidates`] order and the first one whose stored word equals the
/// balance wins. With a concurrency above one, reads run ahead of the candidate being checked,
/// but results are still consumed in candidate order, so the reported slot never depends on
/// which read happens to finish first. Outstanding reads are dropped once a match is found.
///
/// A zero balance cannot be told apart from unused storage and is rejected without a single read.
pub async fn find_slot<R>(
    reader: &R,
    token: Address,
    holder: Address,
    balance: U256,
    options: &SearchOptions,
    reporter: &dyn Reporter,
) -> Result<SearchResult, Error>
where
    R: StorageReader + ?Sized,
{
    if balance.is_zero() {
        debug!("holder {} has a zero balance, skipping slot search", holder);
        let result = SearchResult::NotFound(MissReason::ZeroBalance);
        reporter.finished(&result);
        return Ok(result);
    }

    let max_slot = options.max_slot;
    let mut probes = stream::iter(candidates(max_slot))
        .map(move |(convention, slot)| async move {
            let key = derive_key(&holder, slot, convention);
            trace!("probing slot {} ({}) at key {}", slot, convention, key.to_lower_hex());
            reader.read_storage(token, key).await.map(|outcome| (convention, slot, outcome))
        })
        .buffered(options.concurrency.max(1));

    let mut phase: Option<LayoutConvention> = None;
    while let Some(probe) = probes.next().await {
        let (convention, slot, outcome) = probe?;

        if phase != Some(convention) {
            if let Some(previous) = phase {
                reporter.phase_exhausted(previous, max_slot);
            }
            reporter.phase_started(convention, max_slot);
            phase = Some(convention);
        }

        reporter.slot_probed(convention, slot, max_slot, &outcome);

        if outcome.matches(&balance) {
            let result = SearchResult::Found { slot, convention };
            reporter.finished(&result);
            return Ok(result);
        }
    }

    if let Some(previous) = phase {
        reporter.phase_exhausted(previous, max_slot);
    }

    let result = SearchResult::NotFound(MissReason::Exhausted);
    reporter.finished(&result);
    Ok(result)
}
