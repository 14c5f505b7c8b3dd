use std::{
    fmt::Debug,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use alloy::primitives::{Address, U256};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use slot20_common::{
    ether::{address::to_checksum, erc20::TokenMetadata},
    utils::{
        hex::ToLowerHex,
        integers::{format_token_amount, ToLocaleString},
        time::{calculate_eta, format_eta},
    },
};
use tracing::{debug, info, warn};

use crate::{
    core::{convention::LayoutConvention, probe::ProbeOutcome, search::SlotIndex},
    interfaces::{MissReason, SearchResult},
};

/// Receives progress of a `balanceOf` run.
///
/// Every hook has an empty default, so implementations only override what they display. Hooks
/// are called in order from a single task, and never influence the result of the search.
pub trait Reporter: Send + Sync + Debug {
    /// The holder's balance is about to be fetched.
    fn checking_balance(&self, _holder: &Address, _metadata: &TokenMetadata) {}

    /// The holder's balance was fetched.
    fn balance_checked(&self, _holder: &Address, _balance: U256, _metadata: &TokenMetadata) {}

    /// The first probe of `convention` has completed.
    fn phase_started(&self, _convention: LayoutConvention, _max_slot: SlotIndex) {}

    /// A single candidate was checked, in candidate order.
    fn slot_probed(
        &self,
        _convention: LayoutConvention,
        _slot: SlotIndex,
        _max_slot: SlotIndex,
        _outcome: &ProbeOutcome,
    ) {
    }

    /// Every slot of `convention` was checked without a match.
    fn phase_exhausted(&self, _convention: LayoutConvention, _max_slot: SlotIndex) {}

    /// The search has ended.
    fn finished(&self, _result: &SearchResult) {}
}

/// A [`Reporter`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// A [`Reporter`] that emits structured log events through [`tracing`].
#[derive(Debug)]
pub struct LogReporter {
    start_time: Instant,
}

impl LogReporter {
    /// Create a new log reporter. ETAs are measured from this point on.
    pub fn new() -> Self {
        Self { start_time: Instant::now() }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for LogReporter {
    fn checking_balance(&self, holder: &Address, metadata: &TokenMetadata) {
        info!("checking {} {} balance", to_checksum(holder), metadata.symbol);
    }

    fn balance_checked(&self, holder: &Address, balance: U256, metadata: &TokenMetadata) {
        if balance.is_zero() {
            warn!("token holder {} does not hold any {}", to_checksum(holder), metadata.symbol);
        } else {
            info!(
                "token holder {} holds {} {} tokens",
                to_checksum(holder),
                format_token_amount(balance, metadata.decimals),
                metadata.symbol
            );
        }
    }

    fn phase_started(&self, convention: LayoutConvention, max_slot: SlotIndex) {
        info!("checking slots 0 through {} with {}", max_slot, convention.describe());
    }

    fn slot_probed(
        &self,
        convention: LayoutConvention,
        slot: SlotIndex,
        max_slot: SlotIndex,
        outcome: &ProbeOutcome,
    ) {
        let per_phase = max_slot.saturating_add(1);
        let offset = match convention {
            LayoutConvention::KeyThenSlot => 0,
            LayoutConvention::SlotThenKey => per_phase,
        };
        let completed = offset.saturating_add(slot).saturating_add(1);
        let remaining = per_phase.saturating_mul(2).saturating_sub(completed);

        let elapsed = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let eta = calculate_eta(completed as f64 / elapsed, remaining as usize);

        let word = match outcome {
            ProbeOutcome::Value(word) => word.to_lower_hex(),
            ProbeOutcome::Unreadable => "unreadable".to_string(),
        };
        debug!(
            "checked slot {} ({}): {}. completed={} remaining={} eta={}",
            slot,
            convention,
            word,
            completed.to_locale_string(),
            remaining.to_locale_string(),
            format_eta(eta)
        );
    }

    fn phase_exhausted(&self, convention: LayoutConvention, _max_slot: SlotIndex) {
        info!("no slot corresponds to balanceOf with {}", convention.describe());
    }

    fn finished(&self, result: &SearchResult) {
        match result {
            SearchResult::Found { slot, convention } => {
                info!("slot {} corresponds to balanceOf with {}", slot, convention.describe())
            }
            SearchResult::NotFound(MissReason::Exhausted) => {
                warn!("max slots have been exhausted, try increasing the limit with --limit")
            }
            SearchResult::NotFound(_) => {}
        }
    }
}

/// A [`Reporter`] that narrates progress with terminal spinners on stderr.
#[derive(Debug, Default)]
pub struct SpinnerReporter {
    state: Mutex<SpinnerState>,
}

#[derive(Default)]
struct SpinnerState {
    symbol: String,
    spinner: Option<ProgressBar>,
}

impl Debug for SpinnerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinnerState")
            .field("symbol", &self.symbol)
            .field("spinning", &self.spinner.is_some())
            .finish()
    }
}

impl SpinnerReporter {
    /// Create a new spinner reporter.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SpinnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(message: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    fn settle(spinner: &ProgressBar, mark: ColoredString, message: String) {
        spinner.set_style(
            ProgressStyle::with_template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.finish_with_message(format!("{mark} {message}"));
    }
}

impl Reporter for SpinnerReporter {
    fn checking_balance(&self, holder: &Address, metadata: &TokenMetadata) {
        let mut state = self.state();
        state.symbol = metadata.symbol.clone();
        state.spinner = Some(Self::start(format!(
            "Checking {} {} balance....",
            to_checksum(holder),
            metadata.symbol
        )));
    }

    fn balance_checked(&self, holder: &Address, balance: U256, metadata: &TokenMetadata) {
        let mut state = self.state();
        let Some(spinner) = state.spinner.take() else { return };

        if balance.is_zero() {
            Self::settle(
                &spinner,
                "✖".red(),
                format!(
                    "Token holder {} does not hold any {}",
                    to_checksum(holder),
                    metadata.symbol
                ),
            );
        } else {
            Self::settle(
                &spinner,
                "✔".green(),
                format!(
                    "Token holder {} holds {} {} tokens",
                    to_checksum(holder),
                    format_token_amount(balance, metadata.decimals),
                    metadata.symbol
                ),
            );
        }
    }

    fn phase_started(&self, convention: LayoutConvention, _max_slot: SlotIndex) {
        let mut state = self.state();
        let message =
            format!("Checking {} slot 0 with {}", state.symbol, convention.describe());
        state.spinner = Some(Self::start(message));
    }

    fn slot_probed(
        &self,
        convention: LayoutConvention,
        slot: SlotIndex,
        _max_slot: SlotIndex,
        _outcome: &ProbeOutcome,
    ) {
        let state = self.state();
        if let Some(spinner) = &state.spinner {
            spinner.set_message(format!(
                "Checking {} slot {} with {}",
                state.symbol,
                slot,
                convention.describe()
            ));
        }
    }

    fn phase_exhausted(&self, convention: LayoutConvention, _max_slot: SlotIndex) {
        let mut state = self.state();
        if let Some(spinner) = state.spinner.take() {
            Self::settle(
                &spinner,
                "✖".red(),
                format!(
                    "No slot number corresponds to balanceOf for {} with {}",
                    state.symbol,
                    convention.describe()
                ),
            );
        }
    }

    fn finished(&self, result: &SearchResult) {
        let mut state = self.state();
        match result {
            SearchResult::Found { slot, convention } => {
                if let Some(spinner) = state.spinner.take() {
                    Self::settle(
                        &spinner,
                        "✔".green(),
                        format!(
                            "Slot number {} corresponds to balanceOf for {} with {}",
                            slot,
                            state.symbol,
                            convention.describe()
                        ),
                    );
                }
            }
            SearchResult::NotFound(MissReason::Exhausted) => {
                eprintln!(
                    "Seems like max slots have been exhausted, try increasing the limit with --limit"
                );
            }
            SearchResult::NotFound(_) => {}
        }

        if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const HOLDER: Address = address!("F977814e90dA44bFA03b6295A0616a897441aceC");

    fn metadata() -> TokenMetadata {
        TokenMetadata { symbol: "WETH".to_string(), decimals: 18 }
    }

    #[test]
    fn test_spinner_reporter_lifecycle() {
        let reporter = SpinnerReporter::new();
        reporter.checking_balance(&HOLDER, &metadata());
        assert!(reporter.state().spinner.is_some());
        assert_eq!(reporter.state().symbol, "WETH");

        reporter.balance_checked(&HOLDER, U256::from(1000), &metadata());
        assert!(reporter.state().spinner.is_none());

        reporter.phase_started(LayoutConvention::KeyThenSlot, 10);
        reporter.slot_probed(
            LayoutConvention::KeyThenSlot,
            0,
            10,
            &ProbeOutcome::Value(U256::ZERO),
        );
        assert!(reporter.state().spinner.is_some());

        reporter.phase_exhausted(LayoutConvention::KeyThenSlot, 10);
        assert!(reporter.state().spinner.is_none());

        reporter.phase_started(LayoutConvention::SlotThenKey, 10);
        reporter.finished(&SearchResult::Found {
            slot: 3,
            convention: LayoutConvention::SlotThenKey,
        });
        assert!(reporter.state().spinner.is_none());
    }

    #[test]
    fn test_spinner_reporter_tolerates_missing_spinner() {
        let reporter = SpinnerReporter::new();
        reporter.slot_probed(LayoutConvention::KeyThenSlot, 0, 0, &ProbeOutcome::Unreadable);
        reporter.phase_exhausted(LayoutConvention::KeyThenSlot, 0);
        reporter.finished(&SearchResult::NotFound(MissReason::ZeroBalance));
        assert!(reporter.state().spinner.is_none());
    }

    #[test]
    fn test_log_reporter_handles_every_hook() {
        let reporter = LogReporter::new();
        reporter.checking_balance(&HOLDER, &metadata());
        reporter.balance_checked(&HOLDER, U256::ZERO, &metadata());
        reporter.phase_started(LayoutConvention::SlotThenKey, u64::MAX);
        reporter.slot_probed(
            LayoutConvention::SlotThenKey,
            u64::MAX,
            u64::MAX,
            &ProbeOutcome::Unreadable,
        );
        reporter.phase_exhausted(LayoutConvention::SlotThenKey, u64::MAX);
        reporter.finished(&SearchResult::NotFound(MissReason::Exhausted));
    }
}
