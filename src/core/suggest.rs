//! Purchase suggestion abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Displayed in place of fetched suggestions when the fetch fails.
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "• Error loading suggestions",
    "• Please try again later",
    "• Check logs for details",
];

/// Fetches a list of whimsical purchases for a savings amount. The amount
/// is pre-formatted to two decimal places by the caller.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn fetch_suggestions(&self, amount: &str) -> Result<Vec<String>>;
}

/// Serializes overlapping suggestion fetches: each fetch takes a sequence
/// number, and a response that is no longer the latest is discarded instead
/// of overwriting newer results.
///
/// Fetch failures are downgraded here: the caller receives the fallback
/// lines, and the error is logged, never propagated.
pub struct SuggestionGuard {
    seq: AtomicU64,
}

impl SuggestionGuard {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
        }
    }

    /// Runs one fetch. Returns `None` if a newer fetch was issued while this
    /// one was in flight; otherwise the display lines (fetched or fallback).
    pub async fn fetch(
        &self,
        provider: &(dyn SuggestionProvider + Send + Sync),
        amount: &str,
    ) -> Option<Vec<String>> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = provider.fetch_suggestions(amount).await;

        if self.seq.load(Ordering::SeqCst) != ticket {
            warn!(amount, "Discarding stale suggestion response");
            return None;
        }

        Some(match result {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, amount, "Suggestion fetch failed, using fallback");
                FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
            }
        })
    }
}

impl Default for SuggestionGuard {
    fn default() -> Self {
        Self::new()
    }
}
