//! Session-scoped memoization of the USD to INR exchange rate.

use crate::core::currency::CurrencyRateProvider;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Rate used when the live lookup fails, matching long-run USD/INR levels.
pub const FALLBACK_USD_INR: f64 = 83.0;

/// Memoizes the USD to INR rate for the lifetime of a session.
///
/// The first successful fetch is cached and every later call returns the
/// memo without network I/O. A failed fetch yields the fallback rate
/// without caching it, so a later call in the same session may retry.
/// The mutex is held across fetch-and-assign, so concurrent callers
/// cannot race to duplicate the network round trip.
pub struct SessionRates {
    provider: Arc<dyn CurrencyRateProvider>,
    fallback: f64,
    cached: Mutex<Option<f64>>,
}

impl SessionRates {
    pub fn new(provider: Arc<dyn CurrencyRateProvider>, fallback: f64) -> Self {
        SessionRates {
            provider,
            fallback,
            cached: Mutex::new(None),
        }
    }

    /// Returns the USD to INR rate, fetching it at most once per session.
    /// Never fails; a lookup error degrades to the fallback constant.
    pub async fn usd_to_inr(&self) -> f64 {
        let mut cached = self.cached.lock().await;
        if let Some(rate) = *cached {
            return rate;
        }

        match self.provider.get_rate("USD", "INR").await {
            Ok(rate) if rate > 0.0 => {
                debug!(rate, "Caching USD/INR rate for the session");
                *cached = Some(rate);
                rate
            }
            Ok(rate) => {
                debug!(rate, "Ignoring non-positive USD/INR rate");
                self.fallback
            }
            Err(e) => {
                debug!(error = %e, "USD/INR rate fetch failed, using fallback");
                self.fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedRateProvider {
        call_count: AtomicUsize,
        // One entry per expected call; None means the call fails.
        responses: Vec<Option<f64>>,
    }

    impl ScriptedRateProvider {
        fn new(responses: Vec<Option<f64>>) -> Self {
            ScriptedRateProvider {
                call_count: AtomicUsize::new(0),
                responses,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CurrencyRateProvider for ScriptedRateProvider {
        async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
            assert_eq!(from, "USD");
            assert_eq!(to, "INR");
            let call = self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(call) {
                Some(Some(rate)) => Ok(*rate),
                _ => Err(anyhow!("Rate service unavailable")),
            }
        }
    }

    #[tokio::test]
    async fn test_successful_rate_is_fetched_once() {
        let provider = Arc::new(ScriptedRateProvider::new(vec![Some(83.5)]));
        let rates = SessionRates::new(provider.clone(), FALLBACK_USD_INR);

        assert_eq!(rates.usd_to_inr().await, 83.5);
        assert_eq!(rates.usd_to_inr().await, 83.5);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_without_caching() {
        let provider = Arc::new(ScriptedRateProvider::new(vec![None, Some(84.2)]));
        let rates = SessionRates::new(provider.clone(), FALLBACK_USD_INR);

        // First call fails and degrades to the fallback.
        assert_eq!(rates.usd_to_inr().await, FALLBACK_USD_INR);
        // The failure was not cached, so the next call retries and sticks.
        assert_eq!(rates.usd_to_inr().await, 84.2);
        assert_eq!(rates.usd_to_inr().await, 84.2);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_positive_rate_is_rejected() {
        let provider = Arc::new(ScriptedRateProvider::new(vec![Some(0.0), Some(83.1)]));
        let rates = SessionRates::new(provider.clone(), FALLBACK_USD_INR);

        assert_eq!(rates.usd_to_inr().await, FALLBACK_USD_INR);
        assert_eq!(rates.usd_to_inr().await, 83.1);
    }
}
