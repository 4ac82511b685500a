use crate::clock::Clock;
use crate::config::{DEFAULT_PRICE_POLL_SECONDS, MIN_PRICE_POLL_PERIOD};
use crate::contract::AuctionContract;
use crate::submission::PendingSubmissions;
use std::sync::Arc;
use std::time::Duration;

/// Everything a handler needs, built once by the binary and passed down.
pub struct AppContext {
    pub contract: Arc<dyn AuctionContract>,
    pub clock: Arc<dyn Clock>,
    pub token_decimals: u8,
    pub price_poll_period: Duration,
    pub pending: PendingSubmissions,
}

impl AppContext {
    pub fn new(
        contract: Arc<dyn AuctionContract>,
        clock: Arc<dyn Clock>,
        token_decimals: u8,
    ) -> AppContext {
        AppContext {
            contract,
            clock,
            token_decimals,
            price_poll_period: Duration::from_secs(DEFAULT_PRICE_POLL_SECONDS),
            pending: PendingSubmissions::default(),
        }
    }

    /// Periods shorter than [`MIN_PRICE_POLL_PERIOD`] are raised to it.
    pub fn with_price_poll_period(mut self, period: Duration) -> AppContext {
        self.price_poll_period = period.max(MIN_PRICE_POLL_PERIOD);
        self
    }
}
