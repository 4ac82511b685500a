use crate::clock::Clock;
use crate::config::MIN_PRICE_POLL_PERIOD;
use crate::context::AppContext;
use crate::contract::AuctionContract;
use crate::units::from_base_units;
use chrono::{DateTime, Utc};
use ethers::types::U256;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::debug;

/// Current auction price as last reported by the contract.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveAuctionState {
    pub item_id: u64,
    pub price_base_units: U256,
    pub price: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct LivePriceReader {
    contract: Arc<dyn AuctionContract>,
    clock: Arc<dyn Clock>,
    token_decimals: u8,
}

impl LivePriceReader {
    pub fn new(
        contract: Arc<dyn AuctionContract>,
        clock: Arc<dyn Clock>,
        token_decimals: u8,
    ) -> LivePriceReader {
        LivePriceReader {
            contract,
            clock,
            token_decimals,
        }
    }

    pub fn from_context(ctx: &AppContext) -> LivePriceReader {
        LivePriceReader::new(ctx.contract.clone(), ctx.clock.clone(), ctx.token_decimals)
    }

    pub async fn poll_once(&self, item_id: u64) -> Result<LiveAuctionState, String> {
        let price_base_units = self
            .contract
            .get_current_auction_price(U256::from(item_id))
            .await?;
        Ok(LiveAuctionState {
            item_id,
            price_base_units,
            price: from_base_units(price_base_units, self.token_decimals)?,
            updated_at: self.clock.now(),
        })
    }

    /// Polls every `period` until the returned [`PriceWatch`] is stopped or
    /// dropped. A poll still running when the next tick is due is abandoned, so
    /// at most one is in flight. Failed polls are skipped. The period is
    /// raised to [`MIN_PRICE_POLL_PERIOD`] when shorter.
    pub fn watch(&self, item_id: u64, period: Duration) -> PriceWatch {
        let period = period.max(MIN_PRICE_POLL_PERIOD);
        let (sender, receiver) = watch::channel(None);
        let reader = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match timeout(period, reader.poll_once(item_id)).await {
                    Ok(Ok(state)) => {
                        if sender.send(Some(state)).is_err() {
                            break;
                        }
                    }
                    Ok(Err(e)) => debug!("Price poll for item {} failed: {}", item_id, e),
                    Err(_) => debug!("Price poll for item {} superseded", item_id),
                }
            }
        });
        PriceWatch { receiver, task }
    }
}

pub struct PriceWatch {
    receiver: watch::Receiver<Option<LiveAuctionState>>,
    task: JoinHandle<()>,
}

impl PriceWatch {
    pub fn latest(&self) -> Option<LiveAuctionState> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published price. Errors once polling has stopped.
    pub async fn changed(&mut self) -> Result<Option<LiveAuctionState>, String> {
        self.receiver
            .changed()
            .await
            .map_err(|_| "Price polling has stopped".to_string())?;
        Ok(self.latest())
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for PriceWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
