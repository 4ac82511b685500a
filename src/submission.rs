use crate::auction::AuctionProposal;
use crate::context::AppContext;
use crate::contract::SubmissionReceipt;
use crate::rejection::Rejection;
use crate::units::to_base_units;
use ethers::types::U256;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

/// Parameters of one `startAuction` call, in base units.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSubmission {
    pub item_id: U256,
    pub start_price: U256,
    pub bottom_price: U256,
    /// Absolute amount taken off per interval, not a percentage.
    pub discount_amount: U256,
    pub duration_seconds: u64,
}

impl AuctionSubmission {
    pub fn assemble(
        item_id: u64,
        proposal: &AuctionProposal,
        decimals: u8,
    ) -> Result<AuctionSubmission, String> {
        let duration_seconds = u64::try_from(proposal.duration_seconds)
            .map_err(|_| "Auction duration must be positive".to_string())?;
        Ok(AuctionSubmission {
            item_id: U256::from(item_id),
            start_price: to_base_units(proposal.start_price, decimals)?,
            bottom_price: to_base_units(proposal.bottom_price, decimals)?,
            discount_amount: to_base_units(proposal.discount_amount(), decimals)?,
            duration_seconds,
        })
    }

    /// Identifies identical submissions while one is in flight.
    pub fn idempotency_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.item_id.to_string());
        hasher.update(":");
        hasher.update(self.start_price.to_string());
        hasher.update(":");
        hasher.update(self.bottom_price.to_string());
        hasher.update(":");
        hasher.update(self.discount_amount.to_string());
        hasher.update(":");
        hasher.update(self.duration_seconds.to_string());
        hex::encode(hasher.finalize())
    }
}

/// Local pending lock for auction starts, keyed by idempotency key.
#[derive(Default)]
pub struct PendingSubmissions {
    keys: Mutex<HashSet<String>>,
}

/// Holds a key in [`PendingSubmissions`] until dropped.
pub struct PendingGuard<'a> {
    pending: &'a PendingSubmissions,
    key: String,
}

impl PendingSubmissions {
    fn lock_keys(&self) -> MutexGuard<'_, HashSet<String>> {
        match self.keys.lock() {
            Ok(keys) => keys,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns `None` when the key is already pending.
    pub fn acquire(&self, key: &str) -> Option<PendingGuard<'_>> {
        if !self.lock_keys().insert(key.to_string()) {
            return None;
        }
        Some(PendingGuard {
            pending: self,
            key: key.to_string(),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.lock_keys().contains(key)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock_keys().remove(&self.key);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    Rejected(Rejection),
    InvalidAmount(String),
    AlreadyPending,
    /// Network error, revert or wallet rejection. The detail is logged, never
    /// shown to the user.
    Failed(String),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Rejected(rejection) => write!(f, "{}", rejection),
            SubmissionError::InvalidAmount(message) => write!(f, "{}", message),
            SubmissionError::AlreadyPending => {
                write!(f, "An identical auction submission is already pending")
            }
            SubmissionError::Failed(_) => write!(f, "Failed to start auction, please resubmit"),
        }
    }
}

/// Starts the auction on chain with a single contract call. Failures are not
/// retried and the proposal is dropped either way; the seller resubmits.
pub async fn submit_auction(
    ctx: &AppContext,
    item_id: u64,
    proposal: AuctionProposal,
) -> Result<SubmissionReceipt, SubmissionError> {
    proposal.check().map_err(SubmissionError::Rejected)?;

    info!("Assembling auction submission for item {}", item_id);
    let submission = AuctionSubmission::assemble(item_id, &proposal, ctx.token_decimals)
        .map_err(SubmissionError::InvalidAmount)?;

    let key = submission.idempotency_key();
    let _guard = match ctx.pending.acquire(&key) {
        Some(guard) => guard,
        None => {
            warn!("Auction submission {} is already pending", key);
            return Err(SubmissionError::AlreadyPending);
        }
    };

    info!(
        "Starting auction for item {}: duration {}s, submission {}",
        item_id, submission.duration_seconds, key
    );
    match ctx.contract.start_auction(submission).await {
        Ok(receipt) => {
            info!(
                "Auction started for item {} in transaction {:?}",
                item_id, receipt.transaction_hash
            );
            Ok(receipt)
        }
        Err(e) => {
            error!("Error starting auction for item {}: {}", item_id, e);
            Err(SubmissionError::Failed(e))
        }
    }
}
