use crate::config::Config;
use crate::submission::AuctionSubmission;
use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::prelude::abigen;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{H256, U256};
use mockall::automock;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

abigen!(
    FlixeMarket,
    r#"[
        function startAuction(uint256 itemId, uint256 startPrice, uint256 bottomPrice, uint256 discountAmount, uint256 duration) external
        function getCurrentAuctionPrice(uint256 itemId) external view returns (uint256)
    ]"#
);

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
}

/// The market contract that runs auctions. Price decay and the floor are
/// enforced on chain; this side only starts auctions and reads prices.
#[automock]
#[async_trait]
pub trait AuctionContract: Send + Sync {
    async fn start_auction(
        &self,
        submission: AuctionSubmission,
    ) -> Result<SubmissionReceipt, String>;
    async fn get_current_auction_price(&self, item_id: U256) -> Result<U256, String>;
}

pub type MarketClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub struct EthersAuctionContract {
    pub market: FlixeMarket<MarketClient>,
}

impl EthersAuctionContract {
    pub fn connect(config: &Config) -> Result<EthersAuctionContract, String> {
        let provider =
            Provider::<Http>::try_from(config.rpc_url.as_str()).map_err(|e| e.to_string())?;
        let wallet = LocalWallet::from_str(&config.signer_private_key)
            .map_err(|e| format!("Invalid signer key: {}", e))?
            .with_chain_id(config.chain_id);
        let client = SignerMiddleware::new(provider, wallet);
        Ok(EthersAuctionContract {
            market: FlixeMarket::new(config.market_contract, Arc::new(client)),
        })
    }
}

#[async_trait]
impl AuctionContract for EthersAuctionContract {
    async fn start_auction(
        &self,
        submission: AuctionSubmission,
    ) -> Result<SubmissionReceipt, String> {
        let call = self.market.start_auction(
            submission.item_id,
            submission.start_price,
            submission.bottom_price,
            submission.discount_amount,
            U256::from(submission.duration_seconds),
        );
        let pending = call.send().await.map_err(|e| e.to_string())?;
        let transaction_hash = *pending;
        match pending.await.map_err(|e| e.to_string())? {
            Some(receipt) => Ok(SubmissionReceipt {
                transaction_hash: receipt.transaction_hash,
                block_number: receipt.block_number.map(|block| block.as_u64()),
            }),
            None => Err(format!("Transaction {:?} was dropped", transaction_hash)),
        }
    }

    async fn get_current_auction_price(&self, item_id: U256) -> Result<U256, String> {
        self.market
            .get_current_auction_price(item_id)
            .call()
            .await
            .map_err(|e| e.to_string())
    }
}
