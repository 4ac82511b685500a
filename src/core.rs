use crate::auction::AuctionProposal;
use crate::context::AppContext;
use crate::listing::{ListingConfig, ListingRequest};
use crate::price_reader::{LiveAuctionState, LivePriceReader};
use crate::submission::{submit_auction, SubmissionError};
use ethers::types::H256;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Error, Request, Response};
use serde::Serialize;
use serde_json::from_str;
use tracing::{error, info, warn};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuctionStarted {
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
    pub duration_seconds: i64,
    pub discount_amount: f64,
    pub projected_end_price: f64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(flatten)]
    pub state: LiveAuctionState,
    pub refresh_after_seconds: u64,
}

pub async fn request_handler(event: Request, ctx: &AppContext) -> Result<Response<Body>, Error> {
    match event.method() {
        &Method::PUT => put_request_handler(event, ctx).await,
        &Method::GET => get_request_handler(event, ctx).await,
        &Method::OPTIONS => build_response(StatusCode::OK, "OK"),
        _ => build_response(StatusCode::NOT_IMPLEMENTED, "Method not implemented"),
    }
}

/// Validates a submitted listing form and starts the auction when the listing
/// is one.
pub async fn put_request_handler(
    event: Request,
    ctx: &AppContext,
) -> Result<Response<Body>, Error> {
    // Deserialize the request body into a `ListingRequest`
    info!("Deserializing request body");
    let listing_request = match event.body() {
        Body::Text(body) => from_str::<ListingRequest>(body),
        _ => return build_response(StatusCode::BAD_REQUEST, "Request body missing"),
    };
    let listing_request = match listing_request {
        Ok(listing_request) => listing_request,
        Err(e) => return build_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    info!(
        "Validating {} listing for item {}",
        listing_request.listing.kind(),
        listing_request.item_id
    );
    let listing = match ListingConfig::from_form(&listing_request.listing, ctx.clock.as_ref()) {
        Ok(listing) => listing,
        Err(rejection) => return build_response(StatusCode::BAD_REQUEST, &rejection.to_string()),
    };

    match listing {
        ListingConfig::Auction(proposal) => {
            start_auction(listing_request.item_id, proposal, ctx).await
        }
        listing => build_response(StatusCode::OK, &serde_json::to_string(&listing)?),
    }
}

async fn start_auction(
    item_id: u64,
    proposal: AuctionProposal,
    ctx: &AppContext,
) -> Result<Response<Body>, Error> {
    let duration_seconds = proposal.duration_seconds;
    let discount_amount = proposal.discount_amount();
    let projected_end_price = proposal.projected_end_price();

    match submit_auction(ctx, item_id, proposal).await {
        Ok(receipt) => {
            let started = AuctionStarted {
                transaction_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                duration_seconds,
                discount_amount,
                projected_end_price,
            };
            build_response(StatusCode::OK, &serde_json::to_string(&started)?)
        }
        Err(e) => {
            let status = match e {
                SubmissionError::Rejected(_) | SubmissionError::InvalidAmount(_) => {
                    StatusCode::BAD_REQUEST
                }
                SubmissionError::AlreadyPending => StatusCode::CONFLICT,
                SubmissionError::Failed(_) => StatusCode::BAD_GATEWAY,
            };
            build_response(status, &e.to_string())
        }
    }
}

/// Serves `GET .../auctions/{itemId}/price` with one read of the live price.
pub async fn get_request_handler(
    event: Request,
    ctx: &AppContext,
) -> Result<Response<Body>, Error> {
    let segments: Vec<&str> = event.uri().path().trim_matches('/').split('/').collect();
    let item_id = match segments.as_slice() {
        [.., "auctions", item_id, "price"] => match item_id.parse::<u64>() {
            Ok(item_id) => item_id,
            Err(_) => return build_response(StatusCode::BAD_REQUEST, "Invalid item id"),
        },
        _ => return build_response(StatusCode::NOT_FOUND, "Not found"),
    };

    info!("Reading auction price for item {}", item_id);
    let reader = LivePriceReader::from_context(ctx);
    match reader.poll_once(item_id).await {
        Ok(state) => {
            let response = PriceResponse {
                state,
                refresh_after_seconds: ctx.price_poll_period.as_secs(),
            };
            build_response(StatusCode::OK, &serde_json::to_string(&response)?)
        }
        Err(e) => {
            error!("Error reading auction price for item {}: {}", item_id, e);
            build_response(StatusCode::BAD_GATEWAY, "Failed to read auction price")
        }
    }
}

fn build_response(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    match status {
        StatusCode::OK => (),
        _ => warn!("{}: {}", status, message),
    };
    let res = match Response::builder()
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET,PUT,OPTIONS")
        .header("Access-Control-Allow-Headers", "content-type")
        .status(status)
        .body(Body::from(message))
    {
        Ok(res) => res,
        Err(e) => {
            error!("Failed to build response: {}", e);
            return Err(Box::new(e));
        }
    };
    Ok(res)
}
