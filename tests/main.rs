use ethers::types::U256;
use flixe_auction::auction::AuctionProposal;
use flixe_auction::context::AppContext;
use flixe_auction::contract::MockAuctionContract;
use flixe_auction::core::request_handler;
use flixe_auction::dummy_data::{self, ListingRequestOption, ITEM_ID};
use flixe_auction::submission::AuctionSubmission;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, Response};
use serde_json::{json, Value};
use std::sync::Arc;

fn new_context(contract: MockAuctionContract) -> AppContext {
    AppContext::new(Arc::new(contract), Arc::new(dummy_data::frozen_clock()), 18)
}

fn put_request(option: ListingRequestOption) -> Request {
    let mut r = Request::new(Body::from(dummy_data::new_listing_request(option)));
    *r.method_mut() = Method::PUT;
    r
}

fn get_request(path: &str) -> Request {
    let mut r = Request::default();
    *r.method_mut() = Method::GET;
    *r.uri_mut() = path.parse().unwrap();
    r
}

fn body_text(response: &Response<Body>) -> String {
    match response.body() {
        Body::Text(msg) => msg.clone(),
        _ => panic!("Malformed response"),
    }
}

fn body_json(response: &Response<Body>) -> Value {
    serde_json::from_str(&body_text(response)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_handler_no_body() {
        let ctx = new_context(MockAuctionContract::new());
        let mut r = Request::default();
        *r.method_mut() = Method::PUT;
        let response = request_handler(r, &ctx).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "Request body missing");
    }

    #[tokio::test]
    async fn request_handler_invalid_body() {
        let ctx = new_context(MockAuctionContract::new());
        let mut r = Request::new(Body::from("invalid body"));
        *r.method_mut() = Method::PUT;
        let response = request_handler(r, &ctx).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "expected value at line 1 column 1");
    }

    #[tokio::test]
    async fn request_handler_discount_too_high() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::DiscountTooHigh), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(&response),
            "Discount per interval must not exceed 25.000%"
        );
    }

    #[tokio::test]
    async fn request_handler_discount_without_bottom_price() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(
            put_request(ListingRequestOption::DiscountWithoutBottomPrice),
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(&response),
            "Discount requires a bottom price below the start price"
        );
    }

    #[tokio::test]
    async fn request_handler_end_time_in_past() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::EndTimeInPast), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "Auction end time must be in the future");
    }

    #[tokio::test]
    async fn request_handler_missing_end_time() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::MissingEndTime), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "Auction end time must be in the future");
    }

    #[tokio::test]
    async fn request_handler_invalid_end_time() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::InvalidEndTime), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&response).contains("Auction end time is not a valid date"));
    }

    #[tokio::test]
    async fn request_handler_mixed_variant_fields() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(
            put_request(ListingRequestOption::MixedVariantFields),
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&response).contains("unknown field `rentalPeriodSeconds`"));
    }

    #[tokio::test]
    async fn request_handler_fixed_sale() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::FixedSale), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(&response), json!({ "kind": "fixedSale", "price": 2.5 }));
    }

    #[tokio::test]
    async fn request_handler_fixed_sale_zero_price() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(
            put_request(ListingRequestOption::FixedSaleZeroPrice),
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "Price must be greater than 0");
    }

    #[tokio::test]
    async fn request_handler_rent_and_stream() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(put_request(ListingRequestOption::Rent), &ctx)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(&response),
            json!({ "kind": "rent", "price": 0.5, "rentalPeriodSeconds": 86400 })
        );

        let response = request_handler(put_request(ListingRequestOption::Stream), &ctx)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(&response), json!({ "kind": "stream" }));
    }

    #[tokio::test]
    async fn request_handler_auction_happy_path() {
        let mut contract = MockAuctionContract::new();
        contract
            .expect_start_auction()
            .withf(|submission| {
                submission.item_id == U256::from(ITEM_ID)
                    && submission.start_price == U256::exp10(20)
                    && submission.bottom_price == U256::from(5) * U256::exp10(19)
                    && submission.discount_amount == U256::from(25) * U256::exp10(18)
                    && submission.duration_seconds == 3600
            })
            .times(1)
            .returning(|_| Ok(dummy_data::new_receipt()));
        let ctx = new_context(contract);

        let response = request_handler(put_request(ListingRequestOption::ValidAuction), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(&response);
        assert_eq!(
            body["transactionHash"],
            serde_json::to_value(dummy_data::new_receipt().transaction_hash).unwrap()
        );
        assert_eq!(body["blockNumber"], json!(1234));
        assert_eq!(body["durationSeconds"], json!(3600));
        assert_eq!(body["discountAmount"], json!(25.0));
        assert_eq!(body["projectedEndPrice"], json!(50.0));
    }

    #[tokio::test]
    async fn request_handler_auction_contract_failure() {
        let mut contract = MockAuctionContract::new();
        contract
            .expect_start_auction()
            .times(1)
            .returning(|_| Err("execution reverted".to_string()));
        let ctx = new_context(contract);

        let response = request_handler(put_request(ListingRequestOption::ValidAuction), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_text(&response), "Failed to start auction, please resubmit");
    }

    #[tokio::test]
    async fn request_handler_auction_already_pending() {
        let ctx = new_context(MockAuctionContract::new());
        let proposal = AuctionProposal::new(100.0, Some(50.0), Some(25.0), 3600).unwrap();
        let key = AuctionSubmission::assemble(ITEM_ID, &proposal, 18)
            .unwrap()
            .idempotency_key();
        let _guard = ctx.pending.acquire(&key).unwrap();

        let response = request_handler(put_request(ListingRequestOption::ValidAuction), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_text(&response),
            "An identical auction submission is already pending"
        );
    }

    #[tokio::test]
    async fn request_handler_get_price() {
        let mut contract = MockAuctionContract::new();
        contract
            .expect_get_current_auction_price()
            .withf(|item_id| *item_id == U256::from(ITEM_ID))
            .times(1)
            .returning(|_| Ok(U256::from(75) * U256::exp10(18)));
        let ctx = new_context(contract);

        let response = request_handler(get_request("/auctions/7/price"), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(&response);
        assert_eq!(body["itemId"], json!(7));
        assert_eq!(body["price"], json!(75.0));
        assert_eq!(
            body["priceBaseUnits"],
            serde_json::to_value(U256::from(75) * U256::exp10(18)).unwrap()
        );
        assert_eq!(
            body["updatedAt"],
            serde_json::to_value(dummy_data::frozen_now()).unwrap()
        );
        assert_eq!(body["refreshAfterSeconds"], json!(30));
    }

    #[tokio::test]
    async fn request_handler_get_price_invalid_item_id() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(get_request("/auctions/abc/price"), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), "Invalid item id");
    }

    #[tokio::test]
    async fn request_handler_get_price_contract_failure() {
        let mut contract = MockAuctionContract::new();
        contract
            .expect_get_current_auction_price()
            .returning(|_| Err("connection refused".to_string()));
        let ctx = new_context(contract);

        let response = request_handler(get_request("/prod/auctions/7/price"), &ctx)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_text(&response), "Failed to read auction price");
    }

    #[tokio::test]
    async fn request_handler_unknown_path_and_methods() {
        let ctx = new_context(MockAuctionContract::new());
        let response = request_handler(get_request("/auctions"), &ctx).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let mut r = Request::default();
        *r.method_mut() = Method::OPTIONS;
        let response = request_handler(r, &ctx).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut r = Request::default();
        *r.method_mut() = Method::DELETE;
        let response = request_handler(r, &ctx).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body_text(&response), "Method not implemented");
    }
}
