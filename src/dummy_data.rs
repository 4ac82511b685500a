use crate::clock::MockClock;
use crate::contract::SubmissionReceipt;
use chrono::{DateTime, TimeZone, Utc};
use ethers::types::H256;

pub const ITEM_ID: u64 = 7;

/// "Now" for every canned request: 2023-01-01T00:00:00Z.
pub fn frozen_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_672_531_200, 0).single().unwrap()
}

pub fn frozen_clock() -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_now().returning(frozen_now);
    clock
}

pub fn new_receipt() -> SubmissionReceipt {
    SubmissionReceipt {
        transaction_hash: H256::repeat_byte(0xab),
        block_number: Some(1234),
    }
}

pub enum ListingRequestOption {
    /// 100 -> 50 over one hour at 25% per interval.
    ValidAuction,
    DiscountTooHigh,
    DiscountWithoutBottomPrice,
    EndTimeInPast,
    MissingEndTime,
    InvalidEndTime,
    MixedVariantFields,
    FixedSale,
    FixedSaleZeroPrice,
    Rent,
    Stream,
}

pub fn new_listing_request(option: ListingRequestOption) -> String {
    let listing = match option {
        ListingRequestOption::ValidAuction => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "bottomPrice": 50,
                "discountPercentPerInterval": 25,
                "endTime": { "year": 2023, "month": 1, "day": 1, "hour": 1 }
            }"#
        }
        ListingRequestOption::DiscountTooHigh => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "bottomPrice": 50,
                "discountPercentPerInterval": 26,
                "endTime": { "year": 2023, "month": 1, "day": 1, "hour": 1 }
            }"#
        }
        ListingRequestOption::DiscountWithoutBottomPrice => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "discountPercentPerInterval": 5,
                "endTime": { "year": 2023, "month": 1, "day": 1, "hour": 1 }
            }"#
        }
        ListingRequestOption::EndTimeInPast => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "bottomPrice": 50,
                "discountPercentPerInterval": 25,
                "endTime": { "year": 2022, "month": 12, "day": 31, "hour": 23 }
            }"#
        }
        ListingRequestOption::MissingEndTime => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "bottomPrice": 50
            }"#
        }
        ListingRequestOption::InvalidEndTime => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "endTime": { "year": 2023, "month": 13, "day": 1 }
            }"#
        }
        ListingRequestOption::MixedVariantFields => {
            r#"{
                "kind": "auction",
                "startPrice": 100,
                "rentalPeriodSeconds": 86400,
                "endTime": { "year": 2023, "month": 1, "day": 1, "hour": 1 }
            }"#
        }
        ListingRequestOption::FixedSale => r#"{ "kind": "fixedSale", "price": 2.5 }"#,
        ListingRequestOption::FixedSaleZeroPrice => r#"{ "kind": "fixedSale", "price": 0 }"#,
        ListingRequestOption::Rent => {
            r#"{ "kind": "rent", "price": 0.5, "rentalPeriodSeconds": 86400 }"#
        }
        ListingRequestOption::Stream => r#"{ "kind": "stream" }"#,
    };

    format!(r#"{{ "itemId": {}, "listing": {} }}"#, ITEM_ID, listing)
}
