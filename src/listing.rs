use crate::auction::{AuctionForm, AuctionProposal};
use crate::clock::Clock;
use crate::rejection::Rejection;
use serde::{Deserialize, Serialize};

/// A stream listing has no fields of its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct StreamForm {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct FixedSaleForm {
    pub price: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RentForm {
    pub price: Option<f64>,
    pub rental_period_seconds: Option<i64>,
}

/// Listing section of the PriceForm, tagged by `kind`. Each kind only accepts
/// its own fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListingForm {
    Stream(StreamForm),
    FixedSale(FixedSaleForm),
    Auction(AuctionForm),
    Rent(RentForm),
}

impl ListingForm {
    pub fn kind(&self) -> &'static str {
        match self {
            ListingForm::Stream(_) => "stream",
            ListingForm::FixedSale(_) => "fixedSale",
            ListingForm::Auction(_) => "auction",
            ListingForm::Rent(_) => "rent",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ListingRequest {
    pub item_id: u64,
    pub listing: ListingForm,
}

/// A validated listing configuration.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListingConfig {
    Stream,
    FixedSale {
        price: f64,
    },
    Auction(AuctionProposal),
    Rent {
        price: f64,
        #[serde(rename = "rentalPeriodSeconds")]
        rental_period_seconds: i64,
    },
}

fn positive_price(price: Option<f64>) -> Result<f64, Rejection> {
    let price = price.ok_or(Rejection::MissingField("price"))?;
    if !price.is_finite() {
        return Err(Rejection::NonFiniteInput);
    }
    if price <= 0.0 {
        return Err(Rejection::NonPositivePrice);
    }
    Ok(price)
}

impl ListingConfig {
    pub fn from_form(form: &ListingForm, clock: &dyn Clock) -> Result<ListingConfig, Rejection> {
        match form {
            ListingForm::Stream(_) => Ok(ListingConfig::Stream),
            ListingForm::FixedSale(sale) => Ok(ListingConfig::FixedSale {
                price: positive_price(sale.price)?,
            }),
            ListingForm::Auction(auction) => {
                Ok(ListingConfig::Auction(AuctionProposal::from_form(auction, clock)?))
            }
            ListingForm::Rent(rent) => {
                let price = positive_price(rent.price)?;
                let rental_period_seconds = rent
                    .rental_period_seconds
                    .ok_or(Rejection::MissingField("rental_period_seconds"))?;
                if rental_period_seconds <= 0 {
                    return Err(Rejection::NonPositiveRentalPeriod);
                }
                Ok(ListingConfig::Rent {
                    price,
                    rental_period_seconds,
                })
            }
        }
    }
}
