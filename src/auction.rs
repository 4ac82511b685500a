use crate::clock::Clock;
use crate::pricing::{discount_limits, projected_price, validate_discount};
use crate::rejection::Rejection;
use crate::time_delta::{get_time_difference_in_sec, TargetTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Auction fields of the listing form, before validation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AuctionForm {
    pub start_price: Option<f64>,
    pub bottom_price: Option<f64>,
    pub discount_percent_per_interval: Option<f64>,
    pub end_time: Option<TargetTime>,
}

/// A declining-price auction that passed validation. It is consumed by a single
/// submission and never stored.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuctionProposal {
    pub start_price: f64,
    /// Equal to `start_price` when the seller set no floor.
    pub bottom_price: f64,
    pub discount_percent_per_interval: f64,
    pub duration_seconds: i64,
}

impl AuctionProposal {
    pub fn new(
        start_price: f64,
        bottom_price: Option<f64>,
        discount_percent_per_interval: Option<f64>,
        duration_seconds: i64,
    ) -> Result<AuctionProposal, Rejection> {
        discount_limits(start_price, bottom_price, duration_seconds)?;
        if bottom_price.map_or(false, |bottom| bottom > start_price) {
            return Err(Rejection::BottomAboveStart);
        }
        let check = validate_discount(
            start_price,
            bottom_price,
            duration_seconds,
            discount_percent_per_interval,
        )?;

        Ok(AuctionProposal {
            start_price,
            bottom_price: bottom_price.unwrap_or(start_price),
            discount_percent_per_interval: check.discount_percent_per_interval,
            duration_seconds,
        })
    }

    /// Builds a proposal from the form, measuring the duration from `clock`.
    pub fn from_form(form: &AuctionForm, clock: &dyn Clock) -> Result<AuctionProposal, Rejection> {
        let start_price = form
            .start_price
            .ok_or(Rejection::MissingField("start_price"))?;
        let duration_seconds = get_time_difference_in_sec(form.end_time.as_ref(), clock);
        AuctionProposal::new(
            start_price,
            form.bottom_price,
            form.discount_percent_per_interval,
            duration_seconds,
        )
    }

    /// Re-runs construction checks. Fields are public, so a proposal built by
    /// hand may not hold the invariants.
    pub fn check(&self) -> Result<(), Rejection> {
        AuctionProposal::new(
            self.start_price,
            Some(self.bottom_price),
            Some(self.discount_percent_per_interval),
            self.duration_seconds,
        )
        .map(|_| ())
    }

    pub fn discount_amount(&self) -> f64 {
        self.start_price * self.discount_percent_per_interval / 100.0
    }

    /// Price the contract is expected to reach when the auction ends.
    pub fn projected_end_price(&self) -> f64 {
        projected_price(
            self.start_price,
            self.bottom_price,
            self.discount_percent_per_interval,
            self.duration_seconds,
        )
    }
}

impl Validate for AuctionProposal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self.check() {
            Ok(_) => Ok(()),
            Err(rejection) => {
                let mut errors = ValidationErrors::new();
                errors.add(rejection.field(), ValidationError::new(rejection.code()));
                Err(errors)
            }
        }
    }
}
