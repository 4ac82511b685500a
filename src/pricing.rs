use crate::rejection::Rejection;
use serde::Serialize;

/// Length of one discount step. The auction contract lowers the price once per
/// interval.
pub const DISCOUNT_INTERVAL_SECONDS: i64 = 1800;

/// Decimal places the submitted discount is compared at.
pub const DISCOUNT_TOLERANCE_DECIMALS: i32 = 3;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLimits {
    /// Total percentage the price may fall over the whole auction.
    pub max_allowed_discount_percent: f64,
    /// Real-valued, not floored.
    pub interval_count: f64,
    pub max_discount_per_interval: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCheck {
    pub limits: DiscountLimits,
    pub discount_percent_per_interval: f64,
    /// Absolute currency units taken off per interval.
    pub discount_amount: f64,
}

fn has_floor(start_price: f64, bottom_price: Option<f64>) -> bool {
    matches!(bottom_price, Some(bottom) if bottom < start_price)
}

fn round_to_tolerance(value: f64) -> f64 {
    let scale = 10f64.powi(DISCOUNT_TOLERANCE_DECIMALS);
    (value * scale).round() / scale
}

/// Largest per-interval discount that keeps the price at or above the floor
/// until the auction ends. Without a floor below the start price every limit
/// is zero.
pub fn discount_limits(
    start_price: f64,
    bottom_price: Option<f64>,
    duration_seconds: i64,
) -> Result<DiscountLimits, Rejection> {
    if !start_price.is_finite() || !bottom_price.map_or(true, f64::is_finite) {
        return Err(Rejection::NonFiniteInput);
    }
    if duration_seconds <= 0 {
        return Err(Rejection::NonPositiveDuration);
    }
    if start_price <= 0.0 {
        return Err(Rejection::NonPositiveStartPrice);
    }
    if bottom_price.map_or(false, |bottom| bottom < 0.0) {
        return Err(Rejection::NegativeBottomPrice);
    }

    let interval_count = duration_seconds as f64 / DISCOUNT_INTERVAL_SECONDS as f64;
    let bottom_price = match bottom_price {
        Some(bottom) if has_floor(start_price, Some(bottom)) => bottom,
        _ => {
            return Ok(DiscountLimits {
                max_allowed_discount_percent: 0.0,
                interval_count,
                max_discount_per_interval: 0.0,
            })
        }
    };

    let max_allowed_discount_percent = (start_price - bottom_price) / start_price * 100.0;
    Ok(DiscountLimits {
        max_allowed_discount_percent,
        interval_count,
        max_discount_per_interval: max_allowed_discount_percent / interval_count,
    })
}

/// Checks a requested per-interval discount against [`discount_limits`].
/// A missing discount counts as zero.
pub fn validate_discount(
    start_price: f64,
    bottom_price: Option<f64>,
    duration_seconds: i64,
    discount_percent_per_interval: Option<f64>,
) -> Result<DiscountCheck, Rejection> {
    let limits = discount_limits(start_price, bottom_price, duration_seconds)?;
    let discount = discount_percent_per_interval.unwrap_or(0.0);
    if !discount.is_finite() {
        return Err(Rejection::NonFiniteInput);
    }
    if discount < 0.0 {
        return Err(Rejection::NegativeDiscount);
    }

    if !has_floor(start_price, bottom_price) {
        if discount != 0.0 {
            return Err(Rejection::DiscountNotAllowed);
        }
    } else if round_to_tolerance(discount) > round_to_tolerance(limits.max_discount_per_interval)
    {
        return Err(Rejection::DiscountTooHigh {
            max: limits.max_discount_per_interval,
        });
    }

    let discount_amount = start_price * discount / 100.0;
    if discount_amount < 0.0 {
        return Err(Rejection::NegativeDiscount);
    }

    Ok(DiscountCheck {
        limits,
        discount_percent_per_interval: discount,
        discount_amount,
    })
}

/// Preview of the linear decay the contract applies: one discount step per
/// completed interval, never below `bottom_price`.
pub fn projected_price(
    start_price: f64,
    bottom_price: f64,
    discount_percent_per_interval: f64,
    elapsed_seconds: i64,
) -> f64 {
    let intervals = elapsed_seconds.max(0) / DISCOUNT_INTERVAL_SECONDS;
    let price = start_price * (1.0 - discount_percent_per_interval * intervals as f64 / 100.0);
    price.max(bottom_price)
}
