use std::fmt;

/// Why a submitted listing form was refused. Nothing is committed when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    InvalidEndTime,
    NonPositiveDuration,
    NonPositiveStartPrice,
    NegativeBottomPrice,
    BottomAboveStart,
    NonFiniteInput,
    NegativeDiscount,
    DiscountNotAllowed,
    DiscountTooHigh { max: f64 },
    NonPositivePrice,
    NonPositiveRentalPeriod,
    MissingField(&'static str),
}

impl Rejection {
    /// Form field the rejection is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Rejection::InvalidEndTime | Rejection::NonPositiveDuration => "end_time",
            Rejection::NonPositiveStartPrice => "start_price",
            Rejection::NegativeBottomPrice | Rejection::BottomAboveStart => "bottom_price",
            Rejection::NonFiniteInput => "price",
            Rejection::NegativeDiscount
            | Rejection::DiscountNotAllowed
            | Rejection::DiscountTooHigh { .. } => "discount_percent_per_interval",
            Rejection::NonPositivePrice => "price",
            Rejection::NonPositiveRentalPeriod => "rental_period_seconds",
            Rejection::MissingField(field) => *field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidEndTime => "invalid_end_time",
            Rejection::NonPositiveDuration => "non_positive_duration",
            Rejection::NonPositiveStartPrice => "non_positive_start_price",
            Rejection::NegativeBottomPrice => "negative_bottom_price",
            Rejection::BottomAboveStart => "bottom_above_start",
            Rejection::NonFiniteInput => "non_finite_input",
            Rejection::NegativeDiscount => "negative_discount",
            Rejection::DiscountNotAllowed => "discount_not_allowed",
            Rejection::DiscountTooHigh { .. } => "discount_too_high",
            Rejection::NonPositivePrice => "non_positive_price",
            Rejection::NonPositiveRentalPeriod => "non_positive_rental_period",
            Rejection::MissingField(_) => "missing_field",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidEndTime => write!(f, "Auction end time is not a valid date"),
            Rejection::NonPositiveDuration => write!(f, "Auction end time must be in the future"),
            Rejection::NonPositiveStartPrice => write!(f, "Start price must be greater than 0"),
            Rejection::NegativeBottomPrice => {
                write!(f, "Bottom price must be greater than or equal to 0")
            }
            Rejection::BottomAboveStart => {
                write!(f, "Bottom price must not be greater than start price")
            }
            Rejection::NonFiniteInput => write!(f, "Prices must be finite numbers"),
            Rejection::NegativeDiscount => {
                write!(f, "Discount must be greater than or equal to 0")
            }
            Rejection::DiscountNotAllowed => {
                write!(f, "Discount requires a bottom price below the start price")
            }
            Rejection::DiscountTooHigh { max } => {
                write!(f, "Discount per interval must not exceed {:.3}%", max)
            }
            Rejection::NonPositivePrice => write!(f, "Price must be greater than 0"),
            Rejection::NonPositiveRentalPeriod => {
                write!(f, "Rental period must be greater than 0")
            }
            Rejection::MissingField(field) => write!(f, "Missing field: {}", field),
        }
    }
}
