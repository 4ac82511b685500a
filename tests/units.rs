use ethers::types::U256;
use flixe_auction::units::{from_base_units, to_base_units};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_amounts_to_base_units() {
        assert_eq!(to_base_units(0.1, 18).unwrap(), U256::exp10(17));
        assert_eq!(to_base_units(100.0, 18).unwrap(), U256::exp10(20));
        assert_eq!(to_base_units(1.5, 6).unwrap(), U256::from(1_500_000));
        assert_eq!(to_base_units(0.0, 18).unwrap(), U256::zero());
        assert_eq!(to_base_units(42.0, 0).unwrap(), U256::from(42));
    }

    #[test]
    fn digits_past_decimals_are_truncated() {
        assert_eq!(to_base_units(0.1234567, 6).unwrap(), U256::from(123_456));
        assert_eq!(to_base_units(1.99, 1).unwrap(), U256::from(19));
    }

    #[test]
    fn invalid_amounts_are_refused() {
        assert!(to_base_units(-1.0, 18).is_err());
        assert!(to_base_units(f64::NAN, 18).is_err());
        assert!(to_base_units(f64::INFINITY, 18).is_err());
    }

    #[test]
    fn base_units_to_display_amounts() {
        assert_eq!(
            from_base_units(U256::from(15) * U256::exp10(17), 18).unwrap(),
            1.5
        );
        assert_eq!(from_base_units(U256::from(5), 2).unwrap(), 0.05);
        assert_eq!(from_base_units(U256::zero(), 18).unwrap(), 0.0);
        assert_eq!(from_base_units(U256::from(42), 0).unwrap(), 42.0);
    }
}
