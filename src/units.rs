use ethers::types::U256;

/// Converts a display amount to the token's integer base units. The amount is
/// rendered in its shortest decimal form first, so `0.1` becomes exactly
/// `10^(decimals - 1)`. Digits past `decimals` are truncated.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<U256, String> {
    if !amount.is_finite() {
        return Err(format!("{} is not a finite amount", amount));
    }
    if amount < 0.0 {
        return Err("Amount must be greater than or equal to 0".to_string());
    }
    if amount == 0.0 {
        return Ok(U256::zero());
    }

    let rendered = amount.to_string();
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (rendered.as_str(), ""),
    };
    let decimals = decimals as usize;
    let fraction = &fraction[..fraction.len().min(decimals)];
    let digits = format!("{}{}{}", whole, fraction, "0".repeat(decimals - fraction.len()));

    U256::from_dec_str(&digits).map_err(|e| format!("{} base units overflow: {:?}", amount, e))
}

/// Converts base units back to a display amount.
pub fn from_base_units(amount: U256, decimals: u8) -> Result<f64, String> {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    format!("{}.{}", whole, fraction)
        .parse::<f64>()
        .map_err(|e| format!("Failed to read {} base units: {}", amount, e))
}
