use dotenv::dotenv;
use ethers::types::Address;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
pub const DEFAULT_PRICE_POLL_SECONDS: u64 = 30;
/// Shortest price poll period; `tokio::time::interval` panics on zero.
pub const MIN_PRICE_POLL_PERIOD: Duration = Duration::from_secs(1);

fn get_var<F>(lookup: &F, name: &str) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or(format!("env var \"{}\" not set", name))
}

fn parse_var<F, T>(lookup: &F, name: &str, default: Option<T>) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| format!("env var \"{}\" is invalid: {}", name, e)),
        None => default.ok_or(format!("env var \"{}\" not set", name)),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub signer_private_key: String,
    pub market_contract: Address,
    pub token_decimals: u8,
    pub price_poll_period: Duration,
}

impl Config {
    /// Reads the environment, loading `.env` first when present.
    pub fn from_env() -> Result<Config, String> {
        dotenv().ok();
        Config::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name-to-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let market_contract = get_var(&lookup, "MARKET_CONTRACT")?;
        let market_contract = Address::from_str(&market_contract)
            .map_err(|e| format!("env var \"MARKET_CONTRACT\" is invalid: {}", e))?;
        let price_poll_seconds =
            parse_var::<_, u64>(&lookup, "PRICE_POLL_SECONDS", Some(DEFAULT_PRICE_POLL_SECONDS))?;
        if price_poll_seconds == 0 {
            return Err("env var \"PRICE_POLL_SECONDS\" must be greater than 0".to_string());
        }

        Ok(Config {
            rpc_url: get_var(&lookup, "RPC_URL")?,
            chain_id: parse_var::<_, u64>(&lookup, "CHAIN_ID", None)?,
            signer_private_key: get_var(&lookup, "SIGNER_PRIVATE_KEY")?,
            market_contract,
            token_decimals: parse_var::<_, u8>(
                &lookup,
                "TOKEN_DECIMALS",
                Some(DEFAULT_TOKEN_DECIMALS),
            )?,
            price_poll_period: Duration::from_secs(price_poll_seconds),
        })
    }
}
