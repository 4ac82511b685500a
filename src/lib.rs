pub mod auction;
pub mod clock;
pub mod config;
pub mod context;
pub mod contract;
pub mod core;
pub mod dummy_data;
pub mod listing;
pub mod price_reader;
pub mod pricing;
pub mod rejection;
pub mod submission;
pub mod time_delta;
pub mod units;
