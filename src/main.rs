use flixe_auction::clock::SystemClock;
use flixe_auction::config::Config;
use flixe_auction::context::AppContext;
use flixe_auction::contract::EthersAuctionContract;
use flixe_auction::core::request_handler;
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let config = Config::from_env()?;
    let contract = EthersAuctionContract::connect(&config)?;
    // Shared by every invocation; owns the pending-submission lock.
    let ctx = Arc::new(
        AppContext::new(Arc::new(contract), Arc::new(SystemClock), config.token_decimals)
            .with_price_poll_period(config.price_poll_period),
    );

    run(service_fn(move |event: Request| {
        let ctx = ctx.clone();
        async move { request_handler(event, &ctx).await }
    }))
    .await
}
