use std::net::TcpListener;

use env_logger::Env;
use pricewatch::{
    configuration::get_configuration,
    services::{Aggregator, HttpFetcher},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let fetcher = HttpFetcher::new(&configuration.scraper)?;
    let aggregator = Aggregator::new(fetcher, &configuration.sources, &configuration.scraper);

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    run(listener, aggregator, configuration.scraper)?.await?;

    Ok(())
}
