use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::ScraperSettings,
    routes::{default_route, search_route},
    services::{Aggregator, HttpFetcher},
};

pub fn run(
    listener: TcpListener,
    aggregator: Aggregator<HttpFetcher>,
    scraper_settings: ScraperSettings,
) -> Result<Server, std::io::Error> {
    let aggregator = web::Data::new(aggregator);
    let scraper_settings = web::Data::new(scraper_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(search_route::search)
            .service(search_route::api_search)
            .app_data(aggregator.clone())
            .app_data(scraper_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
