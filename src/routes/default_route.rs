use actix_web::{get, web, HttpResponse};

use crate::configuration::ScraperSettings;

use super::search_route::{render, SearchTemplate};

#[get("/")]
async fn default(settings: web::Data<ScraperSettings>) -> HttpResponse {
    render(SearchTemplate::empty(&settings))
}
