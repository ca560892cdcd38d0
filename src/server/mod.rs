//! main file for the server

mod controller;
mod mail;
pub(crate) mod model;
mod routes;
mod state;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use crate::server::controller::error::error_handlers;
use crate::server::model::config::ServerConfig;
use crate::server::routes::index::{index, not_found};
use crate::server::routes::orders::place_order;
use crate::server::state::AppState;

/// Routes and extractor settings, shared with the handler tests
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().content_type_required(false))
        .service(index)
        .service(place_order)
        .default_service(web::to(not_found));
}

/// Run the server
pub(crate) async fn run(config: ServerConfig) -> std::io::Result<()> {
    let mailer = mail::from_config(&config.mail).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(&config, mailer));
    info!(
        "Server running on http://{}, mail transport={}",
        config.addr, config.mail.transport
    );

    HttpServer::new(move || {
        App::new()
            .wrap(error_handlers())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
        .bind(config.addr)?
        .run()
        .await
}
