mod connect_integration;
mod disconnect_integration;

use actix_web::web;
use connect_integration::connect_integration_controller;
use disconnect_integration::disconnect_integration_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/integration",
        web::put().to(connect_integration_controller),
    );
    cfg.route(
        "/user/{user_id}/integration",
        web::delete().to(disconnect_integration_controller),
    );
}
