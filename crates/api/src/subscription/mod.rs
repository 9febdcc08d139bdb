mod get_subscription;
mod update_subscription;

use actix_web::web;
use get_subscription::get_subscription_controller;
use update_subscription::update_subscription_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/subscription",
        web::get().to(get_subscription_controller),
    );
    cfg.route(
        "/user/{user_id}/subscription",
        web::post().to(update_subscription_controller),
    );
}
