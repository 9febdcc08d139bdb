mod dispatch;
pub mod run_due_digests;
mod send_digest;

use actix_web::web;
use run_due_digests::run_due_digests_controller;
use send_digest::send_digest_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/digests/run", web::get().to(run_due_digests_controller));
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}/send",
        web::post().to(send_digest_controller),
    );
}
