mod create_schedule;
mod delete_schedule;
mod get_schedule;
mod get_schedules;
mod pause_schedule;
mod resume_schedule;
mod update_schedule;

use actix_web::web;
use create_schedule::create_schedule_controller;
use delete_schedule::delete_schedule_controller;
use get_schedule::get_schedule_controller;
use get_schedules::get_schedules_controller;
use pause_schedule::pause_schedule_controller;
use resume_schedule::resume_schedule_controller;
use update_schedule::update_schedule_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/schedule",
        web::post().to(create_schedule_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule",
        web::get().to(get_schedules_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}",
        web::get().to(get_schedule_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}",
        web::put().to(update_schedule_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}",
        web::delete().to(delete_schedule_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}/pause",
        web::post().to(pause_schedule_controller),
    );
    cfg.route(
        "/user/{user_id}/schedule/{schedule_id}/resume",
        web::post().to(resume_schedule_controller),
    );
}
