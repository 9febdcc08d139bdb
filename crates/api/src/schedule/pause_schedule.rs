use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::pause_schedule::{APIResponse, PathParams};
use digestly_domain::{Schedule, ScheduleStatus, ID};
use digestly_infra::DigestlyContext;

pub async fn pause_schedule_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = PauseScheduleUseCase {
        user_id: path_params.user_id.clone(),
        schedule_id: path_params.schedule_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct PauseScheduleUseCase {
    pub user_id: ID,
    pub schedule_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for PauseScheduleUseCase {
    type Response = Schedule;

    type Error = UseCaseError;

    const NAME: &'static str = "PauseSchedule";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let mut schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) if schedule.user_id == self.user_id => schedule,
            _ => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };

        // Pausing a paused schedule is a no-op
        if schedule.status == ScheduleStatus::Paused {
            return Ok(schedule);
        }

        ctx.repos
            .schedules
            .set_status(&self.schedule_id, ScheduleStatus::Paused)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        schedule.status = ScheduleStatus::Paused;

        Ok(schedule)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use digestly_domain::{Frequency, Profile};
    use digestly_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn pause_is_idempotent() {
        let ctx = setup_context_inmemory();
        let owner = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&owner).await.unwrap();
        let schedule = Schedule::new(
            owner.id.clone(),
            "db-1".into(),
            "reader@digestly.io".into(),
            Frequency::Daily,
            "09:00".parse().unwrap(),
            &chrono_tz::UTC,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        for _ in 0..2 {
            let mut usecase = PauseScheduleUseCase {
                user_id: owner.id.clone(),
                schedule_id: schedule.id.clone(),
            };
            let paused = usecase.execute(&ctx).await.unwrap();
            assert_eq!(paused.status, ScheduleStatus::Paused);
        }

        let stored = ctx.repos.schedules.find(&schedule.id).await.unwrap();
        assert_eq!(stored.status, ScheduleStatus::Paused);
    }
}
