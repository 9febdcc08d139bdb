use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::resume_schedule::{APIResponse, PathParams};
use digestly_domain::{can_activate, DigestLimit, Schedule, ScheduleStatus, TierPlan, ID};
use digestly_infra::DigestlyContext;

pub async fn resume_schedule_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = ResumeScheduleUseCase {
        user_id: path_params.user_id.clone(),
        schedule_id: path_params.schedule_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct ResumeScheduleUseCase {
    pub user_id: ID,
    pub schedule_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    UserNotFound(ID),
    QuotaExceeded { limit: usize },
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::QuotaExceeded { limit } => Self::QuotaExceeded { limit },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResumeScheduleUseCase {
    type Response = Schedule;

    type Error = UseCaseError;

    const NAME: &'static str = "ResumeSchedule";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let mut schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) if schedule.user_id == self.user_id => schedule,
            _ => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };

        // Resuming an active schedule is a no-op
        if schedule.status == ScheduleStatus::Active {
            return Ok(schedule);
        }

        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        // Resuming counts against the tier limit the same way a create
        // does, the paused target itself is not in the active listing
        let plan = TierPlan::for_tier(user.tier);
        let active_count = ctx
            .repos
            .schedules
            .find_active_by_user(&self.user_id)
            .await
            .len();
        if !can_activate(&plan, active_count) {
            let limit = match plan.max_digests {
                DigestLimit::Limited(limit) => limit,
                DigestLimit::Unlimited => usize::MAX,
            };
            return Err(UseCaseError::QuotaExceeded { limit });
        }

        ctx.repos
            .schedules
            .set_status(&self.schedule_id, ScheduleStatus::Active)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        schedule.status = ScheduleStatus::Active;

        Ok(schedule)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use digestly_domain::{Frequency, Profile};
    use digestly_infra::setup_context_inmemory;

    fn schedule_for(owner: &Profile) -> Schedule {
        Schedule::new(
            owner.id.clone(),
            "db-1".into(),
            "reader@digestly.io".into(),
            Frequency::Daily,
            "09:00".parse().unwrap(),
            &chrono_tz::UTC,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    #[actix_web::main]
    #[test]
    async fn resume_is_idempotent_and_quota_checked() {
        let ctx = setup_context_inmemory();
        let owner = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&owner).await.unwrap();

        // Three actives fill the free tier, the fourth is paused
        for _ in 0..3 {
            let schedule = schedule_for(&owner);
            ctx.repos.schedules.insert(&schedule).await.unwrap();
        }
        let paused = schedule_for(&owner);
        ctx.repos.schedules.insert(&paused).await.unwrap();
        ctx.repos
            .schedules
            .set_status(&paused.id, ScheduleStatus::Paused)
            .await
            .unwrap();

        let mut usecase = ResumeScheduleUseCase {
            user_id: owner.id.clone(),
            schedule_id: paused.id.clone(),
        };
        match usecase.execute(&ctx).await {
            Err(UseCaseError::QuotaExceeded { limit }) => assert_eq!(limit, 3),
            res => panic!("Expected quota rejection, got {:?}", res),
        }

        // Free up a slot, then the resume goes through, twice
        let actives = ctx.repos.schedules.find_active_by_user(&owner.id).await;
        ctx.repos
            .schedules
            .set_status(&actives[0].id, ScheduleStatus::Paused)
            .await
            .unwrap();

        for _ in 0..2 {
            let mut usecase = ResumeScheduleUseCase {
                user_id: owner.id.clone(),
                schedule_id: paused.id.clone(),
            };
            let resumed = usecase.execute(&ctx).await.unwrap();
            assert_eq!(resumed.status, ScheduleStatus::Active);
        }
    }
}
