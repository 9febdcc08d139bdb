use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::delete_schedule::{APIResponse, PathParams};
use digestly_domain::{Schedule, ID};
use digestly_infra::DigestlyContext;

pub async fn delete_schedule_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteScheduleUseCase {
        user_id: path_params.user_id.clone(),
        schedule_id: path_params.schedule_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct DeleteScheduleUseCase {
    pub user_id: ID,
    pub schedule_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteScheduleUseCase {
    type Response = Schedule;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSchedule";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) if schedule.user_id == self.user_id => {
                ctx.repos
                    .schedules
                    .delete(&self.schedule_id)
                    .await
                    .ok_or_else(|| UseCaseError::NotFound(self.schedule_id.clone()))?;
                Ok(schedule)
            }
            _ => Err(UseCaseError::NotFound(self.schedule_id.clone())),
        }
    }
}
