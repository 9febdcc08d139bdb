use crate::error::DigestlyError;
use crate::shared::auth::{protect_admin_route, resolve_user};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::get_schedules::{APIResponse, PathParams};
use digestly_domain::{Schedule, ID};
use digestly_infra::DigestlyContext;

pub async fn get_schedules_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;
    let user = resolve_user(&path_params.user_id, &ctx).await?;

    let usecase = GetSchedulesUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|schedules| HttpResponse::Ok().json(APIResponse::new(schedules)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct GetSchedulesUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSchedulesUseCase {
    type Response = Vec<Schedule>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSchedules";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.schedules.find_by_user(&self.user_id).await)
    }
}
