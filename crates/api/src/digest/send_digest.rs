use super::dispatch::{dispatch_schedule, DispatchResult};
use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::send_digest::{APIResponse, PathParams};
use digestly_domain::ID;
use digestly_infra::DigestlyContext;

pub async fn send_digest_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = SendDigestUseCase {
        user_id: path_params.user_id.clone(),
        schedule_id: path_params.schedule_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|result| {
            HttpResponse::Ok().json(APIResponse {
                result: result.into_dto(),
            })
        })
        .map_err(DigestlyError::from)
}

/// Immediate one-off dispatch of a single schedule, due or not. Paused
/// schedules can be triggered too, the owner asked for it explicitly.
#[derive(Debug)]
pub struct SendDigestUseCase {
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
impl UseCase for SendDigestUseCase {
    type Response = DispatchResult;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDigest";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) if schedule.user_id == self.user_id => schedule,
            _ => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };

        Ok(dispatch_schedule(&schedule, ctx).await)
    }
}
