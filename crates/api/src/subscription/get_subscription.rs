use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::dtos::SubscriptionDTO;
use digestly_api_structs::get_subscription::{APIResponse, PathParams};
use digestly_domain::{TierPlan, ID};
use digestly_infra::DigestlyContext;

pub async fn get_subscription_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetSubscriptionUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Ok().json(APIResponse::new(subscription)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct GetSubscriptionUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionUseCase {
    type Response = SubscriptionDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSubscription";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let active_digests = ctx
            .repos
            .schedules
            .find_active_by_user(&self.user_id)
            .await
            .len();

        Ok(SubscriptionDTO::new(
            TierPlan::for_tier(user.tier),
            active_digests,
        ))
    }
}
