use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::update_subscription::{
    APIResponse, PathParams, RequestBody,
};
use digestly_domain::{
    reconcile_after_tier_change, ScheduleStatus, SubscriptionTier, TierPlan, ID,
};
use digestly_infra::DigestlyContext;
use tracing::warn;

pub async fn update_subscription_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpdateSubscriptionUseCase {
        user_id: path_params.user_id.clone(),
        tier: body.0.tier,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                tier: res.tier,
                paused_schedules: res.paused_schedules,
            })
        })
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct UpdateSubscriptionUseCase {
    pub user_id: ID,
    pub tier: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub tier: SubscriptionTier,
    pub paused_schedules: Vec<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    InvalidTier(String),
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::InvalidTier(tier) => Self::BadClientData(format!(
                "Invalid tier: {}, expected one of free, pro or enterprise",
                tier
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSubscriptionUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSubscription";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let tier = self
            .tier
            .parse::<SubscriptionTier>()
            .map_err(|_| UseCaseError::InvalidTier(self.tier.clone()))?;

        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        ctx.repos
            .profiles
            .set_tier(&user.id, tier)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // Shrink the active set to the new limit. Pauses are persisted
        // one at a time, a failed pause is logged and skipped so a
        // single bad row cannot block the tier change.
        let active = ctx.repos.schedules.find_active_by_user(&self.user_id).await;
        let reconciliation = reconcile_after_tier_change(&TierPlan::for_tier(tier), &active);

        let mut paused_schedules = Vec::new();
        for schedule_id in &reconciliation.to_pause {
            match ctx
                .repos
                .schedules
                .set_status(schedule_id, ScheduleStatus::Paused)
                .await
            {
                Ok(_) => paused_schedules.push(schedule_id.clone()),
                Err(e) => warn!(
                    schedule_id = %schedule_id,
                    "Unable to pause schedule over the new tier limit: {:?}", e
                ),
            }
        }

        Ok(UseCaseRes {
            tier,
            paused_schedules,
        })
    }
}
