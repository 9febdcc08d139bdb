use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::disconnect_integration::{APIResponse, PathParams};
use digestly_domain::ID;
use digestly_infra::DigestlyContext;

pub async fn disconnect_integration_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DisconnectIntegrationUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                connected: false,
                paused_schedules: res.paused_schedules,
            })
        })
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct DisconnectIntegrationUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub paused_schedules: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DisconnectIntegrationUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DisconnectIntegration";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        ctx.repos
            .profiles
            .set_credential(&user.id, None)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // Without a credential no dispatch can succeed, so every
        // schedule gets paused with the disconnect
        let paused_schedules = ctx
            .repos
            .schedules
            .pause_all_for_user(&user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            paused_schedules: paused_schedules as usize,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use digestly_domain::{Frequency, Profile, Schedule, ScheduleStatus};
    use digestly_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn clears_credential_and_pauses_schedules() {
        let ctx = setup_context_inmemory();
        let user = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&user).await.unwrap();
        ctx.repos
            .profiles
            .set_credential(&user.id, Some("secret-token"))
            .await
            .unwrap();

        let mut schedules = Vec::new();
        for _ in 0..3 {
            let schedule = Schedule::new(
                user.id.clone(),
                "db-1".into(),
                "reader@digestly.io".into(),
                Frequency::Daily,
                "09:00".parse().unwrap(),
                &chrono_tz::UTC,
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            );
            ctx.repos.schedules.insert(&schedule).await.unwrap();
            schedules.push(schedule);
        }
        // One is already paused and must not be counted
        ctx.repos
            .schedules
            .set_status(&schedules[0].id, ScheduleStatus::Paused)
            .await
            .unwrap();

        let mut usecase = DisconnectIntegrationUseCase {
            user_id: user.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.paused_schedules, 2);

        let stored = ctx.repos.profiles.find(&user.id).await.unwrap();
        assert!(!stored.is_connected());
        assert!(ctx
            .repos
            .schedules
            .find_active_by_user(&user.id)
            .await
            .is_empty());
    }
}
