use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::connect_integration::{
    APIResponse, PathParams, RequestBody,
};
use digestly_domain::ID;
use digestly_infra::DigestlyContext;

pub async fn connect_integration_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = ConnectIntegrationUseCase {
        user_id: path_params.user_id.clone(),
        access_token: body.0.access_token,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse { connected: true }))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct ConnectIntegrationUseCase {
    pub user_id: ID,
    pub access_token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    EmptyAccessToken,
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::EmptyAccessToken => {
                Self::BadClientData("The access token cannot be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ConnectIntegrationUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "ConnectIntegration";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        if self.access_token.trim().is_empty() {
            return Err(UseCaseError::EmptyAccessToken);
        }

        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        ctx.repos
            .profiles
            .set_credential(&user.id, Some(&self.access_token))
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
