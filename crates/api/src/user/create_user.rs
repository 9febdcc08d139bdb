use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::create_user::{APIResponse, RequestBody};
use digestly_domain::{is_valid_email, Profile};
use digestly_infra::DigestlyContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = CreateUserUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    UserAlreadyExists(String),
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::UserAlreadyExists(email) => Self::Conflict(format!(
                "A user with the email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = Profile;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        if !is_valid_email(&self.email) {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }
        if ctx.repos.profiles.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists(self.email.clone()));
        }

        let user = Profile::new(self.email.clone());
        ctx.repos
            .profiles
            .insert(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}
