use crate::error::DigestlyError;
use actix_web::HttpRequest;
use digestly_domain::{Profile, ID};
use digestly_infra::DigestlyContext;

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let token = req.headers().get("authorization")?.to_str().ok()?;
    token
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Protects account management routes with the admin api key
pub fn protect_admin_route(req: &HttpRequest, ctx: &DigestlyContext) -> Result<(), DigestlyError> {
    match bearer_token(req) {
        Some(token) if token == ctx.config.api_secret_code => Ok(()),
        _ => Err(DigestlyError::Unauthorized(
            "Invalid api key provided".into(),
        )),
    }
}

/// Protects the cron dispatch route with its dedicated key
pub fn protect_cron_route(req: &HttpRequest, ctx: &DigestlyContext) -> Result<(), DigestlyError> {
    match bearer_token(req) {
        Some(token) if token == ctx.config.cron_api_key => Ok(()),
        _ => Err(DigestlyError::Unauthorized(
            "Invalid cron api key provided".into(),
        )),
    }
}

pub async fn resolve_user(user_id: &ID, ctx: &DigestlyContext) -> Result<Profile, DigestlyError> {
    match ctx.repos.profiles.find(user_id).await {
        Some(profile) => Ok(profile),
        None => Err(DigestlyError::NotFound(format!(
            "The user with id: {}, was not found.",
            user_id
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use digestly_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn rejects_missing_and_invalid_api_keys() {
        let ctx = setup_context_inmemory();

        let no_header = TestRequest::default().to_http_request();
        assert!(protect_admin_route(&no_header, &ctx).is_err());
        assert!(protect_cron_route(&no_header, &ctx).is_err());

        let bad_key = TestRequest::default()
            .insert_header(("Authorization", "Bearer definitely-wrong"))
            .to_http_request();
        assert!(protect_admin_route(&bad_key, &ctx).is_err());
        assert!(protect_cron_route(&bad_key, &ctx).is_err());
    }

    #[actix_web::main]
    #[test]
    async fn accepts_the_configured_keys() {
        let ctx = setup_context_inmemory();

        let admin = TestRequest::default()
            .insert_header((
                "Authorization",
                format!("Bearer {}", ctx.config.api_secret_code),
            ))
            .to_http_request();
        assert!(protect_admin_route(&admin, &ctx).is_ok());
        assert!(protect_cron_route(&admin, &ctx).is_err());

        let cron = TestRequest::default()
            .insert_header((
                "Authorization",
                format!("Bearer {}", ctx.config.cron_api_key),
            ))
            .to_http_request();
        assert!(protect_cron_route(&cron, &ctx).is_ok());
    }
}
