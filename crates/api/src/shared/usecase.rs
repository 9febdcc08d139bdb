use digestly_infra::DigestlyContext;
use std::fmt::Debug;
use tracing::error;

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Error: Debug;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error>;
}

/// Runs a `UseCase` against the infrastructure context and logs any
/// error it produces
#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &DigestlyContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!(usecase = U::NAME, "Use case error: {:?}", e);
    }

    res
}
