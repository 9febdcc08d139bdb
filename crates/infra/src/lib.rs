mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, IProfileRepo, IScheduleRepo, Repos};
pub use services::{
    IEmailSender, IRowSource, InMemoryEmailSender, InMemoryRowSource, NotionRowSource,
    ResendEmailSender, RowSourceError, SendFailure, SentEmail,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct DigestlyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub row_source: Arc<dyn IRowSource>,
    pub email_sender: Arc<dyn IEmailSender>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl DigestlyContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let email_sender = ResendEmailSender::new(config.resend_api_key.clone());
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            row_source: Arc::new(NotionRowSource::new()),
            email_sender: Arc::new(email_sender),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> DigestlyContext {
    DigestlyContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context with inmemory storage and stub external services, for tests
pub fn setup_context_inmemory() -> DigestlyContext {
    DigestlyContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        row_source: Arc::new(InMemoryRowSource::new()),
        email_sender: Arc::new(InMemoryEmailSender::new()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
