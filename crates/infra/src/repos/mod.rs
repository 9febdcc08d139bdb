mod profile;
mod schedule;
mod shared;

pub use profile::IProfileRepo;
use profile::{InMemoryProfileRepo, PostgresProfileRepo};
pub use schedule::IScheduleRepo;
use schedule::{InMemoryScheduleRepo, PostgresScheduleRepo};
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub schedules: Arc<dyn IScheduleRepo>,
    pub profiles: Arc<dyn IProfileRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            schedules: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            schedules: Arc::new(InMemoryScheduleRepo::new()),
            profiles: Arc::new(InMemoryProfileRepo::new()),
        }
    }
}
