use super::IScheduleRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, NaiveDate, Utc};
use digestly_domain::{Schedule, ScheduleStatus, TimeOfDay, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleRaw {
    schedule_uid: Uuid,
    user_uid: Uuid,
    source_id: String,
    recipient: String,
    frequency: String,
    time_of_day: String,
    timezone: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<ScheduleRaw> for Schedule {
    fn from(raw: ScheduleRaw) -> Self {
        Self {
            id: raw.schedule_uid.into(),
            user_id: raw.user_uid.into(),
            source_id: raw.source_id,
            recipient: raw.recipient,
            frequency: raw.frequency.parse().unwrap_or(digestly_domain::Frequency::Daily),
            time_of_day: raw
                .time_of_day
                .parse()
                .unwrap_or_else(|_| TimeOfDay::from_minutes_of_day(0)),
            timezone: raw.timezone.parse().unwrap_or(chrono_tz::UTC),
            start_date: raw.start_date,
            end_date: raw.end_date,
            status: raw.status.parse().unwrap_or(ScheduleStatus::Paused),
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for PostgresScheduleRepo {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules(schedule_uid, user_uid, source_id, recipient, frequency, time_of_day, timezone, start_date, end_date, status, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.user_id.inner_ref())
        .bind(&schedule.source_id)
        .bind(&schedule.recipient)
        .bind(schedule.frequency.to_string())
        .bind(schedule.time_of_day.to_string())
        .bind(schedule.timezone.to_string())
        .bind(schedule.start_date)
        .bind(schedule.end_date)
        .bind(schedule.status.to_string())
        .bind(schedule.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET source_id = $2,
                recipient = $3,
                frequency = $4,
                time_of_day = $5,
                timezone = $6,
                start_date = $7,
                end_date = $8,
                status = $9
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(&schedule.source_id)
        .bind(&schedule.recipient)
        .bind(schedule.frequency.to_string())
        .bind(schedule.time_of_day.to_string())
        .bind(schedule.timezone.to_string())
        .bind(schedule.start_date)
        .bind(schedule.end_date)
        .bind(schedule.status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> Option<Schedule> {
        let schedule: ScheduleRaw = match sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(schedule) => schedule,
            Err(_) => return None,
        };
        Some(schedule.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Schedule> {
        let schedules: Vec<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE user_uid = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        schedules.into_iter().map(|s| s.into()).collect()
    }

    async fn find_active_by_user(&self, user_id: &ID) -> Vec<Schedule> {
        let schedules: Vec<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE user_uid = $1 AND status = 'active'
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        schedules.into_iter().map(|s| s.into()).collect()
    }

    async fn list_due_candidates(&self) -> Vec<Schedule> {
        let schedules: Vec<ScheduleRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE status = 'active'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(schedules) => schedules,
            Err(e) => {
                error!("Unable to list due candidate schedules: {:?}", e);
                return Vec::new();
            }
        };
        schedules.into_iter().map(|s| s.into()).collect()
    }

    async fn set_status(&self, schedule_id: &ID, status: ScheduleStatus) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET status = $2
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .bind(status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn pause_all_for_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE schedules
            SET status = 'paused'
            WHERE user_uid = $1 AND status != 'paused'
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn delete(&self, schedule_id: &ID) -> Option<Schedule> {
        let schedule: ScheduleRaw = match sqlx::query_as(
            r#"
            DELETE FROM schedules
            WHERE schedule_uid = $1
            RETURNING *
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(schedule) => schedule,
            Err(_) => return None,
        };
        Some(schedule.into())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM schedules
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
