mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use digestly_domain::{Schedule, ScheduleStatus, ID};
pub use inmemory::InMemoryScheduleRepo;
pub use postgres::PostgresScheduleRepo;

#[async_trait::async_trait]
pub trait IScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()>;
    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()>;
    async fn find(&self, schedule_id: &ID) -> Option<Schedule>;
    /// All schedules of the user, newest created first
    async fn find_by_user(&self, user_id: &ID) -> Vec<Schedule>;
    async fn find_active_by_user(&self, user_id: &ID) -> Vec<Schedule>;
    /// All active schedules regardless of owner. Time filtering is the
    /// due selector's job, not the repository's.
    async fn list_due_candidates(&self) -> Vec<Schedule>;
    /// Atomic single-row status update
    async fn set_status(&self, schedule_id: &ID, status: ScheduleStatus) -> anyhow::Result<()>;
    /// Pauses every non-paused schedule of the user, returns how many
    /// were changed
    async fn pause_all_for_user(&self, user_id: &ID) -> anyhow::Result<u64>;
    async fn delete(&self, schedule_id: &ID) -> Option<Schedule>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use chrono::NaiveDate;
    use digestly_domain::{Frequency, Profile, Schedule, ScheduleStatus};

    fn schedule_for(profile: &Profile) -> Schedule {
        Schedule::new(
            profile.id.clone(),
            "db-1".into(),
            "user@example.com".into(),
            Frequency::Daily,
            "09:00".parse().unwrap(),
            &chrono_tz::US::Pacific,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = setup_context_inmemory();
        let profile = Profile::new("owner@example.com".into());
        ctx.repos
            .profiles
            .insert(&profile)
            .await
            .expect("To insert profile");

        let schedule = schedule_for(&profile);
        assert!(ctx.repos.schedules.insert(&schedule).await.is_ok());

        let found = ctx.repos.schedules.find(&schedule.id).await.unwrap();
        assert_eq!(found.id, schedule.id);

        let by_user = ctx.repos.schedules.find_by_user(&profile.id).await;
        assert_eq!(by_user.len(), 1);

        let deleted = ctx.repos.schedules.delete(&schedule.id).await;
        assert!(deleted.is_some());
        assert!(ctx.repos.schedules.find(&schedule.id).await.is_none());
    }

    #[tokio::test]
    async fn set_status_and_active_listing() {
        let ctx = setup_context_inmemory();
        let profile = Profile::new("owner@example.com".into());
        ctx.repos.profiles.insert(&profile).await.unwrap();

        let schedule = schedule_for(&profile);
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        assert_eq!(
            ctx.repos.schedules.find_active_by_user(&profile.id).await.len(),
            1
        );
        assert_eq!(ctx.repos.schedules.list_due_candidates().await.len(), 1);

        ctx.repos
            .schedules
            .set_status(&schedule.id, ScheduleStatus::Paused)
            .await
            .unwrap();

        assert!(ctx
            .repos
            .schedules
            .find_active_by_user(&profile.id)
            .await
            .is_empty());
        assert!(ctx.repos.schedules.list_due_candidates().await.is_empty());
        assert_eq!(
            ctx.repos.schedules.find(&schedule.id).await.unwrap().status,
            ScheduleStatus::Paused
        );
    }

    #[tokio::test]
    async fn pause_all_for_user() {
        let ctx = setup_context_inmemory();
        let profile = Profile::new("owner@example.com".into());
        ctx.repos.profiles.insert(&profile).await.unwrap();

        let s1 = schedule_for(&profile);
        let mut s2 = schedule_for(&profile);
        s2.status = ScheduleStatus::Paused;
        ctx.repos.schedules.insert(&s1).await.unwrap();
        ctx.repos.schedules.insert(&s2).await.unwrap();

        let changed = ctx
            .repos
            .schedules
            .pause_all_for_user(&profile.id)
            .await
            .unwrap();
        // Already paused schedules are left alone
        assert_eq!(changed, 1);
        assert!(ctx
            .repos
            .schedules
            .find_active_by_user(&profile.id)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn newest_first_ordering() {
        let ctx = setup_context_inmemory();
        let profile = Profile::new("owner@example.com".into());
        ctx.repos.profiles.insert(&profile).await.unwrap();

        let mut s1 = schedule_for(&profile);
        let mut s2 = schedule_for(&profile);
        s1.created_at = s1.created_at - chrono::Duration::minutes(5);
        s2.created_at = s2.created_at + chrono::Duration::minutes(5);
        ctx.repos.schedules.insert(&s1).await.unwrap();
        ctx.repos.schedules.insert(&s2).await.unwrap();

        let by_user = ctx.repos.schedules.find_by_user(&profile.id).await;
        assert_eq!(by_user[0].id, s2.id);
        assert_eq!(by_user[1].id, s1.id);
    }
}
