use super::IScheduleRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use digestly_domain::{Schedule, ScheduleStatus, ID};

pub struct InMemoryScheduleRepo {
    schedules: std::sync::Mutex<Vec<Schedule>>,
}

impl InMemoryScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for InMemoryScheduleRepo {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()> {
        save(schedule, &self.schedules);
        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> Option<Schedule> {
        find(schedule_id, &self.schedules)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Schedule> {
        let mut schedules = find_by(&self.schedules, |schedule| schedule.user_id == *user_id);
        schedules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        schedules
    }

    async fn find_active_by_user(&self, user_id: &ID) -> Vec<Schedule> {
        find_by(&self.schedules, |schedule| {
            schedule.user_id == *user_id && schedule.status == ScheduleStatus::Active
        })
    }

    async fn list_due_candidates(&self) -> Vec<Schedule> {
        find_by(&self.schedules, |schedule| {
            schedule.status == ScheduleStatus::Active
        })
    }

    async fn set_status(&self, schedule_id: &ID, status: ScheduleStatus) -> anyhow::Result<()> {
        update_many(
            &self.schedules,
            |schedule| schedule.id == *schedule_id,
            |schedule| schedule.status = status,
        );
        Ok(())
    }

    async fn pause_all_for_user(&self, user_id: &ID) -> anyhow::Result<u64> {
        let changed = update_many(
            &self.schedules,
            |schedule| {
                schedule.user_id == *user_id && schedule.status != ScheduleStatus::Paused
            },
            |schedule| schedule.status = ScheduleStatus::Paused,
        );
        Ok(changed)
    }

    async fn delete(&self, schedule_id: &ID) -> Option<Schedule> {
        delete(schedule_id, &self.schedules)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.schedules, |schedule| schedule.user_id == *user_id);
        Ok(res)
    }
}
