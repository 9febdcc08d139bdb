use chrono::{DateTime, NaiveDate, Utc};
use digestly_domain::{Frequency, Schedule, ScheduleStatus, TimeOfDay, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDTO {
    pub id: ID,
    pub user_id: ID,
    pub source_id: String,
    pub recipient: String,
    pub frequency: Frequency,
    pub time_of_day: TimeOfDay,
    pub timezone: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

impl ScheduleDTO {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            id: schedule.id.clone(),
            user_id: schedule.user_id.clone(),
            source_id: schedule.source_id,
            recipient: schedule.recipient,
            frequency: schedule.frequency,
            time_of_day: schedule.time_of_day,
            timezone: schedule.timezone.to_string(),
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            status: schedule.status,
            created_at: schedule.created_at,
        }
    }
}
