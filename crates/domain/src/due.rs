use crate::schedule::{Schedule, TimeOfDay};
use chrono::prelude::*;

/// The time-of-day window `[start, end]` that due-selection matches
/// against. Computed per run, never persisted.
///
/// The window deliberately does not wrap across midnight: the start is
/// obtained by subtracting the lookback from `now` and reducing the
/// result to a time of day, so a lookback reaching past midnight
/// produces `start > end` and such a window matches nothing. This
/// reproduces the behavior of the string-compared `HH:MM` window in
/// the original cron query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl DueWindow {
    pub fn ending_at(end: TimeOfDay, lookback_minutes: i64) -> Self {
        let start =
            TimeOfDay::from_minutes_of_day(end.minutes_from_midnight() - lookback_minutes);
        Self { start, end }
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Selects the subset of `schedules` that are due for execution at
/// `now`: active, inside their calendar date range, and with a time of
/// day inside the lookback window. Pure, no ordering guarantees.
///
/// The lookback tolerates the periodic trigger firing late or at
/// irregular intervals, at the cost of precision.
pub fn select_due(
    now: DateTime<Utc>,
    schedules: Vec<Schedule>,
    lookback_minutes: i64,
) -> Vec<Schedule> {
    let today = now.date_naive();
    let window = DueWindow::ending_at(TimeOfDay::from(now.time()), lookback_minutes);

    schedules
        .into_iter()
        .filter(|schedule| {
            schedule.is_active()
                && schedule.date_range_contains(today)
                && window.contains(schedule.time_of_day)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Frequency, ScheduleStatus};
    use crate::shared::entity::ID;
    use chrono_tz::UTC;

    fn schedule_at(time_of_day: &str) -> Schedule {
        Schedule::new(
            ID::new(),
            "db-1".into(),
            "user@example.com".into(),
            Frequency::Daily,
            time_of_day.parse().unwrap(),
            &UTC,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn at(datetime: &str) -> DateTime<Utc> {
        datetime.parse().unwrap()
    }

    #[test]
    fn selects_schedule_inside_window() {
        let schedules = vec![schedule_at("08:30")];
        let due = select_due(at("2024-05-15T09:00:00Z"), schedules, 60);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let schedules = vec![schedule_at("08:00"), schedule_at("09:00")];
        let due = select_due(at("2024-05-15T09:00:00Z"), schedules, 60);
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn excludes_schedule_outside_window() {
        let schedules = vec![schedule_at("07:59"), schedule_at("09:01")];
        let due = select_due(at("2024-05-15T09:00:00Z"), schedules, 60);
        assert!(due.is_empty());
    }

    #[test]
    fn excludes_paused_schedule() {
        let mut schedule = schedule_at("08:30");
        schedule.status = ScheduleStatus::Paused;
        let due = select_due(at("2024-05-15T09:00:00Z"), vec![schedule], 60);
        assert!(due.is_empty());
    }

    #[test]
    fn excludes_schedule_past_end_date() {
        let mut schedule = schedule_at("08:30");
        schedule.end_date = Some(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
        let due = select_due(at("2024-05-15T09:00:00Z"), vec![schedule], 60);
        assert!(due.is_empty());
    }

    #[test]
    fn excludes_schedule_before_start_date() {
        let mut schedule = schedule_at("08:30");
        schedule.start_date = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let due = select_due(at("2024-05-15T09:00:00Z"), vec![schedule], 60);
        assert!(due.is_empty());
    }

    #[test]
    fn includes_schedule_on_end_date() {
        let mut schedule = schedule_at("08:30");
        schedule.end_date = Some(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        let due = select_due(at("2024-05-15T09:00:00Z"), vec![schedule], 60);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn window_wrapping_midnight_matches_nothing() {
        // 00:10 with a 24h lookback: the window start reduces to 00:10
        // the previous day, which as a time of day is "later" than the
        // end. Known limitation carried over from the original.
        let window = DueWindow::ending_at("00:10".parse().unwrap(), 24 * 60);
        assert_eq!(window.start, "00:10".parse().unwrap());

        let schedules = vec![schedule_at("23:50"), schedule_at("00:05")];
        let due = select_due(at("2024-05-15T00:10:00Z"), schedules, 30);
        assert!(due.is_empty());
    }

    #[test]
    fn full_day_window_catches_earlier_times() {
        // A 24h lookback late in the day behaves like "everything due
        // today so far".
        let schedules = vec![
            schedule_at("00:00"),
            schedule_at("08:15"),
            schedule_at("22:00"),
        ];
        let due = select_due(at("2024-05-15T23:00:00Z"), schedules, 23 * 60);
        assert_eq!(due.len(), 3);
    }
}
