use crate::schedule::Schedule;
use crate::shared::entity::ID;
use crate::subscription::{DigestLimit, TierPlan};

/// Admission check for any mutation that would make a schedule active,
/// creation included. `active_count_excluding_target` is the owner's
/// current number of active schedules not counting the schedule being
/// activated, read fresh from storage right before the decision.
pub fn can_activate(plan: &TierPlan, active_count_excluding_target: usize) -> bool {
    match plan.max_digests {
        DigestLimit::Unlimited => true,
        DigestLimit::Limited(max) => active_count_excluding_target < max,
    }
}

/// Schedules to auto-pause after an owner's effective limit shrank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub to_pause: Vec<ID>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.to_pause.is_empty()
    }
}

/// Computes which of the owner's active schedules to pause so that at
/// most `plan.max_digests` stay active. The oldest-created schedules
/// are kept, ties on `created_at` are broken by schedule id so that
/// repeated runs over the same input select the same set.
///
/// Pure. The caller persists the pauses best-effort, one schedule at a
/// time.
pub fn reconcile_after_tier_change(
    plan: &TierPlan,
    active_schedules: &[Schedule],
) -> Reconciliation {
    let max = match plan.max_digests {
        DigestLimit::Unlimited => {
            return Reconciliation {
                to_pause: Vec::new(),
            }
        }
        DigestLimit::Limited(max) => max,
    };

    let mut ordered: Vec<&Schedule> = active_schedules.iter().collect();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    Reconciliation {
        to_pause: ordered
            .into_iter()
            .skip(max)
            .map(|schedule| schedule.id.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Frequency;
    use crate::subscription::SubscriptionTier;
    use chrono::{Duration, NaiveDate, Utc};

    fn schedule_created_at(offset_mins: i64) -> Schedule {
        let mut schedule = Schedule::new(
            ID::new(),
            "db-1".into(),
            "user@example.com".into(),
            Frequency::Daily,
            "09:00".parse().unwrap(),
            &chrono_tz::UTC,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        schedule.created_at = Utc::now() + Duration::minutes(offset_mins);
        schedule
    }

    fn limited_plan(max: usize) -> TierPlan {
        let mut plan = TierPlan::for_tier(SubscriptionTier::Free);
        plan.max_digests = DigestLimit::Limited(max);
        plan
    }

    #[test]
    fn admits_below_limit_rejects_at_limit() {
        let plan = limited_plan(3);
        for count in 0..3 {
            assert!(can_activate(&plan, count));
        }
        assert!(!can_activate(&plan, 3));
        assert!(!can_activate(&plan, 4));
        assert!(!can_activate(&plan, 100));
    }

    #[test]
    fn unlimited_always_admits() {
        let plan = TierPlan::for_tier(SubscriptionTier::Enterprise);
        for count in &[0, 1, 3, 1000] {
            assert!(can_activate(&plan, *count));
        }
    }

    #[test]
    fn pauses_newest_excess_keeps_oldest() {
        let s1 = schedule_created_at(0);
        let s2 = schedule_created_at(1);
        let s3 = schedule_created_at(2);

        // Shuffled input order must not matter
        let res = reconcile_after_tier_change(
            &limited_plan(2),
            &[s3.clone(), s1.clone(), s2.clone()],
        );
        assert_eq!(res.to_pause, vec![s3.id.clone()]);

        // Idempotent on the same input
        let res2 = reconcile_after_tier_change(&limited_plan(2), &[s3, s1, s2]);
        assert_eq!(res, res2);
    }

    #[test]
    fn no_excess_is_a_noop() {
        let s1 = schedule_created_at(0);
        let s2 = schedule_created_at(1);
        let res = reconcile_after_tier_change(&limited_plan(3), &[s1, s2]);
        assert!(res.is_noop());
    }

    #[test]
    fn unlimited_plan_never_pauses() {
        let schedules: Vec<_> = (0..10).map(schedule_created_at).collect();
        let plan = TierPlan::for_tier(SubscriptionTier::Enterprise);
        assert!(reconcile_after_tier_change(&plan, &schedules).is_noop());
    }

    #[test]
    fn created_at_ties_break_on_id() {
        let mut s1 = schedule_created_at(0);
        let mut s2 = schedule_created_at(0);
        let ts = Utc::now();
        s1.created_at = ts;
        s2.created_at = ts;

        let res_a = reconcile_after_tier_change(&limited_plan(1), &[s1.clone(), s2.clone()]);
        let res_b = reconcile_after_tier_change(&limited_plan(1), &[s2.clone(), s1.clone()]);
        assert_eq!(res_a, res_b);
        assert_eq!(res_a.to_pause.len(), 1);

        let expected = if s1.id < s2.id { s2.id } else { s1.id };
        assert_eq!(res_a.to_pause[0], expected);
    }

    #[test]
    fn limit_zero_pauses_everything() {
        let s1 = schedule_created_at(0);
        let s2 = schedule_created_at(1);
        let res = reconcile_after_tier_change(&limited_plan(0), &[s1.clone(), s2.clone()]);
        assert_eq!(res.to_pause, vec![s1.id, s2.id]);
    }
}
