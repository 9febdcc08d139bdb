mod digest;
mod due;
mod profile;
mod quota;
mod schedule;
mod shared;
mod subscription;

pub use digest::{render_digest_table, CellValue, DigestRow, DIGEST_EMAIL_SUBJECT};
pub use due::{select_due, DueWindow};
pub use profile::Profile;
pub use quota::{can_activate, reconcile_after_tier_change, Reconciliation};
pub use schedule::{Frequency, InvalidTimeOfDayError, Schedule, ScheduleStatus, TimeOfDay};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::validation::is_valid_email;
pub use subscription::{DigestLimit, SubscriptionTier, TierPlan};
