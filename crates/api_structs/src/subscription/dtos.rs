use digestly_domain::{Frequency, SubscriptionTier, TierPlan};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDTO {
    pub tier: SubscriptionTier,
    /// -1 means unlimited
    pub max_digests: i64,
    pub allowed_frequencies: Vec<Frequency>,
    pub custom_templates: bool,
    pub active_digests: usize,
}

impl SubscriptionDTO {
    pub fn new(plan: TierPlan, active_digests: usize) -> Self {
        Self {
            tier: plan.tier,
            max_digests: plan.max_digests.as_i64(),
            allowed_frequencies: plan.allowed_frequencies,
            custom_templates: plan.custom_templates,
            active_digests,
        }
    }
}
