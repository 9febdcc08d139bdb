use crate::schedule::Frequency;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Enterprise,
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        Self::Free
    }
}

impl Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SubscriptionTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(anyhow::anyhow!("Invalid subscription tier: {}", s)),
        }
    }
}

/// Cap on simultaneously active schedules for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestLimit {
    Limited(usize),
    Unlimited,
}

impl DigestLimit {
    /// Wire representation, unlimited is encoded as -1
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Limited(n) => *n as i64,
            Self::Unlimited => -1,
        }
    }
}

/// Static per-tier capability table. Not user-mutable, looked up by
/// tier name.
#[derive(Debug, Clone)]
pub struct TierPlan {
    pub tier: SubscriptionTier,
    pub max_digests: DigestLimit,
    pub allowed_frequencies: Vec<Frequency>,
    pub custom_templates: bool,
}

impl TierPlan {
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                tier,
                max_digests: DigestLimit::Limited(3),
                allowed_frequencies: vec![Frequency::Daily, Frequency::Weekly],
                custom_templates: false,
            },
            SubscriptionTier::Pro => Self {
                tier,
                max_digests: DigestLimit::Limited(15),
                allowed_frequencies: vec![
                    Frequency::Daily,
                    Frequency::Weekly,
                    Frequency::Monthly,
                ],
                custom_templates: false,
            },
            SubscriptionTier::Enterprise => Self {
                tier,
                max_digests: DigestLimit::Unlimited,
                allowed_frequencies: vec![
                    Frequency::Daily,
                    Frequency::Weekly,
                    Frequency::Monthly,
                    Frequency::Custom,
                ],
                custom_templates: true,
            },
        }
    }

    pub fn allows_frequency(&self, frequency: Frequency) -> bool {
        self.allowed_frequencies.contains(&frequency)
    }
}
