use digestly_domain::{Profile, SubscriptionTier, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub tier: SubscriptionTier,
    pub connected: bool,
}

impl UserDTO {
    pub fn new(profile: Profile) -> Self {
        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            tier: profile.tier,
            connected: profile.is_connected(),
        }
    }
}
