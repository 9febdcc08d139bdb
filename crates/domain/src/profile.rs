use crate::shared::entity::{Entity, ID};
use crate::subscription::SubscriptionTier;

/// One registered user: holds the external-service credential and the
/// subscription tier. An absent credential means the integration is
/// disconnected, which is a valid, expected state.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ID,
    pub email: String,
    pub notion_access_token: Option<String>,
    pub tier: SubscriptionTier,
}

impl Profile {
    pub fn new(email: String) -> Self {
        Self {
            id: Default::default(),
            email,
            notion_access_token: None,
            tier: SubscriptionTier::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.notion_access_token.is_some()
    }
}

impl Entity for Profile {
    fn id(&self) -> &ID {
        &self.id
    }
}
