use crate::dtos::SubscriptionDTO;
use digestly_domain::{SubscriptionTier, ID};
use serde::{Deserialize, Serialize};

pub mod get_subscription {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscription: SubscriptionDTO,
    }

    impl APIResponse {
        pub fn new(subscription: SubscriptionDTO) -> Self {
            Self { subscription }
        }
    }
}

pub mod update_subscription {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub tier: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub tier: SubscriptionTier,
        /// Schedules auto-paused because they exceeded the new tier's limit
        pub paused_schedules: Vec<ID>,
    }
}
