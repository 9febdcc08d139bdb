use crate::dtos::{DispatchResultDTO, DueWindowDTO};
use digestly_domain::ID;
use serde::{Deserialize, Serialize};

pub mod run_due_digests {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub processed: usize,
        pub sent: usize,
        pub skipped: usize,
        pub failed: usize,
        pub window: DueWindowDTO,
    }
}

pub mod send_digest {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub schedule_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub result: DispatchResultDTO,
    }
}
