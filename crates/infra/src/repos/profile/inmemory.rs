use super::IProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use digestly_domain::{Profile, SubscriptionTier, ID};

pub struct InMemoryProfileRepo {
    profiles: std::sync::Mutex<Vec<Profile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for InMemoryProfileRepo {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()> {
        insert(profile, &self.profiles);
        Ok(())
    }

    async fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        save(profile, &self.profiles);
        Ok(())
    }

    async fn find(&self, profile_id: &ID) -> Option<Profile> {
        find(profile_id, &self.profiles)
    }

    async fn find_by_email(&self, email: &str) -> Option<Profile> {
        find_by(&self.profiles, |profile| profile.email == email)
            .into_iter()
            .next()
    }

    async fn set_credential(
        &self,
        profile_id: &ID,
        credential: Option<&str>,
    ) -> anyhow::Result<()> {
        update_many(
            &self.profiles,
            |profile| profile.id == *profile_id,
            |profile| profile.notion_access_token = credential.map(|c| c.to_string()),
        );
        Ok(())
    }

    async fn set_tier(&self, profile_id: &ID, tier: SubscriptionTier) -> anyhow::Result<()> {
        update_many(
            &self.profiles,
            |profile| profile.id == *profile_id,
            |profile| profile.tier = tier,
        );
        Ok(())
    }

    async fn delete(&self, profile_id: &ID) -> Option<Profile> {
        delete(profile_id, &self.profiles)
    }
}
