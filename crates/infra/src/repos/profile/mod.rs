mod inmemory;
mod postgres;

use digestly_domain::{Profile, SubscriptionTier, ID};
pub use inmemory::InMemoryProfileRepo;
pub use postgres::PostgresProfileRepo;

#[async_trait::async_trait]
pub trait IProfileRepo: Send + Sync {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()>;
    async fn save(&self, profile: &Profile) -> anyhow::Result<()>;
    async fn find(&self, profile_id: &ID) -> Option<Profile>;
    async fn find_by_email(&self, email: &str) -> Option<Profile>;
    /// `None` clears the credential (integration disconnected)
    async fn set_credential(&self, profile_id: &ID, credential: Option<&str>)
        -> anyhow::Result<()>;
    async fn set_tier(&self, profile_id: &ID, tier: SubscriptionTier) -> anyhow::Result<()>;
    async fn delete(&self, profile_id: &ID) -> Option<Profile>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use digestly_domain::{Profile, SubscriptionTier};

    #[tokio::test]
    async fn create_update_and_delete() {
        let ctx = setup_context_inmemory();
        let profile = Profile::new("owner@example.com".into());
        assert!(ctx.repos.profiles.insert(&profile).await.is_ok());

        let found = ctx.repos.profiles.find(&profile.id).await.unwrap();
        assert_eq!(found.email, "owner@example.com");
        assert_eq!(found.tier, SubscriptionTier::Free);
        assert!(!found.is_connected());

        let by_email = ctx
            .repos
            .profiles
            .find_by_email("owner@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.id, profile.id);

        ctx.repos
            .profiles
            .set_credential(&profile.id, Some("secret-token"))
            .await
            .unwrap();
        assert!(ctx
            .repos
            .profiles
            .find(&profile.id)
            .await
            .unwrap()
            .is_connected());

        ctx.repos
            .profiles
            .set_credential(&profile.id, None)
            .await
            .unwrap();
        assert!(!ctx
            .repos
            .profiles
            .find(&profile.id)
            .await
            .unwrap()
            .is_connected());

        ctx.repos
            .profiles
            .set_tier(&profile.id, SubscriptionTier::Pro)
            .await
            .unwrap();
        assert_eq!(
            ctx.repos.profiles.find(&profile.id).await.unwrap().tier,
            SubscriptionTier::Pro
        );

        assert!(ctx.repos.profiles.delete(&profile.id).await.is_some());
        assert!(ctx.repos.profiles.find(&profile.id).await.is_none());
    }
}
