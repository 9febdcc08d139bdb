use super::IProfileRepo;
use digestly_domain::{Profile, SubscriptionTier, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresProfileRepo {
    pool: PgPool,
}

impl PostgresProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRaw {
    profile_uid: Uuid,
    email: String,
    notion_access_token: Option<String>,
    tier: String,
}

impl From<ProfileRaw> for Profile {
    fn from(raw: ProfileRaw) -> Self {
        Self {
            id: raw.profile_uid.into(),
            email: raw.email,
            notion_access_token: raw.notion_access_token,
            tier: raw.tier.parse().unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for PostgresProfileRepo {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles(profile_uid, email, notion_access_token, tier)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(&profile.email)
        .bind(&profile.notion_access_token)
        .bind(profile.tier.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET email = $2,
                notion_access_token = $3,
                tier = $4
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(&profile.email)
        .bind(&profile.notion_access_token)
        .bind(profile.tier.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, profile_id: &ID) -> Option<Profile> {
        let profile: ProfileRaw = match sqlx::query_as(
            r#"
            SELECT * FROM profiles
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(profile) => profile,
            Err(_) => return None,
        };
        Some(profile.into())
    }

    async fn find_by_email(&self, email: &str) -> Option<Profile> {
        let profile: ProfileRaw = match sqlx::query_as(
            r#"
            SELECT * FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        {
            Ok(profile) => profile,
            Err(_) => return None,
        };
        Some(profile.into())
    }

    async fn set_credential(
        &self,
        profile_id: &ID,
        credential: Option<&str>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET notion_access_token = $2
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile_id.inner_ref())
        .bind(credential)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_tier(&self, profile_id: &ID, tier: SubscriptionTier) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET tier = $2
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile_id.inner_ref())
        .bind(tier.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, profile_id: &ID) -> Option<Profile> {
        let profile: ProfileRaw = match sqlx::query_as(
            r#"
            DELETE FROM profiles
            WHERE profile_uid = $1
            RETURNING *
            "#,
        )
        .bind(profile_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(profile) => profile,
            Err(_) => return None,
        };
        Some(profile.into())
    }
}
