use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use chrono_tz::Tz;
use digestly_api_structs::create_schedule::{APIResponse, PathParams, RequestBody};
use digestly_domain::{
    can_activate, is_valid_email, DigestLimit, Frequency, Schedule, SubscriptionTier, TierPlan,
    TimeOfDay, ID,
};
use digestly_infra::DigestlyContext;

pub async fn create_schedule_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateScheduleUseCase {
        user_id: path_params.user_id.clone(),
        source_id: body.source_id,
        recipient: body.recipient,
        frequency: body.frequency,
        time_of_day: body.time_of_day,
        timezone: body.timezone,
        start_date: body.start_date,
        end_date: body.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Created().json(APIResponse::new(schedule)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct CreateScheduleUseCase {
    pub user_id: ID,
    pub source_id: String,
    pub recipient: String,
    pub frequency: String,
    pub time_of_day: String,
    pub timezone: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    InvalidRecipient(String),
    InvalidFrequency(String),
    FrequencyNotAllowed {
        tier: SubscriptionTier,
        frequency: Frequency,
    },
    InvalidTimeOfDay(String),
    InvalidTimezone(String),
    InvalidDate(String),
    InvalidDateRange,
    QuotaExceeded {
        limit: usize,
    },
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::InvalidRecipient(recipient) => Self::BadClientData(format!(
                "Invalid recipient email address: {}",
                recipient
            )),
            UseCaseError::InvalidFrequency(frequency) => Self::BadClientData(format!(
                "Invalid frequency: {}, expected one of daily, weekly, monthly or custom",
                frequency
            )),
            UseCaseError::FrequencyNotAllowed { tier, frequency } => Self::BadClientData(format!(
                "The {} frequency is not available on the {} tier",
                frequency, tier
            )),
            UseCaseError::InvalidTimeOfDay(time_of_day) => Self::BadClientData(format!(
                "Invalid time of day: {}, expected the format HH:MM",
                time_of_day
            )),
            UseCaseError::InvalidTimezone(timezone) => Self::BadClientData(format!(
                "Invalid timezone: {}, expected an IANA timezone name",
                timezone
            )),
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date: {}, expected the format YYYY-MM-DD",
                date
            )),
            UseCaseError::InvalidDateRange => {
                Self::BadClientData("The end date cannot be before the start date".into())
            }
            UseCaseError::QuotaExceeded { limit } => Self::QuotaExceeded { limit },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateScheduleUseCase {
    type Response = Schedule;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSchedule";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        if !is_valid_email(&self.recipient) {
            return Err(UseCaseError::InvalidRecipient(self.recipient.clone()));
        }
        let frequency = self
            .frequency
            .parse::<Frequency>()
            .map_err(|_| UseCaseError::InvalidFrequency(self.frequency.clone()))?;
        let time_of_day = self
            .time_of_day
            .parse::<TimeOfDay>()
            .map_err(|_| UseCaseError::InvalidTimeOfDay(self.time_of_day.clone()))?;
        let timezone = self
            .timezone
            .parse::<Tz>()
            .map_err(|_| UseCaseError::InvalidTimezone(self.timezone.clone()))?;
        let start_date = parse_date(&self.start_date)?;
        let end_date = match &self.end_date {
            Some(date) => Some(parse_date(date)?),
            None => None,
        };
        if let Some(end_date) = end_date {
            if end_date < start_date {
                return Err(UseCaseError::InvalidDateRange);
            }
        }

        let plan = TierPlan::for_tier(user.tier);
        if !plan.allows_frequency(frequency) {
            return Err(UseCaseError::FrequencyNotAllowed {
                tier: plan.tier,
                frequency,
            });
        }

        // Count is read fresh right before the decision, a concurrent
        // create can still slip past it
        let active_count = ctx
            .repos
            .schedules
            .find_active_by_user(&self.user_id)
            .await
            .len();
        if !can_activate(&plan, active_count) {
            let limit = match plan.max_digests {
                DigestLimit::Limited(limit) => limit,
                DigestLimit::Unlimited => usize::MAX,
            };
            return Err(UseCaseError::QuotaExceeded { limit });
        }

        let mut schedule = Schedule::new(
            self.user_id.clone(),
            self.source_id.clone(),
            self.recipient.clone(),
            frequency,
            time_of_day,
            &timezone,
            start_date,
        );
        schedule.end_date = end_date;

        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .map(|_| schedule)
            .map_err(|_| UseCaseError::StorageError)
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, UseCaseError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| UseCaseError::InvalidDate(date.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use digestly_domain::Profile;
    use digestly_infra::setup_context_inmemory;

    fn valid_usecase(user_id: ID) -> CreateScheduleUseCase {
        CreateScheduleUseCase {
            user_id,
            source_id: "db-1".into(),
            recipient: "reader@digestly.io".into(),
            frequency: "daily".into(),
            time_of_day: "08:30".into(),
            timezone: "Europe/Oslo".into(),
            start_date: "2026-01-01".into(),
            end_date: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_schedule_for_existing_user() {
        let ctx = setup_context_inmemory();
        let user = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&user).await.unwrap();

        let mut usecase = valid_usecase(user.id.clone());
        let schedule = usecase.execute(&ctx).await.unwrap();
        assert!(schedule.is_active());
        assert_eq!(schedule.user_id, user.id);
        assert_eq!(schedule.end_date, None);

        let stored = ctx.repos.schedules.find(&schedule.id).await.unwrap();
        assert_eq!(stored.recipient, "reader@digestly.io");
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_user() {
        let ctx = setup_context_inmemory();
        let mut usecase = valid_usecase(ID::new());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::UserNotFound(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_fields() {
        let ctx = setup_context_inmemory();
        let user = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&user).await.unwrap();

        let mut usecase = valid_usecase(user.id.clone());
        usecase.recipient = "not-an-email".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidRecipient(_))
        ));

        let mut usecase = valid_usecase(user.id.clone());
        usecase.time_of_day = "8:30".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimeOfDay(_))
        ));

        let mut usecase = valid_usecase(user.id.clone());
        usecase.end_date = Some("2025-12-31".into());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDateRange)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_frequency_outside_the_tier() {
        let ctx = setup_context_inmemory();
        let user = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&user).await.unwrap();

        let mut usecase = valid_usecase(user.id.clone());
        usecase.frequency = "monthly".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::FrequencyNotAllowed { .. })
        ));

        let mut usecase = valid_usecase(user.id.clone());
        usecase.frequency = "weekly".into();
        let schedule = usecase.execute(&ctx).await.unwrap();
        assert_eq!(schedule.frequency, Frequency::Weekly);
    }

    #[actix_web::main]
    #[test]
    async fn enforces_the_active_digest_limit() {
        let ctx = setup_context_inmemory();
        let user = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&user).await.unwrap();

        for _ in 0..3 {
            let mut usecase = valid_usecase(user.id.clone());
            assert!(usecase.execute(&ctx).await.is_ok());
        }

        let mut usecase = valid_usecase(user.id.clone());
        match usecase.execute(&ctx).await {
            Err(UseCaseError::QuotaExceeded { limit }) => assert_eq!(limit, 3),
            res => panic!("Expected quota rejection, got {:?}", res),
        }

        // A paused schedule does not count towards the limit
        let schedules = ctx.repos.schedules.find_by_user(&user.id).await;
        ctx.repos
            .schedules
            .set_status(&schedules[0].id, digestly_domain::ScheduleStatus::Paused)
            .await
            .unwrap();
        let mut usecase = valid_usecase(user.id.clone());
        assert!(usecase.execute(&ctx).await.is_ok());
    }
}
