use crate::error::DigestlyError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use chrono_tz::Tz;
use digestly_api_structs::update_schedule::{APIResponse, PathParams, RequestBody};
use digestly_domain::{
    is_valid_email, Frequency, Schedule, SubscriptionTier, TierPlan, TimeOfDay, ID,
};
use digestly_infra::DigestlyContext;

pub async fn update_schedule_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateScheduleUseCase {
        user_id: path_params.user_id.clone(),
        schedule_id: path_params.schedule_id.clone(),
        recipient: body.recipient,
        frequency: body.frequency,
        time_of_day: body.time_of_day,
        timezone: body.timezone,
        start_date: body.start_date,
        end_date: body.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct UpdateScheduleUseCase {
    pub user_id: ID,
    pub schedule_id: ID,
    pub recipient: Option<String>,
    pub frequency: Option<String>,
    pub time_of_day: Option<String>,
    pub timezone: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
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
    StorageError,
}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
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
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateScheduleUseCase {
    type Response = Schedule;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSchedule";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let mut schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) if schedule.user_id == self.user_id => schedule,
            _ => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };
        let user = ctx
            .repos
            .profiles
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        if let Some(recipient) = &self.recipient {
            if !is_valid_email(recipient) {
                return Err(UseCaseError::InvalidRecipient(recipient.clone()));
            }
            schedule.recipient = recipient.clone();
        }
        if let Some(frequency) = &self.frequency {
            let frequency = frequency
                .parse::<Frequency>()
                .map_err(|_| UseCaseError::InvalidFrequency(frequency.clone()))?;
            let plan = TierPlan::for_tier(user.tier);
            if !plan.allows_frequency(frequency) {
                return Err(UseCaseError::FrequencyNotAllowed {
                    tier: plan.tier,
                    frequency,
                });
            }
            schedule.frequency = frequency;
        }
        if let Some(time_of_day) = &self.time_of_day {
            schedule.time_of_day = time_of_day
                .parse::<TimeOfDay>()
                .map_err(|_| UseCaseError::InvalidTimeOfDay(time_of_day.clone()))?;
        }
        if let Some(timezone) = &self.timezone {
            schedule.timezone = timezone
                .parse::<Tz>()
                .map_err(|_| UseCaseError::InvalidTimezone(timezone.clone()))?;
        }
        if let Some(start_date) = &self.start_date {
            schedule.start_date = parse_date(start_date)?;
        }
        if let Some(end_date) = &self.end_date {
            // An empty string clears the end date
            schedule.end_date = if end_date.is_empty() {
                None
            } else {
                Some(parse_date(end_date)?)
            };
        }
        if let Some(end_date) = schedule.end_date {
            if end_date < schedule.start_date {
                return Err(UseCaseError::InvalidDateRange);
            }
        }

        ctx.repos
            .schedules
            .save(&schedule)
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

    async fn seeded(ctx: &DigestlyContext) -> Schedule {
        let owner = Profile::new("owner@digestly.io".into());
        ctx.repos.profiles.insert(&owner).await.unwrap();
        let schedule = Schedule::new(
            owner.id.clone(),
            "db-1".into(),
            "reader@digestly.io".into(),
            Frequency::Daily,
            "09:00".parse().unwrap(),
            &chrono_tz::UTC,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();
        schedule
    }

    fn noop_usecase(schedule: &Schedule) -> UpdateScheduleUseCase {
        UpdateScheduleUseCase {
            user_id: schedule.user_id.clone(),
            schedule_id: schedule.id.clone(),
            recipient: None,
            frequency: None,
            time_of_day: None,
            timezone: None,
            start_date: None,
            end_date: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn updates_only_the_provided_fields() {
        let ctx = setup_context_inmemory();
        let schedule = seeded(&ctx).await;

        let mut usecase = noop_usecase(&schedule);
        usecase.time_of_day = Some("17:45".into());
        usecase.end_date = Some("2026-06-30".into());
        let updated = usecase.execute(&ctx).await.unwrap();

        assert_eq!(updated.time_of_day.to_string(), "17:45");
        assert_eq!(
            updated.end_date,
            Some(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap())
        );
        assert_eq!(updated.recipient, schedule.recipient);
        assert_eq!(updated.timezone, schedule.timezone);
    }

    #[actix_web::main]
    #[test]
    async fn empty_end_date_clears_it() {
        let ctx = setup_context_inmemory();
        let schedule = seeded(&ctx).await;

        let mut usecase = noop_usecase(&schedule);
        usecase.end_date = Some("2026-06-30".into());
        usecase.execute(&ctx).await.unwrap();

        let mut usecase = noop_usecase(&schedule);
        usecase.end_date = Some("".into());
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.end_date, None);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_frequency_outside_the_tier() {
        let ctx = setup_context_inmemory();
        let schedule = seeded(&ctx).await;

        let mut usecase = noop_usecase(&schedule);
        usecase.frequency = Some("monthly".into());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::FrequencyNotAllowed { .. })
        ));

        let mut usecase = noop_usecase(&schedule);
        usecase.frequency = Some("weekly".into());
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.frequency, Frequency::Weekly);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_end_date_before_start_date() {
        let ctx = setup_context_inmemory();
        let schedule = seeded(&ctx).await;

        let mut usecase = noop_usecase(&schedule);
        usecase.end_date = Some("2025-12-31".into());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDateRange)
        ));
    }
}
