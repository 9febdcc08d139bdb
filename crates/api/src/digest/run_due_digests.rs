use super::dispatch::{dispatch_schedule, DispatchResult};
use crate::error::DigestlyError;
use crate::shared::auth::protect_cron_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use digestly_api_structs::run_due_digests::APIResponse;
use digestly_api_structs::dtos::DueWindowDTO;
use digestly_domain::{select_due, DueWindow, TimeOfDay};
use digestly_infra::DigestlyContext;
use tracing::{info, warn};

pub async fn run_due_digests_controller(
    http_req: HttpRequest,
    ctx: web::Data<DigestlyContext>,
) -> Result<HttpResponse, DigestlyError> {
    protect_cron_route(&http_req, &ctx)?;

    let usecase = RunDueDigestsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                message: "Scheduled digests processed".into(),
                processed: summary.processed,
                sent: summary.sent,
                skipped: summary.skipped,
                failed: summary.failed,
                window: DueWindowDTO {
                    start: summary.window.start.to_string(),
                    end: summary.window.end.to_string(),
                },
            })
        })
        .map_err(DigestlyError::from)
}

#[derive(Debug)]
pub struct RunDueDigestsUseCase {}

#[derive(Debug)]
pub struct RunSummary {
    pub processed: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub window: DueWindow,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for DigestlyError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunDueDigestsUseCase {
    type Response = RunSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RunDueDigests";

    async fn execute(&mut self, ctx: &DigestlyContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_utc_datetime();
        let lookback_minutes = ctx.config.due_lookback_minutes;
        let window = DueWindow::ending_at(TimeOfDay::from(now.time()), lookback_minutes);

        let candidates = ctx.repos.schedules.list_due_candidates().await;
        let due = select_due(now, candidates, lookback_minutes);

        let mut summary = RunSummary {
            processed: due.len(),
            sent: 0,
            skipped: 0,
            failed: 0,
            window,
        };

        // Schedules are dispatched one at a time, one bad schedule
        // must not take down the rest of the batch
        for schedule in &due {
            match dispatch_schedule(schedule, ctx).await {
                DispatchResult::Sent => summary.sent += 1,
                DispatchResult::Skipped(reason) => {
                    summary.skipped += 1;
                    info!(
                        schedule_id = %schedule.id,
                        "Digest skipped: {}", reason
                    );
                }
                DispatchResult::Failed(reason) => {
                    summary.failed += 1;
                    warn!(
                        schedule_id = %schedule.id,
                        "Digest dispatch failed: {}", reason
                    );
                }
            }
        }

        info!(
            processed = summary.processed,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "Finished digest run"
        );

        Ok(summary)
    }
}
