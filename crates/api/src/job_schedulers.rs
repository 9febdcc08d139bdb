use crate::digest::run_due_digests::RunDueDigestsUseCase;
use crate::shared::usecase::execute;
use digestly_infra::DigestlyContext;
use std::time::Duration;
use tokio::time::{interval, sleep};

/// Number of seconds to wait until the next minute boundary, minus
/// `secs_before_min`, so that repeated runs stay aligned to the clock
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// In-process fallback trigger for deployments without an external
/// cron hitting the dispatch route. Runs the same batch usecase on a
/// fixed interval.
pub fn start_digest_job_scheduler(ctx: DigestlyContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut job_interval = interval(Duration::from_secs(ctx.config.digest_job_interval_secs));
        loop {
            job_interval.tick().await;

            let usecase = RunDueDigestsUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}
