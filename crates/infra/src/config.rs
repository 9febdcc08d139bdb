use digestly_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code protecting the admin HTTP routes
    pub api_secret_code: String,
    /// Secret code protecting the cron trigger route
    pub cron_api_key: String,
    /// API key for the email sender. Sends will fail if unset.
    pub resend_api_key: Option<String>,
    /// Port for the application to run on
    pub port: usize,
    /// Maximum number of rows fetched from the row source per digest
    pub digest_row_limit: usize,
    /// Size in minutes of the due-detection lookback window. The
    /// default of 24 hours suits a once-per-day cron; deploys that
    /// trigger more often can shrink it.
    pub due_lookback_minutes: i64,
    /// Seconds between runs of the in-process digest job
    pub digest_job_interval_secs: u64,
    /// Upper bound for each call a dispatch makes: credential lookup,
    /// row fetch and email send
    pub external_call_timeout_secs: u64,
}

fn secret_from_env(var: &str) -> String {
    match std::env::var(var) {
        Ok(code) => code,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                var
            );
            let code = create_random_secret(16);
            info!("Secret code for {} was generated and set to: {}", var, code);
            code
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let api_secret_code = secret_from_env("API_SECRET_CODE");
        let cron_api_key = secret_from_env("CRON_API_KEY");

        let resend_api_key = std::env::var("RESEND_API_KEY").ok();
        if resend_api_key.is_none() {
            warn!("RESEND_API_KEY is not set, digest emails cannot be delivered.");
        }

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let due_lookback_minutes = std::env::var("DUE_LOOKBACK_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24 * 60);

        Self {
            api_secret_code,
            cron_api_key,
            resend_api_key,
            port,
            digest_row_limit: 20,
            due_lookback_minutes,
            digest_job_interval_secs: 15 * 60,
            external_call_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
