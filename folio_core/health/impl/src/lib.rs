use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_email_contracts::EmailService;
use folio_shared_contracts::time::TimeService;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: HealthFeatureConfig,
    last_check: Arc<Mutex<Option<Check>>>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    /// How long a check result is reused before the SMTP server is pinged
    /// again.
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Check {
    status: HealthStatus,
    at: DateTime<Utc>,
}

impl Check {
    /// A TTL too large to add to the check time never expires.
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| self.at.checked_add_signed(ttl))
            .map_or(true, |expires_at| now < expires_at)
    }
}

impl<Time, Email> HealthFeatureServiceImpl<Time, Email> {
    pub fn new(time: Time, email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            email,
            config,
            last_check: Default::default(),
        }
    }
}

impl<Time, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        // Held across the check, so concurrent callers share one ping.
        let mut last_check = self.last_check.lock().await;

        let now = self.time.now();
        if let Some(check) = *last_check {
            if check.is_fresh(now, self.config.cache_ttl) {
                return check.status;
            }
        }

        let status = HealthStatus {
            email: self.check_email().await,
        };
        *last_check = Some(Check { status, at: now });
        status
    }
}

impl<Time, Email> HealthFeatureServiceImpl<Time, Email>
where
    Email: EmailService,
{
    async fn check_email(&self) -> bool {
        match self.email.ping().await {
            Ok(()) => true,
            Err(err) => {
                error!("SMTP health check failed: {err:#}");
                false
            }
        }
    }
}
